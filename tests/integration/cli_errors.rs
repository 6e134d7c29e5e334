use predicates::prelude::*;
use test_support::{cmd_bin, fixture_cmd, fixture_path, BIN};

#[test]
fn errors_when_no_input() {
  cmd_bin(BIN)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide --snapshot, or both --projects and --surgeries"));
}

#[test]
fn errors_when_split_input_is_half_given() {
  cmd_bin(BIN)
    .args(["--projects", &fixture_path("projects.json")])
    .assert()
    .failure()
    .stderr(predicate::str::contains("must be given together"));
}

#[test]
fn errors_on_ambiguous_input() {
  fixture_cmd()
    .args(["--projects", &fixture_path("projects.json"), "--surgeries", &fixture_path("surgeries.json")])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Ambiguous input"));
}

#[test]
fn errors_on_unknown_zone() {
  cmd_bin(BIN)
    .args(["--snapshot", &fixture_path("snapshot.json"), "--tz", "Mars/Olympus"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--tz").and(predicate::str::contains("unknown time zone")));
}

#[test]
fn errors_on_missing_snapshot_file() {
  cmd_bin(BIN)
    .args(["--snapshot", "/definitely/not/here.json"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("reading snapshot from"));
}

#[test]
fn errors_on_project_view_without_id() {
  fixture_cmd()
    .args(["--view", "project"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--view project requires --project-id"));
}

#[test]
fn errors_on_zero_rows_per_page() {
  fixture_cmd()
    .args(["--view", "export", "--rows-per-page", "0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--rows-per-page must be at least 1"));
}

#[test]
fn errors_on_bad_now_override() {
  cmd_bin(BIN)
    .args(["--snapshot", &fixture_path("snapshot.json"), "--now-override", "yesterday"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid --now-override"));
}

#[test]
fn errors_on_view_all_with_text() {
  fixture_cmd()
    .args(["--view", "all", "--format", "text"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--format text is not supported"));
}
