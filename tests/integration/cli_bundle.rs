use std::path::Path;

use test_support::{fixture_cmd, read_json_file};

#[test]
fn view_all_writes_reports_and_manifest() {
  let td = test_support::tempdir();
  let base = td.path().join("bundle");
  let out = fixture_cmd()
    .args(["--view", "all", "--window", "monthly", "--out", base.to_str().unwrap()])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let pointer: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(pointer["manifest"], "manifest.json");
  let dir = pointer["dir"].as_str().unwrap();
  assert_eq!(Path::new(dir), base.as_path());

  let manifest = read_json_file(Path::new(dir).join("manifest.json"));
  assert_eq!(manifest["generated_at"], "2025-08-15T12:00:00");
  assert_eq!(manifest["window"], "monthly");
  assert_eq!(manifest["zone"], "utc");
  let views: Vec<&str> = manifest["views"]
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["view"].as_str().unwrap())
    .collect();
  assert_eq!(views, ["dashboard", "table", "chart", "export", "portfolio"]);

  for entry in manifest["views"].as_array().unwrap() {
    let file = entry["file"].as_str().unwrap();
    assert_eq!(file, format!("report-{}.json", entry["view"].as_str().unwrap()));
    assert!(Path::new(dir).join(file).exists(), "missing {file}");
  }

  let table = read_json_file(Path::new(dir).join("report-table.json"));
  assert_eq!(table["totals"]["completed"], 6);
}

#[test]
fn view_all_defaults_to_timestamped_temp_dir() {
  let out = fixture_cmd().args(["--view", "all"]).output().unwrap();
  assert!(out.status.success());
  let pointer: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let dir = pointer["dir"].as_str().unwrap();
  assert!(dir.contains("surgery-report-20250815-120000"), "dir was {dir}");
  assert!(Path::new(dir).join("manifest.json").exists());
}
