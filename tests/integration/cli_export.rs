use test_support::fixture_cmd;

fn export(args: &[&str]) -> serde_json::Value {
  let out = fixture_cmd().args(["--view", "export"]).args(args).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn export_rows_use_full_history() {
  // The window is recorded in the header but never filters export counts.
  let v = export(&["--window", "daily"]);
  assert_eq!(v["report"]["header"]["window"], "daily");
  assert_eq!(v["report"]["header"]["generatedAt"], "2025-08-15T12:00:00");
  assert_eq!(
    v["report"]["rows"],
    serde_json::json!([
      ["Lions Club", 5, 4, 1, "—"],
      ["Rotary Trust", 3, 3, 0, "✔"],
      ["Vision NGO", 3, 1, 2, "—"],
      ["Closed Fund", 0, 0, 0, "✔"]
    ])
  );
  assert_eq!(v["report"]["totals"], serde_json::json!(["TOTAL", 11, 8, 3, "—"]));
}

#[test]
fn export_pages_carry_totals_once() {
  let v = export(&["--rows-per-page", "3"]);
  let pages = v["pages"].as_array().unwrap();
  assert_eq!(pages.len(), 2);
  assert_eq!(pages[0]["number"], 1);
  assert_eq!(pages[0]["of"], 2);
  assert_eq!(pages[0]["rows"].as_array().unwrap().len(), 3);
  assert!(pages[0].get("totals").is_none());
  assert_eq!(pages[1]["rows"][0][0], "Closed Fund");
  assert_eq!(pages[1]["totals"][0], "TOTAL");
}

#[test]
fn export_text_lists_pages() {
  let out = fixture_cmd()
    .args(["--view", "export", "--format", "text", "--rows-per-page", "2"])
    .output()
    .unwrap();
  assert!(out.status.success());
  let text = String::from_utf8_lossy(&out.stdout);
  assert!(text.starts_with("Donor report (monthly, generated 2025-08-15T12:00:00)"));
  assert!(text.contains("Page 1 of 2"));
  assert!(text.contains("Page 2 of 2"));
  assert_eq!(text.matches("TOTAL").count(), 1);
}

#[test]
fn export_written_to_out_file() {
  let td = test_support::tempdir();
  let path = td.path().join("exports/donors.json");
  let out = fixture_cmd()
    .args(["--view", "export", "--out", path.to_str().unwrap()])
    .output()
    .unwrap();
  assert!(out.status.success());
  assert!(out.stdout.is_empty());
  let v = test_support::read_json_file(&path);
  assert_eq!(v["report"]["totals"][1], 11);
}
