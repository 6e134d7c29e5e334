use test_support::fixture_cmd;

#[test]
fn dashboard_combines_summary_chart_and_donors() {
  // Dashboard is the default view.
  let out = fixture_cmd().args(["--window", "weekly"]).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();

  assert_eq!(v["window"], "weekly");
  assert_eq!(
    v["summary"],
    serde_json::json!({"totalDonors": 4, "totalTarget": 10, "completedTarget": 10, "incompleteTarget": 0})
  );
  assert_eq!(v["chart"][0], serde_json::json!({"name": "Cataract", "completed": 3}));
  assert_eq!(v["donors"]["totals"], serde_json::json!({"target": 10, "completed": 5, "remaining": 5}));
}

#[test]
fn portfolio_counts_closed_projects() {
  let out = fixture_cmd().args(["--view", "portfolio"]).output().unwrap();
  assert!(out.status.success());
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["totalProjects"], 4);
  assert_eq!(v["totalBalanceSurgeries"], 10);
  assert_eq!(v["totalAmount"].as_f64().unwrap(), 17500.0);
  assert_eq!(v["completedProjects"], 1);
  assert_eq!(v["incompleteProjects"], 3);
}

#[test]
fn portfolio_text() {
  let out = fixture_cmd().args(["--view", "portfolio", "--format", "text"]).output().unwrap();
  assert!(out.status.success());
  let text = String::from_utf8_lossy(&out.stdout);
  assert!(text.contains("Total amount:             17500.00"));
  assert!(text.contains("Completed projects:       1"));
}
