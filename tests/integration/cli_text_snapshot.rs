use test_support::fixture_cmd;

fn text(args: &[&str]) -> String {
  test_support::init_insta();
  let out = fixture_cmd().args(["--format", "text"]).args(args).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  String::from_utf8_lossy(&out.stdout).trim_end().to_string()
}

#[test]
fn table_text_snapshot() {
  insta::assert_snapshot!(text(&["--view", "table", "--window", "monthly"]), @r"
  Donor progress (monthly, generated 2025-08-15T12:00:00)
  | Donor        | Target | Completed | Incomplete | Status |
  |--------------|--------|-----------|------------|--------|
  | Lions Club   | 5      | 3         | 2          | —      |
  | Rotary Trust | 2      | 2         | 0          | ✔      |
  | Vision NGO   | 3      | 1         | 2          | —      |
  | Closed Fund  | 0      | 0         | 0          | ✔      |
  | TOTAL        | 10     | 6         | 4          | —      |
  ");
}

#[test]
fn chart_text_snapshot() {
  insta::assert_snapshot!(text(&["--view", "chart", "--window", "monthly"]), @r"
  Surgeries by type (monthly)
  | Surgery     | Completed |
  |-------------|-----------|
  | Cataract    | 4         |
  | Glaucoma    | 1         |
  | Retina      | 0         |
  | Cornea      | 1         |
  | Pediatric   | 1         |
  | Oculoplasty | 0         |
  | Refractive  | 0         |
  ");
}

#[test]
fn project_text_snapshot() {
  insta::assert_snapshot!(text(&["--view", "project", "--project-id", "1"]), @r"
  Project Report: Lions Club
  Target: 5  Completed: 4
  | Id | Patient Name | Eye   | Surgery  | Date       | Contact    |
  |----|--------------|-------|----------|------------|------------|
  | 1  | Asha         | Left  | Cataract | 2025-08-15 | 9845000001 |
  | 2  | Ravi         | Right | Glaucoma | 2025-08-12 | 9845000002 |
  | 3  | Meena        | Left  | Cataract | 2025-08-02 | -          |
  | 4  | Gopal        |       | cataract |            | -          |
  ");
}
