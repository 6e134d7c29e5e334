use std::path::Path;

use jsonschema::validator_for;
use test_support::{fixture_cmd, read_json_file};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

fn view_json(view: &str, window: &str) -> serde_json::Value {
  let out = fixture_cmd().args(["--view", view, "--window", window]).output().unwrap();
  assert!(out.status.success());
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn table_json_conforms_to_schema() {
  let compiled = compile_schema("surgery-progress-report.table.schema.json");
  for window in ["daily", "weekly", "monthly", "yearly"] {
    let v = view_json("table", window);
    compiled.validate(&v).expect("schema validation failed for table JSON");
  }
}

#[test]
fn export_json_conforms_to_schema() {
  let v = view_json("export", "monthly");
  let compiled = compile_schema("surgery-progress-report.export.schema.json");
  compiled.validate(&v).expect("schema validation failed for export JSON");
}

#[test]
fn bundle_manifest_and_reports_conform_to_schemas() {
  let outdir = tempfile::TempDir::new().unwrap();
  let out_path = outdir.path().to_str().unwrap();

  let out = fixture_cmd().args(["--view", "all", "--out", out_path]).output().unwrap();
  assert!(out.status.success());

  let pointer: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let dir = pointer["dir"].as_str().unwrap();
  let manifest = read_json_file(Path::new(dir).join("manifest.json"));
  compile_schema("surgery-progress-report.manifest.schema.json")
    .validate(&manifest)
    .expect("manifest schema validation failed");

  let table = read_json_file(Path::new(dir).join("report-table.json"));
  compile_schema("surgery-progress-report.table.schema.json")
    .validate(&table)
    .expect("bundled table schema");

  let export = read_json_file(Path::new(dir).join("report-export.json"));
  compile_schema("surgery-progress-report.export.schema.json")
    .validate(&export)
    .expect("bundled export schema");
}
