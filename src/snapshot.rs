// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load an immutable snapshot of projects and surgeries exported from the records API
// role: data-access/loader
// inputs: SnapshotSource (one combined JSON file, or separate projects/surgeries arrays)
// outputs: Snapshot { projects, surgeries }
// side_effects: Reads files
// invariants: the snapshot is never mutated after loading; the core only borrows it
// errors: IO and JSON errors surfaced with full path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::{Project, Surgery};

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
  Combined { path: String },
  Split { projects: String, surgeries: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  #[serde(default)]
  pub projects: Vec<Project>,
  #[serde(default)]
  pub surgeries: Vec<Surgery>,
}

impl Snapshot {
  pub fn new(projects: Vec<Project>, surgeries: Vec<Surgery>) -> Self {
    Self { projects, surgeries }
  }

  /// Find a project by an id typed on the command line.
  pub fn find_project(&self, raw_id: &str) -> Option<&Project> {
    self.projects.iter().find(|p| p.id.matches_raw(raw_id))
  }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
  let buf = std::fs::read(path).with_context(|| format!("reading {what} from {}", path.display()))?;
  serde_json::from_slice(&buf).with_context(|| format!("parsing {what} JSON in {}", path.display()))
}

pub fn load_snapshot(source: &SnapshotSource) -> Result<Snapshot> {
  let snapshot = match source {
    SnapshotSource::Combined { path } => read_json::<Snapshot>(Path::new(path), "snapshot")?,
    SnapshotSource::Split { projects, surgeries } => Snapshot::new(
      read_json(Path::new(projects), "projects")?,
      read_json(Path::new(surgeries), "surgeries")?,
    ),
  };

  tracing::info!(
    projects = snapshot.projects.len(),
    surgeries = snapshot.surgeries.len(),
    "loaded snapshot"
  );
  Ok(snapshot)
}
