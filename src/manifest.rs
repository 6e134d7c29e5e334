// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build and write the bundle manifest for `--view all` runs
// role: persistence/manifest
// inputs: generated_at, window, zone, base_dir, ViewEntry[]
// outputs: manifest.json file written under base_dir
// side_effects: Writes to filesystem
// invariants:
// - manifest contains views[] in the order entries were pushed
// - file paths in entries are relative to base_dir and point to report-<view>.json
// - generated_at is serialized in %Y-%m-%dT%H:%M:%S (zone-local)
// errors: IO errors surfaced with full path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::View;
use crate::window::{TimeWindow, Zone};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEntry {
  pub view: View,
  pub file: String,
}

/// Top-level index of a bundle directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
  pub generated_at: String,
  pub window: TimeWindow,
  pub zone: Zone,
  pub views: Vec<ViewEntry>,
}

impl BundleManifest {
  pub fn new(generated_at: String, window: TimeWindow, zone: Zone) -> Self {
    Self { generated_at, window, zone, views: Vec::new() }
  }

  pub fn push_entry(&mut self, view: View, file: &str) {
    self.views.push(ViewEntry { view, file: file.to_string() });
  }

  pub fn write_to(&self, base_dir: &str) -> Result<PathBuf> {
    let path = Path::new(base_dir).join("manifest.json");
    std::fs::write(&path, serde_json::to_vec_pretty(self)?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
  }
}

/// File name used for a bundled view.
pub fn report_file_name(view: View) -> String {
  format!("report-{}.json", view.as_str())
}
