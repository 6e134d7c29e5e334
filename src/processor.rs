// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate a run: render one view to stdout/--out, or bundle every view plus a manifest into a directory
// role: processing/orchestrator
// inputs: EffectiveConfig, Snapshot
// outputs: Rendered view on stdout or in a file; for `--view all` report-<view>.json files, manifest.json, and a stdout pointer
// side_effects: Creates directories; writes files; prints to stdout
// invariants:
// - "now" is resolved once per run and shared by every view
// - `--view all` ⇒ manifest.json exists and pointer {dir, manifest} printed
// - single view ⇒ output printed or written to --out
// errors: Propagates render/write errors with file path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};

use crate::cli::{EffectiveConfig, OutputFormat, View};
use crate::manifest::{BundleManifest, report_file_name};
use crate::params::{ViewParams, build_view_params};
use crate::render::{render_json, render_text, render_view};
use crate::report::format_generated_at;
use crate::snapshot::Snapshot;
use crate::util;
use crate::window::Zone;

/// Render the configured view into a string in the requested format.
pub fn render_single(format: OutputFormat, params: &ViewParams, snapshot: &Snapshot) -> Result<String> {
  let view = render_view(params, snapshot)?;
  match format {
    OutputFormat::Json => render_json(&view),
    OutputFormat::Text => Ok(render_text(&view).trim_end().to_string()),
  }
}

fn generated_at(zone: Zone, now: DateTime<Utc>) -> String {
  match zone {
    Zone::Local => format_generated_at(&now.with_timezone(&Local)),
    Zone::Utc => format_generated_at(&now),
    Zone::Named(tz) => format_generated_at(&now.with_timezone(&tz)),
  }
}

/// Write every bundled view as `report-<view>.json` under `base_dir`, then the manifest.
pub fn write_bundle(params: &ViewParams, snapshot: &Snapshot, base_dir: &str) -> Result<BundleManifest> {
  let mut manifest = BundleManifest::new(generated_at(params.zone, params.now), params.window, params.zone);

  for view in View::BUNDLED {
    let file = report_file_name(view);
    let body = render_single(OutputFormat::Json, &params.for_view(view), snapshot)?;
    let path = Path::new(base_dir).join(&file);
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(view = view.as_str(), path = %path.display(), "wrote bundled view");
    manifest.push_entry(view, &file);
  }

  manifest.write_to(base_dir)?;
  Ok(manifest)
}

pub fn process(cfg: &EffectiveConfig, snapshot: &Snapshot) -> Result<()> {
  let now = util::effective_now(cfg.now_override);
  let params = build_view_params(cfg, now);

  if cfg.view == View::All {
    let base_dir = util::prepare_out_dir(&cfg.out, now)?;
    write_bundle(&params, snapshot, &base_dir)?;
    println!(
      "{}",
      serde_json::to_string_pretty(&serde_json::json!({"dir": base_dir, "manifest": "manifest.json"}))?
    );
    return Ok(());
  }

  let body = render_single(cfg.format, &params, snapshot)?;
  util::write_output(&cfg.out, &body)
}
