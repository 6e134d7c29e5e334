use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::snapshot::SnapshotSource;
use crate::tally::default_catalog;
use crate::util;
use crate::window::{TimeWindow, Zone, parse_now_override};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum View {
  Dashboard,
  Table,
  Chart,
  Export,
  Project,
  Portfolio,
  All,
}

impl View {
  /// Views written by `--view all`, in manifest order.
  pub const BUNDLED: [View; 5] = [View::Dashboard, View::Table, View::Chart, View::Export, View::Portfolio];

  pub fn as_str(&self) -> &'static str {
    match self {
      View::Dashboard => "dashboard",
      View::Table => "table",
      View::Chart => "chart",
      View::Export => "export",
      View::Project => "project",
      View::Portfolio => "portfolio",
      View::All => "all",
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  Json,
  Text,
}

#[derive(Parser, Debug)]
#[command(
    name = "surgery-progress-report",
    version,
    about = "Summarize donor surgery progress (donor table, surgery-type chart, export rows)",
    long_about = None
)]
pub struct Cli {
  /// Combined snapshot file: {"projects": [...], "surgeries": [...]}
  #[arg(long)]
  pub snapshot: Option<PathBuf>,

  /// Projects JSON array; must be paired with --surgeries
  #[arg(long)]
  pub projects: Option<PathBuf>,

  /// Surgeries JSON array; must be paired with --projects
  #[arg(long)]
  pub surgeries: Option<PathBuf>,

  /// What to produce
  #[arg(long, value_enum, default_value_t = View::Dashboard)]
  pub view: View,

  /// Time window: daily, weekly, monthly or yearly (anything else means yearly)
  #[arg(long, default_value = "monthly")]
  pub window: String,

  /// Zone whose calendar defines "today" and "this month": local, utc, or an IANA name
  #[arg(long, default_value = "local")]
  pub tz: String,

  /// Comma-separated surgery types for the chart (default: the built-in catalog)
  #[arg(long, value_delimiter = ',')]
  pub catalog: Option<Vec<String>>,

  /// Project id for --view project
  #[arg(long)]
  pub project_id: Option<String>,

  /// Rows per printed page of the export view
  #[arg(long, default_value_t = 25)]
  pub rows_per_page: usize,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
  pub format: OutputFormat,

  /// Output location:
  /// - single view: file path (default stdout "-")
  /// - with `--view all`: base directory (default: auto-named temp dir)
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub source: SnapshotSource,
  pub view: View,
  pub format: OutputFormat,
  pub window: TimeWindow,
  pub zone: Zone,
  pub catalog: Vec<String>,
  pub project_id: Option<String>,
  pub rows_per_page: usize,
  pub out: String,
  pub now_override: Option<DateTime<Utc>>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  // Validate input selection
  let source = match (&cli.snapshot, &cli.projects, &cli.surgeries) {
    (Some(path), None, None) => SnapshotSource::Combined { path: util::canonicalize_lossy(path) },
    (None, Some(p), Some(s)) => SnapshotSource::Split {
      projects: util::canonicalize_lossy(p),
      surgeries: util::canonicalize_lossy(s),
    },
    (None, None, None) => bail!("Provide --snapshot, or both --projects and --surgeries"),
    (None, _, _) => bail!("--projects and --surgeries must be given together"),
    _ => bail!("Ambiguous input: choose either --snapshot or --projects/--surgeries"),
  };

  let window = TimeWindow::from_label(&cli.window);
  if window == TimeWindow::Yearly && cli.window != "yearly" {
    tracing::warn!(window = %cli.window, "unrecognized window; including every surgery");
  }

  let zone: Zone = cli.tz.parse().context("parsing --tz")?;

  let catalog = match cli.catalog {
    Some(labels) => {
      let labels: Vec<String> =
        labels.into_iter().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()).collect();
      if labels.is_empty() {
        bail!("--catalog needs at least one surgery type");
      }
      labels
    }
    None => default_catalog(),
  };

  if cli.view == View::Project && cli.project_id.is_none() {
    bail!("--view project requires --project-id");
  }
  if cli.rows_per_page == 0 {
    bail!("--rows-per-page must be at least 1");
  }
  if cli.view == View::All && cli.format == OutputFormat::Text {
    bail!("--view all writes JSON files; --format text is not supported with it");
  }

  let now_override = cli.now_override.as_deref().map(|raw| parse_now_override(raw, zone)).transpose()?;

  Ok(EffectiveConfig {
    source,
    view: cli.view,
    format: cli.format,
    window,
    zone,
    catalog,
    project_id: cli.project_id,
    rows_per_page: cli.rows_per_page,
    out: cli.out,
    now_override,
  })
}
