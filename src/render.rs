// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn a snapshot plus view parameters into a serializable view, then into JSON or a plain-text table
// role: rendering/views
// inputs: ViewParams (view, window, zone, now, catalog, project id, rows per page), Snapshot
// outputs: ViewOutput (dashboard | table | chart | export | project | portfolio); JSON or text strings
// invariants:
// - "now" is converted into the selected zone before any window test
// - text tables are markdown tables; donor tables end with a TOTAL row whose status cell is "—"
// - JSON field names are camelCase
// errors: unknown project id; `--view all` is not a single view
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt::{Display, Write as _};

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::aggregate::aggregate_for_display;
use crate::cli::View;
use crate::model::{AggregateRow, DonorTable, TallyEntry, Totals};
use crate::params::ViewParams;
use crate::report::{
  DetailRow, ExportReport, ProjectDetail, ReportPage, ReportRow, build_project_detail, build_report,
  format_generated_at, paginate,
};
use crate::snapshot::Snapshot;
use crate::summary::{DashboardSummary, PortfolioSummary, dashboard_summary, portfolio_summary};
use crate::tally::tally;
use crate::window::{TimeWindow, Zone};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
  pub window: TimeWindow,
  pub generated_at: String,
  pub rows: Vec<AggregateRow>,
  pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
  pub window: TimeWindow,
  pub data: Vec<TallyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
  pub window: TimeWindow,
  pub generated_at: String,
  pub summary: DashboardSummary,
  pub chart: Vec<TallyEntry>,
  pub donors: DonorTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportView {
  pub report: ExportReport,
  pub pages: Vec<ReportPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewOutput {
  Dashboard(DashboardView),
  Table(TableView),
  Chart(ChartView),
  Export(ExportView),
  Project(ProjectDetail),
  Portfolio(PortfolioSummary),
}

/// Build one view. The instant in `params.now` is read in `params.zone`.
pub fn render_view(params: &ViewParams, snapshot: &Snapshot) -> Result<ViewOutput> {
  match params.zone {
    Zone::Local => render_in(params, snapshot, &params.now.with_timezone(&Local)),
    Zone::Utc => render_in(params, snapshot, &params.now),
    Zone::Named(tz) => render_in(params, snapshot, &params.now.with_timezone(&tz)),
  }
}

fn render_in<Z: TimeZone>(params: &ViewParams, snapshot: &Snapshot, now: &DateTime<Z>) -> Result<ViewOutput>
where
  Z::Offset: Display,
{
  let projects = &snapshot.projects;
  let surgeries = &snapshot.surgeries;
  let window = params.window;

  let out = match params.view {
    View::Table => {
      let table = aggregate_for_display(projects, surgeries, window, now);
      ViewOutput::Table(TableView {
        window,
        generated_at: format_generated_at(now),
        rows: table.rows,
        totals: table.totals,
      })
    }
    View::Chart => ViewOutput::Chart(ChartView {
      window,
      data: tally(surgeries, window, now, params.catalog.as_slice()),
    }),
    View::Dashboard => ViewOutput::Dashboard(DashboardView {
      window,
      generated_at: format_generated_at(now),
      summary: dashboard_summary(projects, surgeries),
      chart: tally(surgeries, window, now, params.catalog.as_slice()),
      donors: aggregate_for_display(projects, surgeries, window, now),
    }),
    View::Export => {
      let report = build_report(projects, surgeries, window, now);
      let pages = paginate(&report, params.rows_per_page);
      ViewOutput::Export(ExportView { report, pages })
    }
    View::Project => {
      let raw_id = params.project_id.as_deref().ok_or_else(|| anyhow!("--view project requires --project-id"))?;
      let project = snapshot
        .find_project(raw_id)
        .ok_or_else(|| anyhow!("no project with id {raw_id:?} in the snapshot"))?;
      ViewOutput::Project(build_project_detail(project, surgeries, &now.timezone()))
    }
    View::Portfolio => ViewOutput::Portfolio(portfolio_summary(projects)),
    View::All => bail!("--view all bundles several views and cannot be rendered as one"),
  };
  Ok(out)
}

pub fn render_json(view: &ViewOutput) -> Result<String> {
  Ok(serde_json::to_string_pretty(view)?)
}

/// Plain-text rendition for terminals.
pub fn render_text(view: &ViewOutput) -> String {
  let mut out = String::new();
  match view {
    ViewOutput::Table(t) => {
      let _ = writeln!(out, "Donor progress ({}, generated {})", t.window, t.generated_at);
      out.push_str(&donor_text(&t.rows, &t.totals));
    }
    ViewOutput::Chart(c) => {
      let _ = writeln!(out, "Surgeries by type ({})", c.window);
      out.push_str(&chart_text(&c.data));
    }
    ViewOutput::Dashboard(d) => {
      let _ = writeln!(out, "Dashboard ({}, generated {})", d.window, d.generated_at);
      let _ = writeln!(out, "Total donors:        {}", d.summary.total_donors);
      let _ = writeln!(out, "Total target:        {}", d.summary.total_target);
      let _ = writeln!(out, "Completed target:    {}", d.summary.completed_target);
      let _ = writeln!(out, "Incomplete target:   {}", d.summary.incomplete_target);
      out.push('\n');
      out.push_str(&chart_text(&d.chart));
      out.push('\n');
      out.push_str(&donor_text(&d.donors.rows, &d.donors.totals));
    }
    ViewOutput::Export(e) => {
      let _ = writeln!(out, "Donor report ({}, generated {})", e.report.header.window, e.report.header.generated_at);
      for page in &e.pages {
        let _ = writeln!(out, "\nPage {} of {}", page.number, page.of);
        let lines = page.rows.iter().chain(page.totals.as_ref()).map(DonorLine::from);
        out.push_str(&markdown_table(lines));
      }
    }
    ViewOutput::Project(p) => {
      let _ = writeln!(out, "{}", p.title);
      let _ = writeln!(out, "Target: {}  Completed: {}", p.target, p.completed);
      out.push_str(&markdown_table(p.rows.iter().map(DetailLine::from)));
    }
    ViewOutput::Portfolio(s) => {
      let _ = writeln!(out, "Total projects:           {}", s.total_projects);
      let _ = writeln!(out, "Total balance surgeries:  {}", s.total_balance_surgeries);
      let _ = writeln!(out, "Total amount:             {:.2}", s.total_amount);
      let _ = writeln!(out, "Completed projects:       {}", s.completed_projects);
      let _ = writeln!(out, "Incomplete projects:      {}", s.incomplete_projects);
    }
  }
  out
}

#[derive(Tabled)]
struct DonorLine {
  #[tabled(rename = "Donor")]
  donor: String,
  #[tabled(rename = "Target")]
  target: u64,
  #[tabled(rename = "Completed")]
  completed: u64,
  #[tabled(rename = "Incomplete")]
  incomplete: u64,
  #[tabled(rename = "Status")]
  status: String,
}

impl From<&ReportRow> for DonorLine {
  fn from(r: &ReportRow) -> Self {
    Self { donor: r.0.clone(), target: r.1, completed: r.2, incomplete: r.3, status: r.4.clone() }
  }
}

#[derive(Tabled)]
struct ChartLine {
  #[tabled(rename = "Surgery")]
  surgery: String,
  #[tabled(rename = "Completed")]
  completed: u64,
}

#[derive(Tabled)]
struct DetailLine {
  #[tabled(rename = "Id")]
  id: usize,
  #[tabled(rename = "Patient Name")]
  patient: String,
  #[tabled(rename = "Eye")]
  eye: String,
  #[tabled(rename = "Surgery")]
  surgery: String,
  #[tabled(rename = "Date")]
  date: String,
  #[tabled(rename = "Contact")]
  contact: String,
}

impl From<&DetailRow> for DetailLine {
  fn from(r: &DetailRow) -> Self {
    Self {
      id: r.0,
      patient: r.1.clone(),
      eye: r.2.clone(),
      surgery: r.3.clone(),
      date: r.4.clone(),
      contact: r.5.clone(),
    }
  }
}

fn markdown_table<T: Tabled>(lines: impl IntoIterator<Item = T>) -> String {
  let mut table = Table::new(lines);
  table.with(Style::markdown());
  format!("{table}\n")
}

fn donor_text(rows: &[AggregateRow], totals: &Totals) -> String {
  let totals = ReportRow::from_totals(totals);
  let lines = rows
    .iter()
    .map(|r| DonorLine::from(&ReportRow::from_aggregate(r)))
    .chain(std::iter::once(DonorLine::from(&totals)));
  markdown_table(lines)
}

fn chart_text(data: &[TallyEntry]) -> String {
  markdown_table(data.iter().map(|e| ChartLine { surgery: e.name.clone(), completed: e.completed }))
}
