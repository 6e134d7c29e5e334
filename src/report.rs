// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the rows of printable documents: the donor export table (paginated) and the per-project surgery listing
// role: core/export-rows
// inputs: Project[], Surgery[], TimeWindow (metadata only), now (any zone)
// outputs: ExportReport, ReportPage[], ProjectDetail
// invariants:
// - export rows follow input project order and reuse aggregate_for_export
// - the totals row appears once, on the last page
// - detail rows are numbered from 1 in input surgery order
// errors: none; document bytes are produced elsewhere
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_for_export;
use crate::model::{AggregateRow, Project, RecordId, Surgery, Totals};
use crate::window::TimeWindow;

pub const STATUS_COMPLETE: &str = "✔";
pub const STATUS_PENDING: &str = "—";
pub const TOTAL_LABEL: &str = "TOTAL";
pub const DETAIL_HEAD: [&str; 6] = ["Id", "Patient Name", "Eye", "Surgery", "Date", "Contact"];

/// `[name, target, completed, remaining, status]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow(pub String, pub u64, pub u64, pub u64, pub String);

impl ReportRow {
  pub fn from_aggregate(row: &AggregateRow) -> Self {
    let status = if row.is_completed { STATUS_COMPLETE } else { STATUS_PENDING };
    ReportRow(row.project_name.clone(), row.target, row.completed, row.remaining, status.to_string())
  }

  pub fn from_totals(t: &Totals) -> Self {
    ReportRow(TOTAL_LABEL.to_string(), t.target, t.completed, t.remaining, STATUS_PENDING.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
  pub generated_at: String,
  pub window: TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
  pub header: ReportHeader,
  pub rows: Vec<ReportRow>,
  pub totals: ReportRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPage {
  pub number: usize,
  pub of: usize,
  pub rows: Vec<ReportRow>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub totals: Option<ReportRow>,
}

/// Format an instant the way document headers show it (`%Y-%m-%dT%H:%M:%S`, zone-local).
pub fn format_generated_at<Z: TimeZone>(now: &DateTime<Z>) -> String
where
  Z::Offset: Display,
{
  now.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Rows of the donor export. The window is recorded in the header only; counts use full history.
pub fn build_report<Z: TimeZone>(
  projects: &[Project],
  surgeries: &[Surgery],
  window: TimeWindow,
  now: &DateTime<Z>,
) -> ExportReport
where
  Z::Offset: Display,
{
  let table = aggregate_for_export(projects, surgeries);
  ExportReport {
    header: ReportHeader { generated_at: format_generated_at(now), window },
    rows: table.rows.iter().map(ReportRow::from_aggregate).collect(),
    totals: ReportRow::from_totals(&table.totals),
  }
}

/// Split export rows into printable pages of at most `rows_per_page` rows.
/// An empty report still yields one page carrying the totals row.
pub fn paginate(report: &ExportReport, rows_per_page: usize) -> Vec<ReportPage> {
  let per_page = rows_per_page.max(1);
  let mut chunks: Vec<Vec<ReportRow>> = report.rows.chunks(per_page).map(|c| c.to_vec()).collect();
  if chunks.is_empty() {
    chunks.push(Vec::new());
  }
  let of = chunks.len();

  chunks
    .into_iter()
    .enumerate()
    .map(|(i, rows)| ReportPage {
      number: i + 1,
      of,
      rows,
      totals: if i + 1 == of { Some(report.totals.clone()) } else { None },
    })
    .collect()
}

/// `[index, patient, eye, surgery, date, contact]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow(pub usize, pub String, pub String, pub String, pub String, pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
  pub title: String,
  pub project_id: RecordId,
  pub project_name: String,
  pub target: u64,
  pub completed: u64,
  pub file_name: String,
  pub head: Vec<String>,
  pub rows: Vec<DetailRow>,
}

/// Printable listing of every surgery recorded against `project`, dates shown in `zone`.
pub fn build_project_detail<Z: TimeZone>(project: &Project, surgeries: &[Surgery], zone: &Z) -> ProjectDetail
where
  Z::Offset: Display,
{
  let rows: Vec<DetailRow> = surgeries
    .iter()
    .filter(|s| s.belongs_to(project))
    .enumerate()
    .map(|(i, s)| {
      DetailRow(
        i + 1,
        s.patient_name.clone().unwrap_or_default(),
        s.operated_eye.clone().unwrap_or_default(),
        s.surgery_name.clone().unwrap_or_default(),
        s.date_of_surgery
          .as_ref()
          .map(|d: &DateTime<Utc>| d.with_timezone(zone).format("%Y-%m-%d").to_string())
          .unwrap_or_default(),
        s.contact_no.clone().filter(|c| !c.is_empty()).unwrap_or_else(|| "-".to_string()),
      )
    })
    .collect();

  ProjectDetail {
    title: format!("Project Report: {}", project.project_name),
    project_id: project.id.clone(),
    project_name: project.project_name.clone(),
    target: project.balance_surgery,
    completed: rows.len() as u64,
    file_name: format!("{}-surgeries.pdf", project.project_name),
    head: DETAIL_HEAD.iter().map(|h| h.to_string()).collect(),
    rows,
  }
}
