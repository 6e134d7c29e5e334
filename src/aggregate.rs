// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Reconcile projects against surgeries into per-project progress rows and a totals line
// role: core/aggregation
// inputs: Project[], Surgery[], TimeWindow, now (any zone)
// outputs: DonorTable { rows, totals }
// invariants:
// - rows follow input project order; one row per project (duplicate ids each get the full count)
// - surgeries whose projectId matches no project are dropped silently
// - totals are exact column sums of rows
// - display: target = balanceSurgery, completed counts createdAt inside the window
// - export: completed counts every matching surgery, target = completed + remaining
// errors: none; pure and deterministic
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};

use crate::model::{AggregateRow, DonorTable, Project, RecordId, Surgery, Totals};
use crate::window::TimeWindow;

fn count_by_project<'a, F>(surgeries: &'a [Surgery], mut admit: F) -> HashMap<&'a RecordId, u64>
where
  F: FnMut(&Surgery) -> bool,
{
  let mut counts: HashMap<&RecordId, u64> = HashMap::new();
  for s in surgeries {
    let Some(pid) = s.project_id.as_ref() else { continue };
    if admit(s) {
      *counts.entry(pid).or_insert(0) += 1;
    }
  }
  counts
}

/// Donor table as shown on screen: surgeries count when their `created_at`
/// falls inside `window`, and the target is the project's balance.
pub fn aggregate_for_display<Z: TimeZone>(
  projects: &[Project],
  surgeries: &[Surgery],
  window: TimeWindow,
  now: &DateTime<Z>,
) -> DonorTable {
  let counts = count_by_project(surgeries, |s| window.admits(s.created_at.as_ref(), now));

  let rows: Vec<AggregateRow> = projects
    .iter()
    .map(|p| {
      let completed = counts.get(&p.id).copied().unwrap_or(0);
      AggregateRow::new(p, p.balance_surgery, completed)
    })
    .collect();

  let totals = Totals::from_rows(&rows);
  tracing::debug!(
    window = %window,
    projects = projects.len(),
    surgeries = surgeries.len(),
    completed = totals.completed,
    "aggregated donor table"
  );
  DonorTable { rows, totals }
}

/// Donor table for the printable export: every matching surgery counts,
/// regardless of date, and `target` is rebuilt as `completed + remaining`.
pub fn aggregate_for_export(projects: &[Project], surgeries: &[Surgery]) -> DonorTable {
  let counts = count_by_project(surgeries, |_| true);

  let rows: Vec<AggregateRow> = projects
    .iter()
    .map(|p| {
      let completed = counts.get(&p.id).copied().unwrap_or(0);
      let remaining = p.balance_surgery.saturating_sub(completed);
      AggregateRow::new(p, completed + remaining, completed)
    })
    .collect();

  let totals = Totals::from_rows(&rows);
  DonorTable { rows, totals }
}
