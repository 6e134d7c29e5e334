//! Stat cards shown above the dashboard and the project list.

use serde::{Deserialize, Serialize};

use crate::model::{Project, Surgery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  pub total_donors: usize,
  pub total_target: u64,
  pub completed_target: u64,
  pub incomplete_target: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
  pub total_projects: usize,
  pub total_balance_surgeries: u64,
  pub total_amount: f64,
  pub completed_projects: usize,
  pub incomplete_projects: usize,
}

fn total_balance(projects: &[Project]) -> u64 {
  projects.iter().fold(0u64, |acc, p| acc.saturating_add(p.balance_surgery))
}

/// Headline numbers: every surgery on record counts as completed, matched or not.
pub fn dashboard_summary(projects: &[Project], surgeries: &[Surgery]) -> DashboardSummary {
  let total_target = total_balance(projects);
  let completed_target = surgeries.len() as u64;
  DashboardSummary {
    total_donors: projects.len(),
    total_target,
    completed_target,
    incomplete_target: total_target.saturating_sub(completed_target),
  }
}

/// A project is complete once its outstanding balance reaches zero.
pub fn portfolio_summary(projects: &[Project]) -> PortfolioSummary {
  let completed_projects = projects.iter().filter(|p| p.balance_surgery == 0).count();
  PortfolioSummary {
    total_projects: projects.len(),
    total_balance_surgeries: total_balance(projects),
    total_amount: projects.iter().map(|p| p.total_amount).sum(),
    completed_projects,
    incomplete_projects: projects.len() - completed_projects,
  }
}
