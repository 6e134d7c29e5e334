use chrono::{DateTime, Utc};

use crate::cli::{EffectiveConfig, View};
use crate::window::{TimeWindow, Zone};

/// Everything a single view needs, resolved once per run.
#[derive(Debug, Clone)]
pub struct ViewParams {
  pub view: View,
  pub window: TimeWindow,
  pub zone: Zone,
  pub now: DateTime<Utc>,
  pub catalog: Vec<String>,
  pub project_id: Option<String>,
  pub rows_per_page: usize,
}

pub fn build_view_params(cfg: &EffectiveConfig, now: DateTime<Utc>) -> ViewParams {
  ViewParams {
    view: cfg.view,
    window: cfg.window,
    zone: cfg.zone,
    now,
    catalog: cfg.catalog.clone(),
    project_id: cfg.project_id.clone(),
    rows_per_page: cfg.rows_per_page,
  }
}

impl ViewParams {
  /// Same parameters, targeting another view (used when bundling).
  pub fn for_view(&self, view: View) -> Self {
    Self { view, ..self.clone() }
  }
}
