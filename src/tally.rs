use std::collections::HashMap;

use chrono::{DateTime, TimeZone};

use crate::model::{Surgery, TallyEntry};
use crate::window::TimeWindow;

/// Surgery types shown on the progress chart, in axis order.
pub const SURGERY_CATALOG: [&str; 7] = [
  "Cataract",
  "Glaucoma",
  "Retina",
  "Cornea",
  "Pediatric",
  "Oculoplasty",
  "Refractive",
];

pub fn default_catalog() -> Vec<String> {
  SURGERY_CATALOG.iter().map(|s| s.to_string()).collect()
}

/// Count surgeries per catalog label whose `date_of_surgery` falls inside `window`.
///
/// The output has one entry per catalog label, in catalog order, zeros included.
/// Labels outside the catalog are ignored (matching is case-sensitive).
pub fn tally<Z: TimeZone, S: AsRef<str>>(
  surgeries: &[Surgery],
  window: TimeWindow,
  now: &DateTime<Z>,
  catalog: &[S],
) -> Vec<TallyEntry> {
  let mut counts: HashMap<&str, u64> = catalog.iter().map(|label| (label.as_ref(), 0)).collect();
  let mut ignored = 0usize;

  for s in surgeries {
    if !window.admits(s.date_of_surgery.as_ref(), now) {
      continue;
    }
    match s.surgery_name.as_deref().and_then(|name| counts.get_mut(name)) {
      Some(count) => *count += 1,
      None => ignored += 1,
    }
  }

  if ignored > 0 {
    tracing::debug!(ignored, window = %window, "surgeries outside the catalog left out of the tally");
  }

  catalog
    .iter()
    .map(|label| TallyEntry {
      name: label.as_ref().to_string(),
      completed: counts.get(label.as_ref()).copied().unwrap_or(0),
    })
    .collect()
}
