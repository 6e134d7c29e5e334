// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the typed records (projects, surgeries) and the derived shapes (rows, totals, tallies) shared by the core and rendering
// role: model/types
// outputs: Serializable structs with camelCase field names matching the records API
// invariants:
// - numeric fields decode leniently; missing/null/garbage become 0, never NaN
// - timestamps decode leniently; unparseable values become None
// - AggregateRow.remaining = max(target - completed, 0); is_completed = completed >= target
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the records API; either a number or a string.
///
/// Equality is strict: `1` and `"1"` never match. Integral floats such as
/// `1.0` decode as numbers; fractions and values outside `i64` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
  Number(i64),
  Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
  fn deserialize<D>(d: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let v = serde_json::Value::deserialize(d)?;
    RecordId::from_value(&v).ok_or_else(|| {
      serde::de::Error::custom(format!(
        "unsupported record id {v}: expected a string or an integer within the signed 64-bit range"
      ))
    })
  }
}

impl RecordId {
  fn from_value(v: &serde_json::Value) -> Option<Self> {
    match v {
      serde_json::Value::String(s) => Some(RecordId::Text(s.clone())),
      serde_json::Value::Number(n) => n.as_i64().map(RecordId::Number).or_else(|| {
        n.as_f64()
          .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
          .map(|f| RecordId::Number(f as i64))
      }),
      _ => None,
    }
  }

  /// Match against an id typed on the command line, where the kind is unknown.
  pub fn matches_raw(&self, raw: &str) -> bool {
    let raw = raw.trim();
    match self {
      RecordId::Number(n) => raw.parse::<i64>().map(|r| r == *n).unwrap_or(false),
      RecordId::Text(s) => s == raw,
    }
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecordId::Number(n) => write!(f, "{n}"),
      RecordId::Text(s) => f.write_str(s),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id: RecordId,
  #[serde(default, deserialize_with = "lenient_text")]
  pub project_name: String,
  #[serde(default, deserialize_with = "lenient_count")]
  pub balance_surgery: u64,
  #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
  pub project_code: Option<String>,
  #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
  pub receipt_no: Option<String>,
  #[serde(default, deserialize_with = "lenient_amount")]
  pub per_surgery_amount: f64,
  #[serde(default, deserialize_with = "lenient_amount")]
  pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surgery {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<RecordId>,
  #[serde(default)]
  pub project_id: Option<RecordId>,
  #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
  pub patient_name: Option<String>,
  #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
  pub operated_eye: Option<String>,
  #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
  pub contact_no: Option<String>,
  #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
  pub surgery_name: Option<String>,
  /// When the procedure was performed; drives the surgery-type tally.
  #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
  pub date_of_surgery: Option<DateTime<Utc>>,
  /// When the record was created; drives the donor table.
  #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

impl Surgery {
  pub fn belongs_to(&self, project: &Project) -> bool {
    self.project_id.as_ref() == Some(&project.id)
  }
}

/// Per-project progress line of the donor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow {
  pub project_id: RecordId,
  pub project_name: String,
  pub target: u64,
  pub completed: u64,
  pub remaining: u64,
  pub is_completed: bool,
}

impl AggregateRow {
  pub fn new(project: &Project, target: u64, completed: u64) -> Self {
    Self {
      project_id: project.id.clone(),
      project_name: project.project_name.clone(),
      target,
      completed,
      remaining: target.saturating_sub(completed),
      is_completed: completed >= target,
    }
  }
}

/// Column sums of a donor table, saturating at `u64::MAX`. Completion is not defined for the totals line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
  pub target: u64,
  pub completed: u64,
  pub remaining: u64,
}

impl Totals {
  pub fn from_rows(rows: &[AggregateRow]) -> Self {
    rows.iter().fold(Totals::default(), |acc, r| Totals {
      target: acc.target.saturating_add(r.target),
      completed: acc.completed.saturating_add(r.completed),
      remaining: acc.remaining.saturating_add(r.remaining),
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorTable {
  pub rows: Vec<AggregateRow>,
  pub totals: Totals,
}

/// One bar of the surgery-type chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
  pub name: String,
  pub completed: u64,
}

// --- Lenient decoding helpers ---

/// Coerce any JSON value into a non-negative count. Fractions truncate; anything else is 0.
pub fn count_from_value(v: &serde_json::Value) -> u64 {
  let as_float = match v {
    serde_json::Value::Number(n) => {
      if let Some(u) = n.as_u64() {
        return u;
      }
      n.as_f64()
    }
    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  as_float
    .filter(|f| f.is_finite() && *f > 0.0)
    .map(|f| f.trunc() as u64)
    .unwrap_or(0)
}

fn amount_from_value(v: &serde_json::Value) -> f64 {
  let f = match v {
    serde_json::Value::Number(n) => n.as_f64(),
    serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  f.filter(|f| f.is_finite()).unwrap_or(0.0)
}

fn text_from_value(v: &serde_json::Value) -> Option<String> {
  match v {
    serde_json::Value::String(s) => Some(s.clone()),
    serde_json::Value::Number(n) => Some(n.to_string()),
    serde_json::Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// Parse the timestamp shapes the records API emits.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and
/// date-only `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let s = raw.trim();
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .ok()
    .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|n| n.and_utc()))
    .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok().map(|n| n.and_utc()))
    .or_else(|| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
    })
}

fn lenient_count<'de, D>(d: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  let v = Option::<serde_json::Value>::deserialize(d)?;
  Ok(v.as_ref().map(count_from_value).unwrap_or(0))
}

fn lenient_amount<'de, D>(d: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let v = Option::<serde_json::Value>::deserialize(d)?;
  Ok(v.as_ref().map(amount_from_value).unwrap_or(0.0))
}

fn lenient_text<'de, D>(d: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(lenient_opt_text(d)?.unwrap_or_default())
}

fn lenient_opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let v = Option::<serde_json::Value>::deserialize(d)?;
  Ok(v.as_ref().and_then(text_from_value))
}

fn lenient_timestamp<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  let v = Option::<serde_json::Value>::deserialize(d)?;
  let parsed = match v {
    Some(serde_json::Value::String(s)) => parse_timestamp(&s),
    Some(serde_json::Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
    _ => None,
  };
  Ok(parsed)
}
