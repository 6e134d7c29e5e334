use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Windowing-related types live here; the classifier is the leaf of the core.

/// Filter applied to surgeries before they count towards progress.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TimeWindow {
  Daily,
  Weekly,
  Monthly,
  Yearly,
}

impl TimeWindow {
  /// Any label other than exactly `daily`/`weekly`/`monthly` selects `Yearly` (include everything).
  /// Matching is exact: `"Daily"` or `" weekly "` are not window names.
  pub fn from_label(raw: &str) -> Self {
    match raw {
      "daily" => TimeWindow::Daily,
      "weekly" => TimeWindow::Weekly,
      "monthly" => TimeWindow::Monthly,
      _ => TimeWindow::Yearly,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TimeWindow::Daily => "daily",
      TimeWindow::Weekly => "weekly",
      TimeWindow::Monthly => "monthly",
      TimeWindow::Yearly => "yearly",
    }
  }

  /// Classify an optional timestamp. Missing timestamps only pass the catch-all window.
  pub fn admits<Z: TimeZone>(&self, timestamp: Option<&DateTime<Utc>>, now: &DateTime<Z>) -> bool {
    match timestamp {
      Some(ts) => is_within_window(&ts.with_timezone(&now.timezone()), *self, now),
      None => matches!(self, TimeWindow::Yearly),
    }
  }
}

impl From<String> for TimeWindow {
  fn from(raw: String) -> Self {
    TimeWindow::from_label(&raw)
  }
}

impl FromStr for TimeWindow {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(TimeWindow::from_label(s))
  }
}

impl fmt::Display for TimeWindow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Is `timestamp` inside `window` relative to `now`?
///
/// Calendar comparisons (daily, monthly) use the fields of the zone both
/// instants are expressed in. Weekly is a rolling 7×24h span ending at `now`;
/// timestamps after `now` yield a negative span and are accepted.
pub fn is_within_window<Z: TimeZone>(timestamp: &DateTime<Z>, window: TimeWindow, now: &DateTime<Z>) -> bool {
  match window {
    TimeWindow::Daily => timestamp.date_naive() == now.date_naive(),
    TimeWindow::Weekly => now.clone() - timestamp.clone() <= chrono::Duration::days(7),
    TimeWindow::Monthly => timestamp.year() == now.year() && timestamp.month() == now.month(),
    TimeWindow::Yearly => true,
  }
}

/// Zone whose calendar defines "today" and "this month".
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Zone {
  Local,
  Utc,
  Named(chrono_tz::Tz),
}

impl Zone {
  /// Interpret a wall-clock timestamp in this zone; ambiguous DST times take the earlier instant.
  pub fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match self {
      Zone::Local => naive.and_local_timezone(Local).earliest().map(|dt| dt.with_timezone(&Utc)),
      Zone::Utc => Some(naive.and_utc()),
      Zone::Named(tz) => tz.from_local_datetime(&naive).earliest().map(|dt| dt.with_timezone(&Utc)),
    }
  }
}

impl FromStr for Zone {
  type Err = anyhow::Error;

  fn from_str(raw: &str) -> Result<Self> {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("local") {
      return Ok(Zone::Local);
    }
    if s.eq_ignore_ascii_case("utc") {
      return Ok(Zone::Utc);
    }
    s.parse::<chrono_tz::Tz>()
      .map(Zone::Named)
      .map_err(|_| anyhow!("unknown time zone {s:?} (expected local, utc, or an IANA name such as Asia/Kolkata)"))
  }
}

impl fmt::Display for Zone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Zone::Local => f.write_str("local"),
      Zone::Utc => f.write_str("utc"),
      Zone::Named(tz) => f.write_str(tz.name()),
    }
  }
}

impl Serialize for Zone {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Zone {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

/// Parse a `--now-override` string into an instant.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive wall-clock timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`, read in `zone`.
pub fn parse_now_override(raw: &str, zone: Zone) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
    return Ok(dt.with_timezone(&Utc));
  }
  let naive = match NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S") {
    Ok(n) => n,
    Err(_) => bail!("invalid --now-override {raw:?}, expected RFC3339 or YYYY-MM-DDTHH:MM:SS"),
  };
  zone
    .localize(naive)
    .ok_or_else(|| anyhow!("--now-override {raw:?} does not exist in zone {zone}"))
}
