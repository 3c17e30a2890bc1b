//! Local-calendar helpers
//!
//! Every date comparison in the analytics goes through a [`CalendarConvention`]:
//! an explicit UTC offset plus the first day of the week. Nothing here reads the
//! host locale implicitly, so results are reproducible in tests.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
  #[default]
  Monday,
  Sunday,
}

impl std::str::FromStr for WeekStart {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "monday" | "mon" => Ok(Self::Monday),
      "sunday" | "sun" => Ok(Self::Sunday),
      other => Err(format!("Unknown week start: {}", other)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarConvention {
  pub week_start: WeekStart,
  pub utc_offset: FixedOffset,
}

impl Default for CalendarConvention {
  fn default() -> Self {
    Self::local(WeekStart::Monday)
  }
}

impl CalendarConvention {
  pub fn new(week_start: WeekStart, utc_offset: FixedOffset) -> Self {
    Self { week_start, utc_offset }
  }

  /// UTC calendar, mostly for tests
  pub fn utc(week_start: WeekStart) -> Self {
    Self::new(week_start, Utc.fix())
  }

  /// Offset of the host clock at call time
  pub fn local(week_start: WeekStart) -> Self {
    Self::new(week_start, *Local::now().offset())
  }

  /// Calendar date of `instant` in this convention's offset
  pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&self.utc_offset).date_naive()
  }

  /// Weekday of `instant` on the local calendar
  pub fn weekday_of(&self, instant: DateTime<Utc>) -> Weekday {
    self.local_date(instant).weekday().into()
  }

  /// 0-based position of `day` within the week (0 = configured first day)
  pub fn position_in_week(&self, day: Weekday) -> u32 {
    let chrono_day: chrono::Weekday = day.into();
    match self.week_start {
      WeekStart::Monday => chrono_day.num_days_from_monday(),
      WeekStart::Sunday => chrono_day.num_days_from_sunday(),
    }
  }

  /// Local midnight of `date`, as a UTC instant
  pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
    let local_midnight = date.and_time(NaiveTime::MIN);
    (local_midnight - TimeDelta::seconds(self.utc_offset.local_minus_utc() as i64)).and_utc()
  }

  /// `[00:00:00.000, 23:59:59.999]` of `date`, both ends inclusive
  pub fn day_range(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = self.start_of_day(date);
    let end = start + TimeDelta::days(1) - TimeDelta::milliseconds(1);
    (start, end)
  }

  pub fn today_range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    self.day_range(self.local_date(now))
  }

  /// Local midnight of the first day of the week containing `now`
  pub fn start_of_week(&self, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = self.local_date(now);
    let offset = self.position_in_week(today.weekday().into());
    self.start_of_day(today - TimeDelta::days(offset as i64))
  }

  /// Local midnight of the 1st of the month containing `now`
  pub fn start_of_month(&self, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = self.local_date(now);
    let first = today.with_day(1).unwrap_or(today);
    self.start_of_day(first)
  }
}
