//! Calendar-day keys, Monday-start weekly windows and holiday marking.
//!
//! Dates are plain calendar days with no time zone. The wire format is
//! strictly `YYYY-MM-DD`.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::shifts::Shift;

/// Days in the roster week.
pub const DAYS_PER_WEEK: usize = 7;

/// Week buckets used by monthly statistics (days 1-7, 8-14, ..., 29-31).
pub const WEEKS_PER_MONTH: usize = 5;

/// Fixed month-day holiday table.
pub const HOLIDAYS: &[((u32, u32), &str)] = &[
    ((1, 14), "Makar Sankranti"),
    ((1, 26), "Republic Day"),
    ((3, 8), "Maha Shivratri"),
    ((3, 25), "Holi"),
    ((4, 9), "Gudi Padwa"),
    ((4, 14), "Ambedkar Jayanti"),
    ((5, 1), "Maharashtra Day / Labor Day"),
    ((8, 15), "Independence Day"),
    ((8, 19), "Raksha Bandhan"),
    ((9, 7), "Ganesh Chaturthi"),
    ((10, 2), "Gandhi Jayanti"),
    ((10, 12), "Dussehra"),
    ((11, 1), "Diwali"),
    ((12, 25), "Christmas"),
];

// ---------------------------------------------------------------------------
// DateKey
// ---------------------------------------------------------------------------

/// A calendar-day identifier, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a strict `YYYY-MM-DD` key.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(CoreError::Validation(format!(
                "Invalid date key '{s}'. Expected YYYY-MM-DD"
            )));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CoreError::Validation(format!("Invalid date key '{s}': {e}")))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateKey> for NaiveDate {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for DateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Weekly window
// ---------------------------------------------------------------------------

/// The Monday on or before `date`. Sunday is the last day of its week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates of the Monday-start week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    let start = week_start(anchor);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Move an anchor date by whole weeks (negative goes back).
pub fn shift_weeks(anchor: NaiveDate, weeks: i64) -> NaiveDate {
    anchor + Duration::weeks(weeks)
}

pub fn previous_week(anchor: NaiveDate) -> NaiveDate {
    shift_weeks(anchor, -1)
}

pub fn next_week(anchor: NaiveDate) -> NaiveDate {
    shift_weeks(anchor, 1)
}

/// Every (date, shift) pair of the week, day-major, in grid row order.
pub fn week_cells(anchor: NaiveDate) -> Vec<(DateKey, Shift)> {
    week_dates(anchor)
        .into_iter()
        .flat_map(|date| {
            crate::shifts::SHIFTS
                .into_iter()
                .map(move |shift| (DateKey(date), shift))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Holidays
// ---------------------------------------------------------------------------

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    let key = (date.month(), date.day());
    HOLIDAYS
        .iter()
        .find(|(month_day, _)| *month_day == key)
        .map(|(_, name)| *name)
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// A date is special if it is a listed holiday or a Sunday. Special dates are
/// annotated on the grid but never block assignment.
pub fn is_special(date: NaiveDate) -> bool {
    is_sunday(date) || holiday_name(date).is_some()
}

/// Whether the grid cell at (`date`, `shift`) gets holiday shading. The leave
/// row is never shaded.
pub fn is_shaded(date: NaiveDate, shift: Shift) -> bool {
    shift.is_working() && is_special(date)
}

/// Zero-based week of the month (`(day - 1) / 7`), always below
/// [`WEEKS_PER_MONTH`].
pub fn week_of_month(date: NaiveDate) -> usize {
    ((date.day() - 1) / 7) as usize
}

/// The (year, month) immediately before the given one.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Parse a `YYYY-MM` month key.
pub fn parse_month_key(s: &str) -> Result<(i32, u32), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid month '{s}'. Expected YYYY-MM"));
    let (year, month) = s.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
