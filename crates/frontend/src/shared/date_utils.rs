/// Utilities for date and time formatting
///
/// Dates are shown in the calendar chosen on the user's profile: Gregorian
/// ("Mar 15, 2024") or Ethiopian ("Meskerem 1, 2017").
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use contracts::system::auth::CalendarType;

/// Placeholder for missing or unparseable dates
pub const EMPTY_DATE: &str = "-";

const GREGORIAN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const ETHIOPIAN_MONTHS: [&str; 13] = [
    "Meskerem", "Tikimt", "Hidar", "Tahsas", "Tir", "Yekatit", "Megabit", "Miazia", "Genbot",
    "Sene", "Hamle", "Nehase", "Pagume",
];

/// Julian day number of 1 Meskerem, year 1 (Amete Mihret)
const ETHIOPIAN_EPOCH_JDN: i64 = 1_723_856;

/// A date in the Ethiopian calendar; `month` runs 1..=13
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthiopianDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl EthiopianDate {
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let jdn = i64::from(date.num_days_from_ce()) + 1_721_425;
        let offset = jdn - ETHIOPIAN_EPOCH_JDN;
        let r = offset.rem_euclid(1461);
        let n = r % 365 + 365 * (r / 1460);
        let year = 4 * offset.div_euclid(1461) + r / 365 - r / 1460;
        Self {
            year,
            month: (n / 30 + 1) as u32,
            day: (n % 30 + 1) as u32,
        }
    }

    pub fn month_name(&self) -> &'static str {
        ETHIOPIAN_MONTHS[(self.month as usize - 1).min(12)]
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_date_in(date: NaiveDate, calendar: CalendarType) -> String {
    match calendar {
        CalendarType::Gregorian => format!(
            "{} {}, {}",
            GREGORIAN_MONTHS[date.month0() as usize],
            date.day(),
            date.year()
        ),
        CalendarType::Ethiopian => {
            let eth = EthiopianDate::from_gregorian(date);
            format!("{} {}, {}", eth.month_name(), eth.day, eth.year)
        }
    }
}

pub fn format_datetime_in(dt: NaiveDateTime, calendar: CalendarType) -> String {
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if dt.hour() < 12 { "AM" } else { "PM" };
    format!(
        "{}, {:02}:{:02} {}",
        format_date_in(dt.date(), calendar),
        hour12,
        dt.minute(),
        meridiem
    )
}

/// Date for display; `"-"` when missing or invalid.
pub fn format_display_date(input: Option<&str>, calendar: CalendarType) -> String {
    input
        .and_then(parse_date_time)
        .map(|dt| format_date_in(dt.date(), calendar))
        .unwrap_or_else(|| EMPTY_DATE.to_string())
}

/// Date and time for display; `"-"` when missing or invalid.
pub fn format_display_datetime(input: Option<&str>, calendar: CalendarType) -> String {
    input
        .and_then(parse_date_time)
        .map(|dt| format_datetime_in(dt, calendar))
        .unwrap_or_else(|| EMPTY_DATE.to_string())
}

/// Same as [`format_display_datetime`] for an already parsed UTC timestamp
pub fn format_timestamp(ts: DateTime<chrono::Utc>, calendar: CalendarType) -> String {
    format_datetime_in(ts.with_timezone(&Local).naive_local(), calendar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ethiopian_new_year() {
        assert_eq!(
            EthiopianDate::from_gregorian(ymd(2024, 9, 11)),
            EthiopianDate { year: 2017, month: 1, day: 1 }
        );
        // 2023 is followed by an Ethiopian leap year, so new year is the 12th
        assert_eq!(
            EthiopianDate::from_gregorian(ymd(2023, 9, 12)),
            EthiopianDate { year: 2016, month: 1, day: 1 }
        );
    }

    #[test]
    fn test_ethiopian_pagume() {
        let eth = EthiopianDate::from_gregorian(ymd(2023, 9, 11));
        assert_eq!(eth, EthiopianDate { year: 2015, month: 13, day: 6 });
        assert_eq!(eth.month_name(), "Pagume");
    }

    #[test]
    fn test_format_gregorian_date() {
        assert_eq!(
            format_display_date(Some("2024-03-15"), CalendarType::Gregorian),
            "Mar 15, 2024"
        );
        assert_eq!(
            format_display_date(Some("2024-12-01T08:00:00"), CalendarType::Gregorian),
            "Dec 1, 2024"
        );
    }

    #[test]
    fn test_format_ethiopian_date() {
        assert_eq!(
            format_display_date(Some("2024-09-11"), CalendarType::Ethiopian),
            "Meskerem 1, 2017"
        );
    }

    #[test]
    fn test_format_datetime_naive() {
        assert_eq!(
            format_display_datetime(Some("2024-03-15T14:02:26.123"), CalendarType::Gregorian),
            "Mar 15, 2024, 02:02 PM"
        );
        assert_eq!(
            format_display_datetime(Some("2024-03-15 00:30:00"), CalendarType::Gregorian),
            "Mar 15, 2024, 12:30 AM"
        );
    }

    #[test]
    fn test_missing_or_invalid_is_dash() {
        assert_eq!(format_display_date(None, CalendarType::Gregorian), "-");
        assert_eq!(format_display_date(Some(""), CalendarType::Ethiopian), "-");
        assert_eq!(format_display_date(Some("invalid"), CalendarType::Gregorian), "-");
        assert_eq!(format_display_datetime(Some("2024-13-40"), CalendarType::Gregorian), "-");
    }
}
