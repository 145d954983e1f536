//! Date field layouts.
//!
//! Stored values keep the service's day-first, slash-delimited layout. Native
//! date/time inputs want year-first, dash-delimited text, so rendering maps
//! between the two. Every transform passes unparsable text through unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use shared::domain::DateFormat;

const WIRE_DATE: &str = "%d/%m/%Y";
const INPUT_DATE: &str = "%Y-%m-%d";
const DEFAULT_TIME: &str = "00:00";
const DEFAULT_MONTH_YEAR: &str = "01/2024";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInputKind {
    DateTime,
    Month,
    Date,
    Time,
}

impl DateInputKind {
    /// The month+year+time layout renders as a month input; its time part
    /// gets a separate [`DateInputKind::Time`] input.
    pub fn for_format(format: Option<DateFormat>) -> Self {
        match format {
            Some(DateFormat::DateTimeSeconds) | None => Self::DateTime,
            Some(DateFormat::MonthYearTime) => Self::Month,
            Some(DateFormat::DateOnly) => Self::Date,
            Some(DateFormat::TimeOnly) => Self::Time,
        }
    }

    pub fn html_type(self) -> &'static str {
        match self {
            Self::DateTime => "datetime-local",
            Self::Month => "month",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

/// Wire content to editable value. Only the month+year+time layout changes:
/// a full `dd/MM/yyyy` date is reduced to `MM/yyyy`, keeping the time.
pub fn decode_date(format: Option<DateFormat>, wire: &str) -> String {
    if format != Some(DateFormat::MonthYearTime) {
        return wire.to_string();
    }
    let (date, time) = split_date_time(wire);
    let parts: Vec<&str> = date.split('/').collect();
    match parts.as_slice() {
        [_, month, year] => join_date_time(&format!("{month}/{year}"), time),
        _ => wire.to_string(),
    }
}

pub fn to_input_layout(format: Option<DateFormat>, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let converted = match format {
        Some(DateFormat::DateTimeSeconds) => {
            let (date, time) = split_date_time(value);
            match (reformat_date(date, WIRE_DATE, INPUT_DATE), time) {
                (Some(date), Some(time)) if is_time(time) => Some(format!("{date}T{time}")),
                _ => None,
            }
        }
        Some(DateFormat::MonthYearTime) => month_input(split_date_time(value).0),
        Some(DateFormat::DateOnly) => reformat_date(value, WIRE_DATE, INPUT_DATE),
        Some(DateFormat::TimeOnly) | None => None,
    };
    converted.unwrap_or_else(|| value.to_string())
}

pub fn time_input(value: &str) -> String {
    split_date_time(value).1.unwrap_or_default().to_string()
}

/// Writes native input text back into the stored layout.
///
/// `current` is the stored value before the edit; the month+year+time layout
/// merges a month edit with the current time and a time edit with the current
/// month, falling back to `00:00` and `01/2024` respectively.
pub fn from_input_layout(
    format: Option<DateFormat>,
    kind: DateInputKind,
    input: &str,
    current: &str,
) -> String {
    let converted = match format {
        Some(DateFormat::DateTimeSeconds) => input.split_once('T').and_then(|(date, time)| {
            let date = reformat_date(date, INPUT_DATE, WIRE_DATE)?;
            is_time(time).then(|| format!("{date} {time}"))
        }),
        Some(DateFormat::MonthYearTime) => {
            let (current_date, current_time) = split_date_time(current);
            match kind {
                DateInputKind::Month => parse_year_month(input).map(|(year, month)| {
                    let time = current_time.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TIME);
                    format!("{month:02}/{year:04} {time}")
                }),
                DateInputKind::Time if is_time(input) => {
                    let date = if current_date.is_empty() {
                        DEFAULT_MONTH_YEAR
                    } else {
                        current_date
                    };
                    Some(format!("{date} {input}"))
                }
                _ => None,
            }
        }
        Some(DateFormat::DateOnly) => reformat_date(input, INPUT_DATE, WIRE_DATE),
        Some(DateFormat::TimeOnly) | None => None,
    };
    converted.unwrap_or_else(|| input.to_string())
}

/// Listing timestamps render as `dd/MM/yyyy HH:mm`, `-` when absent, and as
/// the raw text when the service sent something unreadable.
pub fn format_listing_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "-".to_string();
    }
    parse_listing_timestamp(raw)
        .map(|timestamp| timestamp.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_listing_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_local());
    }
    const LAYOUTS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%d/%m/%Y %H:%M:%S",
    ];
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, INPUT_DATE)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn split_date_time(value: &str) -> (&str, Option<&str>) {
    match value.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    }
}

fn join_date_time(date: &str, time: Option<&str>) -> String {
    match time {
        Some(time) => format!("{date} {time}"),
        None => date.to_string(),
    }
}

fn reformat_date(value: &str, from: &str, to: &str) -> Option<String> {
    NaiveDate::parse_from_str(value.trim(), from)
        .ok()
        .map(|date| date.format(to).to_string())
}

fn is_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

fn month_input(date: &str) -> Option<String> {
    let parts: Vec<&str> = date.split('/').collect();
    let (month, year) = match parts.as_slice() {
        [_, month, year] | [month, year] => (*month, *year),
        _ => return None,
    };
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(format!("{year:04}-{month:02}"))
}

fn parse_year_month(input: &str) -> Option<(i32, u32)> {
    let (year, month) = input.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
}

#[cfg(test)]
#[path = "tests/date_tests.rs"]
mod tests;
