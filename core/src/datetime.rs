// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing and formatting of the wire date and time strings.

use jiff::civil::{Date, DateTime, Time};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M";
const HUMAN_DATE_FORMAT: &str = "%B %-d, %Y";

/// Parses a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(s: &str) -> Option<Date> {
    Date::strptime(DATE_FORMAT, s.trim()).ok()
}

/// Parses an `HH:MM` time of day.
#[must_use]
pub fn parse_time(s: &str) -> Option<Time> {
    Time::strptime(TIME_FORMAT, s.trim()).ok()
}

/// Combines a date and a time into a datetime.
#[must_use]
pub fn parse_datetime(date: &str, time: &str) -> Option<DateTime> {
    Some(parse_date(date)?.to_datetime(parse_time(time)?))
}

/// `YYYY-MM-DDTHH:MM`, or `None` if either part does not parse.
#[must_use]
pub fn iso_datetime(date: &str, time: &str) -> Option<String> {
    parse_datetime(date, time).map(|dt| dt.strftime(ISO_FORMAT).to_string())
}

/// `May 12, 2025`, or the raw string if it does not parse.
#[must_use]
pub fn human_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.strftime(HUMAN_DATE_FORMAT).to_string(),
        None => date.to_string(),
    }
}

/// `May 12, 2025 @ 14:00`, falling back to the raw strings.
#[must_use]
pub fn human_datetime(date: &str, time: &str) -> String {
    match parse_datetime(date, time) {
        Some(dt) => format!(
            "{} @ {}",
            dt.strftime(HUMAN_DATE_FORMAT),
            dt.strftime(TIME_FORMAT)
        ),
        None => match (date.trim(), time.trim()) {
            ("", t) => t.to_string(),
            (d, "") => d.to_string(),
            (d, t) => format!("{d} @ {t}"),
        },
    }
}
