//! Date capabilities: relative dates and calendar names.

use crate::error::EvalError;
use chrono::format::{Item, StrftimeItems};
use chrono::{Days, NaiveDate};
use std::fmt::Write;

/// `mm/dd/yy`
pub const DEFAULT_DATE_FORMAT: &str = "%D";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_ABBRS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const DAY_ABBRS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// `today` shifted by `days` (negative moves into the past).
pub fn shift(today: NaiveDate, days: i64) -> Result<NaiveDate, EvalError> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        today.checked_add_days(magnitude)
    } else {
        today.checked_sub_days(magnitude)
    };
    shifted.ok_or_else(|| {
        EvalError::invalid_arguments("date", format!("{} days is out of range", days))
    })
}

/// Render `date` with a strftime-style format.
///
/// Unknown specifiers and time-of-day specifiers are rejected instead of panicking.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String, EvalError> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(EvalError::Format(format.to_string()));
    }

    let mut rendered = String::new();
    write!(rendered, "{}", date.format_with_items(items.iter()))
        .map_err(|_| EvalError::Format(format.to_string()))?;
    Ok(rendered)
}
