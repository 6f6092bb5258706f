use chrono::{Datelike, Days, NaiveDate};

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

/// Full month name used as the Month grouping key (e.g. "January").
pub fn month_label(date: NaiveDate) -> String {
    MONTH_NAMES[date.month0() as usize].to_string()
}

/// Abbreviated month + zero-padded day used as the Day grouping key (e.g. "Jan 05").
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Position of a month label in calendar order, or None for labels that are
/// not month names.
pub fn month_position(label: &str) -> Option<usize> {
    MONTH_NAMES.iter().position(|name| *name == label)
}

/// Every date in `[start, end]` inclusive, ascending. Empty when `end < start`.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;

    while current <= end {
        dates.push(current);
        current = match current.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    dates
}
