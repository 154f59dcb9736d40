//! Time-window utilities shared by the metric derivations.
//!
//! Two distinct "quarter" conventions exist in this system and must stay
//! distinct: waste comparisons use calendar 3-month offsets
//! ([`waste_quarter_bounds`]), while the profit window is a fixed 90-day
//! lookback ([`PROFIT_LOOKBACK_DAYS`]). Merging them would silently change
//! reported figures.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Fixed lookback for the "current quarter" profit aggregation.
pub const PROFIT_LOOKBACK_DAYS: u64 = 90;

/// Calendar-month span of a waste quarter.
pub const WASTE_QUARTER_MONTHS: u32 = 3;

/// Calendar-aware month subtraction: `2024-03-31 - 1mo = 2024-02-29`.
pub fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// First day of the month containing `date`.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    // with_day(1) is infallible for day 1
    date.with_day(1).unwrap_or(date)
}

/// `count` consecutive month-start dates ending at the month of `end`,
/// inclusive, oldest first.
pub fn month_buckets(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let end_month = month_floor(end);
    (0..count)
        .rev()
        .map(|offset| months_back(end_month, offset as u32))
        .collect()
}

/// `[today - 3mo, today)` — the current waste quarter.
pub fn waste_quarter_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (months_back(today, WASTE_QUARTER_MONTHS), today)
}

/// `[today - 6mo, today - 3mo)` — the waste quarter before that.
pub fn previous_waste_quarter_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        months_back(today, WASTE_QUARTER_MONTHS * 2),
        months_back(today, WASTE_QUARTER_MONTHS),
    )
}

/// Start of the fixed 90-day profit window.
pub fn profit_window_start(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(PROFIT_LOOKBACK_DAYS))
        .unwrap_or(NaiveDate::MIN)
}
