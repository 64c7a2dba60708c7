//! Yearly breakdown — how far through the year, month, week and day we are.
//!
//! All period boundaries are local midnights in the time zone of `now`.
//! The year is a flat 365 days and each period's share of the salary uses
//! the fixed 12/52/365 divisors regardless of the real period length.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};

use crate::types::{Period, PeriodEarnings, PeriodProgress};

pub const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;
pub const MS_PER_WEEK: f64 = 7.0 * MS_PER_DAY;
/// Flat 365-day year, leap years included.
pub const MS_PER_YEAR: f64 = 365.0 * MS_PER_DAY;

/// Local midnight at the start of `date`.
///
/// Where a DST jump skips midnight, the day starts at the first local
/// minute that exists. An ambiguous midnight resolves to the earlier one.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => (1..=24 * 60)
            .find_map(|m| {
                tz.from_local_datetime(&(midnight + Duration::minutes(m)))
                    .earliest()
            })
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        // Only reachable at the edge of chrono's representable range.
        _ => 31,
    }
}

fn elapsed_ms<Tz: TimeZone>(now: &DateTime<Tz>, since: DateTime<Tz>) -> f64 {
    now.clone().signed_duration_since(since).num_milliseconds() as f64
}

/// Elapsed fraction of each calendar period at `now`.
///
/// Pure in `now`: the same instant always gives the same result.
pub fn compute_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> PeriodProgress {
    let tz = now.timezone();
    let today = now.date_naive();

    let start_of_year = NaiveDate::from_ymd_opt(today.year(), 1, 1)
        .map(|d| local_midnight(&tz, d))
        .unwrap_or_else(|| local_midnight(&tz, today));
    let start_of_month = local_midnight(&tz, today.with_day(1).unwrap_or(today));
    let days_back = today.weekday().num_days_from_sunday() as i64;
    let start_of_week = local_midnight(&tz, today - Duration::days(days_back));
    let start_of_day = local_midnight(&tz, today);

    let ms_in_month = days_in_month(today) as f64 * MS_PER_DAY;

    PeriodProgress {
        year: elapsed_ms(now, start_of_year) / MS_PER_YEAR,
        month: elapsed_ms(now, start_of_month) / ms_in_month,
        week: elapsed_ms(now, start_of_week) / MS_PER_WEEK,
        day: elapsed_ms(now, start_of_day) / MS_PER_DAY,
    }
}

/// Scale a yearly salary by each period's progress.
pub fn compute_earnings(yearly_rate: f64, progress: &PeriodProgress) -> PeriodEarnings {
    let share = |period: Period| yearly_rate / period.yearly_divisor() * period.of_progress(progress);
    PeriodEarnings {
        year: share(Period::Year),
        month: share(Period::Month),
        week: share(Period::Week),
        day: share(Period::Day),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
