//! Point lookups over an ascending [`QuoteSeries`].
//!
//! Two predicates are supported, both answered by binary search on `day`:
//!
//! - **as of** ([`close_at`]): the last entry whose day is `<=` the target day;
//! - **strictly before** ([`close_before`]): the last entry whose day is `<` the
//!   target day. Performance baselines use this so a horizon day never serves
//!   as its own baseline.
//!
//! A target earlier than every entry yields `None`; that is an ordinary
//! outcome, not an error. If several entries share a day, the last one wins.

use crate::models::{
    calendar_day::{DateLike, normalize},
    quote_series::{DayClose, QuoteSeries},
};

/// Index of the last entry satisfying `pred`, assuming `pred` holds on a
/// prefix of `entries` (true for `day <= t` and `day < t` on ascending days).
fn last_matching(entries: &[DayClose], pred: impl Fn(&DayClose) -> bool) -> Option<usize> {
    // partition_point returns the first index where pred fails.
    entries.partition_point(pred).checked_sub(1)
}

pub fn entry_at<D: DateLike>(series: &QuoteSeries, target: D) -> Option<&DayClose> {
    let day = normalize(target);
    let entries = series.entries();
    last_matching(entries, |e| e.day <= day).map(|i| &entries[i])
}

pub fn entry_before<D: DateLike>(series: &QuoteSeries, target: D) -> Option<&DayClose> {
    let day = normalize(target);
    let entries = series.entries();
    last_matching(entries, |e| e.day < day).map(|i| &entries[i])
}

/// Close of the last entry with `day <= normalize(target)`.
pub fn close_at<D: DateLike>(series: &QuoteSeries, target: D) -> Option<f64> {
    entry_at(series, target).map(|e| e.close)
}

/// Close of the last entry with `day < normalize(target)`.
pub fn close_before<D: DateLike>(series: &QuoteSeries, target: D) -> Option<f64> {
    entry_before(series, target).map(|e| e.close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar_day::CalendarDay;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> CalendarDay {
        CalendarDay::from_ymd(2024, 5, d).unwrap()
    }

    fn series(points: &[(u32, f64)]) -> QuoteSeries {
        QuoteSeries::from_checked(points.iter().map(|&(d, c)| DayClose::new(day(d), c)).collect())
    }

    #[test]
    fn as_of_and_strictly_before_around_a_gap() {
        // day 2 is missing
        let s = series(&[(1, 10.0), (3, 30.0)]);

        assert_eq!(close_at(&s, day(2)), Some(10.0));
        assert_eq!(close_at(&s, day(3)), Some(30.0));
        assert_eq!(close_at(&s, day(9)), Some(30.0));
        assert_eq!(close_before(&s, day(3)), Some(10.0));
        assert_eq!(close_before(&s, day(4)), Some(30.0));
    }

    #[test]
    fn targets_before_all_data_are_none() {
        let s = series(&[(1, 10.0), (3, 30.0)]);
        let day0 = CalendarDay::from_ymd(2024, 4, 30).unwrap();
        assert_eq!(close_at(&s, day0), None);
        assert_eq!(close_before(&s, day0), None);
        // the first day is not strictly before itself
        assert_eq!(close_before(&s, day(1)), None);
        assert_eq!(close_at(&s, day(1)), Some(10.0));
    }

    #[test]
    fn empty_series_is_none() {
        let s = QuoteSeries::default();
        assert_eq!(close_at(&s, day(1)), None);
        assert_eq!(close_before(&s, day(1)), None);
    }

    #[test]
    fn intraday_targets_are_normalized() {
        let s = series(&[(1, 10.0), (2, 20.0), (3, 30.0)]);
        let late_on_2nd = Utc.with_ymd_and_hms(2024, 5, 2, 23, 59, 59).unwrap();
        assert_eq!(close_at(&s, late_on_2nd), Some(20.0));
        assert_eq!(close_before(&s, late_on_2nd), Some(10.0));
    }

    #[test]
    fn duplicate_days_pick_the_last_entry() {
        let s = series(&[(1, 10.0), (2, 20.0), (2, 21.0), (2, 22.0), (4, 40.0)]);
        assert_eq!(close_at(&s, day(2)), Some(22.0));
        assert_eq!(close_at(&s, day(3)), Some(22.0));
        assert_eq!(close_before(&s, day(3)), Some(22.0));
        assert_eq!(close_before(&s, day(2)), Some(10.0));
        assert_eq!(entry_at(&s, day(2)).map(|e| e.close), Some(22.0));
    }

    #[test]
    fn matches_a_linear_scan() {
        let points: Vec<(u32, f64)> = (1..=31).filter(|d| d % 3 != 0).map(|d| (d, f64::from(d))).collect();
        let s = series(&points);
        for t in 1..=31 {
            let target = day(t);
            let scan_at = s.iter().filter(|e| e.day <= target).last().map(|e| e.close);
            let scan_before = s.iter().filter(|e| e.day < target).last().map(|e| e.close);
            assert_eq!(close_at(&s, target), scan_at, "close_at day {t}");
            assert_eq!(close_before(&s, target), scan_before, "close_before day {t}");
        }
    }
}
