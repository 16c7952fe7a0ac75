//! Trailing performance over a fixed list of horizons.
//!
//! For each [`Horizon`] the baseline is the last close **strictly before** the
//! horizon day, and the ratio is `last_close / baseline - 1`. Horizon days are
//! anchored at the wall clock, not at the series' last day, so a stale series
//! shows up as stale numbers rather than silently shifting the windows.
//!
//! Results are positional: element `i` belongs to `Horizon::ALL[i]`.

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};

use crate::{
    errors::{Error, Result},
    models::{
        calendar_day::{CalendarDay, normalize},
        quote_series::QuoteSeries,
    },
};

/// A fixed lookback point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    /// Five times 24 hours before now.
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    /// January 1st of the current UTC year.
    YearToDate,
    OneYear,
    TwoYears,
    ThreeYears,
    FiveYears,
}

impl Horizon {
    /// Every horizon, in output order.
    pub const ALL: [Horizon; 9] = [
        Horizon::FiveDays,
        Horizon::OneMonth,
        Horizon::ThreeMonths,
        Horizon::SixMonths,
        Horizon::YearToDate,
        Horizon::OneYear,
        Horizon::TwoYears,
        Horizon::ThreeYears,
        Horizon::FiveYears,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Horizon::FiveDays => "5D",
            Horizon::OneMonth => "1M",
            Horizon::ThreeMonths => "3M",
            Horizon::SixMonths => "6M",
            Horizon::YearToDate => "YTD",
            Horizon::OneYear => "1Y",
            Horizon::TwoYears => "2Y",
            Horizon::ThreeYears => "3Y",
            Horizon::FiveYears => "5Y",
        }
    }

    /// The horizon day as seen from `now`.
    ///
    /// Month and year horizons use calendar arithmetic clamped to the end of
    /// the month; the five-day horizon is a fixed 120 hours.
    pub fn day_from(self, now: DateTime<Utc>) -> CalendarDay {
        let today = normalize(now);
        match self {
            Horizon::FiveDays => now
                .checked_sub_signed(Duration::days(5))
                .map_or_else(|| today.days_back(5), normalize),
            Horizon::OneMonth => today.months_back(1),
            Horizon::ThreeMonths => today.months_back(3),
            Horizon::SixMonths => today.months_back(6),
            Horizon::YearToDate => today.start_of_year(),
            Horizon::OneYear => today.years_back(1),
            Horizon::TwoYears => today.years_back(2),
            Horizon::ThreeYears => today.years_back(3),
            Horizon::FiveYears => today.years_back(5),
        }
    }
}

impl Serialize for Horizon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One labelled ratio, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizonPerformance {
    pub horizon: Horizon,
    pub ratio: Option<f64>,
}

/// Pairs positional results with their horizons.
pub fn labeled(ratios: &[Option<f64>]) -> Vec<HorizonPerformance> {
    Horizon::ALL
        .iter()
        .zip(ratios)
        .map(|(&horizon, &ratio)| HorizonPerformance { horizon, ratio })
        .collect()
}

/// Trailing ratios relative to the current time. See [`performances_at`].
pub fn performances(series: &QuoteSeries) -> Result<Vec<Option<f64>>> {
    performances_at(series, Utc::now())
}

/// Trailing ratios for every [`Horizon`] as seen from `now`.
///
/// An element is `None` when the series has no close strictly before that
/// horizon day, or the baseline close is zero.
///
/// # Errors
///
/// [`Error::EmptySeries`] when `series` has no entries.
pub fn performances_at(series: &QuoteSeries, now: DateTime<Utc>) -> Result<Vec<Option<f64>>> {
    let last = series
        .last_close()
        .ok_or_else(|| Error::EmptySeries("no closes to measure performance against".to_string()))?;

    Ok(Horizon::ALL
        .iter()
        .map(|h| {
            series
                .close_before(h.day_from(now))
                .filter(|base| *base != 0.0)
                .map(|base| last / base - 1.0)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote_series::DayClose;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 16, 18, 0, 0).unwrap()
    }

    #[test]
    fn horizon_days_from_a_fixed_clock() {
        let got: Vec<CalendarDay> = Horizon::ALL.iter().map(|h| h.day_from(now())).collect();
        assert_eq!(
            got,
            vec![
                day(2025, 10, 11),
                day(2025, 9, 16),
                day(2025, 7, 16),
                day(2025, 4, 16),
                day(2025, 1, 1),
                day(2024, 10, 16),
                day(2023, 10, 16),
                day(2022, 10, 16),
                day(2020, 10, 16),
            ]
        );
    }

    #[test]
    fn five_day_horizon_is_fixed_hours() {
        // 01:00Z minus 120h is still 01:00Z, five days earlier.
        let early = Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();
        assert_eq!(Horizon::FiveDays.day_from(early), day(2024, 2, 25));
    }

    #[test]
    fn horizons_saturate_at_the_earliest_day() {
        let first = normalize(DateTime::<Utc>::MIN_UTC);
        for h in Horizon::ALL {
            assert_eq!(h.day_from(DateTime::<Utc>::MIN_UTC), first, "{}", h.label());
        }
    }

    #[test]
    fn labels_are_stable() {
        let labels: Vec<&str> = Horizon::ALL.iter().map(|h| h.label()).collect();
        assert_eq!(labels, ["5D", "1M", "3M", "6M", "YTD", "1Y", "2Y", "3Y", "5Y"]);
    }

    #[test]
    fn one_year_ratio_uses_close_strictly_before_horizon() {
        let series = QuoteSeries::try_from_entries(vec![
            DayClose::new(day(2024, 10, 15), 100.0),
            // on the horizon day itself: must not be the baseline
            DayClose::new(day(2024, 10, 16), 105.0),
            DayClose::new(day(2025, 10, 16), 110.0),
        ])
        .unwrap();

        let ratios = performances_at(&series, now()).unwrap();
        assert_eq!(ratios.len(), Horizon::ALL.len());
        let one_year = ratios[5].unwrap();
        assert!((one_year - 0.10).abs() < 1e-9, "{one_year}");

        // nothing before the 2- to 5-year horizons
        assert_eq!(&ratios[6..], &[None, None, None]);
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = performances_at(&QuoteSeries::default(), now()).unwrap_err();
        assert!(matches!(err, Error::EmptySeries(_)));
    }

    #[test]
    fn zero_baseline_has_no_ratio() {
        let series = QuoteSeries::try_from_entries(vec![
            DayClose::new(day(2020, 1, 2), 0.0),
            DayClose::new(day(2025, 10, 1), 5.0),
            DayClose::new(day(2025, 10, 15), 5.0),
        ])
        .unwrap();
        let ratios = performances_at(&series, now()).unwrap();
        assert_eq!(ratios[8], None);
        assert!((ratios[0].unwrap() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn labeled_output_serializes_by_label() {
        let rows = labeled(&[Some(0.5), None]);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            serde_json::to_value(&rows).unwrap(),
            serde_json::json!([
                { "horizon": "5D", "ratio": 0.5 },
                { "horizon": "1M", "ratio": null }
            ])
        );
    }
}
