//! Derives the hourly strip and the per-date summaries from one series.
//!
//! Dates are bucketed by UTC calendar date while the hour cutoff uses the
//! location's local time.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use common::models::{ForecastSample, ForecastSeries};
use std::collections::HashSet;

/// Earliest local hour a sample may have to represent its date.
pub const DAY_START_HOUR: u32 = 6;

/// Representative sample for one calendar date. `sample` is `None` when no
/// sample on that date starts at or after [`DAY_START_HOUR`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySummary<'a> {
    pub date: NaiveDate,
    pub sample: Option<&'a ForecastSample>,
}

/// Offset from the series location, falling back to UTC if it is out of range.
pub fn local_offset(series: &ForecastSeries) -> FixedOffset {
    FixedOffset::east_opt(series.location.utc_offset).unwrap_or(Utc.fix())
}

/// `timestamp` as wall-clock time at `offset`.
pub fn local_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    timestamp.with_timezone(&offset)
}

/// Distinct UTC calendar dates in first-occurrence order.
pub fn extract_distinct_dates(series: &ForecastSeries) -> Vec<NaiveDate> {
    let mut seen = HashSet::new();
    series
        .samples
        .iter()
        .map(|sample| sample.timestamp.date_naive())
        .filter(|date| seen.insert(*date))
        .collect()
}

/// One entry per date, in the order given.
pub fn build_daily_summaries<'a>(
    series: &'a ForecastSeries,
    dates: &[NaiveDate],
) -> Vec<DailySummary<'a>> {
    let offset = local_offset(series);

    dates
        .iter()
        .map(|&date| DailySummary {
            date,
            sample: series.samples.iter().find(|sample| {
                sample.timestamp.date_naive() == date
                    && local_time(sample.timestamp, offset).hour() >= DAY_START_HOUR
            }),
        })
        .collect()
}

pub fn derive_hourly_strip(series: &ForecastSeries) -> &[ForecastSample] {
    &series.samples
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::models::{Condition, Location, Temperature};
    use proptest::prelude::*;

    pub(crate) fn sample_at(timestamp: DateTime<Utc>) -> ForecastSample {
        ForecastSample {
            timestamp,
            condition: Condition {
                icon: "10d".to_string(),
                description: "light rain".to_string(),
            },
            temperature: Temperature {
                current: 280.65,
                min: 278.15,
                max: 283.15,
                feels_like: 277.15,
            },
            pressure: 1013.0,
            humidity: 81.0,
            wind_speed: 4.2,
            visibility: 10000.0,
        }
    }

    pub(crate) fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub(crate) fn series_at(utc_offset: i32, timestamps: &[DateTime<Utc>]) -> ForecastSeries {
        ForecastSeries {
            location: Location {
                name: "Pune".to_string(),
                sunrise: utc(2024, 1, 1, 1),
                sunset: utc(2024, 1, 1, 12),
                utc_offset,
            },
            samples: timestamps.iter().copied().map(sample_at).collect(),
        }
    }

    fn dates(values: &[&str]) -> Vec<NaiveDate> {
        values.iter().map(|v| v.parse().unwrap()).collect()
    }

    #[test]
    fn picks_first_sample_after_six_for_each_date() {
        let series = series_at(
            0,
            &[
                utc(2024, 1, 1, 3),
                utc(2024, 1, 1, 9),
                utc(2024, 1, 1, 15),
                utc(2024, 1, 2, 0),
                utc(2024, 1, 2, 9),
            ],
        );

        let distinct = extract_distinct_dates(&series);
        assert_eq!(distinct, dates(&["2024-01-01", "2024-01-02"]));

        let summaries = build_daily_summaries(&series, &distinct);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].sample, Some(&series.samples[1]));
        assert_eq!(summaries[1].sample, Some(&series.samples[4]));
    }

    #[test]
    fn date_with_only_early_samples_is_absent() {
        let series = series_at(0, &[utc(2024, 1, 1, 3)]);

        let distinct = extract_distinct_dates(&series);
        assert_eq!(distinct, dates(&["2024-01-01"]));

        let summaries = build_daily_summaries(&series, &distinct);
        assert_eq!(
            summaries,
            vec![DailySummary {
                date: distinct[0],
                sample: None
            }]
        );
    }

    #[test]
    fn later_qualifying_sample_is_never_chosen() {
        let series = series_at(
            0,
            &[utc(2024, 1, 1, 6), utc(2024, 1, 1, 9), utc(2024, 1, 1, 12)],
        );

        let summaries = build_daily_summaries(&series, &extract_distinct_dates(&series));
        assert_eq!(summaries[0].sample.map(|s| s.timestamp), Some(utc(2024, 1, 1, 6)));
    }

    #[test]
    fn distinct_dates_keep_first_occurrence_order() {
        let series = series_at(
            0,
            &[
                utc(2024, 1, 1, 21),
                utc(2024, 1, 2, 0),
                utc(2024, 1, 2, 3),
                utc(2024, 1, 3, 0),
            ],
        );

        let distinct = extract_distinct_dates(&series);
        assert_eq!(distinct, dates(&["2024-01-01", "2024-01-02", "2024-01-03"]));
        assert_eq!(distinct[1].to_string(), "2024-01-02");
    }

    #[test]
    fn one_summary_per_date_over_a_full_week() {
        let start = utc(2024, 3, 1, 0);
        let timestamps: Vec<_> = (0..56)
            .map(|i| start + chrono::Duration::hours(3 * i))
            .collect();
        let series = series_at(0, &timestamps);

        let distinct = extract_distinct_dates(&series);
        assert_eq!(distinct.len(), 7);

        let summaries = build_daily_summaries(&series, &distinct);
        assert_eq!(summaries.len(), distinct.len());
        for (summary, date) in summaries.iter().zip(&distinct) {
            assert_eq!(summary.date, *date);
            let chosen = summary.sample.expect("every full day has a 06:00 sample");
            assert_eq!(chosen.timestamp.hour(), 6);
        }
    }

    #[test]
    fn cutoff_uses_local_hour_but_bucket_uses_utc_date() {
        // UTC+5:30: 00:30Z is 06:00 local, 21:00Z is 02:30 local the next day
        let series = series_at(
            19_800,
            &[utc(2024, 1, 1, 0), utc(2024, 1, 1, 21)],
        );

        let summaries = build_daily_summaries(&series, &extract_distinct_dates(&series));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].sample, None);

        let shifted = series_at(
            19_800,
            &[Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap()],
        );
        let summaries = build_daily_summaries(&shifted, &extract_distinct_dates(&shifted));
        assert_eq!(summaries[0].sample, Some(&shifted.samples[0]));
    }

    #[test]
    fn dates_not_in_series_are_absent() {
        let series = series_at(0, &[utc(2024, 1, 1, 9)]);

        let summaries = build_daily_summaries(&series, &dates(&["2024-01-05", "2024-01-01"]));
        assert_eq!(summaries[0].sample, None);
        assert_eq!(summaries[1].sample, Some(&series.samples[0]));
    }

    #[test]
    fn empty_series_has_no_dates() {
        let series = series_at(0, &[]);

        assert!(extract_distinct_dates(&series).is_empty());
        assert!(build_daily_summaries(&series, &[]).is_empty());
        assert!(derive_hourly_strip(&series).is_empty());
    }

    #[test]
    fn hourly_strip_is_the_series_unchanged() {
        let series = series_at(
            0,
            &[utc(2024, 1, 1, 3), utc(2024, 1, 1, 6), utc(2024, 1, 1, 9)],
        );

        assert_eq!(derive_hourly_strip(&series), series.samples.as_slice());
    }

    #[test]
    fn repeated_calls_give_identical_output() {
        let series = series_at(0, &[utc(2024, 1, 1, 3), utc(2024, 1, 1, 9)]);

        let first = build_daily_summaries(&series, &extract_distinct_dates(&series));
        let second = build_daily_summaries(&series, &extract_distinct_dates(&series));
        assert_eq!(first, second);
    }

    /// Non-decreasing timestamps with gaps of 0 to 9 hours, plus a UTC offset
    fn arb_series() -> impl Strategy<Value = ForecastSeries> {
        (
            -50_400i32..=50_400,
            1_600_000_000i64..1_900_000_000,
            prop::collection::vec(0i64..=3, 0..64),
        )
            .prop_map(|(offset, start, gaps)| {
                let timestamps: Vec<_> = gaps
                    .iter()
                    .scan(start, |at, gap| {
                        *at += gap * 3 * 3600;
                        Some(*at)
                    })
                    .map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
                    .collect();
                series_at(offset, &timestamps)
            })
    }

    proptest! {
        #[test]
        fn distinct_dates_cover_series_in_first_occurrence_order(series in arb_series()) {
            let distinct = extract_distinct_dates(&series);

            let unique: HashSet<_> = distinct.iter().collect();
            prop_assert_eq!(unique.len(), distinct.len());

            let present: HashSet<_> = series.samples.iter().map(|s| s.timestamp.date_naive()).collect();
            prop_assert_eq!(present.len(), distinct.len());

            let first_index: Vec<_> = distinct
                .iter()
                .map(|d| series.samples.iter().position(|s| s.timestamp.date_naive() == *d))
                .collect();
            prop_assert!(first_index.iter().all(Option::is_some));
            prop_assert!(first_index.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn each_date_gets_its_earliest_daytime_sample(series in arb_series()) {
            let offset = local_offset(&series);
            let distinct = extract_distinct_dates(&series);
            let summaries = build_daily_summaries(&series, &distinct);

            prop_assert_eq!(summaries.len(), distinct.len());
            for (summary, date) in summaries.iter().zip(&distinct) {
                prop_assert_eq!(summary.date, *date);

                let expected = series.samples.iter().position(|s| {
                    s.timestamp.date_naive() == *date
                        && local_time(s.timestamp, offset).hour() >= DAY_START_HOUR
                });
                let chosen = summary
                    .sample
                    .and_then(|c| series.samples.iter().position(|s| std::ptr::eq(s, c)));
                prop_assert_eq!(chosen, expected);
            }
        }

        #[test]
        fn hourly_strip_equals_input(series in arb_series()) {
            prop_assert_eq!(derive_hourly_strip(&series), series.samples.as_slice());
        }
    }
}
