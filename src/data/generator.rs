use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Inclusive range of integer measures to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    low: i64,
    high: i64,
}

impl ValueRange {
    /// Bounds given in the wrong order are swapped.
    pub fn new(a: i64, b: i64) -> Self {
        ValueRange {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn contains(&self, v: i64) -> bool {
        (self.low..=self.high).contains(&v)
    }
}

/// Inclusive range of days. A range whose end precedes its start is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// The `days` days ending at (and including) `end`. Zero days gives an
    /// empty range.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        if days == 0 {
            return match end.succ_opt() {
                Some(start) => DateRange { start, end },
                None => DateRange {
                    start: end,
                    end: end.pred_opt().unwrap_or(end),
                },
            };
        }
        let start = end
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        DateRange { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Number of days covered, zero when invalid.
    pub fn len(&self) -> usize {
        if self.is_valid() {
            (self.end - self.start).num_days() as usize + 1
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        days_from(self.start).take_while(move |d| *d <= end)
    }
}

/// `start` and every following day up to and including `NaiveDate::MAX`.
fn days_from(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.succ_opt())
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Draws measures uniformly and independently from a [`ValueRange`].
pub struct Generator {
    rng: StdRng,
    range: ValueRange,
}

impl Generator {
    /// Reproducible generator: the same seed always yields the same tables.
    pub fn seeded(seed: u64, range: ValueRange) -> Self {
        Generator {
            rng: StdRng::seed_from_u64(seed),
            range,
        }
    }

    pub fn from_entropy(range: ValueRange) -> Self {
        Generator {
            rng: StdRng::from_entropy(),
            range,
        }
    }

    pub fn new(seed: Option<u64>, range: ValueRange) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, range),
            None => Self::from_entropy(range),
        }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    fn draw(&mut self) -> i64 {
        self.rng.gen_range(self.range.low..=self.range.high)
    }

    /// `periods` consecutive daily rows starting at `start`.
    ///
    /// The calendar ends at `NaiveDate::MAX`; a series that would run past it
    /// stops there, so the table is shorter than `periods` only in that case.
    pub fn periods(&mut self, category: &str, start: NaiveDate, periods: usize) -> Table {
        let records: Vec<Record> = days_from(start)
            .take(periods)
            .map(|d| Record::dated(d, category, self.draw()))
            .collect();
        if records.len() < periods {
            log::warn!(
                "{} of {periods} periods fit before the last representable date",
                records.len()
            );
        }
        Table::dated(records)
    }

    /// One row per day of `range`; an invalid range gives an empty table.
    pub fn date_range(&mut self, category: &str, range: DateRange) -> Table {
        let records = range
            .days()
            .map(|d| Record::dated(d, category, self.draw()))
            .collect();
        Table::dated(records)
    }

    /// One row per label.
    pub fn categories<S: AsRef<str>>(&mut self, labels: &[S]) -> Table {
        let records = labels
            .iter()
            .map(|l| Record::new(l.as_ref(), self.draw()))
            .collect();
        Table::categorical(records)
    }

    /// One row per (day, label), ordered by day then label.
    pub fn usage<S: AsRef<str>>(&mut self, labels: &[S], range: DateRange) -> Table {
        let mut records = Vec::with_capacity(range.len() * labels.len());
        for d in range.days() {
            for l in labels {
                records.push(Record::dated(d, l.as_ref(), self.draw()));
            }
        }
        log::debug!(
            "generated {} usage rows over {} days",
            records.len(),
            range.len()
        );
        Table::dated(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn thirty_periods_within_range() {
        let mut g = Generator::seeded(7, ValueRange::new(50, 120));
        let t = g.periods("Saline", ymd(2024, 1, 1), 30);
        assert_eq!(t.len(), 30);
        assert!(t.iter().all(|r| (50..=120).contains(&r.measure)));
        assert_eq!(t.records()[29].date, Some(ymd(2024, 1, 30)));
    }

    #[test]
    fn same_seed_same_table() {
        let range = ValueRange::new(0, 1_000);
        let a = Generator::seeded(42, range).categories(&["a", "b", "c", "d"]);
        let b = Generator::seeded(42, range).categories(&["a", "b", "c", "d"]);
        assert_eq!(a, b);
    }

    #[test]
    fn inverted_date_range_is_empty_not_error() {
        let mut g = Generator::seeded(1, ValueRange::new(1, 5));
        let range = DateRange::new(ymd(2024, 2, 10), ymd(2024, 2, 1));
        let t = g.date_range("ICU", range);
        assert!(t.is_empty());
        assert!(t.is_dated());
        assert_eq!(range.len(), 0);
    }

    #[test]
    fn date_range_is_inclusive_across_month_end() {
        let mut g = Generator::seeded(1, ValueRange::new(1, 5));
        let t = g.date_range("ICU", DateRange::new(ymd(2024, 2, 27), ymd(2024, 3, 2)));
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn usage_orders_by_day_then_label() {
        let mut g = Generator::seeded(3, ValueRange::new(10, 20));
        let range = DateRange::trailing(ymd(2024, 5, 3), 3);
        assert_eq!(range.start, ymd(2024, 5, 1));
        let t = g.usage(&["ICU", "ER"], range);
        let keys: Vec<_> = t
            .iter()
            .map(|r| (r.date.unwrap(), r.category.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (ymd(2024, 5, 1), "ICU"),
                (ymd(2024, 5, 1), "ER"),
                (ymd(2024, 5, 2), "ICU"),
                (ymd(2024, 5, 2), "ER"),
                (ymd(2024, 5, 3), "ICU"),
                (ymd(2024, 5, 3), "ER"),
            ]
        );
    }

    #[test]
    fn zero_day_trailing_window_is_empty() {
        let end = ymd(2024, 5, 3);
        let range = DateRange::trailing(end, 0);
        assert!(range.is_empty());
        assert!(!range.is_valid());
        assert_eq!(range.days().count(), 0);
        assert_eq!(DateRange::trailing(end, 1).len(), 1);
        assert!(DateRange::trailing(NaiveDate::MAX, 0).is_empty());
    }

    #[test]
    fn periods_stop_at_end_of_calendar() {
        let mut g = Generator::seeded(1, ValueRange::new(1, 5));
        let t = g.periods("ICU", NaiveDate::MAX, 3);
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].date, Some(NaiveDate::MAX));
    }

    proptest! {
        #[test]
        fn period_count_matches_request(
            seed in any::<u64>(),
            periods in 0usize..400,
            a in -1_000i64..1_000,
            b in -1_000i64..1_000,
            offset in 0u32..200_000,
        ) {
            let start = ymd(1800, 1, 1) + Days::new(u64::from(offset));
            let range = ValueRange::new(a, b);
            let t = Generator::seeded(seed, range).periods("ICU", start, periods);
            prop_assert_eq!(t.len(), periods);
            prop_assert!(t.iter().all(|r| range.contains(r.measure)));
        }

        #[test]
        fn date_range_has_one_row_per_day(
            seed in any::<u64>(),
            offset in 0u32..200_000,
            span in -30i64..400,
        ) {
            let start = ymd(1800, 1, 1) + Days::new(u64::from(offset));
            let end = if span >= 0 {
                start + Days::new(span as u64)
            } else {
                start - Days::new(span.unsigned_abs())
            };
            let range = DateRange::new(start, end);
            let t = Generator::seeded(seed, ValueRange::new(50, 120)).date_range("ICU", range);
            prop_assert_eq!(t.len(), range.len());
            prop_assert_eq!(t.len(), if span >= 0 { span as usize + 1 } else { 0 });
        }
    }

    #[test]
    fn swapped_value_bounds_are_reordered() {
        let r = ValueRange::new(9, 2);
        assert_eq!((r.low(), r.high()), (2, 9));
        let mut g = Generator::seeded(0, ValueRange::new(4, 4));
        assert!(g.categories(&["x", "y"]).iter().all(|r| r.measure == 4));
    }
}
