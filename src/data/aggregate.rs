use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::{Record, Table};

/// Calendar period demand is summed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    Day,
    Week,
    Month,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Day, Bucket::Week, Bucket::Month];

    /// First day of the bucket containing `date`. Weeks start on Monday.
    pub fn start_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Day => date,
            Bucket::Week => {
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Bucket::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bucket::Day => "Daily",
            Bucket::Week => "Weekly",
            Bucket::Month => "Monthly",
        })
    }
}

/// Sum measures per (bucket, category). Categorical tables pass through.
pub fn aggregate(table: &Table, bucket: Bucket) -> Table {
    if !table.is_dated() {
        return table.clone();
    }
    // Input rows are in date order, so buckets arrive in order too; a
    // linear scan keyed on (bucket, category) keeps first-appearance order.
    let mut out: Vec<Record> = Vec::new();
    for r in table {
        let Some(date) = r.date else { continue };
        let start = bucket.start_of(date);
        match out
            .iter_mut()
            .find(|o| o.date == Some(start) && o.category == r.category)
        {
            Some(o) => o.measure = o.measure.saturating_add(r.measure),
            None => out.push(Record::dated(start, r.category.clone(), r.measure)),
        }
    }
    out.sort_by_key(|r| r.date);
    Table::dated(out)
}

/// Summed measure per category, in first-appearance order.
pub fn totals_by_category(table: &Table) -> Table {
    let records = table
        .categories()
        .into_iter()
        .map(|cat| {
            let total = table
                .iter()
                .filter(|r| r.category == cat)
                .fold(0i64, |acc, r| acc.saturating_add(r.measure));
            Record::new(cat, total)
        })
        .collect();
    Table::categorical(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::{DateRange, Generator, ValueRange};

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn bucket_starts() {
        // 2024-05-15 is a Wednesday.
        assert_eq!(Bucket::Week.start_of(ymd(5, 15)), ymd(5, 13));
        assert_eq!(Bucket::Week.start_of(ymd(5, 13)), ymd(5, 13));
        assert_eq!(Bucket::Month.start_of(ymd(5, 15)), ymd(5, 1));
        assert_eq!(Bucket::Day.start_of(ymd(5, 15)), ymd(5, 15));
    }

    #[test]
    fn weekly_sums_per_category() {
        let t = Table::dated(vec![
            Record::dated(ymd(5, 12), "ICU", 1), // Sunday, previous week
            Record::dated(ymd(5, 13), "ICU", 2),
            Record::dated(ymd(5, 13), "ER", 5),
            Record::dated(ymd(5, 14), "ICU", 3),
        ]);
        let agg = aggregate(&t, Bucket::Week);
        let rows: Vec<_> = agg
            .iter()
            .map(|r| (r.date.unwrap(), r.category.as_str(), r.measure))
            .collect();
        assert_eq!(
            rows,
            vec![
                (ymd(5, 6), "ICU", 1),
                (ymd(5, 13), "ICU", 5),
                (ymd(5, 13), "ER", 5),
            ]
        );
    }

    #[test]
    fn aggregation_preserves_total() {
        let mut g = Generator::seeded(11, ValueRange::new(0, 50));
        let t = g.usage(&["ICU", "ER", "Surgery"], DateRange::new(ymd(1, 20), ymd(3, 10)));
        for b in Bucket::ALL {
            assert_eq!(aggregate(&t, b).total_measure(), t.total_measure());
        }
        assert_eq!(aggregate(&t, Bucket::Day), t);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let t = Table::dated(vec![
            Record::dated(ymd(5, 13), "ICU", i64::MAX - 1),
            Record::dated(ymd(5, 14), "ICU", i64::MAX - 1),
            Record::dated(ymd(5, 14), "ER", i64::MIN),
            Record::dated(ymd(5, 15), "ER", i64::MIN),
        ]);
        let weekly = aggregate(&t, Bucket::Week);
        assert_eq!(weekly.records()[0].measure, i64::MAX);
        let totals = totals_by_category(&t);
        assert_eq!(
            totals.records(),
            &[Record::new("ICU", i64::MAX), Record::new("ER", i64::MIN)]
        );
        assert_eq!(t.total_measure(), i64::MIN);
    }

    #[test]
    fn totals_keep_first_appearance_order() {
        let t = Table::dated(vec![
            Record::dated(ymd(1, 1), "ER", 2),
            Record::dated(ymd(1, 1), "ICU", 4),
            Record::dated(ymd(1, 2), "ER", 3),
        ]);
        let totals = totals_by_category(&t);
        assert!(!totals.is_dated());
        assert_eq!(
            totals.records(),
            &[Record::new("ER", 5), Record::new("ICU", 4)]
        );
    }
}
