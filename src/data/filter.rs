use serde::{Deserialize, Serialize};

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Threshold: a validated cutoff inside declared bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("threshold {value} is outside [{min}, {max}]")]
    OutOfBounds { value: f64, min: f64, max: f64 },
    #[error("threshold must be a finite number, got {0}")]
    NotFinite(f64),
    #[error("threshold bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f64, max: f64 },
}

/// What to do with a threshold that falls outside its bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPolicy {
    #[default]
    Clamp,
    Reject,
}

/// Inclusive bounds a threshold may take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBounds {
    min: f64,
    max: f64,
}

impl ThresholdBounds {
    pub fn new(min: f64, max: f64) -> Result<Self, ThresholdError> {
        if !min.is_finite() {
            return Err(ThresholdError::NotFinite(min));
        }
        if !max.is_finite() {
            return Err(ThresholdError::NotFinite(max));
        }
        if min > max {
            return Err(ThresholdError::InvertedBounds { min, max });
        }
        Ok(ThresholdBounds { min, max })
    }

    /// The bounds `[0, 1]` used by fraction sliders.
    pub fn unit() -> Self {
        ThresholdBounds { min: 0.0, max: 1.0 }
    }

    /// Observed measure bounds of `table`, or `None` if it has no rows.
    pub fn of_table(table: &Table) -> Option<Self> {
        let (min, max) = table.measure_bounds()?;
        Some(ThresholdBounds {
            min: min as f64,
            max: max as f64,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    // `f64::clamp` panics on inverted bounds.
    fn ensure_ordered(&self) -> Result<(), ThresholdError> {
        if self.min <= self.max {
            Ok(())
        } else {
            Err(ThresholdError::InvertedBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    fn check(&self, value: f64, policy: ThresholdPolicy) -> Result<f64, ThresholdError> {
        self.ensure_ordered()?;
        if !value.is_finite() {
            return Err(ThresholdError::NotFinite(value));
        }
        if (self.min..=self.max).contains(&value) {
            return Ok(value);
        }
        match policy {
            ThresholdPolicy::Clamp => Ok(value.clamp(self.min, self.max)),
            ThresholdPolicy::Reject => Err(ThresholdError::OutOfBounds {
                value,
                min: self.min,
                max: self.max,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    value: f64,
    bounds: ThresholdBounds,
}

impl Threshold {
    /// Validate `value` against `bounds`.
    pub fn new(
        value: f64,
        bounds: ThresholdBounds,
        policy: ThresholdPolicy,
    ) -> Result<Self, ThresholdError> {
        let value = bounds.check(value, policy)?;
        Ok(Threshold { value, bounds })
    }

    /// Map a fraction in `[0, 1]` linearly onto `bounds`.
    pub fn from_fraction(
        fraction: f64,
        bounds: ThresholdBounds,
        policy: ThresholdPolicy,
    ) -> Result<Self, ThresholdError> {
        let fraction = ThresholdBounds::unit().check(fraction, policy)?;
        bounds.ensure_ordered()?;
        let value = bounds.min + fraction * (bounds.max - bounds.min);
        Ok(Threshold { value, bounds })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn bounds(&self) -> ThresholdBounds {
        self.bounds
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Result of filtering a table.
///
/// `NoData` means there was nothing to filter; `Rows` with an empty table
/// means data existed but no row met the threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered {
    NoData,
    Rows(Table),
}

impl Filtered {
    pub fn rows(&self) -> Option<&Table> {
        match self {
            Filtered::Rows(t) => Some(t),
            Filtered::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Filtered::NoData)
    }

    /// Matching row count (zero for `NoData`).
    pub fn len(&self) -> usize {
        self.rows().map_or(0, Table::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rows whose measure is at or above `cutoff`, in their original order.
pub fn at_or_above(table: &Table, cutoff: f64) -> Filtered {
    if table.is_empty() {
        return Filtered::NoData;
    }
    let kept = table
        .iter()
        .filter(|r| r.measure as f64 >= cutoff)
        .cloned()
        .collect();
    Filtered::Rows(table.with_records(kept))
}

/// Apply a validated threshold.
pub fn apply(table: &Table, threshold: &Threshold) -> Filtered {
    at_or_above(table, threshold.value())
}

// ---------------------------------------------------------------------------
// Risk classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Low,
}

/// `High` when the record's measure reaches the threshold.
pub fn risk_level(record: &Record, threshold: &Threshold) -> RiskLevel {
    if record.measure as f64 >= threshold.value() {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

/// Split into (high, low) tables, each keeping the original order.
pub fn partition(table: &Table, threshold: &Threshold) -> (Table, Table) {
    let (high, low): (Vec<Record>, Vec<Record>) = table
        .iter()
        .cloned()
        .partition(|r| risk_level(r, threshold) == RiskLevel::High);
    (table.with_records(high), table.with_records(low))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stock(values: &[i64]) -> Table {
        Table::categorical(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Record::new(format!("item-{i}"), *v))
                .collect(),
        )
    }

    fn measures(f: &Filtered) -> Vec<i64> {
        f.rows()
            .map(|t| t.iter().map(|r| r.measure).collect())
            .unwrap_or_default()
    }

    #[test]
    fn half_fraction_over_table_bounds_keeps_upper_rows() {
        let t = stock(&[10, 40, 70, 85]);
        let bounds = ThresholdBounds::of_table(&t).unwrap();
        let th = Threshold::from_fraction(0.5, bounds, ThresholdPolicy::Reject).unwrap();
        assert_eq!(th.value(), 47.5);
        assert_eq!(measures(&apply(&t, &th)), vec![70, 85]);
    }

    #[test]
    fn threshold_equal_to_value_is_kept() {
        let t = stock(&[10, 40, 70, 85]);
        assert_eq!(measures(&at_or_above(&t, 70.0)), vec![70, 85]);
    }

    #[test]
    fn empty_result_differs_from_no_data() {
        let t = stock(&[1, 2, 3]);
        let none_match = at_or_above(&t, 100.0);
        assert_eq!(none_match, Filtered::Rows(stock(&[])));
        assert!(none_match.is_empty());
        assert!(!none_match.is_no_data());

        assert!(at_or_above(&stock(&[]), 0.0).is_no_data());
    }

    #[test]
    fn clamp_policy_pulls_value_into_bounds() {
        let b = ThresholdBounds::new(0.0, 10.0).unwrap();
        let th = Threshold::new(12.0, b, ThresholdPolicy::Clamp).unwrap();
        assert_eq!(th.value(), 10.0);
        let th = Threshold::from_fraction(-0.5, b, ThresholdPolicy::Clamp).unwrap();
        assert_eq!(th.value(), 0.0);
    }

    #[test]
    fn reject_policy_reports_bounds() {
        let b = ThresholdBounds::new(0.0, 10.0).unwrap();
        let err = Threshold::new(12.0, b, ThresholdPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            ThresholdError::OutOfBounds {
                value: 12.0,
                min: 0.0,
                max: 10.0
            }
        );
        assert!(Threshold::from_fraction(1.5, b, ThresholdPolicy::Reject).is_err());
    }

    #[test]
    fn nan_and_inverted_bounds_always_fail() {
        let b = ThresholdBounds::unit();
        assert!(matches!(
            Threshold::new(f64::NAN, b, ThresholdPolicy::Clamp),
            Err(ThresholdError::NotFinite(_))
        ));
        assert!(matches!(
            ThresholdBounds::new(5.0, 1.0),
            Err(ThresholdError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected_not_clamped() {
        let inverted = ThresholdBounds { min: 5.0, max: 1.0 };
        for policy in [ThresholdPolicy::Clamp, ThresholdPolicy::Reject] {
            assert_eq!(
                Threshold::new(3.0, inverted, policy),
                Err(ThresholdError::InvertedBounds { min: 5.0, max: 1.0 })
            );
            assert_eq!(
                Threshold::from_fraction(0.5, inverted, policy),
                Err(ThresholdError::InvertedBounds { min: 5.0, max: 1.0 })
            );
        }
    }

    #[test]
    fn partition_splits_by_risk() {
        let t = stock(&[5, 50, 15, 60]);
        let b = ThresholdBounds::new(0.0, 100.0).unwrap();
        let th = Threshold::new(20.0, b, ThresholdPolicy::Reject).unwrap();
        let (high, low) = partition(&t, &th);
        assert_eq!(high.iter().map(|r| r.measure).collect::<Vec<_>>(), vec![50, 60]);
        assert_eq!(low.iter().map(|r| r.measure).collect::<Vec<_>>(), vec![5, 15]);
        assert_eq!(risk_level(&t.records()[1], &th), RiskLevel::High);
    }

    proptest! {
        #[test]
        fn higher_threshold_yields_subset(
            values in proptest::collection::vec(0i64..500, 0..40),
            a in 0.0f64..500.0,
            b in 0.0f64..500.0,
        ) {
            let (t1, t2) = if a <= b { (a, b) } else { (b, a) };
            let t = stock(&values);
            let low = measures(&at_or_above(&t, t1));
            let high = measures(&at_or_above(&t, t2));
            // order-preserving subsequence of the lower-threshold result
            let mut it = low.iter();
            for v in &high {
                prop_assert!(it.any(|x| x == v));
            }
            prop_assert!(high.len() <= low.len());
        }

        #[test]
        fn extremes_return_all_or_nothing(
            values in proptest::collection::vec(-100i64..100, 1..40),
        ) {
            let t = stock(&values);
            let bounds = ThresholdBounds::of_table(&t).unwrap();
            prop_assert_eq!(at_or_above(&t, bounds.min()).len(), t.len());
            prop_assert_eq!(at_or_above(&t, bounds.max() + 1.0).len(), 0);
            let th = Threshold::from_fraction(0.0, bounds, ThresholdPolicy::Reject).unwrap();
            prop_assert_eq!(apply(&t, &th).len(), t.len());
        }
    }
}
