use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Column – a named slot in a table's schema
// ---------------------------------------------------------------------------

/// The columns a [`Table`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Date,
    Category,
    Measure,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Category => "category",
            Column::Measure => "measure",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a column name does not name any [`Column`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column `{0}`")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Column::Date),
            "category" => Ok(Column::Category),
            "measure" => Ok(Column::Measure),
            _ => Err(UnknownColumn(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl Value {
    /// Numeric form used for plotting. Dates count days from the common era.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Date(d) => Some(d.num_days_from_ce() as f64),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row
// ---------------------------------------------------------------------------

/// One row: a category label, its measure and, for time series, the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub category: String,
    pub measure: i64,
    pub date: Option<NaiveDate>,
}

impl Record {
    pub fn new(category: impl Into<String>, measure: i64) -> Self {
        Record {
            category: category.into(),
            measure,
            date: None,
        }
    }

    pub fn dated(date: NaiveDate, category: impl Into<String>, measure: i64) -> Self {
        Record {
            category: category.into(),
            measure,
            date: Some(date),
        }
    }

    /// Cell for `column`, or `None` when the record has no date.
    pub fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::Date => self.date.map(Value::Date),
            Column::Category => Some(Value::Text(self.category.clone())),
            Column::Measure => Some(Value::Integer(self.measure)),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – an ordered, immutable sequence of records sharing a schema
// ---------------------------------------------------------------------------

/// Schema of a table holding a daily time series.
pub const DATED_SCHEMA: [Column; 3] = [Column::Date, Column::Category, Column::Measure];

/// Schema of a table holding one row per category.
pub const CATEGORICAL_SCHEMA: [Column; 2] = [Column::Category, Column::Measure];

/// Rows plus their schema. Tables are built once and only read afterwards;
/// every transformation produces a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    schema: Vec<Column>,
    records: Vec<Record>,
}

impl Table {
    /// A time-series table. Every record is expected to carry a date.
    pub fn dated(records: Vec<Record>) -> Self {
        debug_assert!(records.iter().all(|r| r.date.is_some()));
        Table {
            schema: DATED_SCHEMA.to_vec(),
            records,
        }
    }

    /// A table keyed by category only. Dates on the records are dropped.
    pub fn categorical(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .map(|r| Record { date: None, ..r })
            .collect();
        Table {
            schema: CATEGORICAL_SCHEMA.to_vec(),
            records,
        }
    }

    /// A table with the same schema as `self` holding `records`.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Table {
            schema: self.schema.clone(),
            records,
        }
    }

    pub fn schema(&self) -> &[Column] {
        &self.schema
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.schema.contains(&column)
    }

    pub fn is_dated(&self) -> bool {
        self.has_column(Column::Date)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest measure, or `None` for an empty table.
    pub fn measure_bounds(&self) -> Option<(i64, i64)> {
        let min = self.records.iter().map(|r| r.measure).min()?;
        let max = self.records.iter().map(|r| r.measure).max()?;
        Some((min, max))
    }

    /// Sum of all measures, saturating at the `i64` limits.
    pub fn total_measure(&self) -> i64 {
        self.records
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.measure))
    }

    /// Category labels in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for r in &self.records {
            if !seen.iter().any(|c| c == &r.category) {
                seen.push(r.category.clone());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
