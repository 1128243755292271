use super::model::{Column, Table, UnknownColumn, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error(transparent)]
    UnknownColumn(#[from] UnknownColumn),
    #[error("column `{0}` is not in the table schema")]
    MissingColumn(Column),
}

/// Ordered (domain, range) pairs ready for a line or point chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub domain: Column,
    pub range: Column,
    pub pairs: Vec<(Value, Value)>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Numeric points; a value with no numeric form is placed at its index.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                [
                    x.as_f64().unwrap_or(i as f64),
                    y.as_f64().unwrap_or(i as f64),
                ]
            })
            .collect()
    }
}

/// Project `table` onto a pair of columns named by string.
pub fn project(table: &Table, domain: &str, range: &str) -> Result<Series, ProjectionError> {
    let domain: Column = domain.parse()?;
    let range: Column = range.parse()?;
    project_columns(table, domain, range)
}

pub fn project_columns(
    table: &Table,
    domain: Column,
    range: Column,
) -> Result<Series, ProjectionError> {
    for col in [domain, range] {
        if !table.has_column(col) {
            return Err(ProjectionError::MissingColumn(col));
        }
    }
    // Schema membership guarantees every record has both cells.
    let pairs = table
        .iter()
        .filter_map(|r| Some((r.value(domain)?, r.value(range)?)))
        .collect();
    Ok(Series {
        name: format!("{range} by {domain}"),
        domain,
        range,
        pairs,
    })
}

/// One series per category, categories in first-appearance order.
pub fn project_by_category(
    table: &Table,
    domain: &str,
    range: &str,
) -> Result<Vec<Series>, ProjectionError> {
    let domain: Column = domain.parse()?;
    let range: Column = range.parse()?;
    // Validate even when the table is empty.
    project_columns(&table.with_records(Vec::new()), domain, range)?;

    table
        .categories()
        .into_iter()
        .map(|cat| {
            let rows = table
                .iter()
                .filter(|r| r.category == cat)
                .cloned()
                .collect();
            let mut series = project_columns(&table.with_records(rows), domain, range)?;
            series.name = cat;
            Ok(series)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn demand() -> Table {
        Table::dated(vec![
            Record::dated(day(1), "ICU", 10),
            Record::dated(day(1), "ER", 20),
            Record::dated(day(2), "ICU", 11),
            Record::dated(day(2), "ER", 21),
        ])
    }

    #[test]
    fn projects_pairs_in_row_order() {
        let s = project(&demand(), "date", "measure").unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.pairs[1], (Value::Date(day(1)), Value::Integer(20)));
        assert_eq!(s.domain, Column::Date);
    }

    #[test]
    fn rejects_unknown_and_missing_columns() {
        assert_eq!(
            project(&demand(), "date", "stock"),
            Err(ProjectionError::UnknownColumn(UnknownColumn("stock".into())))
        );
        let stock = Table::categorical(vec![Record::new("Gloves", 3)]);
        assert_eq!(
            project(&stock, "date", "measure"),
            Err(ProjectionError::MissingColumn(Column::Date))
        );
        assert_eq!(
            project_by_category(&Table::categorical(Vec::new()), "date", "measure"),
            Err(ProjectionError::MissingColumn(Column::Date))
        );
    }

    #[test]
    fn text_domain_plots_at_index() {
        let stock = Table::categorical(vec![Record::new("Gloves", 3), Record::new("Masks", 9)]);
        let s = project(&stock, "category", "measure").unwrap();
        assert_eq!(s.plot_points(), vec![[0.0, 3.0], [1.0, 9.0]]);
    }

    #[test]
    fn splits_series_per_category() {
        let series = project_by_category(&demand(), "date", "measure").unwrap();
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ICU", "ER"]);
        assert_eq!(series[1].pairs[1].1, Value::Integer(21));
    }

    #[test]
    fn empty_table_projects_to_empty_series() {
        let s = project(&Table::dated(Vec::new()), "date", "measure").unwrap();
        assert!(s.is_empty());
    }
}
