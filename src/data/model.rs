use std::ops::Index;

use crate::error::{PlateError, PlateResult};

// ---------------------------------------------------------------------------
// Conditions – ordered list of treatment names
// ---------------------------------------------------------------------------

/// Experimental conditions in file order. The order defines which block of
/// replicate columns belongs to which condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    names: Vec<String>,
}

impl Conditions {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of data columns these conditions occupy with `rep` replicates.
    pub fn total_columns(&self, rep: usize) -> usize {
        self.names.len() * rep
    }
}

impl Index<usize> for Conditions {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.names[index]
    }
}

// ---------------------------------------------------------------------------
// TimeSeriesTable – headerless numeric table (rows = time points)
// ---------------------------------------------------------------------------

/// Rectangular numeric table stored column-major. Missing readings are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl TimeSeriesTable {
    /// Build from row-major data; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PlateResult<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut columns = vec![Vec::with_capacity(rows.len()); n_cols];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(PlateError::RaggedTable {
                    row: i,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            for (col, &v) in columns.iter_mut().zip(row) {
                col.push(v);
            }
        }
        Ok(Self {
            columns,
            n_rows: rows.len(),
        })
    }

    /// Build from columns of equal length.
    pub fn from_columns(columns: Vec<Vec<f64>>, n_rows: usize) -> PlateResult<Self> {
        if let Some((i, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != n_rows) {
            return Err(PlateError::RaggedTable {
                row: i,
                expected: n_rows,
                found: col.len(),
            });
        }
        Ok(Self { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    pub fn columns(&self) -> impl Iterator<Item = &[f64]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Values of one row across all columns.
    pub fn row(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(move |c| c[index])
    }

    /// Remove columns in which every value is missing. Returns the number
    /// of columns dropped.
    pub fn drop_empty_columns(&mut self) -> usize {
        let before = self.columns.len();
        self.columns.retain(|c| c.iter().any(|v| !v.is_nan()));
        before - self.columns.len()
    }
}

// ---------------------------------------------------------------------------
// ConditionStats – per-row replicate statistics for one condition
// ---------------------------------------------------------------------------

/// Mean and population standard deviation across one condition's replicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl ConditionStats {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `(mean - std, mean + std)` at each time point.
    pub fn bounds(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mean
            .iter()
            .zip(&self.std)
            .map(|(&m, &s)| (m - s, m + s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_columns() {
        let t = TimeSeriesTable::from_rows(vec![vec![1.0, 3.0], vec![2.0, 4.0]]).unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.column(1), &[3.0, 4.0]);
        assert_eq!(t.row(1).collect::<Vec<_>>(), vec![2.0, 4.0]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TimeSeriesTable::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            PlateError::RaggedTable {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn fully_missing_columns_are_dropped() {
        let mut t = TimeSeriesTable::from_rows(vec![
            vec![0.1, f64::NAN, f64::NAN],
            vec![0.2, f64::NAN, 0.3],
        ])
        .unwrap();
        assert_eq!(t.drop_empty_columns(), 1);
        assert_eq!(t.n_cols(), 2);
        assert!(t.column(1)[0].is_nan());
        assert_eq!(t.column(1)[1], 0.3);
    }

    #[test]
    fn conditions_column_budget() {
        let c = Conditions::new(vec!["WT".into(), "dA".into()]);
        assert_eq!(c.total_columns(3), 6);
        assert_eq!(&c[1], "dA");
    }
}
