use std::ops::Range;

use super::model::{ConditionStats, Conditions, TimeSeriesTable};
use crate::error::{PlateError, PlateResult};

// ---------------------------------------------------------------------------
// Running mean / variance
// ---------------------------------------------------------------------------

/// Welford accumulator for the mean and population variance of one row.
/// NaN inputs propagate to both results.
struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
        }
    }

    fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    fn mean(&self) -> f64 {
        if self.n_vals == 0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    /// Divisor is the count, not count - 1.
    fn population_std(&self) -> f64 {
        if self.n_vals == 0 {
            f64::NAN
        } else {
            let var = self.diff_2_sum / self.n_vals as f64;
            // rounding can leave a tiny negative; NaN must pass through
            if var < 0.0 { 0.0 } else { var.sqrt() }
        }
    }
}

// ---------------------------------------------------------------------------
// Replicate grouping
// ---------------------------------------------------------------------------

/// Check that `n_cols` splits into exactly one block of `rep` per condition.
pub fn validate_layout(n_cols: usize, rep: usize, n_conditions: usize) -> PlateResult<()> {
    if rep == 0 {
        return Err(PlateError::InvalidReplicateCount);
    }
    if n_cols % rep != 0 || n_cols / rep != n_conditions {
        return Err(PlateError::ConditionMismatch {
            conditions: n_conditions,
            rep,
            columns: n_cols,
        });
    }
    Ok(())
}

/// Table columns holding the replicates of condition `index`.
pub fn replicate_columns(index: usize, rep: usize) -> Range<usize> {
    index * rep..(index + 1) * rep
}

/// Per-condition mean and population std across replicate columns.
///
/// Fails before computing anything if the table does not hold exactly
/// `conditions.len() * rep` columns.
pub fn aggregate(table: &TimeSeriesTable, rep: usize, conditions: &Conditions) -> PlateResult<Vec<ConditionStats>> {
    validate_layout(table.n_cols(), rep, conditions.len())?;

    let stats = (0..conditions.len())
        .map(|cond| {
            let group: Vec<&[f64]> = replicate_columns(cond, rep).map(|c| table.column(c)).collect();
            let (mean, std) = (0..table.n_rows())
                .map(|row| {
                    let mut acc = Accumulator::new();
                    for col in &group {
                        acc.add(col[row]);
                    }
                    (acc.mean(), acc.population_std())
                })
                .unzip();
            ConditionStats { mean, std }
        })
        .collect();
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Time axis
// ---------------------------------------------------------------------------

/// Sample times `interval * i` for each of `n_rows` rows (exclusive upper
/// bound at `n_rows * interval`).
pub fn time_axis(interval: f64, n_rows: usize) -> Vec<f64> {
    (0..n_rows).map(|i| interval * i as f64).collect()
}
