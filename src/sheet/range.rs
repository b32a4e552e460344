use std::fmt;

use super::column;
use super::grid::{Numeric, SheetGrid};
use crate::data::model::TimeSeriesTable;
use crate::error::{PlateError, PlateResult};

// ---------------------------------------------------------------------------
// CellRange – rectangular block of a sheet
// ---------------------------------------------------------------------------

/// How the last column of a block is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndColumn {
    /// `start + total_columns - 1`, i.e. one column per replicate per condition.
    Derived { total_columns: usize },
    /// A literal column label fixed by the sheet template.
    Fixed(String),
}

/// Inclusive column span and row window, in 0-based sheet coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start_col: u32,
    pub end_col: u32,
    pub first_row: u32,
    pub row_count: u32,
}

impl CellRange {
    /// Resolve a block from a start label, an end rule and a row window.
    pub fn resolve(start_label: &str, end: &EndColumn, first_row: u32, row_count: usize) -> PlateResult<Self> {
        let start_index = column::decode(start_label)?;
        let end_index = match end {
            EndColumn::Derived { total_columns } => {
                if *total_columns == 0 {
                    return Err(PlateError::InvalidColumnIndex(0));
                }
                start_index + total_columns - 1
            }
            EndColumn::Fixed(label) => column::decode(label)?,
        };
        if end_index < start_index {
            return Err(PlateError::InvertedColumnRange {
                start: start_label.to_ascii_uppercase(),
                end: column::encode(end_index)?,
            });
        }
        let to_offset = |index: usize| {
            u32::try_from(index - 1).map_err(|_| PlateError::InvalidColumnIndex(index as i64))
        };
        Ok(Self {
            start_col: to_offset(start_index)?,
            end_col: to_offset(end_index)?,
            first_row,
            row_count: u32::try_from(row_count)
                .map_err(|_| PlateError::InvalidColumnIndex(row_count as i64))?,
        })
    }

    pub fn width(&self) -> usize {
        (self.end_col - self.start_col + 1) as usize
    }

    pub fn last_row(&self) -> u32 {
        self.first_row + self.row_count.saturating_sub(1)
    }

    /// Read the block as a numeric table. Blank cells become NaN; any other
    /// non-numeric cell is an error naming its A1 reference.
    pub fn extract(&self, grid: &SheetGrid) -> PlateResult<TimeSeriesTable> {
        let mut columns = Vec::with_capacity(self.width());
        for col in self.start_col..=self.end_col {
            let mut values = Vec::with_capacity(self.row_count as usize);
            for row in self.first_row..self.first_row + self.row_count {
                let cell = grid.get(row, col);
                match cell.numeric() {
                    Numeric::Value(v) => values.push(v),
                    Numeric::Missing => values.push(f64::NAN),
                    Numeric::Invalid => {
                        return Err(PlateError::NonNumericCell {
                            cell: column::cell_reference(row, col),
                            value: cell.to_string(),
                        })
                    }
                }
            }
            columns.push(values);
        }
        TimeSeriesTable::from_columns(columns, self.row_count as usize)
    }

    /// Like [`extract`](Self::extract) but without columns that hold no data.
    pub fn extract_non_empty(&self, grid: &SheetGrid) -> PlateResult<TimeSeriesTable> {
        let mut table = self.extract(grid)?;
        let dropped = table.drop_empty_columns();
        if dropped > 0 {
            log::debug!("Dropped {dropped} empty column(s) from {self}");
        }
        Ok(table)
    }
}

impl fmt::Display for CellRange {
    /// A1 notation, e.g. `D62:O158`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            column::cell_reference(self.first_row, self.start_col),
            column::cell_reference(self.last_row(), self.end_col)
        )
    }
}
