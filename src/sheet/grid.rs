use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::PlateError;

// ---------------------------------------------------------------------------
// CellValue – a single raw sheet cell
// ---------------------------------------------------------------------------

/// A raw spreadsheet cell, independent of the reading library.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Formula error such as `#DIV/0!`, kept as text.
    Error(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

/// Outcome of reading a cell as a measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Value(f64),
    Missing,
    Invalid,
}

impl CellValue {
    /// Interpret the cell as a measurement. Blank text counts as missing.
    pub fn numeric(&self) -> Numeric {
        match self {
            CellValue::Empty => Numeric::Missing,
            CellValue::Number(v) => Numeric::Value(*v),
            CellValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Numeric::Missing
                } else {
                    s.parse::<f64>().map_or(Numeric::Invalid, Numeric::Value)
                }
            }
            CellValue::Bool(_) | CellValue::Error(_) => Numeric::Invalid,
        }
    }

    /// Text content used for label searches; empty cells have none.
    pub fn text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

/// Convert calamine `Data` to our `CellValue`.
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Excel serial value; time columns stay numeric like any other reading.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(format!("{e:?}")),
    }
}

// ---------------------------------------------------------------------------
// SheetGrid – absolute-coordinate view of one worksheet
// ---------------------------------------------------------------------------

/// Cells of one worksheet addressed by absolute 0-based `(row, col)`.
///
/// Readers report only the used area of a sheet; `origin` records where that
/// area starts so lookups always use the sheet's own coordinates.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    origin: (u32, u32),
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Build a grid whose first row/column sit at sheet position A1.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            origin: (0, 0),
            rows,
        }
    }

    pub fn from_range(range: &Range<Data>) -> Self {
        let origin = range.start().unwrap_or((0, 0));
        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();
        Self { origin, rows }
    }

    /// Cell at absolute `(row, col)`; cells outside the used area are empty.
    pub fn get(&self, row: u32, col: u32) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        if row < self.origin.0 || col < self.origin.1 {
            return &EMPTY;
        }
        let r = (row - self.origin.0) as usize;
        let c = (col - self.origin.1) as usize;
        self.rows
            .get(r)
            .and_then(|cells| cells.get(c))
            .unwrap_or(&EMPTY)
    }

    /// One past the last used row, in absolute coordinates.
    pub fn row_end(&self) -> u32 {
        self.origin.0 + self.rows.len() as u32
    }

    /// One past the last used column, in absolute coordinates.
    pub fn col_end(&self) -> u32 {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        self.origin.1 + width as u32
    }
}

/// Open a workbook and load one named sheet.
pub fn open_sheet(path: &Path, sheet_name: &str) -> Result<SheetGrid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let names = workbook.sheet_names().to_vec();
    if !names.iter().any(|n| n == sheet_name) {
        return Err(PlateError::SheetNotFound {
            sheet: sheet_name.to_string(),
            available: names.join(", "),
        }
        .into());
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("reading sheet '{sheet_name}'"))?;
    log::info!(
        "Loaded sheet '{sheet_name}' from {} ({} x {} used cells)",
        path.display(),
        range.height(),
        range.width()
    );
    Ok(SheetGrid::from_range(&range))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_interpretation() {
        assert_eq!(CellValue::Number(0.5).numeric(), Numeric::Value(0.5));
        assert_eq!(CellValue::Text(" 1.25 ".into()).numeric(), Numeric::Value(1.25));
        assert_eq!(CellValue::Text("  ".into()).numeric(), Numeric::Missing);
        assert_eq!(CellValue::Empty.numeric(), Numeric::Missing);
        assert_eq!(CellValue::Text("OVRFLW".into()).numeric(), Numeric::Invalid);
        assert_eq!(CellValue::Bool(true).numeric(), Numeric::Invalid);
    }

    #[test]
    fn range_offsets_are_respected() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("OD600:600".into()));
        range.set_value((3, 2), Data::Float(0.12));
        let grid = SheetGrid::from_range(&range);

        assert_eq!(grid.get(2, 1), &CellValue::Text("OD600:600".into()));
        assert_eq!(grid.get(3, 2), &CellValue::Number(0.12));
        assert_eq!(grid.get(0, 0), &CellValue::Empty);
        assert_eq!(grid.get(50, 50), &CellValue::Empty);
        assert_eq!(grid.row_end(), 4);
        assert_eq!(grid.col_end(), 3);
    }
}
