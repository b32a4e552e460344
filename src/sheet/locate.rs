use super::grid::SheetGrid;

/// Rows between a measurement label and its first data row in plate-reader
/// exports (blank row, then the `Time`/well header row).
pub const DEFAULT_DATA_OFFSET: u32 = 3;

/// First row (0-based, top to bottom) of `col` whose text contains `needle`.
///
/// Matching is by substring so `"OD600"` finds a cell reading `"OD600:600"`.
pub fn find_row(grid: &SheetGrid, col: u32, needle: &str) -> Option<u32> {
    (0..grid.row_end()).find(|&row| {
        grid.get(row, col)
            .text()
            .is_some_and(|text| text.contains(needle))
    })
}

/// Row of the first data point of a measurement block, if its label exists.
pub fn data_start_row(grid: &SheetGrid, col: u32, label: &str, data_offset: u32) -> Option<u32> {
    let row = find_row(grid, col, label)?;
    log::debug!("Measurement '{label}' label found at row {}", row + 1);
    Some(row + data_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::grid::CellValue;

    fn column_grid(cells: &[&str]) -> SheetGrid {
        SheetGrid::from_rows(
            cells
                .iter()
                .map(|c| {
                    if c.is_empty() {
                        vec![CellValue::Empty]
                    } else {
                        vec![CellValue::Text(c.to_string())]
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn substring_match_finds_measurement() {
        let grid = column_grid(&["meta", "OD600:600", "RFP", "OD600:600"]);
        assert_eq!(find_row(&grid, 0, "OD600"), Some(1));
        assert_eq!(data_start_row(&grid, 0, "OD600", DEFAULT_DATA_OFFSET), Some(4));
    }

    #[test]
    fn missing_label_is_none() {
        let grid = column_grid(&["meta", "", "RFP"]);
        assert_eq!(find_row(&grid, 0, "GFP"), None);
        assert_eq!(data_start_row(&grid, 0, "GFP", DEFAULT_DATA_OFFSET), None);
    }

    #[test]
    fn other_columns_are_ignored() {
        let grid = SheetGrid::from_rows(vec![
            vec![CellValue::Empty, CellValue::Text("OD600:600".into())],
            vec![CellValue::Text("OD600:600".into())],
        ]);
        assert_eq!(find_row(&grid, 0, "OD600"), Some(1));
        assert_eq!(find_row(&grid, 1, "OD600"), Some(0));
    }
}
