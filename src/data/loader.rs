use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tempfile::NamedTempFile;

use super::model::{Conditions, TimeSeriesTable};

// ---------------------------------------------------------------------------
// Condition list
// ---------------------------------------------------------------------------

/// Read one condition per line, trimming surrounding whitespace.
///
/// Trailing blank lines are ignored. A blank line before the last condition
/// is an error: the line order maps conditions onto replicate blocks.
pub fn load_conditions(path: &Path) -> Result<Conditions> {
    let file = File::open(path).with_context(|| format!("opening condition file {}", path.display()))?;
    let mut lines = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("{}: reading line {}", path.display(), line_no + 1))?;
        lines.push(line.trim().to_string());
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if let Some(blank) = lines.iter().position(|l| l.is_empty()) {
        bail!(
            "Condition file {} has a blank line at line {}; every line before the last condition must name one",
            path.display(),
            blank + 1
        );
    }
    let names = lines;
    if names.is_empty() {
        bail!("Condition file {} lists no conditions", path.display());
    }
    log::info!("Read {} conditions from {}", names.len(), path.display());
    Ok(Conditions::new(names))
}

/// Names used inside file names; path separators are replaced.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Headerless CSV tables
// ---------------------------------------------------------------------------

/// CSV layout: no header, one column per replicate-condition combination,
/// one row per time point. Empty fields are missing readings.
pub fn load_table(path: &Path) -> Result<TimeSeriesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, tok)| parse_field(tok, row_no, col))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("CSV {} contains no rows", path.display());
    }

    let table = TimeSeriesTable::from_rows(rows).with_context(|| format!("reading {}", path.display()))?;
    log::info!(
        "Read {} rows x {} columns from {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(table)
}

fn parse_field(tok: &str, row: usize, col: usize) -> Result<f64> {
    let tok = tok.trim();
    if tok.is_empty() {
        return Ok(f64::NAN);
    }
    tok.parse::<f64>()
        .with_context(|| format!("Row {row}, column {col}: '{tok}' is not a number"))
}

/// Write a table as headerless CSV; missing readings become empty fields.
///
/// Rows go to a temporary file next to `path` that is renamed into place
/// once complete, so a failed write never leaves a truncated table behind.
pub fn write_table(path: &Path, table: &TimeSeriesTable) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        for row in 0..table.n_rows() {
            let fields = table
                .row(row)
                .map(|v| if v.is_nan() { String::new() } else { v.to_string() });
            writer
                .write_record(fields)
                .with_context(|| format!("writing row {row} to {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("flushing {}", path.display()))?;
    }
    tmp.persist(path)
        .with_context(|| format!("saving {}", path.display()))?;

    log::info!(
        "Wrote {} rows x {} columns to {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(())
}
