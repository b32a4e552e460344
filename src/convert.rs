use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::data::loader::{sanitize, write_table};
use crate::data::model::Conditions;
use crate::error::PlateError;
use crate::sheet::column;
use crate::sheet::grid::SheetGrid;
use crate::sheet::locate::data_start_row;
use crate::sheet::range::{CellRange, EndColumn};
use crate::sheet::runtime::{RunSchedule, extract_schedule};

// ---------------------------------------------------------------------------
// Fixed-layout conversion
// ---------------------------------------------------------------------------

/// Sheet layout given explicitly on the command line.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    /// Rows above the first data row.
    pub row_skip: u32,
    pub start_col: String,
    pub rep: usize,
    pub schedule: RunSchedule,
}

/// One block written to CSV.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub range: CellRange,
    pub output: PathBuf,
    pub columns: usize,
    pub rows: usize,
}

/// Copy the block `start_col..start_col + conditions*rep` starting below
/// `row_skip` rows, one row per scheduled read, into a headerless CSV.
pub fn convert_fixed(
    grid: &SheetGrid,
    conditions: &Conditions,
    layout: &FixedLayout,
    output: &Path,
) -> Result<ConvertOutcome> {
    if layout.rep == 0 {
        return Err(PlateError::InvalidReplicateCount.into());
    }
    let end = EndColumn::Derived {
        total_columns: conditions.total_columns(layout.rep),
    };
    let range = CellRange::resolve(
        &layout.start_col,
        &end,
        layout.row_skip,
        layout.schedule.point_count(),
    )?;
    log::debug!(
        "{} conditions x {} replicates, {} reads -> {range}",
        conditions.len(),
        layout.rep,
        layout.schedule.point_count()
    );

    let table = range
        .extract(grid)
        .with_context(|| format!("extracting {range}"))?;
    write_table(output, &table)?;

    Ok(ConvertOutcome {
        range,
        output: output.to_path_buf(),
        columns: table.n_cols(),
        rows: table.n_rows(),
    })
}

// ---------------------------------------------------------------------------
// Measurement-search conversion
// ---------------------------------------------------------------------------

/// Layout discovered from the sheet: the run descriptor gives the number of
/// reads, each measurement label gives its first row.
#[derive(Debug, Clone)]
pub struct SearchLayout {
    pub start_col: String,
    pub end: EndColumn,
    pub marker: String,
    pub marker_col: u32,
    pub search_col: u32,
    /// Rows from a measurement label to its first data row.
    pub data_offset: u32,
}

/// A measurement label and the CSV it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementJob {
    pub label: String,
    pub output: PathBuf,
}

impl MeasurementJob {
    /// Pair labels with output names; without names each label writes
    /// `<label>.csv` in `dir`.
    pub fn plan(labels: &[String], outputs: &[String], dir: &Path) -> Result<Vec<Self>> {
        if !outputs.is_empty() && outputs.len() != labels.len() {
            bail!(
                "{} measurement labels but {} output file names were given",
                labels.len(),
                outputs.len()
            );
        }
        Ok(labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let file = outputs
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("{}.csv", sanitize(label)));
                MeasurementJob {
                    label: label.clone(),
                    output: dir.join(file),
                }
            })
            .collect())
    }
}

/// Result of one measurement; failures do not stop the batch.
#[derive(Debug)]
pub struct MeasurementReport {
    pub label: String,
    pub result: Result<ConvertOutcome>,
}

/// Convert every measurement block. A missing run descriptor is fatal; a
/// missing measurement label is recorded in its report and the batch goes on.
pub fn convert_measurements(
    grid: &SheetGrid,
    layout: &SearchLayout,
    jobs: &[MeasurementJob],
) -> Result<(RunSchedule, Vec<MeasurementReport>)> {
    let schedule = extract_schedule(grid, layout.marker_col, &layout.marker)?;

    let reports = jobs
        .iter()
        .map(|job| {
            let result = convert_one(grid, layout, &schedule, job);
            if let Err(err) = &result {
                log::warn!("Skipping measurement '{}': {err:#}", job.label);
            }
            MeasurementReport {
                label: job.label.clone(),
                result,
            }
        })
        .collect();
    Ok((schedule, reports))
}

fn convert_one(
    grid: &SheetGrid,
    layout: &SearchLayout,
    schedule: &RunSchedule,
    job: &MeasurementJob,
) -> Result<ConvertOutcome> {
    let first_row = data_start_row(grid, layout.search_col, &job.label, layout.data_offset)
        .ok_or_else(|| PlateError::MeasurementNotFound {
            label: job.label.clone(),
            column: column::encode(layout.search_col as usize + 1).unwrap_or_default(),
        })?;

    let range = CellRange::resolve(&layout.start_col, &layout.end, first_row, schedule.point_count())?;
    let table = range
        .extract_non_empty(grid)
        .with_context(|| format!("extracting '{}' from {range}", job.label))?;
    write_table(&job.output, &table)?;

    Ok(ConvertOutcome {
        range,
        output: job.output.clone(),
        columns: table.n_cols(),
        rows: table.n_rows(),
    })
}
