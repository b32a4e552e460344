use regex::Regex;

use super::column;
use super::grid::SheetGrid;
use super::locate::find_row;
use crate::error::{PlateError, PlateResult};

/// Label of the row holding the kinetic run descriptor in reader exports.
pub const DEFAULT_RUNTIME_MARKER: &str = "Runtime";

// ---------------------------------------------------------------------------
// RunSchedule – sampling schedule recovered from the sheet header
// ---------------------------------------------------------------------------

/// Kinetic read schedule: whole run hours, interval and number of reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSchedule {
    /// Total run duration, floored to whole hours.
    pub total_hours: u32,
    /// Sampling interval in whole minutes.
    pub interval_minutes: u32,
}

impl RunSchedule {
    pub fn new(total_hours: u32, interval_minutes: u32) -> PlateResult<Self> {
        if interval_minutes == 0 {
            return Err(PlateError::RuntimeFormat(
                "sampling interval must be at least one minute".to_string(),
            ));
        }
        if total_hours.checked_mul(60).is_none() {
            return Err(PlateError::RuntimeFormat(format!(
                "run length of {total_hours} h is out of range"
            )));
        }
        Ok(Self {
            total_hours,
            interval_minutes,
        })
    }

    pub fn total_minutes(&self) -> u32 {
        self.total_hours * 60
    }

    /// Number of reads, counting both the read at t = 0 and the final read.
    pub fn point_count(&self) -> usize {
        (self.total_minutes() / self.interval_minutes) as usize + 1
    }
}

/// Parse a descriptor such as `"24:00:00 (HH:MM:SS), Interval 0:15:00, 97 Reads"`.
pub fn parse_descriptor(text: &str) -> PlateResult<RunSchedule> {
    let bad = || PlateError::RuntimeFormat(text.to_string());
    let interval_re = Regex::new(r"Interval\s*(\d+):(\d{1,2}):(\d{1,2})").map_err(|_| bad())?;
    let clock_re = Regex::new(r"(\d+):(\d{1,2}):(\d{1,2})").map_err(|_| bad())?;

    let interval = interval_re.captures(text).ok_or_else(bad)?;
    let interval_start = interval.get(0).map_or(0, |m| m.start());
    // The run length is the first clock value ahead of the interval.
    let total = clock_re
        .captures(&text[..interval_start])
        .ok_or_else(bad)?;

    let field = |caps: &regex::Captures<'_>, i: usize| -> PlateResult<u32> {
        caps[i].parse::<u32>().map_err(|_| bad())
    };
    let total_hours = field(&total, 1)?;
    let interval_minutes = field(&interval, 1)?
        .checked_mul(60)
        .and_then(|m| m.checked_add(field(&interval, 2).ok()?))
        .ok_or_else(bad)?;

    RunSchedule::new(total_hours, interval_minutes)
}

/// Locate the marker row in `marker_col` and parse the descriptor found there.
///
/// The descriptor is the text of the marker row from the marker column
/// rightwards, so it may sit in the marker cell itself or in a neighbour.
pub fn extract_schedule(grid: &SheetGrid, marker_col: u32, marker: &str) -> PlateResult<RunSchedule> {
    let row = find_row(grid, marker_col, marker).ok_or_else(|| PlateError::MarkerNotFound {
        marker: marker.to_string(),
        column: column::encode(marker_col as usize + 1).unwrap_or_default(),
    })?;

    let descriptor = (marker_col..grid.col_end())
        .filter_map(|col| grid.get(row, col).text())
        .collect::<Vec<_>>()
        .join(" ");

    let schedule = parse_descriptor(&descriptor)?;
    log::debug!(
        "Run schedule at row {}: {} h every {} min ({} reads)",
        row + 1,
        schedule.total_hours,
        schedule.interval_minutes,
        schedule.point_count()
    );
    Ok(schedule)
}
