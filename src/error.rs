use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy for the extraction and aggregation layers
// ---------------------------------------------------------------------------

/// Errors raised by sheet extraction, aggregation and plot validation.
///
/// File-system and parsing failures from third-party crates are not wrapped
/// here; callers attach context to those with `anyhow`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlateError {
    #[error(
        "The number of conditions ({}) does not match the data available \
         ({} columns / {} replicates = {}), please check your data!",
        .conditions, .columns, .rep, format_groups(.columns, .rep)
    )]
    ConditionMismatch {
        conditions: usize,
        rep: usize,
        columns: usize,
    },

    #[error("replicate count must be at least 1")]
    InvalidReplicateCount,

    #[error("column index must be positive, got {0}")]
    InvalidColumnIndex(i64),

    #[error("invalid column label '{0}': expected letters A-Z only")]
    InvalidColumnLabel(String),

    #[error("end column {end} lies before start column {start}")]
    InvertedColumnRange { start: String, end: String },

    #[error("marker '{marker}' not found in column {column}")]
    MarkerNotFound { marker: String, column: String },

    #[error("measurement '{label}' not found in column {column}")]
    MeasurementNotFound { label: String, column: String },

    #[error("cannot parse runtime descriptor '{0}'")]
    RuntimeFormat(String),

    #[error("cell {cell} holds non-numeric value '{value}'")]
    NonNumericCell { cell: String, value: String },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("table has no data rows")]
    EmptyTable,

    #[error("{role} control index {index} is out of range for {count} conditions")]
    ControlIndexOutOfRange {
        role: &'static str,
        index: usize,
        count: usize,
    },

    #[error("invalid axis limits: {0}")]
    InvalidAxis(String),

    #[error("sheet '{sheet}' not found; available: {available}")]
    SheetNotFound { sheet: String, available: String },
}

fn format_groups(columns: &usize, rep: &usize) -> String {
    if *rep == 0 {
        return "n/a".to_string();
    }
    let groups = *columns as f64 / *rep as f64;
    if groups.fract() == 0.0 {
        format!("{groups:.0}")
    } else {
        format!("{groups:.2}")
    }
}

pub type PlateResult<T> = Result<T, PlateError>;
