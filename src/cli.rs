use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{AxisScale, Layout, PlotMode, TimeUnit};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Plate-reader export conversion and growth-curve plotting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read a fixed range from an Excel sheet and save it as headerless CSV
    Convert(ConvertArgs),
    /// Locate measurement blocks by label and save each as headerless CSV
    Extract(ExtractArgs),
    /// Plot replicate statistics per condition from a headerless CSV
    Plot(PlotArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Base path for input and output files (default: current directory)
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Name of the input Excel file
    #[arg(long)]
    pub input_file_name: String,

    /// Condition list, one name per line
    #[arg(long)]
    pub condition_file: String,

    /// Sheet name to read from
    #[arg(long)]
    pub sheet_name: String,

    /// Number of rows above the first data row
    #[arg(long, default_value_t = 61)]
    pub row_skip: u32,

    /// Time interval in minutes
    #[arg(long)]
    pub t_interval: u32,

    /// Total run time in hours
    #[arg(long)]
    pub total_hr: u32,

    /// Number of replicates per condition
    #[arg(long, default_value_t = 3)]
    pub rep: usize,

    /// Column of the first data value
    #[arg(long, default_value = "D")]
    pub start_col: String,

    /// Name of the output CSV file
    #[arg(long, default_value = "df.csv")]
    pub output_file_name: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Base path for input and output files (default: current directory)
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Name of the input Excel file
    #[arg(long)]
    pub input_file_name: String,

    /// Sheet name to read from
    #[arg(long)]
    pub sheet_name: String,

    /// Measurement labels to search for (substring match, e.g. OD600)
    #[arg(long, num_args = 1.., required = true)]
    pub measurements: Vec<String>,

    /// Output CSV names, one per measurement (default: <label>.csv)
    #[arg(long, num_args = 1..)]
    pub output_files: Vec<String>,

    /// Condition list; the end column is derived from it
    #[arg(long, required_unless_present = "end_col")]
    pub condition_file: Option<String>,

    /// Fixed last data column instead of one derived from the conditions
    #[arg(long, conflicts_with = "condition_file")]
    pub end_col: Option<String>,

    /// Number of replicates per condition
    #[arg(long, default_value_t = 3)]
    pub rep: usize,

    /// Column of the first data value
    #[arg(long, default_value = "D")]
    pub start_col: String,

    /// Label of the row holding the run time and read interval
    #[arg(long, default_value = "Runtime")]
    pub marker: String,

    /// Column searched for the runtime marker
    #[arg(long, default_value = "A")]
    pub marker_col: String,

    /// Column searched for measurement labels
    #[arg(long, default_value = "A")]
    pub search_col: String,

    /// Rows between a measurement label and its first data row
    #[arg(long, default_value_t = 3)]
    pub data_offset: u32,
}

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Base file path (default: current directory)
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Condition list, one name per line
    #[arg(long)]
    pub condition_file: String,

    /// Headerless CSV with one column per replicate
    #[arg(long)]
    pub data_file: String,

    /// Number of replicates per condition
    #[arg(long, default_value_t = 3)]
    pub rep: usize,

    /// Time interval in minutes
    #[arg(long)]
    pub t_interval: f64,

    /// TOML plot profile; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Plot option
    #[arg(long, value_enum)]
    pub plot_option: Option<PlotMode>,

    /// Save option: one file per condition, or all in one graph
    #[arg(long, value_enum)]
    pub save_option: Option<Layout>,

    /// Y-axis limits, e.g. --y-lim 0 1.5
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    pub y_lim: Option<Vec<f64>>,

    /// Y-axis scale
    #[arg(long, value_enum)]
    pub y_scale: Option<AxisScale>,

    /// Y-axis label, e.g. OD or RFP
    #[arg(long)]
    pub y_label: Option<String>,

    /// Unit of the time axis
    #[arg(long, value_enum)]
    pub time_unit: Option<TimeUnit>,

    /// Custom base name for the plot files
    #[arg(long)]
    pub plot_filename_base: Option<String>,

    /// Index of the positive control condition, drawn on every panel
    #[arg(long)]
    pub positive_control: Option<usize>,

    /// Index of the negative control condition, drawn on every panel
    #[arg(long)]
    pub negative_control: Option<usize>,

    /// Split titles after the first word
    #[arg(long, default_value_t = false)]
    pub wrap_titles: bool,

    /// Shade the mean ± std band in error-bar mode
    #[arg(long, default_value_t = false)]
    pub band: bool,

    /// Draw a legend on every panel
    #[arg(long, default_value_t = false)]
    pub legend: bool,
}
