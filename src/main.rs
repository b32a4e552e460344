use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use plate_curves::cli::{Cli, Command, ConvertArgs, ExtractArgs, PlotArgs};
use plate_curves::config::{Layout, PlotConfig};
use plate_curves::convert::{FixedLayout, MeasurementJob, SearchLayout, convert_fixed, convert_measurements};
use plate_curves::data::aggregate::{aggregate, time_axis};
use plate_curves::data::loader::{load_conditions, load_table};
use plate_curves::render::plot::{PlotInput, render};
use plate_curves::sheet::column;
use plate_curves::sheet::grid::open_sheet;
use plate_curves::sheet::range::EndColumn;
use plate_curves::sheet::runtime::RunSchedule;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Extract(args) => run_extract(args),
        Command::Plot(args) => run_plot(args),
    }
}

fn base_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    match arg {
        Some(p) => Ok(p),
        None => std::env::current_dir().context("resolving current directory"),
    }
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

fn run_convert(args: ConvertArgs) -> Result<()> {
    let base = base_path(args.base_path)?;
    let conditions = load_conditions(&base.join(&args.condition_file))?;
    let grid = open_sheet(&base.join(&args.input_file_name), &args.sheet_name)?;

    let layout = FixedLayout {
        row_skip: args.row_skip,
        start_col: args.start_col,
        rep: args.rep,
        schedule: RunSchedule::new(args.total_hr, args.t_interval)?,
    };
    let out_path = base.join(&args.output_file_name);
    let outcome = convert_fixed(&grid, &conditions, &layout, &out_path)?;

    println!(
        "The data from Excel in range {} is saved as {}",
        outcome.range,
        outcome.output.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

fn run_extract(args: ExtractArgs) -> Result<()> {
    let base = base_path(args.base_path)?;

    let end = match (&args.end_col, &args.condition_file) {
        (Some(end_col), _) => EndColumn::Fixed(end_col.clone()),
        (None, Some(file)) => {
            let conditions = load_conditions(&base.join(file))?;
            EndColumn::Derived {
                total_columns: conditions.total_columns(args.rep),
            }
        }
        (None, None) => anyhow::bail!("either --condition-file or --end-col is required"),
    };
    let layout = SearchLayout {
        start_col: args.start_col,
        end,
        marker: args.marker,
        marker_col: column::offset(&args.marker_col)?,
        search_col: column::offset(&args.search_col)?,
        data_offset: args.data_offset,
    };
    let jobs = MeasurementJob::plan(&args.measurements, &args.output_files, &base)?;

    let grid = open_sheet(&base.join(&args.input_file_name), &args.sheet_name)?;
    let (schedule, reports) = convert_measurements(&grid, &layout, &jobs)?;

    println!(
        "Run of {} h read every {} min: {} time points per measurement",
        schedule.total_hours,
        schedule.interval_minutes,
        schedule.point_count()
    );
    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(outcome) => println!(
                "'{}' data in range {} ({} columns) is saved as {}",
                report.label,
                outcome.range,
                outcome.columns,
                outcome.output.display()
            ),
            Err(err) => {
                failed += 1;
                eprintln!("'{}' skipped: {err:#}", report.label);
            }
        }
    }
    if failed == reports.len() {
        anyhow::bail!("none of the {} measurements could be extracted", reports.len());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// plot
// ---------------------------------------------------------------------------

fn run_plot(args: PlotArgs) -> Result<()> {
    let base = base_path(args.base_path.clone())?;
    let cfg = plot_config(&args)?;

    let conditions = load_conditions(&base.join(&args.condition_file))?;
    let table = load_table(&base.join(&args.data_file))?;
    let stats = aggregate(&table, args.rep, &conditions)?;
    let times = time_axis(cfg.time_unit.from_minutes(args.t_interval), table.n_rows());

    let input = PlotInput {
        times: &times,
        stats: &stats,
        table: &table,
        conditions: &conditions,
        rep: args.rep,
    };
    let summary = render(&input, &cfg, &base)?;

    match cfg.layout {
        Layout::Separate => println!(
            "{} {} plots have been generated at {}",
            summary.panels,
            cfg.plot_mode.label(),
            summary.dir.display()
        ),
        Layout::All => println!(
            "All conditions are plotted in one graph with {} at {}",
            cfg.plot_mode.label(),
            summary.dir.display()
        ),
    }
    Ok(())
}

/// Profile (or defaults) with command-line flags applied on top.
fn plot_config(args: &PlotArgs) -> Result<PlotConfig> {
    let mut cfg = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };

    if let Some(mode) = args.plot_option {
        cfg.plot_mode = mode;
    }
    if let Some(layout) = args.save_option {
        cfg.layout = layout;
    }
    if let Some(lim) = &args.y_lim {
        cfg.y_lim = (lim[0], lim[1]);
    }
    if let Some(scale) = args.y_scale {
        cfg.y_scale = scale;
    }
    if let Some(label) = &args.y_label {
        cfg.y_label = label.clone();
    }
    if let Some(unit) = args.time_unit {
        cfg.time_unit = unit;
    }
    if let Some(base) = &args.plot_filename_base {
        cfg.filename_base = Some(base.clone());
    }
    if let Some(index) = args.positive_control {
        cfg.controls.positive_control_index = Some(index);
    }
    if let Some(index) = args.negative_control {
        cfg.controls.negative_control_index = Some(index);
    }
    cfg.wrap_titles |= args.wrap_titles;
    cfg.show_band |= args.band;
    cfg.legend |= args.legend;

    cfg.validate()?;
    Ok(cfg)
}
