use std::path::Path;

use tempfile::TempDir;

use plate_curves::config::{AxisScale, Layout, PlotConfig, PlotMode};
use plate_curves::data::aggregate::{aggregate, time_axis};
use plate_curves::data::model::{Conditions, TimeSeriesTable};
use plate_curves::render::plot::{render, PlotInput, RenderSummary};

const REP: usize = 3;

fn conditions() -> Conditions {
    Conditions::new(
        ["WT", "ΔaraC pBAD", "MG1655 Control", "DH5α + cre Control"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}

/// Five reads of four conditions; one missing reading in the second block.
fn table() -> TimeSeriesTable {
    let rows = (0..5)
        .map(|t| {
            (0..12)
                .map(|c| {
                    if t == 2 && c == 4 {
                        f64::NAN
                    } else {
                        0.05 + 0.2 * t as f64 * (1.0 + (c / REP) as f64 * 0.1) + 0.01 * (c % REP) as f64
                    }
                })
                .collect()
        })
        .collect();
    TimeSeriesTable::from_rows(rows).unwrap()
}

fn render_into(base: &Path, cfg: &PlotConfig) -> RenderSummary {
    let conditions = conditions();
    let table = table();
    let stats = aggregate(&table, REP, &conditions).unwrap();
    let times = time_axis(15.0, table.n_rows());
    let input = PlotInput {
        times: &times,
        stats: &stats,
        table: &table,
        conditions: &conditions,
        rep: REP,
    };
    render(&input, cfg, base).unwrap()
}

fn with_controls(mode: PlotMode, layout: Layout) -> PlotConfig {
    let mut cfg = PlotConfig {
        plot_mode: mode,
        layout,
        wrap_titles: true,
        show_band: true,
        ..PlotConfig::default()
    };
    cfg.controls.positive_control_index = Some(2);
    cfg.controls.negative_control_index = Some(3);
    cfg
}

#[test]
fn every_mode_and_layout_writes_its_files() {
    let cases = [
        (PlotMode::Errorbar, Layout::Separate, "plots/err_bar"),
        (PlotMode::Curves, Layout::Separate, "plots/cond_curve"),
        (PlotMode::Average, Layout::Separate, "plots/cond_curve"),
        (PlotMode::Errorbar, Layout::All, "plots"),
        (PlotMode::Curves, Layout::All, "plots"),
        (PlotMode::Average, Layout::All, "plots"),
    ];
    for (mode, layout, dir) in cases {
        let tmp = TempDir::new().unwrap();
        let cfg = with_controls(mode, layout);
        let summary = render_into(tmp.path(), &cfg);

        assert_eq!(summary.dir, tmp.path().join(dir), "{mode:?}/{layout:?}");
        assert!(summary.dir.is_dir());
        // the two controls are overlays, not panels
        assert_eq!(summary.panels, 2);

        let expected: Vec<String> = match layout {
            Layout::Separate => vec![
                format!("{}_WT.png", mode.default_filename_base()),
                format!("{}_ΔaraC pBAD.png", mode.default_filename_base()),
            ],
            Layout::All => vec![format!("{}_in_one_graph.png", mode.default_filename_base())],
        };
        let names: Vec<String> = summary
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, expected, "{mode:?}/{layout:?}");
        for file in &summary.files {
            assert!(file.starts_with(&summary.dir));
            assert!(std::fs::metadata(file).unwrap().len() > 0, "{}", file.display());
        }
    }
}

#[test]
fn log_scale_renders_without_controls() {
    let tmp = TempDir::new().unwrap();
    let cfg = PlotConfig {
        y_scale: AxisScale::Log,
        y_lim: (0.01, 2.0),
        layout: Layout::All,
        filename_base: Some("OD".to_string()),
        ..PlotConfig::default()
    };
    let summary = render_into(tmp.path(), &cfg);
    assert_eq!(summary.panels, 4);
    assert_eq!(summary.files, vec![tmp.path().join("plots").join("OD_in_one_graph.png")]);
    assert!(summary.files[0].is_file());
}

#[test]
fn invalid_axis_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let conditions = conditions();
    let table = table();
    let stats = aggregate(&table, REP, &conditions).unwrap();
    let times = time_axis(15.0, table.n_rows());
    let input = PlotInput {
        times: &times,
        stats: &stats,
        table: &table,
        conditions: &conditions,
        rep: REP,
    };
    let cfg = PlotConfig {
        y_scale: AxisScale::Log,
        y_lim: (0.0, 1.5),
        ..PlotConfig::default()
    };
    assert!(render(&input, &cfg, tmp.path()).is_err());
    assert!(!tmp.path().join("plots").exists());
}
