use std::fs;

use tempfile::TempDir;

use plate_curves::config::{Layout, PlotConfig, PlotMode, TimeUnit};
use plate_curves::data::aggregate::{aggregate, time_axis};
use plate_curves::data::loader::{load_conditions, load_table};
use plate_curves::data::select::panel_indices;
use plate_curves::error::PlateError;
use plate_curves::render::layout::{condition_file_name, grid_file_name, grid_shape, plots_dir};

const CONDITIONS: &str = "WT\nΔaraC pBAD\nMG1655 Control\nDH5α + cre Control\n";

/// Two time points, four conditions of three replicates.
const TABLE: &str = "\
0.1,0.2,0.3,0.1,0.1,0.1,0.05,0.05,0.05,0.04,0.04,0.04
0.4,0.5,0.6,0.8,,1.0,0.05,0.06,0.07,0.04,0.04,0.04
";

#[test]
fn replicate_statistics_from_csv() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("conditions.txt"), CONDITIONS).unwrap();
    fs::write(tmp.path().join("df.csv"), TABLE).unwrap();

    let conditions = load_conditions(&tmp.path().join("conditions.txt")).unwrap();
    let table = load_table(&tmp.path().join("df.csv")).unwrap();
    let stats = aggregate(&table, 3, &conditions).unwrap();
    assert_eq!(stats.len(), 4);

    assert!((stats[0].mean[0] - 0.2).abs() < 1e-12);
    assert!((stats[0].mean[1] - 0.5).abs() < 1e-12);
    assert!((stats[0].std[1] - (2.0f64 / 300.0).sqrt()).abs() < 1e-12);
    assert_eq!(stats[1].std[0], 0.0);
    // A blank replicate makes the whole time point undefined.
    assert!(stats[1].mean[1].is_nan());
    assert!(stats[1].std[1].is_nan());

    let times = time_axis(TimeUnit::Hours.from_minutes(15.0), table.n_rows());
    assert_eq!(times, vec![0.0, 0.25]);
}

#[test]
fn column_count_must_match_conditions() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("conditions.txt"), CONDITIONS).unwrap();
    fs::write(tmp.path().join("df.csv"), TABLE).unwrap();

    let conditions = load_conditions(&tmp.path().join("conditions.txt")).unwrap();
    let table = load_table(&tmp.path().join("df.csv")).unwrap();

    let err = aggregate(&table, 2, &conditions).unwrap_err();
    assert_eq!(
        err,
        PlateError::ConditionMismatch {
            conditions: 4,
            rep: 2,
            columns: 12
        }
    );
    assert!(err.to_string().contains("12 columns / 2 replicates = 6"));
}

#[test]
fn profile_with_controls_plans_panels_and_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("conditions.txt"), CONDITIONS).unwrap();
    fs::write(
        tmp.path().join("plot.toml"),
        r#"
plot_mode = "curves"
layout = "all"
y_label = "RFP"
filename_base = "RFP"

[controls]
positive_control_index = 2
negative_control_index = 3
negative_control_label = "no cre"
"#,
    )
    .unwrap();

    let conditions = load_conditions(&tmp.path().join("conditions.txt")).unwrap();
    let cfg = PlotConfig::load(&tmp.path().join("plot.toml")).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.plot_mode, PlotMode::Curves);
    assert_eq!(cfg.layout, Layout::All);

    let refs = cfg.controls.references(&conditions).unwrap();
    let labels: Vec<&str> = refs.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["no cre", "MG1655 Control"]);

    let panels = panel_indices(&conditions, &refs);
    assert_eq!(panels, vec![0, 1]);
    assert_eq!(grid_shape(panels.len()), (1, 2));
    assert_eq!(plots_dir(tmp.path(), &cfg), tmp.path().join("plots"));
    assert_eq!(grid_file_name(&cfg), "RFP_in_one_graph.png");
    assert_eq!(condition_file_name(&cfg, conditions.get(1).unwrap()), "RFP_ΔaraC pBAD.png");
}

#[test]
fn control_index_outside_condition_list() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("conditions.txt"), CONDITIONS).unwrap();
    let conditions = load_conditions(&tmp.path().join("conditions.txt")).unwrap();

    let mut cfg = PlotConfig::default();
    cfg.controls.negative_control_index = Some(12);
    let err = cfg.controls.references(&conditions).unwrap_err();
    assert_eq!(
        err,
        PlateError::ControlIndexOutOfRange {
            role: "negative",
            index: 12,
            count: 4
        }
    );
}
