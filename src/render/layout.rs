use std::path::{Path, PathBuf};

use crate::config::{Layout, PlotConfig, PlotMode};
use crate::data::loader::sanitize;

/// Smallest grid holding `n` panels: `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
pub fn grid_shape(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut cols = (n as f64).sqrt().ceil() as usize;
    // guard against sqrt rounding below an exact square
    while cols * cols < n {
        cols += 1;
    }
    let rows = n.div_ceil(cols);
    (rows, cols)
}

/// Directory images are written to, relative to `base`.
pub fn plots_dir(base: &Path, cfg: &PlotConfig) -> PathBuf {
    match (cfg.layout, cfg.plot_mode) {
        (Layout::All, _) => base.join("plots"),
        (Layout::Separate, PlotMode::Errorbar) => base.join("plots").join("err_bar"),
        (Layout::Separate, _) => base.join("plots").join("cond_curve"),
    }
}

/// `<base>_<condition>.png`
pub fn condition_file_name(cfg: &PlotConfig, condition: &str) -> String {
    format!("{}_{}.png", cfg.filename_base(), sanitize(condition))
}

/// `<base>_in_one_graph.png`
pub fn grid_file_name(cfg: &PlotConfig) -> String {
    format!("{}_in_one_graph.png", cfg.filename_base())
}

/// Title lines for a panel: either the name as is, or the first word on
/// its own line followed by the rest.
pub fn title_lines(condition: &str, wrap: bool) -> Vec<&str> {
    if wrap {
        if let Some((first, rest)) = condition.split_once(' ') {
            return vec![first, rest];
        }
    }
    vec![condition]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_near_square() {
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(2), (1, 2));
        assert_eq!(grid_shape(4), (2, 2));
        assert_eq!(grid_shape(5), (2, 3));
        assert_eq!(grid_shape(7), (3, 3));
        assert_eq!(grid_shape(11), (3, 4));
        assert_eq!(grid_shape(20), (4, 5));
        assert_eq!(grid_shape(0), (0, 0));
    }

    #[test]
    fn grid_always_fits() {
        for n in 1..200 {
            let (rows, cols) = grid_shape(n);
            assert!(rows * cols >= n);
            assert!((rows - 1) * cols < n, "n={n} leaves an empty row");
        }
    }

    #[test]
    fn directories_follow_mode() {
        let base = Path::new("/data/run1");
        let mut cfg = PlotConfig::default();
        assert_eq!(plots_dir(base, &cfg), base.join("plots/err_bar"));
        cfg.plot_mode = PlotMode::Curves;
        assert_eq!(plots_dir(base, &cfg), base.join("plots/cond_curve"));
        cfg.plot_mode = PlotMode::Average;
        assert_eq!(plots_dir(base, &cfg), base.join("plots/cond_curve"));
        cfg.layout = Layout::All;
        assert_eq!(plots_dir(base, &cfg), base.join("plots"));
    }

    #[test]
    fn file_names() {
        let mut cfg = PlotConfig::default();
        assert_eq!(condition_file_name(&cfg, "WT 1/2 IPTG"), "Err_bar_WT 1_2 IPTG.png");
        cfg.plot_mode = PlotMode::Average;
        assert_eq!(grid_file_name(&cfg), "Average_by_condition_in_one_graph.png");
        cfg.filename_base = Some("RFP".into());
        assert_eq!(grid_file_name(&cfg), "RFP_in_one_graph.png");
    }

    #[test]
    fn titles_split_after_first_word() {
        assert_eq!(title_lines("pBAD araC 0.2%", true), vec!["pBAD", "araC 0.2%"]);
        assert_eq!(title_lines("pBAD araC 0.2%", false), vec!["pBAD araC 0.2%"]);
        assert_eq!(title_lines("WT", true), vec!["WT"]);
    }
}
