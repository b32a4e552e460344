use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::data::model::Conditions;
use crate::data::select::{ControlRole, Reference};
use crate::error::{PlateError, PlateResult};

// ---------------------------------------------------------------------------
// Plot options shared by the CLI and the TOML profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Mean with symmetric standard-deviation bars
    Errorbar,
    /// Every replicate trace, no aggregation
    Curves,
    /// Mean only
    Average,
}

impl PlotMode {
    /// Human label used in summaries ("error bar plots have been generated").
    pub fn label(self) -> &'static str {
        match self {
            PlotMode::Errorbar => "error bar",
            PlotMode::Curves => "curves",
            PlotMode::Average => "average",
        }
    }

    pub fn default_filename_base(self) -> &'static str {
        match self {
            PlotMode::Errorbar => "Err_bar",
            PlotMode::Curves => "Curves_by_condition",
            PlotMode::Average => "Average_by_condition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One image per condition
    Separate,
    /// One grid image with every condition
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Convert an interval given in minutes into this unit.
    pub fn from_minutes(self, minutes: f64) -> f64 {
        match self {
            TimeUnit::Minutes => minutes,
            TimeUnit::Hours => minutes / 60.0,
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            TimeUnit::Minutes => "time [min]",
            TimeUnit::Hours => "time [hr]",
        }
    }
}

// ---------------------------------------------------------------------------
// Reference controls
// ---------------------------------------------------------------------------

/// Conditions drawn as fixed reference traces on every panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default)]
    pub positive_control_index: Option<usize>,
    #[serde(default)]
    pub positive_control_label: Option<String>,
    #[serde(default)]
    pub negative_control_index: Option<usize>,
    #[serde(default)]
    pub negative_control_label: Option<String>,
}

impl ControlsConfig {
    /// Resolve configured indices against the condition list.
    pub fn references(&self, conditions: &Conditions) -> PlateResult<Vec<Reference>> {
        let mut refs = Vec::new();
        if let Some(index) = self.negative_control_index {
            refs.push(Reference::new(
                ControlRole::Negative,
                index,
                self.negative_control_label.as_deref(),
                conditions,
            )?);
        }
        if let Some(index) = self.positive_control_index {
            refs.push(Reference::new(
                ControlRole::Positive,
                index,
                self.positive_control_label.as_deref(),
                conditions,
            )?);
        }
        Ok(refs)
    }
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "PlotConfig::default_plot_mode")]
    pub plot_mode: PlotMode,
    #[serde(default = "PlotConfig::default_layout")]
    pub layout: Layout,
    #[serde(default = "PlotConfig::default_y_scale")]
    pub y_scale: AxisScale,
    #[serde(default = "PlotConfig::default_y_lim")]
    pub y_lim: (f64, f64),
    #[serde(default = "PlotConfig::default_y_label")]
    pub y_label: String,
    #[serde(default = "PlotConfig::default_time_unit")]
    pub time_unit: TimeUnit,
    /// Overrides the per-mode file name prefix.
    #[serde(default)]
    pub filename_base: Option<String>,
    /// Split titles after the first word onto a second line.
    #[serde(default)]
    pub wrap_titles: bool,
    /// Shade the mean ± std band in error-bar mode.
    #[serde(default)]
    pub show_band: bool,
    /// Draw a legend; forced on when reference controls are shown.
    #[serde(default)]
    pub legend: bool,
    /// Give each replicate trace its own hue in curves mode.
    #[serde(default)]
    pub distinct_replicates: bool,
    /// Pixel size of one panel (width, height).
    #[serde(default = "PlotConfig::default_panel_size")]
    pub panel_size: (u32, u32),
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl PlotConfig {
    fn default_plot_mode() -> PlotMode {
        PlotMode::Errorbar
    }
    fn default_layout() -> Layout {
        Layout::Separate
    }
    fn default_y_scale() -> AxisScale {
        AxisScale::Linear
    }
    fn default_y_lim() -> (f64, f64) {
        (0.0, 1.5)
    }
    fn default_y_label() -> String {
        "OD".to_string()
    }
    fn default_time_unit() -> TimeUnit {
        TimeUnit::Minutes
    }
    fn default_panel_size() -> (u32, u32) {
        (400, 400)
    }

    /// Read a TOML profile; absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading plot config {}", path.display()))?;
        let cfg: Self = toml::from_str(&text)
            .with_context(|| format!("parsing plot config {}", path.display()))?;
        log::info!("Loaded plot config from {}", path.display());
        Ok(cfg)
    }

    pub fn filename_base(&self) -> &str {
        self.filename_base
            .as_deref()
            .unwrap_or_else(|| self.plot_mode.default_filename_base())
    }

    /// Reject limits the chosen scale cannot draw.
    pub fn validate(&self) -> PlateResult<()> {
        let (lo, hi) = self.y_lim;
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return Err(PlateError::InvalidAxis(format!(
                "y limits must be finite and increasing, got ({lo}, {hi})"
            )));
        }
        if self.y_scale == AxisScale::Log && lo <= 0.0 {
            return Err(PlateError::InvalidAxis(format!(
                "log scale needs a positive lower y limit, got {lo}"
            )));
        }
        let (w, h) = self.panel_size;
        if w == 0 || h == 0 {
            return Err(PlateError::InvalidAxis("panel size must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_mode: Self::default_plot_mode(),
            layout: Self::default_layout(),
            y_scale: Self::default_y_scale(),
            y_lim: Self::default_y_lim(),
            y_label: Self::default_y_label(),
            time_unit: Self::default_time_unit(),
            filename_base: None,
            wrap_titles: false,
            show_band: false,
            legend: false,
            distinct_replicates: false,
            panel_size: Self::default_panel_size(),
            controls: ControlsConfig::default(),
        }
    }
}
