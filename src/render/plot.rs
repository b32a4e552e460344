use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use plotters::coord::Shift;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use super::layout::{condition_file_name, grid_file_name, grid_shape, plots_dir, title_lines};
use crate::color::{CONDITION_COLOR, control_color, replicate_colors};
use crate::config::{AxisScale, Layout, PlotConfig, PlotMode};
use crate::data::aggregate::replicate_columns;
use crate::data::model::{ConditionStats, Conditions, TimeSeriesTable};
use crate::data::select::{Reference, panel_indices};

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Chart<'a, 'b, Y> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, Y>>;

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Everything a figure needs, borrowed from the loaded data.
pub struct PlotInput<'a> {
    pub times: &'a [f64],
    pub stats: &'a [ConditionStats],
    pub table: &'a TimeSeriesTable,
    pub conditions: &'a Conditions,
    pub rep: usize,
}

/// What a render pass produced.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
    /// Number of condition panels drawn (reference controls excluded).
    pub panels: usize,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Render all panels below `base` according to `cfg`.
pub fn render(input: &PlotInput<'_>, cfg: &PlotConfig, base: &Path) -> Result<RenderSummary> {
    cfg.validate()?;
    let references = cfg.controls.references(input.conditions)?;
    let panels = panel_indices(input.conditions, &references);
    if panels.is_empty() {
        bail!("No conditions left to plot after excluding reference controls");
    }

    let dir = plots_dir(base, cfg);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let painter = PanelPainter {
        input,
        cfg,
        references: &references,
    };

    let files = match cfg.layout {
        Layout::Separate => {
            let mut files = Vec::with_capacity(panels.len());
            for &idx in &panels {
                let path = dir.join(condition_file_name(cfg, &input.conditions[idx]));
                {
                    let root = BitMapBackend::new(&path, cfg.panel_size).into_drawing_area();
                    root.fill(&WHITE)?;
                    painter.draw(&root, idx)?;
                    root.present()
                        .with_context(|| format!("writing {}", path.display()))?;
                }
                log::debug!("Wrote {}", path.display());
                files.push(path);
            }
            files
        }
        Layout::All => {
            let (rows, cols) = grid_shape(panels.len());
            let (w, h) = cfg.panel_size;
            log::debug!("Grid layout {rows} x {cols} for {} panels", panels.len());

            let path = dir.join(grid_file_name(cfg));
            let size = (w * cols as u32, h * rows as u32);
            {
                let root = BitMapBackend::new(&path, size).into_drawing_area();
                root.fill(&WHITE)?;
                // cells past the last panel are left blank
                let cells = root.split_evenly((rows, cols));
                for (cell, &idx) in cells.iter().zip(&panels) {
                    painter.draw(cell, idx)?;
                }
                root.present()
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            vec![path]
        }
    };

    log::info!("Rendered {} file(s) into {}", files.len(), dir.display());
    Ok(RenderSummary {
        dir,
        files,
        panels: panels.len(),
    })
}

// ---------------------------------------------------------------------------
// Panel drawing
// ---------------------------------------------------------------------------

struct PanelPainter<'a> {
    input: &'a PlotInput<'a>,
    cfg: &'a PlotConfig,
    references: &'a [Reference],
}

impl PanelPainter<'_> {
    fn draw(&self, area: &Area<'_>, idx: usize) -> Result<()> {
        let name = &self.input.conditions[idx];
        let lines = title_lines(name, self.cfg.wrap_titles);
        let mut body = area.titled(lines[0], ("sans-serif", 18))?;
        for line in &lines[1..] {
            body = body.titled(line, ("sans-serif", 18))?;
        }

        let x_max = self.input.times.iter().copied().fold(0.0f64, f64::max);
        let x_max = if x_max > 0.0 { x_max } else { 1.0 };
        let (y_lo, y_hi) = self.cfg.y_lim;

        let mut builder = ChartBuilder::on(&body);
        builder
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50);

        match self.cfg.y_scale {
            AxisScale::Linear => {
                let mut chart = builder.build_cartesian_2d(0.0..x_max, y_lo..y_hi)?;
                self.draw_series(&mut chart, idx)
            }
            AxisScale::Log => {
                let mut chart = builder.build_cartesian_2d(0.0..x_max, (y_lo..y_hi).log_scale())?;
                self.draw_series(&mut chart, idx)
            }
        }
    }

    fn draw_series<'c, Y>(&self, chart: &mut Chart<'c, 'c, Y>, idx: usize) -> Result<()>
    where
        Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        let cfg = self.cfg;
        let input = self.input;
        let name = &input.conditions[idx];
        let stats = &input.stats[idx];

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(cfg.time_unit.axis_label())
            .y_desc(cfg.y_label.as_str())
            .draw()?;

        for r in self.references {
            let color = control_color(r.role);
            chart
                .draw_series(LineSeries::new(
                    self.points(&input.stats[r.index].mean),
                    color.mix(0.8).stroke_width(2),
                ))?
                .label(r.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        match cfg.plot_mode {
            PlotMode::Errorbar => {
                if cfg.show_band {
                    chart.draw_series(std::iter::once(Polygon::new(
                        self.band(stats),
                        CONDITION_COLOR.mix(0.2),
                    )))?;
                }
                self.draw_mean(chart, stats, name)?;
                let (floor, ceil) = cfg.y_lim;
                let bars = input
                    .times
                    .iter()
                    .zip(stats.bounds().zip(&stats.mean))
                    .filter(|(_, (_, m))| m.is_finite())
                    .map(|(&t, ((lo, hi), &m))| {
                        ErrorBar::new_vertical(
                            t,
                            lo.clamp(floor, ceil),
                            m,
                            hi.clamp(floor, ceil),
                            CONDITION_COLOR.filled(),
                            6,
                        )
                    });
                chart.draw_series(bars)?;
            }
            PlotMode::Curves => {
                let colors = replicate_colors(input.rep, cfg.distinct_replicates);
                for (j, col) in replicate_columns(idx, input.rep).enumerate() {
                    let anno = chart.draw_series(LineSeries::new(
                        self.points(input.table.column(col)),
                        colors[j].stroke_width(1),
                    ))?;
                    if j == 0 {
                        anno.label(name)
                            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CONDITION_COLOR));
                    }
                }
            }
            PlotMode::Average => self.draw_mean(chart, stats, name)?,
        }

        if cfg.legend || !self.references.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }
        Ok(())
    }

    fn draw_mean<'c, Y>(&self, chart: &mut Chart<'c, 'c, Y>, stats: &ConditionStats, name: &str) -> Result<()>
    where
        Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        chart
            .draw_series(LineSeries::new(self.points(&stats.mean), CONDITION_COLOR.stroke_width(2)))?
            .label(name)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CONDITION_COLOR));
        Ok(())
    }

    /// `(time, value)` pairs the current axis can show.
    fn points(&self, values: &[f64]) -> Vec<(f64, f64)> {
        let log = self.cfg.y_scale == AxisScale::Log;
        self.input
            .times
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite() && (!log || **v > 0.0))
            .map(|(&t, &v)| (t, v))
            .collect()
    }

    /// Outline of the mean ± std band: upper edge forward, lower edge back.
    fn band(&self, stats: &ConditionStats) -> Vec<(f64, f64)> {
        let (floor, ceil) = self.cfg.y_lim;
        let edges: Vec<(f64, f64, f64)> = self
            .input
            .times
            .iter()
            .zip(stats.bounds())
            .filter(|(_, (lo, hi))| lo.is_finite() && hi.is_finite())
            .map(|(&t, (lo, hi))| (t, lo.clamp(floor, ceil), hi.clamp(floor, ceil)))
            .collect();
        edges
            .iter()
            .map(|&(t, _, hi)| (t, hi))
            .chain(edges.iter().rev().map(|&(t, lo, _)| (t, lo)))
            .collect()
    }
}
