use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

// ---------------------------------------------------------------------------
// Synthetic plate-reader exports for demos and tests
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Logistic growth with a constant blank offset.
fn logistic(t_hr: f64, capacity: f64, n0: f64, rate: f64) -> f64 {
    capacity / (1.0 + ((capacity - n0) / n0) * (-rate * t_hr).exp()) + 0.04
}

/// Layout and content of a generated plate.
#[derive(Debug, Clone)]
pub struct SamplePlate {
    pub sheet_name: String,
    pub conditions: Vec<String>,
    pub rep: usize,
    pub total_hours: u32,
    pub interval_minutes: u32,
    pub seed: u64,
}

impl Default for SamplePlate {
    fn default() -> Self {
        Self {
            sheet_name: "Plate 1".to_string(),
            conditions: ["WT", "ΔaraC pBAD", "ΔaraC pBAD-araC", "MG1655 Control", "DH5α + cre Control"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rep: 3,
            total_hours: 24,
            interval_minutes: 15,
            seed: 42,
        }
    }
}

/// Sheet rows of the generated template, 0-based.
pub const RUNTIME_ROW: u32 = 5;
pub const OD_LABEL_ROW: u32 = 8;
/// First well column (`D`).
pub const FIRST_WELL_COL: u16 = 3;

impl SamplePlate {
    pub fn point_count(&self) -> usize {
        (self.total_hours * 60 / self.interval_minutes) as usize + 1
    }

    /// Row of the fluorescence label: after the OD block and two blank rows.
    pub fn rfp_label_row(&self) -> u32 {
        OD_LABEL_ROW + 3 + self.point_count() as u32 + 2
    }

    /// Write the workbook. The layout mimics a kinetic reader export: a
    /// header region with a `Runtime` row, then one block per measurement
    /// (label, blank row, `Time`/well header row, one row per read).
    pub fn write_workbook(&self, path: &Path) -> Result<()> {
        let mut rng = SimpleRng::new(self.seed);
        let n_points = self.point_count();
        let wells = self.conditions.len() * self.rep;

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        let header = [
            ("Software Version", "3.11.19".to_string()),
            ("Experiment File Path:", "growth.xpt".to_string()),
            ("Plate Number", self.sheet_name.clone()),
            ("Reader Type:", "Synergy H1".to_string()),
            ("Procedure Details", String::new()),
        ];
        for (row, (key, value)) in header.iter().enumerate() {
            sheet.write_string(row as u32, 0, *key)?;
            if !value.is_empty() {
                sheet.write_string(row as u32, 1, value)?;
            }
        }
        sheet.write_string(RUNTIME_ROW, 0, "Runtime")?;
        sheet.write_string(
            RUNTIME_ROW,
            1,
            format!(
                "{}:00:00 (HH:MM:SS), Interval 0:{:02}:00, {} Reads",
                self.total_hours, self.interval_minutes, n_points
            ),
        )?;

        // Per-well growth parameters, shared by both measurement blocks.
        let params: Vec<(f64, f64)> = (0..wells)
            .map(|w| {
                let cond = w / self.rep;
                let capacity = 0.6 + 0.15 * cond as f64 + rng.gauss(0.0, 0.02);
                let rate = 0.5 + 0.05 * cond as f64 + rng.gauss(0.0, 0.01);
                (capacity, rate)
            })
            .collect();

        let blocks = [
            ("OD600:600", OD_LABEL_ROW, 1.0, 0.005),
            ("RFP:585,620", self.rfp_label_row(), 2500.0, 8.0),
        ];
        for (label, label_row, scale, noise) in blocks {
            sheet.write_string(label_row, 0, label)?;
            let header_row = label_row + 2;
            sheet.write_string(header_row, 1, "Time")?;
            sheet.write_string(header_row, 2, format!("T° {label}"))?;
            for w in 0..wells {
                let col = FIRST_WELL_COL + w as u16;
                let well = format!("{}{}", (b'A' + (w / 12) as u8) as char, w % 12 + 1);
                sheet.write_string(header_row, col, well)?;
            }
            for i in 0..n_points {
                let row = header_row + 1 + i as u32;
                let minutes = i as u32 * self.interval_minutes;
                sheet.write_string(row, 1, format!("{}:{:02}:00", minutes / 60, minutes % 60))?;
                sheet.write_number(row, 2, 37.0)?;
                let t_hr = minutes as f64 / 60.0;
                for (w, &(capacity, rate)) in params.iter().enumerate() {
                    let value = scale * logistic(t_hr, capacity, 0.01, rate) + rng.gauss(0.0, noise);
                    sheet.write_number(row, FIRST_WELL_COL + w as u16, value)?;
                }
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("saving workbook {}", path.display()))?;
        Ok(())
    }

    /// Condition list matching the workbook's column order.
    pub fn write_conditions(&self, path: &Path) -> Result<()> {
        let mut text = self.conditions.join("\n");
        text.push('\n');
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn logistic_approaches_capacity() {
        assert!((logistic(0.0, 1.0, 0.01, 0.5) - 0.05).abs() < 1e-9);
        assert!((logistic(100.0, 1.0, 0.01, 0.5) - 1.04).abs() < 1e-6);
    }

    #[test]
    fn default_plate_rows() {
        let plate = SamplePlate::default();
        assert_eq!(plate.point_count(), 97);
        assert_eq!(plate.rfp_label_row(), OD_LABEL_ROW + 3 + 97 + 2);
    }
}
