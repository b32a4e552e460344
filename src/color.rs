use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::data::select::ControlRole;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // start at blue so a single replicate keeps the condition colour
            let hue = 220.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series roles
// ---------------------------------------------------------------------------

/// Colour of the condition being plotted in a panel.
pub const CONDITION_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Colour of a reference control trace.
pub fn control_color(role: ControlRole) -> RGBColor {
    match role {
        ControlRole::Positive => RGBColor(44, 160, 44),
        ControlRole::Negative => RGBColor(214, 39, 40),
    }
}

/// Colours for the replicate traces of one panel.
pub fn replicate_colors(rep: usize, distinct: bool) -> Vec<RGBColor> {
    if distinct {
        generate_palette(rep)
    } else {
        vec![CONDITION_COLOR; rep]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_and_distinctness() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
    }

    #[test]
    fn uniform_replicates_share_condition_colour() {
        let c = replicate_colors(3, false);
        assert!(c.iter().all(|&x| x == CONDITION_COLOR));
        assert_ne!(control_color(ControlRole::Positive), control_color(ControlRole::Negative));
    }
}
