use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// Maps category labels (e.g. genders) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(labels: &[String]) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (0.230, 0.299, 0.754);
const NEUTRAL: (f32, f32, f32) = (0.865, 0.865, 0.865);
const WARM: (f32, f32, f32) = (0.706, 0.016, 0.150);

const REDS_LOW: (f32, f32, f32) = (0.996, 0.878, 0.824);
const REDS_HIGH: (f32, f32, f32) = (0.647, 0.059, 0.082);

/// Diverging blue → grey → red scale for a correlation in [-1, 1].
pub fn coolwarm(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0) as f32;
    if t < 0.0 {
        mix(NEUTRAL, COOL, -t)
    } else {
        mix(NEUTRAL, WARM, t)
    }
}

/// Sequential light → dark red scale for `value` within `[min, max]`.
pub fn reds(value: f64, min: f64, max: f64) -> Color32 {
    let span = max - min;
    let t = if span.abs() < f64::EPSILON {
        1.0
    } else {
        ((value - min) / span).clamp(0.0, 1.0) as f32
    };
    mix(REDS_LOW, REDS_HIGH, t)
}

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// Interpolate in linear light so the midpoint does not go muddy.
fn mix(from: (f32, f32, f32), to: (f32, f32, f32), t: f32) -> Color32 {
    let a: LinSrgb = Srgb::new(from.0, from.1, from.2).into_linear();
    let b: LinSrgb = Srgb::new(to.0, to.1, to.2).into_linear();
    let mixed = a.mix(b, t);
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}
