//! Diverging colormaps for two-sided bar charts.

use plotters::style::RGBColor;
use sentiment_common::linspace;

/// Control points of the Moreland cool-warm map, evenly spaced over [0, 1].
const COOLWARM: [(u8, u8, u8); 9] = [
    (59, 76, 192),
    (98, 130, 234),
    (141, 176, 254),
    (184, 208, 249),
    (221, 221, 221),
    (245, 196, 173),
    (244, 154, 123),
    (222, 96, 77),
    (180, 4, 38),
];

/// Supported colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Blue at 0 through grey to red at 1.
    Coolwarm,
    /// Red at 0 through grey to blue at 1.
    CoolwarmReversed,
}

impl Colormap {
    /// Color at position `t`, clamped to [0, 1].
    pub fn sample(self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = match self {
            Self::Coolwarm => t,
            Self::CoolwarmReversed => 1.0 - t,
        };

        let last = COOLWARM.len() - 1;
        let position = t * last as f64;
        let lower = (position.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let frac = position - lower as f64;

        let (r0, g0, b0) = COOLWARM[lower];
        let (r1, g1, b1) = COOLWARM[upper];
        RGBColor(lerp(r0, r1, frac), lerp(g0, g1, frac), lerp(b0, b1, frac))
    }

    /// `n` colors sampled evenly between `start` and `end`.
    pub fn sample_range(self, start: f64, end: f64, n: usize) -> Vec<RGBColor> {
        linspace(start, end, n)
            .into_iter()
            .map(|t| self.sample(t))
            .collect()
    }
}

fn lerp(a: u8, b: u8, frac: f64) -> u8 {
    let value = (f64::from(b) - f64::from(a)).mul_add(frac, f64::from(a));
    value.round().clamp(0.0, 255.0) as u8
}
