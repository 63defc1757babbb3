//! Calibration grid
//!
//! The grid uses a **centered origin**: major lines sit at whole multiples
//! of the pitch away from the surface center, in both directions. Each
//! major line is drawn as a row of minor ticks (pitch / 5 apart), which
//! gives the dotted graticule of the instrument's own screen.
//!
//! On top of the major lines there are explicit reference lines:
//! - one pixel either side of the center, on both axes
//! - the first and last pixel row and column (the surface edges)
//!
//! The pitch is proportional to the surface width, so the same number of
//! divisions fits whatever size the display is configured to.

use eframe::egui::{Color32, Pos2};

use super::surface::Surface;

/// Grid appearance
#[derive(Clone, Debug)]
pub struct GridSettings {
    /// Major divisions across the full width
    pub divisions: f32,

    /// Background fill
    pub background: Color32,

    /// Tick color
    pub color: Color32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            // 25 px pitch per 300 px of width
            divisions: 12.0,
            background: Color32::BLACK,
            color: Color32::WHITE,
        }
    }
}

/// Paints the calibration grid
#[derive(Clone, Debug, Default)]
pub struct GridRenderer {
    pub settings: GridSettings,
}

impl GridRenderer {
    pub fn new(settings: GridSettings) -> Self {
        Self { settings }
    }

    /// Major line spacing for a surface of the given width
    pub fn pitch(&self, width: f32) -> f32 {
        width / self.settings.divisions.max(1.0)
    }

    /// Clear the surface and paint the full grid
    pub fn render(&self, surface: &mut impl Surface) {
        let (width, height) = surface.size();
        surface.clear(self.settings.background);

        if width < 1.0 || height < 1.0 {
            return;
        }

        let pitch = self.pitch(width);
        let minor = pitch / 5.0;
        let cx = width / 2.0;
        let cy = height / 2.0;

        let mut rows = offsets(cy, pitch, height);
        rows.extend([cy - 1.0, cy + 1.0, 0.0, height - 1.0]);
        let mut cols = offsets(cx, pitch, width);
        cols.extend([cx - 1.0, cx + 1.0, 0.0, width - 1.0]);

        let ticks_x = offsets(cx, minor, width);
        let ticks_y = offsets(cy, minor, height);
        let color = self.settings.color;

        for &y in rows.iter().filter(|&&y| within(y, height)) {
            for &x in &ticks_x {
                surface.dot(Pos2::new(x, y), color);
            }
        }
        for &x in cols.iter().filter(|&&x| within(x, width)) {
            for &y in &ticks_y {
                surface.dot(Pos2::new(x, y), color);
            }
        }
    }
}

fn within(v: f32, extent: f32) -> bool {
    v >= 0.0 && v < extent
}

/// All positions `center + k * step` inside `[0, extent)`, ascending
fn offsets(center: f32, step: f32, extent: f32) -> Vec<f32> {
    let mut out = Vec::new();
    if step <= 0.0 || extent <= 0.0 {
        return out;
    }

    let mut k = -(center / step).floor() as i64;
    loop {
        let v = center + k as f32 * step;
        if v >= extent {
            break;
        }
        if v >= 0.0 {
            out.push(v);
        }
        k += 1;
    }
    out
}
