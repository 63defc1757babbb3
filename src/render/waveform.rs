//! Waveform plotter
//!
//! Maps sample sequences to surface points and strokes one trace per channel.
//!
//! ## Coordinate mapping
//!
//! - X: sample `i` of `N` sits at `i * W / N`, so a trace always spans the
//!   full width whatever the sample count is
//! - Y: the sample is inverted around a fixed baseline (`baseline - v`),
//!   clamped to the visible band `[1, max_level]`, then scaled so that
//!   `max_level` lands on the bottom edge
//!
//! Out-of-range samples pin to the band edge instead of leaving the surface.

use eframe::egui::{Color32, Pos2, Stroke};

use super::grid::GridRenderer;
use super::surface::Surface;
use crate::protocol::{Channel, Waveform};

/// Vertical plotting band in instrument levels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotBand {
    /// Level that maps to sample value 0
    pub baseline: f32,

    /// Lowest visible level (the band's bottom edge)
    pub max_level: f32,
}

impl Default for PlotBand {
    fn default() -> Self {
        Self {
            baseline: 115.0,
            max_level: 230.0,
        }
    }
}

impl PlotBand {
    /// Band level for a sample, clamped to `[1, max_level]`
    pub fn level(&self, sample: i32) -> f32 {
        (self.baseline - sample as f32).clamp(1.0, self.max_level.max(1.0))
    }
}

/// Stroke width of every trace, in pixels
pub const TRACE_WIDTH: f32 = 2.0;

/// Trace colors
#[derive(Clone, Debug)]
pub struct TraceSettings {
    pub channel1: Color32,
    pub channel2: Color32,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            channel1: Color32::YELLOW,
            channel2: Color32::BLUE,
        }
    }
}

impl TraceSettings {
    pub fn color(&self, channel: Channel) -> Color32 {
        match channel {
            Channel::One => self.channel1,
            Channel::Two => self.channel2,
        }
    }
}

/// Draws the grid followed by each waveform trace
#[derive(Clone, Debug, Default)]
pub struct WaveformPlotter {
    pub grid: GridRenderer,
    pub band: PlotBand,
    pub traces: TraceSettings,
}

impl WaveformPlotter {
    pub fn new(grid: GridRenderer, band: PlotBand, traces: TraceSettings) -> Self {
        Self { grid, band, traces }
    }

    /// Map samples to surface points for a `width` x `height` surface
    pub fn trace_points(&self, samples: &[i32], width: f32, height: f32) -> Vec<Pos2> {
        let n = samples.len() as f32;
        let y_scale = height / self.band.max_level.max(1.0);

        samples
            .iter()
            .enumerate()
            .map(|(i, &v)| Pos2::new(i as f32 * width / n, self.band.level(v) * y_scale))
            .collect()
    }

    /// Repaint the grid and stroke every non-empty waveform, in order
    ///
    /// Does nothing at all when no waveform has samples, leaving the
    /// previous frame in place.
    pub fn draw(&self, surface: &mut impl Surface, waves: &[Waveform]) {
        if waves.iter().all(|w| w.samples.is_empty()) {
            return;
        }

        self.grid.render(surface);

        let (width, height) = surface.size();
        for wave in waves.iter().filter(|w| !w.samples.is_empty()) {
            let points = self.trace_points(&wave.samples, width, height);
            let stroke = Stroke::new(TRACE_WIDTH, self.traces.color(wave.channel));
            surface.polyline(points, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DisplayList, DrawOp};

    fn wave(channel: Channel, samples: Vec<i32>) -> Waveform {
        Waveform { channel, samples }
    }

    #[test]
    fn test_horizontal_spans_full_width() {
        let plotter = WaveformPlotter::default();
        for n in [1usize, 2, 3, 7, 300, 1000] {
            let samples = vec![0; n];
            let points = plotter.trace_points(&samples, 600.0, 460.0);
            assert_eq!(points.len(), n);
            for (i, p) in points.iter().enumerate() {
                let expected = i as f32 * 600.0 / n as f32;
                assert!((p.x - expected).abs() < 1e-3, "n={} i={}", n, i);
            }
        }
    }

    #[test]
    fn test_vertical_inverted_around_baseline() {
        let plotter = WaveformPlotter::default();
        let points = plotter.trace_points(&[0, 50, -50], 600.0, 460.0);
        // 460 / 230 = 2 px per level
        assert_eq!(points[0].y, 230.0);
        assert_eq!(points[1].y, 130.0);
        assert_eq!(points[2].y, 330.0);
    }

    #[test]
    fn test_out_of_band_samples_clamp() {
        let plotter = WaveformPlotter::default();
        let points = plotter.trace_points(&[127, 114, -115, -128, i32::MAX, i32::MIN], 600.0, 460.0);
        assert_eq!(points[0].y, 2.0);
        assert_eq!(points[1].y, 2.0);
        assert_eq!(points[2].y, 460.0);
        assert_eq!(points[3].y, 460.0);
        assert_eq!(points[4].y, 2.0);
        assert_eq!(points[5].y, 460.0);
        for p in &points {
            assert!(p.y >= 0.0 && p.y <= 460.0);
        }
    }

    #[test]
    fn test_grid_before_traces_in_message_order() {
        let plotter = WaveformPlotter::default();
        let mut list = DisplayList::new(600.0, 460.0);
        plotter.draw(
            &mut list,
            &[wave(Channel::One, vec![1, 2]), wave(Channel::Two, vec![3, 4, 5])],
        );

        assert!(matches!(list.ops()[0], DrawOp::Clear(_)));
        let traces: Vec<_> = list.polylines().collect();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].0.len(), 2);
        assert_eq!(traces[0].1.color, Color32::YELLOW);
        assert_eq!(traces[1].0.len(), 3);
        assert_eq!(traces[1].1.color, Color32::BLUE);
        assert_eq!(traces[1].1.width, 2.0);
        assert!(matches!(list.ops().last(), Some(DrawOp::Polyline { .. })));
    }

    #[test]
    fn test_no_samples_keeps_previous_frame() {
        let plotter = WaveformPlotter::default();
        let mut list = DisplayList::new(600.0, 460.0);
        plotter.draw(&mut list, &[wave(Channel::One, vec![10, 20])]);
        let before = list.ops().to_vec();

        plotter.draw(&mut list, &[]);
        plotter.draw(&mut list, &[wave(Channel::Two, Vec::new())]);
        assert_eq!(list.ops(), before.as_slice());
    }

    #[test]
    fn test_each_message_replaces_traces() {
        let plotter = WaveformPlotter::default();
        let mut list = DisplayList::new(600.0, 460.0);
        plotter.draw(&mut list, &[wave(Channel::One, vec![0; 10]), wave(Channel::Two, vec![0; 10])]);
        plotter.draw(&mut list, &[wave(Channel::Two, vec![0; 4])]);

        let traces: Vec<_> = list.polylines().collect();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].0[1].x, 150.0);
    }
}
