//! Scope display widget
//!
//! Shows the most recently recorded frame. The frame itself is produced once
//! per inbound message by the plotter; this widget only replays it, so a
//! repaint never shows a half-drawn message.
//!
//! Trace vertices are snapped to the physical pixel grid, so a trace lands
//! on whole pixels without touching the context's tessellation options.

use eframe::egui::{self, Color32, Pos2, Rect, Shape, Vec2};

use super::surface::{DisplayList, DrawOp, Surface};

/// Widget that paints a [`DisplayList`] at its configured size
pub struct ScopeDisplay<'a> {
    frame: &'a DisplayList,
    idle_background: Color32,
}

impl<'a> ScopeDisplay<'a> {
    pub fn new(frame: &'a DisplayList) -> Self {
        Self {
            frame,
            idle_background: Color32::BLACK,
        }
    }

    /// Background shown before the first waveform arrives
    pub fn idle_background(mut self, color: Color32) -> Self {
        self.idle_background = color;
        self
    }

    /// Allocate the display area and paint the frame into it
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let (width, height) = self.frame.size();
        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), egui::Sense::hover());
        let rect = response.rect;

        if self.frame.is_empty() {
            painter.rect_filled(rect, 0.0, self.idle_background);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Waiting for waveform data",
                egui::FontId::proportional(14.0),
                Color32::GRAY,
            );
            return response;
        }

        let origin = rect.min.to_vec2();
        let pixels_per_point = ui.ctx().pixels_per_point();
        for op in self.frame.ops() {
            match op {
                DrawOp::Clear(color) => {
                    painter.rect_filled(rect, 0.0, *color);
                }
                DrawOp::Dot(pos, color) => {
                    let pixel = Rect::from_min_size(*pos + origin, Vec2::splat(1.0));
                    painter.rect_filled(pixel, 0.0, *color);
                }
                DrawOp::Polyline { points, stroke } => {
                    if points.len() < 2 {
                        continue;
                    }
                    let points = points
                        .iter()
                        .map(|p| snap_to_pixel(*p + origin, stroke.width, pixels_per_point))
                        .collect();
                    painter.add(Shape::line(points, *stroke));
                }
            }
        }

        response
    }
}

/// Place a vertex so a stroke of `width` points covers whole pixels
///
/// Even pixel widths centre on a pixel edge, odd ones on a pixel centre.
fn snap_to_pixel(pos: Pos2, width: f32, pixels_per_point: f32) -> Pos2 {
    let odd = (width * pixels_per_point).round() as i64 % 2 == 1;
    let snap = |v: f32| {
        let px = v * pixels_per_point;
        let px = if odd { px.floor() + 0.5 } else { px.round() };
        px / pixels_per_point
    };
    Pos2::new(snap(pos.x), snap(pos.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_width_snaps_to_pixel_edges() {
        assert_eq!(snap_to_pixel(Pos2::new(10.4, 20.6), 2.0, 1.0), Pos2::new(10.0, 21.0));
        assert_eq!(snap_to_pixel(Pos2::new(150.0, 230.0), 2.0, 1.0), Pos2::new(150.0, 230.0));
    }

    #[test]
    fn test_odd_width_snaps_to_pixel_centres() {
        assert_eq!(snap_to_pixel(Pos2::new(10.9, 3.0), 1.0, 1.0), Pos2::new(10.5, 3.5));
    }

    #[test]
    fn test_snaps_in_physical_pixels() {
        // 2 points at 1.5x is 3 physical pixels: pixel centres again
        let p = snap_to_pixel(Pos2::new(1.0, 2.0), 2.0, 1.5);
        assert!((p.x * 1.5 - 1.5).abs() < 1e-4);
        assert!((p.y * 1.5 - 3.5).abs() < 1e-4);
    }
}
