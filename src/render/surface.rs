//! Drawing surface abstraction
//!
//! Renderers never talk to egui directly. They draw onto a [`Surface`],
//! and the panel uses a [`DisplayList`] that records the frame so the
//! scope widget can replay it every UI frame until the next message.
//!
//! Coordinates are surface pixels: (0, 0) is the top-left corner,
//! Y grows downward.

use eframe::egui::{Color32, Pos2, Stroke};

/// Something grid and traces can be drawn on
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (f32, f32);

    /// Fill the whole surface, discarding anything drawn before
    fn clear(&mut self, color: Color32);

    /// A single 1x1 pixel
    fn dot(&mut self, pos: Pos2, color: Color32);

    /// A connected open path
    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke);
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color32),
    Dot(Pos2, Color32),
    Polyline { points: Vec<Pos2>, stroke: Stroke },
}

/// A recorded frame
#[derive(Debug, Clone)]
pub struct DisplayList {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Recorded traces, in draw order
    #[cfg(test)]
    pub fn polylines(&self) -> impl Iterator<Item = (&[Pos2], &Stroke)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Polyline { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
    }

    /// Recorded grid pixels
    #[cfg(test)]
    pub fn dots(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Dot(pos, _) => Some(*pos),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color32) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(color));
    }

    fn dot(&mut self, pos: Pos2, color: Color32) {
        self.ops.push(DrawOp::Dot(pos, color));
    }

    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke) {
        self.ops.push(DrawOp::Polyline { points, stroke });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_discards_previous_frame() {
        let mut list = DisplayList::new(10.0, 10.0);
        list.dot(Pos2::new(1.0, 1.0), Color32::WHITE);
        list.polyline(vec![Pos2::ZERO, Pos2::new(5.0, 5.0)], Stroke::new(2.0, Color32::YELLOW));

        list.clear(Color32::BLACK);

        assert_eq!(list.ops(), &[DrawOp::Clear(Color32::BLACK)]);
        assert_eq!(list.polylines().count(), 0);
    }
}
