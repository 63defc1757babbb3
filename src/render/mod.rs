//! Render module - scope display drawing
//!
//! This module provides:
//! - A drawing seam (`Surface`) with a recording implementation
//! - The calibration grid
//! - The waveform plotter
//! - The egui widget that shows the recorded frame

mod grid;
mod oscilloscope;
mod surface;
mod waveform;

pub use grid::{GridRenderer, GridSettings};
pub use oscilloscope::ScopeDisplay;
pub use surface::DisplayList;
#[cfg(test)]
pub use surface::DrawOp;
pub use waveform::{PlotBand, TraceSettings, WaveformPlotter};
