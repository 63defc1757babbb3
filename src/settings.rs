use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::controls::{PanelLayout, ScalingTable};
use crate::render::{GridRenderer, GridSettings, PlotBand, TraceSettings, WaveformPlotter};
use crate::sync::StateSync;

/// Returns the path to the settings file: `~/.config/hdsctl-panel/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("hdsctl-panel");
    path.push("settings.json");
    path
}

/// Persisted panel settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    // Connection
    pub server_url: String,

    // Display surface
    pub display_width: f32,
    pub display_height: f32,
    pub grid_divisions: f32,

    // Plotting band (instrument levels)
    pub plot_baseline: f32,
    pub plot_max_level: f32,

    // Colors (stored as u8 triples since Color32 isn't serde-friendly)
    pub channel1_color: [u8; 3],
    pub channel2_color: [u8; 3],
    pub background_color: [u8; 3],
    pub grid_color: [u8; 3],

    // Window
    pub show_controls: bool,

    // Controls
    pub layout: PanelLayout,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            server_url: "ws://127.0.0.1:8080/ws".to_string(),

            display_width: 600.0,
            display_height: 460.0,
            grid_divisions: 12.0,

            plot_baseline: 115.0,
            plot_max_level: 230.0,

            channel1_color: [255, 255, 0],
            channel2_color: [0, 0, 255],
            background_color: [0, 0, 0],
            grid_color: [255, 255, 255],

            show_controls: true,

            layout: PanelLayout::default(),
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

impl PanelSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        self.save_to(&settings_path());
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Display size, never smaller than one pixel
    pub fn display_size(&self) -> (f32, f32) {
        (self.display_width.max(1.0), self.display_height.max(1.0))
    }

    pub fn background(&self) -> Color32 {
        rgb(self.background_color)
    }

    /// Build the reconciler (grid, plotter and scaling) these settings describe
    pub fn state_sync(&self) -> StateSync {
        let grid = GridRenderer::new(GridSettings {
            divisions: self.grid_divisions,
            background: rgb(self.background_color),
            color: rgb(self.grid_color),
        });
        let band = PlotBand {
            baseline: self.plot_baseline,
            max_level: self.plot_max_level,
        };
        let traces = TraceSettings {
            channel1: rgb(self.channel1_color),
            channel2: rgb(self.channel2_color),
        };
        StateSync::new(WaveformPlotter::new(grid, band, traces), ScalingTable::default())
    }
}
