//! Panel layout
//!
//! The layout is plain data so it can live in the settings file. The
//! default mirrors the fields the instrument server publishes.

use serde::{Deserialize, Serialize};

/// How a control is edited and when it dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Free-form text/number, sent on Enter
    Text,
    /// Option list driven by `<id>.range`, sent on every change
    Select,
    /// Display only
    Readout,
}

/// One control in the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSpec {
    /// Wire identifier, must equal the snapshot key
    pub id: String,
    pub label: String,
    pub kind: ControlKind,
}

impl ControlSpec {
    pub fn new(id: &str, label: &str, kind: ControlKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

/// A titled group of controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlGroup {
    pub title: String,
    pub controls: Vec<ControlSpec>,
}

/// Ordered groups shown in the side panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub groups: Vec<ControlGroup>,
}

impl PanelLayout {
    /// Layout for the HDS2000-series scope / generator / multimeter
    pub fn hds() -> Self {
        use ControlKind::{Readout, Select, Text};

        let channel = |n: u8| ControlGroup {
            title: format!("Channel {}", n),
            controls: vec![
                ControlSpec::new(&format!("ch{}Disp", n), "Display", Select),
                ControlSpec::new(&format!("ch{}Scal", n), "Scale", Select),
                ControlSpec::new(&format!("ch{}Offs", n), "Offset", Text),
                ControlSpec::new(&format!("ch{}Prob", n), "Probe", Select),
                ControlSpec::new(&format!("ch{}Coup", n), "Coupling", Select),
            ],
        };

        Self {
            groups: vec![
                channel(1),
                channel(2),
                ControlGroup {
                    title: "Horizontal".to_string(),
                    controls: vec![
                        ControlSpec::new("horScal", "Scale", Select),
                        ControlSpec::new("horOffs", "Offset", Text),
                    ],
                },
                ControlGroup {
                    title: "Acquire".to_string(),
                    controls: vec![
                        ControlSpec::new("acqMod", "Mode", Select),
                        ControlSpec::new("acqDepm", "Memory depth", Select),
                    ],
                },
                ControlGroup {
                    title: "Trigger".to_string(),
                    controls: vec![
                        ControlSpec::new("trigSingSour", "Source", Select),
                        ControlSpec::new("trigSingCoup", "Coupling", Select),
                        ControlSpec::new("trigSingEdg", "Edge", Select),
                        ControlSpec::new("trigSingSwe", "Sweep", Select),
                        ControlSpec::new("trigSingEdgLev", "Level", Text),
                    ],
                },
                ControlGroup {
                    title: "Function generator".to_string(),
                    controls: vec![
                        ControlSpec::new("func", "Function", Select),
                        ControlSpec::new("chan", "Output", Select),
                        ControlSpec::new("funcFreq", "Frequency (MHz)", Text),
                        ControlSpec::new("funcAmpl", "Amplitude (V)", Text),
                        ControlSpec::new("funcOffs", "Offset (V)", Text),
                        ControlSpec::new("funcLow", "Low (V)", Text),
                        ControlSpec::new("funcHigh", "High (V)", Text),
                    ],
                },
                ControlGroup {
                    title: "Multimeter".to_string(),
                    controls: vec![ControlSpec::new("dmmMeas", "Reading", Readout)],
                },
            ],
        }
    }

}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::hds()
    }
}
