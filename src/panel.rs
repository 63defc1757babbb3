//! Message handling core
//!
//! Owns everything one inbound message touches: the controls, the scope
//! frame and the reconciler. Each message is parsed and applied to
//! completion before the next one is looked at.

use crate::controls::{ControlRegistry, PanelLayout};
use crate::error::PanelError;
use crate::protocol::Snapshot;
use crate::render::DisplayList;
use crate::sync::{StateSync, SyncReport};

pub struct Panel {
    pub registry: ControlRegistry,
    pub frame: DisplayList,
    pub sync: StateSync,

    /// Sample counts of the last drawn frame, per channel in order
    pub last_sample_counts: Vec<usize>,
    pub messages_handled: u64,
    pub messages_dropped: u64,
}

impl Panel {
    /// Build the panel and check the layout against the scaling table
    pub fn new(
        layout: &PanelLayout,
        sync: StateSync,
        width: f32,
        height: f32,
    ) -> Result<Self, PanelError> {
        let registry = ControlRegistry::build(layout)?;
        for id in registry.unbound_scalings(&sync.scaling) {
            log::warn!("layout has no control for scaled field {}", id);
        }
        log::info!("panel ready with {} controls", registry.len());

        Ok(Self {
            registry,
            frame: DisplayList::new(width, height),
            sync,
            last_sample_counts: Vec::new(),
            messages_handled: 0,
            messages_dropped: 0,
        })
    }

    /// Parse and apply one socket message
    ///
    /// A malformed message is counted and dropped; it never affects the
    /// display or the controls.
    pub fn handle_message(&mut self, text: &str) -> Option<SyncReport> {
        let snapshot = match Snapshot::parse(text) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("dropping message: {}", e);
                self.messages_dropped += 1;
                return None;
            }
        };

        let report = self.sync.apply(&snapshot, &mut self.registry, &mut self.frame);
        log::debug!(
            "applied {} waves, {} ranges, {} scalars ({} unknown)",
            report.waves_drawn,
            report.ranges_applied,
            report.scalars_applied,
            report.unknown.len()
        );
        if report.waves_drawn > 0 {
            self.last_sample_counts = snapshot.waves.iter().map(|w| w.samples.len()).collect();
        }
        self.messages_handled += 1;
        Some(report)
    }
}
