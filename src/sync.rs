//! Snapshot reconciliation
//!
//! Applies one parsed [`Snapshot`] to the scope frame and the controls, in
//! three passes:
//!
//! 1. Waveforms: grid repaint and traces, before anything else
//! 2. Ranges: option lists of selection controls are replaced wholesale
//! 3. Scalars: control values, through the scaling table
//!
//! The snapshot has already sorted keys into these classes, so no pass
//! touches a key that belongs to another.

use crate::controls::{ControlKind, ControlRegistry, ScalingTable};
use crate::protocol::{RangeEntry, ScalarEntry, Snapshot};
use crate::render::{DisplayList, WaveformPlotter};

/// What one snapshot changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Traces stroked this message
    pub waves_drawn: usize,
    pub ranges_applied: usize,
    pub scalars_applied: usize,

    /// Identifiers that named no usable control
    pub unknown: Vec<String>,
}

/// Reconciles inbound state with the display and the controls
#[derive(Debug, Clone, Default)]
pub struct StateSync {
    pub plotter: WaveformPlotter,
    pub scaling: ScalingTable,
}

impl StateSync {
    pub fn new(plotter: WaveformPlotter, scaling: ScalingTable) -> Self {
        Self { plotter, scaling }
    }

    pub fn apply(
        &self,
        snapshot: &Snapshot,
        registry: &mut ControlRegistry,
        frame: &mut DisplayList,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        if snapshot.has_waves() {
            self.plotter.draw(frame, &snapshot.waves);
            report.waves_drawn = snapshot.waves.len();
        }

        for range in &snapshot.ranges {
            if self.apply_range(range, registry) {
                report.ranges_applied += 1;
            } else {
                report.unknown.push(range.id.clone());
            }
        }

        for scalar in &snapshot.scalars {
            if self.apply_scalar(scalar, registry) {
                report.scalars_applied += 1;
            } else {
                report.unknown.push(scalar.id.clone());
            }
        }

        report
    }

    fn apply_range(&self, range: &RangeEntry, registry: &mut ControlRegistry) -> bool {
        let Some(control) = registry.get_mut(&range.id) else {
            log::warn!("unknown element: {}", range.id);
            return false;
        };
        if control.kind != ControlKind::Select {
            log::warn!("{} has an option list but is not a selection control", range.id);
            return false;
        }

        control.options.clear();
        control.options.extend(range.options.iter().cloned());
        true
    }

    fn apply_scalar(&self, scalar: &ScalarEntry, registry: &mut ControlRegistry) -> bool {
        log::debug!("received: {} {:?}", scalar.id, scalar.value);

        let Some(control) = registry.get_mut(&scalar.id) else {
            log::warn!("unknown element: {}", scalar.id);
            return false;
        };

        control.value = self.scaling.display(&scalar.id, &scalar.value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::PanelLayout;

    fn setup() -> (StateSync, ControlRegistry, DisplayList) {
        (
            StateSync::default(),
            ControlRegistry::build(&PanelLayout::default()).unwrap(),
            DisplayList::new(600.0, 460.0),
        )
    }

    fn apply(text: &str, sync: &StateSync, registry: &mut ControlRegistry, frame: &mut DisplayList) -> SyncReport {
        sync.apply(&Snapshot::parse(text).unwrap(), registry, frame)
    }

    #[test]
    fn test_range_replaces_options_in_order() {
        let (sync, mut registry, mut frame) = setup();
        registry.get_mut("ch1Coup").unwrap().options = vec!["old".into(), "GND".into()];

        let report = apply(r#"{"ch1Coup.range": ["c", "a", "b"]}"#, &sync, &mut registry, &mut frame);

        assert_eq!(report.ranges_applied, 1);
        assert_eq!(registry.get("ch1Coup").unwrap().options, vec!["c", "a", "b"]);
        // Not re-applied as a scalar
        assert_eq!(registry.get("ch1Coup").unwrap().value, "");
        assert_eq!(report.scalars_applied, 0);
    }

    #[test]
    fn test_scaled_and_raw_scalars() {
        let (sync, mut registry, mut frame) = setup();
        let report = apply(
            r#"{"funcFreq": 1500000, "funcAmpl": 250, "ch1Offs": "0.40", "horScal": "500us"}"#,
            &sync,
            &mut registry,
            &mut frame,
        );

        assert_eq!(report.scalars_applied, 4);
        assert_eq!(registry.get("funcFreq").unwrap().value, "1.500");
        assert_eq!(registry.get("funcAmpl").unwrap().value, "0.25");
        assert_eq!(registry.get("ch1Offs").unwrap().value, "0.40");
        assert_eq!(registry.get("horScal").unwrap().value, "500us");
    }

    #[test]
    fn test_unknown_key_changes_nothing() {
        let (sync, mut registry, mut frame) = setup();
        let snapshot_before = registry.clone();

        let report = apply(r#"{"doesNotExist": 5, "nope.range": ["x"]}"#, &sync, &mut registry, &mut frame);

        assert_eq!(report.unknown, vec!["nope".to_string(), "doesNotExist".to_string()]);
        assert_eq!(report.scalars_applied, 0);
        assert!(frame.is_empty());
        for (_, ids) in snapshot_before.groups() {
            for id in ids {
                assert_eq!(registry.get(id), snapshot_before.get(id));
            }
        }
    }

    #[test]
    fn test_range_on_text_control_skipped() {
        let (sync, mut registry, mut frame) = setup();
        let report = apply(r#"{"funcFreq.range": ["1", "2"]}"#, &sync, &mut registry, &mut frame);
        assert_eq!(report.unknown, vec!["funcFreq".to_string()]);
        assert!(registry.get("funcFreq").unwrap().options.is_empty());
    }

    #[test]
    fn test_waves_draw_before_controls() {
        let (sync, mut registry, mut frame) = setup();
        let report = apply(
            r#"{"wave1": "0 10 20 ", "wave2": "-1 -2 ", "ch1Disp": "ON"}"#,
            &sync,
            &mut registry,
            &mut frame,
        );
        assert_eq!(report.waves_drawn, 2);
        assert_eq!(frame.polylines().count(), 2);
        assert_eq!(registry.get("ch1Disp").unwrap().value, "ON");
    }

    #[test]
    fn test_last_applied_wins() {
        let (sync, mut registry, mut frame) = setup();
        apply(r#"{"horOffs": "1.0"}"#, &sync, &mut registry, &mut frame);
        apply(r#"{"horOffs": "2.5"}"#, &sync, &mut registry, &mut frame);
        assert_eq!(registry.get("horOffs").unwrap().value, "2.5");
    }
}
