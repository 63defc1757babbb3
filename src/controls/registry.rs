//! Control registry
//!
//! Built once at startup from a [`PanelLayout`]. Every snapshot key is
//! resolved through here; a key with no control is the caller's business
//! (it logs and moves on).

use std::collections::HashMap;

use super::layout::{ControlKind, PanelLayout};
use super::scaling::ScalingTable;
use crate::error::PanelError;

/// Live state of one control
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub id: String,
    pub label: String,
    pub kind: ControlKind,

    /// Text currently shown; for text controls this is also the edit buffer
    pub value: String,

    /// Selection choices, replaced wholesale by `<id>.range`
    pub options: Vec<String>,
}

/// Identifier -> control, in layout order
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    controls: Vec<Control>,
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<usize>)>,
}

impl ControlRegistry {
    /// Build the registry, rejecting empty or duplicated identifiers
    pub fn build(layout: &PanelLayout) -> Result<Self, PanelError> {
        let mut controls = Vec::new();
        let mut index = HashMap::new();
        let mut groups = Vec::new();

        for group in &layout.groups {
            let mut members = Vec::with_capacity(group.controls.len());
            for spec in &group.controls {
                if spec.id.trim().is_empty() {
                    return Err(PanelError::EmptyControlId);
                }
                if index.contains_key(&spec.id) {
                    return Err(PanelError::DuplicateControl(spec.id.clone()));
                }

                index.insert(spec.id.clone(), controls.len());
                members.push(controls.len());
                controls.push(Control {
                    id: spec.id.clone(),
                    label: spec.label.clone(),
                    kind: spec.kind,
                    value: String::new(),
                    options: Vec::new(),
                });
            }
            groups.push((group.title.clone(), members));
        }

        Ok(Self {
            controls,
            index,
            groups,
        })
    }

    /// Scaling-table identifiers that have no control to show them
    pub fn unbound_scalings(&self, table: &ScalingTable) -> Vec<&'static str> {
        table.ids().filter(|id| !self.contains(id)).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.index.get(id).map(|&i| &self.controls[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.index.get(id).map(|&i| &mut self.controls[i])
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Group titles with the identifiers they contain, in layout order
    pub fn groups(&self) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
        self.groups.iter().map(|(title, members)| {
            let ids = members.iter().map(|&i| self.controls[i].id.as_str()).collect();
            (title.as_str(), ids)
        })
    }
}
