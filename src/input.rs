//! User input dispatch
//!
//! Turns local edits into outbound [`Command`]s.
//!
//! - Text controls buffer edits in the control itself and send only when
//!   the user confirms with Enter
//! - Selection controls send on every change
//! - Readouts never send
//!
//! The value sent is whatever the control shows, with no un-scaling.

use crate::controls::{ControlKind, ControlRegistry};
use crate::protocol::Command;

/// Where outbound commands go
///
/// Sending is fire-and-forget: implementations swallow (and may log)
/// failures rather than reporting them back.
pub trait CommandSink {
    fn send(&self, command: &Command);
}

/// Keys the dispatcher distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The confirmation key
    Enter,
    Other,
}

/// A single user action on a control
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Text control content changed locally
    Edit { id: String, text: String },
    /// A key was released while a text control had focus
    KeyUp { id: String, key: Key },
    /// A selection control picked a new value
    Select { id: String, value: String },
}

/// Applies user actions to the registry and forwards qualifying ones
pub struct InputDispatcher<S: CommandSink> {
    sink: S,
}

impl<S: CommandSink> InputDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handle one action, returning the command sent (if any)
    pub fn dispatch(&self, registry: &mut ControlRegistry, action: UserAction) -> Option<Command> {
        let id = match &action {
            UserAction::Edit { id, .. } | UserAction::KeyUp { id, .. } | UserAction::Select { id, .. } => id,
        };
        let Some(control) = registry.get_mut(id) else {
            log::warn!("input from unknown control: {}", id);
            return None;
        };

        let command = match (control.kind, action) {
            (ControlKind::Text, UserAction::Edit { text, .. }) => {
                control.value = text;
                None
            }
            (ControlKind::Text, UserAction::KeyUp { key: Key::Enter, .. }) => {
                Some(Command::new(control.id.clone(), control.value.clone()))
            }
            (ControlKind::Select, UserAction::Select { value, .. }) => {
                control.value = value;
                Some(Command::new(control.id.clone(), control.value.clone()))
            }
            _ => None,
        };

        if let Some(command) = &command {
            log::debug!("sending {}", command);
            self.sink.send(command);
        }
        command
    }
}
