//! Wire protocol between the panel and the instrument server
//!
//! Inbound: one JSON object per message (a [`Snapshot`]).
//! Outbound: plain text `"<id>: <value>"` (a [`Command`]).

mod command;
mod snapshot;

pub use command::Command;
pub use snapshot::{Channel, RangeEntry, ScalarEntry, ScalarValue, Snapshot, Waveform};
