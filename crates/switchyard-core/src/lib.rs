//! switchyard-core — shared types, wire format, and configuration.
//! All other Switchyard crates depend on this one.

pub mod config;
pub mod envelope;
pub mod wire;

pub use envelope::Envelope;
pub use wire::{CmdFlag, RelayRecord, SenderId, SessionRecord};
