//! Collaborator traits for the dispatcher.
//!
//! The dispatcher classifies and guards; these traits do the work. They
//! are the contract between routing (this crate) and the subsystems that
//! actually act on a message (out of scope, supplied by the embedder).
//!
//! Intentionally minimal. No request/response abstraction — answers flow
//! back through the transport, not through return values.

use anyhow::Result;
use switchyard_core::envelope::Envelope;
use switchyard_core::wire::{RelayRecord, SessionRecord};

/// Handler for messages from the protocol core.
///
/// Invoked unconditionally: the core's messages carry their own framing
/// and the handler owns any further interpretation.
pub trait CoreService: Send + Sync {
    fn on_core_message(&self, msg: &Envelope);
}

/// Handler for timer ticks. No body inspection happens before this call.
pub trait TimerService: Send + Sync {
    fn on_timer(&self, msg: &Envelope);
}

/// Application processing for session-bearing messages.
///
/// Called after the flag sub-branches have run and the origin registry
/// holds the message's entry. An error is logged by the dispatcher and
/// does not skip cleanup.
pub trait AppService: Send + Sync {
    fn process(&self, msg: &SessionRecord) -> Result<()>;
}

/// Handler for operations & management messages.
///
/// Performs its own secondary validation; an error silently terminates
/// processing for that message.
pub trait OpsService: Send + Sync {
    fn handle(&self, msg: &Envelope, relay: &RelayRecord) -> Result<()>;
}
