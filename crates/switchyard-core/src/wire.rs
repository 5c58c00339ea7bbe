//! Switchyard wire format — on-wire types for inbound signaling messages.
//!
//! A frame is a 12-byte `MsgHeader` followed by a message body. The body's
//! layout depends on the sender: some senders put a message-type word after
//! the echoed sender id, others a command-flag byte and correlation fields.
//! The dispatcher never reinterprets one buffer through multiple views at
//! once; it picks the discriminant first, then parses exactly one record
//! shape from the body under a length guard.
//!
//! All wire types are #[repr(C, packed)] for deterministic layout and use
//! zerocopy derives for safe, allocation-free decoding. There is no unsafe
//! code in this module.

use static_assertions::assert_eq_size;
use zerocopy::{AsBytes, FromBytes, FromZeroes};

use crate::envelope::Envelope;

// ── Frame header ─────────────────────────────────────────────────────────────

/// Transport frame header. Precedes every message body.
///
/// `length` is the sender's claim about the body size. The dispatcher
/// trusts it only after checking it against the bytes actually received;
/// a disagreement silently discards the message.
///
/// Wire size: 12 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
pub struct MsgHeader {
    /// Process id of the sending component.
    pub sender: u32,
    /// Process id of the receiving component.
    pub receiver: u32,
    /// Declared body length in bytes, not including this header.
    pub length: u32,
}

assert_eq_size!(MsgHeader, [u8; 12]);

// ── Body views ───────────────────────────────────────────────────────────────

/// Body shape for senders that carry a message-type word.
/// Wire size: 8 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
pub struct RelayMsg {
    /// Echo of the sending process id.
    pub sender: u32,
    /// Sender-defined message type. See [`msg_type`].
    pub msg_type: u32,
}

assert_eq_size!(RelayMsg, [u8; 8]);

/// Body shape for session-bearing senders (media and bearer planes).
/// Wire size: 13 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
pub struct SessionMsg {
    /// Echo of the sending process id.
    pub sender: u32,
    /// Bit 0: request (1) or answer (0). Other bits reserved.
    pub cmd_flag: u8,
    /// Correlation id. Zero means not yet assigned.
    pub correlation_id: u32,
    /// Subscriber control-block reference. Only the low 16 bits key
    /// the origin registry.
    pub subscriber_ref: u32,
}

assert_eq_size!(SessionMsg, [u8; 13]);

// ── Sender ids ───────────────────────────────────────────────────────────────

/// The closed set of senders the dispatcher routes for.
///
/// Values are the process ids used on the wire. Anything else is an
/// unknown discriminant and takes the default (log-and-ignore) path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SenderId {
    /// Protocol core. Messages forwarded unconditionally.
    Core = 306,
    /// System timer. Tick messages, no body inspection.
    Timer = 100,
    /// Subscriber directory front-end.
    Directory = 206,
    /// Media plane.
    Media = 242,
    /// Bearer plane.
    Bearer = 204,
    /// Maintenance subsystem. Recognized but ignored.
    Maintenance = 181,
    /// Operations & management.
    Ops = 241,
}

impl TryFrom<u32> for SenderId {
    type Error = WireError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            306 => Ok(SenderId::Core),
            100 => Ok(SenderId::Timer),
            206 => Ok(SenderId::Directory),
            242 => Ok(SenderId::Media),
            204 => Ok(SenderId::Bearer),
            181 => Ok(SenderId::Maintenance),
            241 => Ok(SenderId::Ops),
            other => Err(WireError::UnknownSender(other)),
        }
    }
}

impl From<SenderId> for u32 {
    fn from(s: SenderId) -> u32 {
        s as u32
    }
}

// ── Command flag ─────────────────────────────────────────────────────────────

/// Bit mask selecting the request/answer bit of `SessionMsg::cmd_flag`.
pub const REQUEST_FLAG: u8 = 0x01;

/// Request/answer discriminator carried in bit 0 of the command flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdFlag {
    /// An answer to a request this side originated.
    Answer,
    /// A new request from the peer.
    Request,
}

impl CmdFlag {
    /// Decode from the raw flags byte. Reserved bits are ignored.
    pub fn from_flags(flags: u8) -> CmdFlag {
        if flags & REQUEST_FLAG == REQUEST_FLAG {
            CmdFlag::Request
        } else {
            CmdFlag::Answer
        }
    }
}

// ── Message types ────────────────────────────────────────────────────────────

/// Well-known `RelayMsg::msg_type` values.
pub mod msg_type {
    /// Directory lookup completed. Terminal for the dispatcher.
    pub const LOOKUP_DONE: u32 = 100;
}

// ── Parsed records ───────────────────────────────────────────────────────────
//
// Owned decodings of the body views above. Parsing happens after the
// discriminant is known and only under a length guard, so no record ever
// aliases another interpretation of the same bytes.

/// Parsed form of [`RelayMsg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRecord {
    pub sender: u32,
    pub msg_type: u32,
}

impl RelayRecord {
    /// Parse from an envelope body.
    ///
    /// Returns `None` when the declared length does not cover the wire
    /// form, or when the buffer itself is too short. Both cases are
    /// silently ignorable per the dispatch contract.
    pub fn parse(env: &Envelope) -> Option<RelayRecord> {
        if (env.declared_len as usize) < std::mem::size_of::<RelayMsg>() {
            return None;
        }
        let view = RelayMsg::read_from_prefix(env.payload())?;
        // Packed fields are copied out, never referenced in place.
        let sender = view.sender;
        let msg_type = view.msg_type;
        Some(RelayRecord { sender, msg_type })
    }
}

/// Parsed form of [`SessionMsg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub sender: u32,
    pub cmd_flag: CmdFlag,
    pub correlation_id: u32,
    pub subscriber_ref: u32,
}

impl SessionRecord {
    /// Parse from an envelope body. Same guard semantics as
    /// [`RelayRecord::parse`].
    pub fn parse(env: &Envelope) -> Option<SessionRecord> {
        if (env.declared_len as usize) < std::mem::size_of::<SessionMsg>() {
            return None;
        }
        let view = SessionMsg::read_from_prefix(env.payload())?;
        let sender = view.sender;
        let cmd_flag = CmdFlag::from_flags(view.cmd_flag);
        let correlation_id = view.correlation_id;
        let subscriber_ref = view.subscriber_ref;
        Some(SessionRecord {
            sender,
            cmd_flag,
            correlation_id,
            subscriber_ref,
        })
    }

    /// The origin-registry key: low 16 bits of the subscriber reference.
    pub fn subscriber_key(&self) -> u16 {
        (self.subscriber_ref & 0xFFFF) as u16
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Errors that can arise when interpreting wire-format data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("unknown sender id: {0}")]
    UnknownSender(u32),
}

// ── Tests ────────────────────────────────────────────────────────────────────
