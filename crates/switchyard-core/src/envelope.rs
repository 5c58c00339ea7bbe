//! The in-memory message record handed to the dispatcher.
//!
//! The transport layer owns framing and delivery; this crate only sees the
//! result: sender, receiver, a declared body length, and the body bytes.
//! Nothing here retains the envelope past the dispatch call.

use zerocopy::FromBytes;

use crate::wire::MsgHeader;

/// One inbound message as delivered by the transport.
///
/// The declared length is the sender's claim and may disagree with the
/// bytes actually present. [`Envelope::is_structurally_valid`] is the
/// first guard every dispatch runs; typed-record parsing applies its own
/// stricter per-shape guard on top.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Sending process id — the dispatch discriminant.
    pub sender: u32,
    /// Receiving process id.
    pub receiver: u32,
    /// Declared body length in bytes.
    pub declared_len: u32,
    payload: Vec<u8>,
}

impl Envelope {
    pub fn new(sender: u32, receiver: u32, declared_len: u32, payload: Vec<u8>) -> Self {
        Self {
            sender,
            receiver,
            declared_len,
            payload,
        }
    }

    /// Decode a raw transport frame: a [`MsgHeader`] followed by the body.
    ///
    /// Returns `None` for frames too short to carry a header. The body is
    /// taken as-is; whether it matches the header's declared length is the
    /// dispatcher's structural guard, not a decode error.
    pub fn from_frame(frame: &[u8]) -> Option<Envelope> {
        let header = MsgHeader::read_from_prefix(frame)?;
        let sender = header.sender;
        let receiver = header.receiver;
        let declared_len = header.length;
        Some(Envelope {
            sender,
            receiver,
            declared_len,
            payload: frame[std::mem::size_of::<MsgHeader>()..].to_vec(),
        })
    }

    /// The message body.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Structural guard: a positive declared length that the buffer
    /// actually covers. An empty body never passes.
    pub fn is_structurally_valid(&self) -> bool {
        self.declared_len > 0 && self.declared_len as usize <= self.payload.len()
    }
}
