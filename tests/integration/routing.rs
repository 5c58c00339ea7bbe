//! Routing behavior over the full frame → envelope → dispatch path.

use std::sync::atomic::Ordering;

use switchyard_core::wire::{msg_type, CmdFlag, SenderId, REQUEST_FLAG};

use crate::{deliver, dispatcher, frame, relay_frame, session_frame};

#[test]
fn timer_frame_reaches_only_the_timer_handler() {
    let (d, r) = dispatcher();

    deliver(&d, &frame(SenderId::Timer.into(), 1, 1, &[0xFF]));

    assert_eq!(r.timer_calls.load(Ordering::SeqCst), 1);
    assert_eq!(r.total_calls(), 1);
}

#[test]
fn core_frame_is_forwarded_without_body_inspection() {
    let (d, r) = dispatcher();

    deliver(&d, &frame(SenderId::Core.into(), 1, 2, &[0xAB, 0xCD]));

    assert_eq!(r.core_calls.load(Ordering::SeqCst), 1);
    assert_eq!(r.total_calls(), 1);
}

#[test]
fn answer_and_request_take_opposite_bookkeeping_paths() {
    let (d, r) = dispatcher();

    deliver(&d, &session_frame(SenderId::Media, 0x00, 0x42));
    deliver(&d, &session_frame(SenderId::Bearer, REQUEST_FLAG, 0x43));

    let snap = d.stats().snapshot();
    assert_eq!(snap.media, 1);
    assert_eq!(snap.bearer, 0);
    assert_eq!(snap.total, 1);

    let processed = r.processed.lock().unwrap();
    assert_eq!(processed.len(), 2);
    assert_eq!(processed[0].cmd_flag, CmdFlag::Answer);
    assert_eq!(processed[0].correlation_id, 0);
    assert_eq!(processed[1].cmd_flag, CmdFlag::Request);
    assert_ne!(processed[1].correlation_id, 0);
}

#[test]
fn session_processing_leaves_no_registry_residue() {
    let (d, r) = dispatcher();

    for subscriber in 0..8u32 {
        deliver(&d, &session_frame(SenderId::Media, REQUEST_FLAG, subscriber));
    }

    assert_eq!(r.processed.lock().unwrap().len(), 8);
    assert!(d.registry().is_empty());
}

#[test]
fn directory_lookup_done_is_terminal() {
    let (d, r) = dispatcher();

    deliver(&d, &relay_frame(SenderId::Directory, msg_type::LOOKUP_DONE));
    deliver(&d, &relay_frame(SenderId::Directory, 12));

    assert_eq!(r.total_calls(), 0);
}

#[test]
fn ops_frame_reaches_the_ops_handler() {
    let (d, r) = dispatcher();

    deliver(&d, &relay_frame(SenderId::Ops, 5));

    assert_eq!(r.ops_calls.load(Ordering::SeqCst), 1);
    assert_eq!(r.total_calls(), 1);
}

#[test]
fn maintenance_and_unknown_senders_are_ignored() {
    let (d, r) = dispatcher();

    deliver(&d, &frame(SenderId::Maintenance.into(), 1, 4, &[0u8; 4]));
    deliver(&d, &frame(4242, 1, 4, &[0u8; 4]));

    assert_eq!(r.total_calls(), 0);
}

#[test]
fn redelivery_of_the_same_frame_is_idempotent_in_shape() {
    let (d, r) = dispatcher();
    let raw = session_frame(SenderId::Bearer, 0x00, 0x42);

    deliver(&d, &raw);
    deliver(&d, &raw);

    assert_eq!(d.stats().snapshot().bearer, 2);
    assert_eq!(r.processed.lock().unwrap().len(), 2);
    assert!(d.registry().is_empty());
}
