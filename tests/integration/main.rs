//! Switchyard integration test harness.
//!
//! These tests drive the public API end to end: raw transport frames are
//! decoded into envelopes and dispatched through a fully configured
//! `Dispatcher` wired to recording collaborators. Nothing here reaches
//! into crate internals.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use switchyard_core::config::SwitchyardConfig;
use switchyard_core::envelope::Envelope;
use switchyard_core::wire::{MsgHeader, RelayMsg, SenderId, SessionMsg, SessionRecord};
use switchyard_services::{
    AppService, CoreService, CorrelationAllocator, Dispatcher, OpsService, OriginRegistry,
    Services, TimerService,
};
use zerocopy::AsBytes;

mod routing;

// ── Harness ──────────────────────────────────────────────────────────────────

static TRACING: Once = Once::new();

/// Install a test subscriber once; RUST_LOG controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Records every collaborator invocation.
#[derive(Default)]
pub struct Recorder {
    pub core_calls: AtomicUsize,
    pub timer_calls: AtomicUsize,
    pub ops_calls: AtomicUsize,
    pub processed: Mutex<Vec<SessionRecord>>,
}

impl Recorder {
    pub fn total_calls(&self) -> usize {
        self.core_calls.load(Ordering::SeqCst)
            + self.timer_calls.load(Ordering::SeqCst)
            + self.ops_calls.load(Ordering::SeqCst)
            + self.processed.lock().unwrap().len()
    }
}

impl CoreService for Recorder {
    fn on_core_message(&self, _msg: &Envelope) {
        self.core_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl TimerService for Recorder {
    fn on_timer(&self, _msg: &Envelope) {
        self.timer_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl AppService for Recorder {
    fn process(&self, msg: &SessionRecord) -> anyhow::Result<()> {
        self.processed.lock().unwrap().push(msg.clone());
        Ok(())
    }
}

impl OpsService for Recorder {
    fn handle(
        &self,
        _msg: &Envelope,
        _relay: &switchyard_core::wire::RelayRecord,
    ) -> anyhow::Result<()> {
        self.ops_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A dispatcher with default config and one recorder behind every seam.
pub fn dispatcher() -> (Dispatcher, Arc<Recorder>) {
    init_tracing();
    let config = SwitchyardConfig::default();
    let recorder = Arc::new(Recorder::default());
    let services = Services {
        core: recorder.clone(),
        timer: recorder.clone(),
        app: recorder.clone(),
        ops: recorder.clone(),
    };
    let dispatcher = Dispatcher::with_parts(
        services,
        Arc::new(switchyard_services::BusyStats::new()),
        Arc::new(CorrelationAllocator::new()),
        Arc::new(OriginRegistry::new(config.registry.max_entries)),
        &config,
    );
    (dispatcher, recorder)
}

/// Encode a full transport frame: header followed by body bytes.
pub fn frame(sender: u32, receiver: u32, declared_len: u32, body: &[u8]) -> Vec<u8> {
    let header = MsgHeader {
        sender,
        receiver,
        length: declared_len,
    };
    let mut out = header.as_bytes().to_vec();
    out.extend_from_slice(body);
    out
}

/// A well-formed session frame from `sender`.
pub fn session_frame(sender: SenderId, cmd_flag: u8, subscriber_ref: u32) -> Vec<u8> {
    let body = SessionMsg {
        sender: sender.into(),
        cmd_flag,
        correlation_id: 0,
        subscriber_ref,
    };
    frame(sender.into(), 1, body.as_bytes().len() as u32, body.as_bytes())
}

/// A well-formed relay frame from `sender`.
pub fn relay_frame(sender: SenderId, msg_type: u32) -> Vec<u8> {
    let body = RelayMsg {
        sender: sender.into(),
        msg_type,
    };
    frame(sender.into(), 1, body.as_bytes().len() as u32, body.as_bytes())
}

/// Decode a frame and dispatch it, the way an embedding transport would.
pub fn deliver(dispatcher: &Dispatcher, raw: &[u8]) {
    if let Some(env) = Envelope::from_frame(raw) {
        dispatcher.dispatch(&env);
    }
}
