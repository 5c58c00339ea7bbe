//! Routes inbound signaling messages to the appropriate collaborator
//! based on the sender id.
//!
//! The dispatch contract is fire-and-forget: every guard failure is a
//! silent early return, no error ever reaches the caller, and a message
//! is never retained past the call. The sender → behavior mapping is a
//! closed enum match, so adding a sender without a route is a compile
//! error here rather than a silently dead wire value.

use std::sync::Arc;

use switchyard_core::config::SwitchyardConfig;
use switchyard_core::envelope::Envelope;
use switchyard_core::wire::{msg_type, CmdFlag, RelayRecord, SenderId, SessionRecord};

use crate::correlate::CorrelationAllocator;
use crate::registry::{OriginEntry, OriginRegistry};
use crate::service::{AppService, CoreService, OpsService, TimerService};
use crate::stats::BusyStats;

/// The collaborators a dispatcher routes to.
pub struct Services {
    pub core: Arc<dyn CoreService>,
    pub timer: Arc<dyn TimerService>,
    pub app: Arc<dyn AppService>,
    pub ops: Arc<dyn OpsService>,
}

/// Classifies one message at a time and invokes collaborators.
///
/// Stateless across calls apart from the bookkeeping components, which
/// are internally synchronized; independent callers may dispatch
/// concurrently.
pub struct Dispatcher {
    services: Services,
    stats: Arc<BusyStats>,
    correlator: Arc<CorrelationAllocator>,
    registry: Arc<OriginRegistry>,
    log_unknown_senders: bool,
}

impl Dispatcher {
    /// Build a dispatcher with freshly created bookkeeping state.
    pub fn new(services: Services, config: &SwitchyardConfig) -> Self {
        Self::with_parts(
            services,
            Arc::new(BusyStats::new()),
            Arc::new(CorrelationAllocator::new()),
            Arc::new(OriginRegistry::new(config.registry.max_entries)),
            config,
        )
    }

    /// Build a dispatcher sharing bookkeeping state with the embedder.
    pub fn with_parts(
        services: Services,
        stats: Arc<BusyStats>,
        correlator: Arc<CorrelationAllocator>,
        registry: Arc<OriginRegistry>,
        config: &SwitchyardConfig,
    ) -> Self {
        Self {
            services,
            stats,
            correlator,
            registry,
            log_unknown_senders: config.dispatch.log_unknown_senders,
        }
    }

    pub fn stats(&self) -> &BusyStats {
        &self.stats
    }

    pub fn registry(&self) -> &OriginRegistry {
        &self.registry
    }

    /// Dispatch one message. Never errors, never panics on malformed
    /// input; all guard failures return without side effects.
    pub fn dispatch(&self, msg: &Envelope) {
        if !msg.is_structurally_valid() {
            return;
        }

        match SenderId::try_from(msg.sender) {
            Ok(SenderId::Core) => self.services.core.on_core_message(msg),
            Ok(SenderId::Timer) => self.services.timer.on_timer(msg),
            Ok(SenderId::Directory) => {
                let Some(relay) = RelayRecord::parse(msg) else {
                    return;
                };
                if relay.msg_type == msg_type::LOOKUP_DONE {
                    return;
                }
                // Other directory traffic is recognized but terminal.
            }
            Ok(sender @ (SenderId::Media | SenderId::Bearer)) => {
                let Some(record) = SessionRecord::parse(msg) else {
                    return;
                };
                self.handle_session(sender, record);
            }
            Ok(SenderId::Maintenance) => {
                // Recognized, deliberately ignored.
            }
            Ok(SenderId::Ops) => {
                let Some(relay) = RelayRecord::parse(msg) else {
                    return;
                };
                if let Err(e) = self.services.ops.handle(msg, &relay) {
                    tracing::debug!(error = %e, "ops message rejected");
                }
            }
            Err(_) => {
                if self.log_unknown_senders {
                    tracing::debug!(sender = msg.sender, "no route for sender");
                }
            }
        }
    }

    /// Media/bearer branch: flag bookkeeping, then the register → process
    /// → deregister sequence. Cleanup runs even when processing fails.
    fn handle_session(&self, sender: SenderId, mut record: SessionRecord) {
        // The two flag sub-branches are independent of each other.
        if record.cmd_flag == CmdFlag::Answer {
            self.stats.record(sender);
        }
        if record.cmd_flag == CmdFlag::Request {
            record.correlation_id = self.correlator.allocate();
        }

        let key = record.subscriber_key();
        self.registry.insert(
            key,
            OriginEntry {
                sender: record.sender,
                correlation_id: record.correlation_id,
            },
        );

        if let Err(e) = self.services.app.process(&record) {
            tracing::warn!(
                sender = u32::from(sender),
                subscriber = key,
                error = %e,
                "session message processing failed"
            );
        }

        self.registry.remove(key);
    }
}
