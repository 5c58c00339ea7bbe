//! switchyard-services — the message dispatcher and its collaborators.

pub mod correlate;
pub mod dispatch;
pub mod registry;
pub mod service;
pub mod stats;

pub use correlate::CorrelationAllocator;
pub use dispatch::{Dispatcher, Services};
pub use registry::{OriginEntry, OriginRegistry};
pub use service::{AppService, CoreService, OpsService, TimerService};
pub use stats::BusyStats;
