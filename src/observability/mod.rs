//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rpc client, shard router, transaction pipeline produce:
//!     → logging.rs (structured tracing events, subscriber setup)
//!     → metrics.rs (request counters and latency histograms)
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or a metrics recorder
//!   is the host application's call (the CLI does both for logs)
//! - Private keys and signatures are never logged

pub mod logging;
pub mod metrics;
