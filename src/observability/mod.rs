//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, upstream client:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (upstream call counters and latency histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```

pub mod logging;
pub mod metrics;
