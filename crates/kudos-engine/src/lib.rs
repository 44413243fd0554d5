#![forbid(unsafe_code)]
//! kudos-engine library.
//!
//! Wires the pure rules in `kudos-rules` to the outside world: collaborator
//! traits for task history, a SQLite implementation of them, the
//! per-user [`Engine`], and the asynchronous [`TriggerAdapter`] that turns
//! completion events into evaluations.
//!
//! ```rust,ignore
//! let config = kudos_core::config::resolve_config(None)?;
//! telemetry::init_tracing()?;
//! let adapter = adapter_from_config(&config, Arc::new(TracingAwardSink))?;
//! let (tx, rx) = adapter.channel();
//! let stats = adapter.run(rx, shutdown).await;
//! ```

pub mod award;
pub mod bootstrap;
pub mod engine;
pub mod source;
pub mod store;
pub mod telemetry;
pub mod trigger;

pub use award::{AwardError, AwardSink, TracingAwardSink};
pub use bootstrap::adapter_from_config;
pub use engine::{Engine, EngineError};
pub use source::{CancellationSource, CommentSource, SnapshotSource, SourceError};
pub use store::SqliteActivityStore;
pub use trigger::{TriggerAdapter, TriggerError, TriggerStats};
