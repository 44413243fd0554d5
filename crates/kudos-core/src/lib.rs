#![forbid(unsafe_code)]
//! kudos-core library.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at type boundaries, `anyhow::Result` for
//!   configuration plumbing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod clock;
pub mod config;
pub mod error;
pub mod model;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ErrorCode;
