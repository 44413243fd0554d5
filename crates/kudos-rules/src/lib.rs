#![forbid(unsafe_code)]
//! kudos-rules library.
//!
//! Pure achievement predicates over a user's completed-work history, plus
//! the temporal helpers they share. Nothing in this crate performs I/O.
//!
//! ```rust,ignore
//! use kudos_rules::{EvaluationContext, PrefetchedFlags, evaluate_all};
//!
//! let flags = PrefetchedFlags::new();
//! let ctx = EvaluationContext::new(&snapshots, now, zone, &flags);
//! let result = evaluate_all(&ctx);
//! ```

pub mod aggregate;
pub mod catalog;
pub mod context;
pub mod evaluator;
pub mod lookup;
pub mod result;
pub mod rules;

pub use catalog::AchievementId;
pub use context::EvaluationContext;
pub use evaluator::{evaluate_all, evaluate_rule};
pub use lookup::{AuxiliaryLookup, NoActivity, PrefetchedFlags};
pub use result::RuleResult;
