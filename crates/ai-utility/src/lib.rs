//! Utility arbitration primitives.
//!
//! The core idea is simple: on each decision tick, score every entry of the installed profile
//! and run the highest-scoring one's behavior. Tie-breaking is stable by entry order for
//! determinism, and a winner of the same kind as the running behavior does not restart it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod profile;
pub mod scoring;
pub mod selector;

pub use profile::{InstallProfile, Profile, SensorFactory};
pub use scoring::{BehaviorFactory, ScoreContext, ScoreFn, ScoringEntry};
pub use selector::TaskSelector;
