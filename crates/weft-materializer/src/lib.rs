//! Materialization engine for weft.
//!
//! This crate is the heart of weft. It folds a collection of authored
//! log entries into a deterministic mapping of object id to current
//! instance state. It provides:
//! - Relevance filtering and sequence-number ordering of raw entries
//! - The per-instance state machine (create, update, delete, tombstone)
//! - The shallow field merge policy for updates
//! - The `Materialization` result with instance map and fold counters
//!
//! The engine is pure: it performs no I/O, keeps no state between
//! calls, and assumes its input was already decoded and authenticated
//! upstream (see `weft-log`). Materializing the same entries twice
//! yields identical results, in any input order.

pub mod error;
pub mod instance;
pub mod materialize;
pub mod merge;
pub mod order;

pub use error::{MaterializeError, MaterializeResult};
pub use instance::Instance;
pub use materialize::{Materialization, Materializer};
