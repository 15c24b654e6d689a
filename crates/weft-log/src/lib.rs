//! Append-only authored logs for weft.
//!
//! This crate models the upstream side of materialization. It provides:
//! - Entry and mutation message types with checked construction
//! - `LogWriter` / `LogReader` trait boundaries
//! - `InMemoryLog` implementation for tests and embedding
//! - Per-author stream validation (sequence, hash uniqueness, payload shape)
//!
//! Entries handed out by this crate are already decoded; transport and
//! signature verification live outside the workspace entirely.

pub mod action;
pub mod entry;
pub mod error;
pub mod memory;
pub mod message;
pub mod traits;
pub mod validation;

pub use action::Action;
pub use entry::Entry;
pub use error::{EntryError, LogError};
pub use memory::InMemoryLog;
pub use message::{FieldMap, Message};
pub use traits::{LogReader, LogWriter};
pub use validation::{LogValidator, ValidationReport, Violation, ViolationKind};
