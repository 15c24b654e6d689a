//! Foundation types for weft.
//!
//! This crate provides the identity and ordering primitives used
//! throughout the weft system. Every other weft crate depends on
//! `weft-types`.
//!
//! # Key Types
//!
//! - [`Author`] — Identity of an entry's signer (verified public key)
//! - [`EntryHash`] — Content-addressed identifier of a single log entry (BLAKE3)
//! - [`SchemaId`] — Identifier of an object's data shape
//! - [`SeqNum`] — Position of an entry within one author's append-only log

pub mod author;
pub mod error;
pub mod hash;
pub mod schema;
pub mod seq;

pub use author::Author;
pub use error::TypeError;
pub use hash::EntryHash;
pub use schema::SchemaId;
pub use seq::SeqNum;
