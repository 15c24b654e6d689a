use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of an entry within one author's append-only log.
///
/// Sequence numbers are 1-based and strictly increasing within a
/// single log. The log store enforces monotonicity on append; the
/// materializer only relies on the ordering.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SeqNum(u64);

impl SeqNum {
    /// The first sequence number of every log.
    pub fn first() -> Self {
        Self(1)
    }

    /// Wrap a raw sequence number.
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// The raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The sequence number following this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns `true` for the first position in a log.
    pub fn is_first(&self) -> bool {
        self.0 == 1
    }
}

impl fmt::Debug for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeqNum({})", self.0)
    }
}

impl fmt::Display for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SeqNum {
    fn from(seq: u64) -> Self {
        Self(seq)
    }
}
