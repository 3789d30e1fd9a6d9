use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Serialize, Serializer};

use crate::error::{ProtocolError, Result};

/// 32-bit token pairing a change request with its acknowledgement.
///
/// On the wire it is written as eight lower-case hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CorrelationId(u32);

impl CorrelationId {
    /// The id used when a message carries no correlation.
    pub const EMPTY: CorrelationId = CorrelationId(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parse one to eight hex digits.
    pub fn from_string(text: &str) -> Result<Self> {
        let invalid = || ProtocolError::InvalidField {
            key: "IC".to_string(),
            value: text.to_string(),
        };
        if text.is_empty() || text.len() > 8 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(text, 16).map(Self).map_err(|_| invalid())
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl fmt::Debug for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Correlation(ID={self})")
    }
}

impl Serialize for CorrelationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Source of wall-clock milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Hands out correlation ids derived from the clock and a shared counter.
///
/// Ids from one generator never repeat within a millisecond for the first
/// million requests.
#[derive(Debug, Default)]
pub struct CorrelationGenerator<C: Clock = SystemClock> {
    counter: AtomicU64,
    clock: C,
}

impl CorrelationGenerator<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> CorrelationGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            counter: AtomicU64::new(0),
            clock,
        }
    }

    pub fn next_id(&self) -> CorrelationId {
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        let raw = self.clock.now_millis().wrapping_add(count % 1_000_000);
        CorrelationId(raw as u32)
    }
}
