//! Collision-resistant short identifiers for events and scopes.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// 62-symbol alphabet: digits, upper case, lower case.
pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default length for event and request-correlation ids. 62^10 keys make
/// collisions negligible for a single-process stream.
pub const EVENT_ID_LEN: usize = 10;

/// Default length for short-form scope ids.
pub const SHORT_ID_LEN: usize = 6;

/// Injectable id-generation strategy.
///
/// Production code uses [`RandomIdGenerator`]; tests inject
/// [`SequenceIdGenerator`] for deterministic ids.
pub trait IIdGenerator: Send + Sync {
    /// Generate an id of `len` symbols drawn from [`ALPHABET`].
    fn generate(&self, len: usize) -> String;

    /// Collision-safe id for events and request correlation.
    fn event_id(&self) -> String {
        self.generate(EVENT_ID_LEN)
    }

    /// Short-form id for scopes.
    fn short_id(&self) -> String {
        self.generate(SHORT_ID_LEN)
    }
}

/// Default generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IIdGenerator for RandomIdGenerator {
    fn generate(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Deterministic generator: encodes a monotonic counter in base-62,
/// left-padded with `0` to the requested length.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    counter: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `first` instead of zero.
    pub fn starting_at(first: u64) -> Self {
        Self {
            counter: AtomicU64::new(first),
        }
    }
}

impl IIdGenerator for SequenceIdGenerator {
    fn generate(&self, len: usize) -> String {
        let mut n = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut buf = vec![b'0'; len];
        let mut i = len;
        while i > 0 {
            i -= 1;
            buf[i] = ALPHABET[(n % 62) as usize];
            n /= 62;
            if n == 0 {
                break;
            }
        }
        buf.iter().map(|&b| b as char).collect()
    }
}
