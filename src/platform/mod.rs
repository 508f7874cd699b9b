//! Platform abstraction layer
//!
//! Handles the outside world the match depends on:
//! - Time/ticks (a monotonic millisecond clock that can also block)
//! - Keyboard state (which logical keys are held right now)

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since some fixed origin
    fn now_ms(&mut self) -> u64;

    /// Block for at least `ms` milliseconds
    fn sleep_ms(&mut self, ms: u64);
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Clock that only moves when told to (tests, replays)
///
/// Sleeping advances it by exactly the requested amount.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

/// Logical keys the match listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    // Blue side
    A,
    D,
    W,
    S,
    /// Blue swaps bats
    F,
    // Red side
    Left,
    Right,
    Up,
    Down,
    /// Red swaps bats
    K,
}

/// Current keyboard state
pub trait KeyState {
    fn is_triggered(&self, key: Key) -> bool;
}

/// Plain set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    keys: BTreeSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }
}

impl<const N: usize> From<[Key; N]> for HeldKeys {
    fn from(keys: [Key; N]) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeyState for HeldKeys {
    fn is_triggered(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}
