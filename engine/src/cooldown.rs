use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Lockout timer owned by the host, one per player. The session only ever
/// asks how much time is left and re-arms it after a claim; the actual
/// timekeeping lives behind this trait so hosts can supply wall-clock time,
/// a server-issued TTL, or a manually advanced test clock.
pub trait CooldownClock: Send {
    /// Milliseconds until the next spin is allowed. Zero means ready.
    fn remaining_ms(&self) -> u64;

    /// Start a fresh lockout of `cooldown_ms` from now.
    fn arm(&mut self, cooldown_ms: u64);
}

/// Cooldown backed by monotonic process time.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    deadline: Option<Instant>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownClock for MonotonicClock {
    fn remaining_ms(&self) -> u64 {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()).as_millis() as u64,
            None => 0,
        }
    }

    fn arm(&mut self, cooldown_ms: u64) {
        self.deadline = Some(Instant::now() + Duration::from_millis(cooldown_ms));
    }
}

/// Cooldown that only moves when told to. Clones share the same underlying
/// timer, so a test or a deterministic event-loop host can keep a handle and
/// advance it while the session owns its own copy.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    remaining: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `elapsed_ms` of virtual time pass.
    pub fn advance(&self, elapsed_ms: u64) {
        let current = self.remaining.load(Ordering::SeqCst);
        self.remaining.store(current.saturating_sub(elapsed_ms), Ordering::SeqCst);
    }
}

impl CooldownClock for ManualClock {
    fn remaining_ms(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    fn arm(&mut self, cooldown_ms: u64) {
        self.remaining.store(cooldown_ms, Ordering::SeqCst);
    }
}
