//! Outbound (driven) ports for the proof storage subsystem.
//!
//! The store's only external dependency is a clock for stamping orphan
//! transitions. Seconds resolution is sufficient for eviction ordering.

/// Time source for orphan transition timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current time in whole seconds.
    fn now_secs(&self) -> i64;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

/// Deterministic time source for tests.
///
/// Public (not test-gated) so the workspace test crate can drive eviction
/// ordering with strictly increasing timestamps.
#[derive(Debug)]
pub struct MockTimeSource {
    secs: std::sync::atomic::AtomicI64,
}

impl MockTimeSource {
    /// Creates a mock clock at the given time.
    pub fn new(initial_secs: i64) -> Self {
        Self {
            secs: std::sync::atomic::AtomicI64::new(initial_secs),
        }
    }

    /// Advances the clock.
    pub fn advance(&self, secs: i64) {
        self.secs
            .fetch_add(secs, std::sync::atomic::Ordering::SeqCst);
    }

    /// Sets the clock to an absolute time.
    pub fn set(&self, secs: i64) {
        self.secs.store(secs, std::sync::atomic::Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now_secs(&self) -> i64 {
        self.secs.load(std::sync::atomic::Ordering::SeqCst)
    }
}
