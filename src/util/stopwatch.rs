use std::time::{Duration, Instant};

/// Measures wall clock time since it was started or last restarted.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    #[must_use]
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Resets the start time to now.
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether more than `limit` has passed since the last (re)start.
    #[must_use]
    pub fn exceeds(&self, limit: Duration) -> bool {
        self.elapsed() > limit
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_resets_elapsed_time() {
        let mut sw = Stopwatch::start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(sw.exceeds(Duration::from_millis(1)));

        sw.restart();
        assert!(!sw.exceeds(Duration::from_secs(60)));
    }
}
