use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub frames_read: usize,
    pub frames_emitted: usize,
    pub frames_skipped: usize,
    pub frames_empty: usize,
    pub frames_degenerate: usize,
    pub elapsed_time: Duration,
}

/// Counters for one batch run.
#[derive(Debug)]
pub struct RunStats {
    start_time: Instant,
    frames_read: usize,
    frames_emitted: usize,
    frames_skipped: usize,
    frames_empty: usize,
    frames_degenerate: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            frames_read: 0,
            frames_emitted: 0,
            frames_skipped: 0,
            frames_empty: 0,
            frames_degenerate: 0,
        }
    }

    pub fn record_read(&mut self) {
        self.frames_read += 1;
    }

    pub fn record_emitted(&mut self, degenerate: bool) {
        self.frames_emitted += 1;
        if degenerate {
            self.frames_degenerate += 1;
        }
    }

    pub fn record_skipped(&mut self) {
        self.frames_skipped += 1;
    }

    pub fn record_empty(&mut self) {
        self.frames_empty += 1;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_read: self.frames_read,
            frames_emitted: self.frames_emitted,
            frames_skipped: self.frames_skipped,
            frames_empty: self.frames_empty,
            frames_degenerate: self.frames_degenerate,
            elapsed_time: self.start_time.elapsed(),
        }
    }

    pub fn log_summary(&self, phase: &str) {
        let stats = self.snapshot();
        tracing::info!(
            "📊 {} - read: {}, emitted: {}, skipped: {}, empty: {}, degenerate: {}, time: {:?}",
            phase,
            stats.frames_read,
            stats.frames_emitted,
            stats.frames_skipped,
            stats.frames_empty,
            stats.frames_degenerate,
            stats.elapsed_time
        );
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
