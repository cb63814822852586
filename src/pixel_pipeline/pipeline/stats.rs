use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::info;

/// Running decode counters, shared by every thread feeding a pipeline.
#[derive(Debug, Default)]
pub struct DecodeStats {
    frames: AtomicU64,
    failures: AtomicU64,
    input_bytes: AtomicU64,
    decode_nanos: AtomicU64,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, input_bytes: usize, elapsed: Duration) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.input_bytes.fetch_add(input_bytes as u64, Ordering::Relaxed);
        self.decode_nanos
            .fetch_add(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX), Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            input_bytes: self.input_bytes.load(Ordering::Relaxed),
            decode_time: Duration::from_nanos(self.decode_nanos.load(Ordering::Relaxed)),
        }
    }

    pub fn reset(&self) {
        self.frames.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.input_bytes.store(0, Ordering::Relaxed);
        self.decode_nanos.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of [`DecodeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub frames: u64,
    pub failures: u64,
    /// Raw payload bytes of successfully decoded frames
    pub input_bytes: u64,
    /// Time spent inside decoders, summed over frames
    pub decode_time: Duration,
}

impl StatsSnapshot {
    pub fn bytes_per_second(&self) -> f64 {
        rate(self.input_bytes, self.decode_time)
    }

    pub fn frames_per_second(&self) -> f64 {
        rate(self.frames, self.decode_time)
    }

    pub fn average_decode_time(&self) -> Option<Duration> {
        let frames = u32::try_from(self.frames).ok().filter(|&n| n > 0)?;
        Some(self.decode_time / frames)
    }

    pub fn log_summary(&self) {
        info!(
            frames = self.frames,
            failures = self.failures,
            "Decoded {:.1} MiB in {:.3}ms ({:.1} MiB/s, {:.1} fps)",
            self.input_bytes as f64 / (1024.0 * 1024.0),
            self.decode_time.as_secs_f64() * 1000.0,
            self.bytes_per_second() / (1024.0 * 1024.0),
            self.frames_per_second()
        );
    }
}

fn rate(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { count as f64 / secs } else { 0.0 }
}
