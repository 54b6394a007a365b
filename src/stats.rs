use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by all search workers
pub struct SearchStats {
    attempts: AtomicU64,
    matches: AtomicU64,
    start_time: Instant,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            matches: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    #[inline(always)]
    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_match(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    /// Keys generated so far
    pub fn get_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Matches handed to the result channel so far
    pub fn get_matches(&self) -> u64 {
        self.matches.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Current speed (keys/sec)
    pub fn speed(&self) -> f64 {
        let attempts = self.get_attempts() as f64;
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            attempts / elapsed
        } else {
            0.0
        }
    }

    /// Format speed with units
    pub fn format_speed(&self) -> String {
        format_speed(self.speed())
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// RSA generation runs at hundreds of keys per second, Ed25519 at millions,
/// so the low end keeps one decimal.
pub fn format_speed(speed: f64) -> String {
    if speed >= 1_000_000.0 {
        format!("{:.2}M keys/sec", speed / 1_000_000.0)
    } else if speed >= 1_000.0 {
        format!("{:.2}K keys/sec", speed / 1_000.0)
    } else {
        format!("{:.1} keys/sec", speed)
    }
}

/// Format a number with comma separators
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(512.34), "512.3 keys/sec");
        assert_eq!(format_speed(5_000.0), "5.00K keys/sec");
        assert_eq!(format_speed(2_500_000.0), "2.50M keys/sec");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_counters() {
        let stats = SearchStats::new();
        for _ in 0..5 {
            stats.record_attempt();
        }
        stats.record_match();

        assert_eq!(stats.get_attempts(), 5);
        assert_eq!(stats.get_matches(), 1);
        assert!(stats.speed() >= 0.0);
    }
}
