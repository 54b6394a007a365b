use std::collections::BTreeSet;
use std::time::Duration;

/// Onion addresses use the RFC 4648 base-32 alphabet
const BASE32_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Words that can actually start an address of `identifier_len` characters.
///
/// Drops words with characters outside the base-32 alphabet, words longer
/// than the address, duplicates, and words that already have a shorter word
/// of the set as prefix (those can never be the first match).
pub fn matchable_words(words: &[String], identifier_len: usize) -> Vec<&str> {
    let candidates: BTreeSet<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| !w.is_empty() && w.len() <= identifier_len)
        .filter(|w| w.chars().all(|c| BASE32_ALPHABET.contains(c)))
        .collect();

    // Sorted order puts every prefix right before the words it covers
    let mut kept: Vec<&str> = Vec::new();
    for word in candidates {
        if kept.last().map_or(true, |prev| !word.starts_with(prev)) {
            kept.push(word);
        }
    }
    kept
}

/// Probability that a uniformly random address starts with one of the words
pub fn match_probability(words: &[String], identifier_len: usize) -> f64 {
    matchable_words(words, identifier_len)
        .iter()
        .map(|w| 32f64.powi(-(w.len() as i32)))
        .sum::<f64>()
        .min(1.0)
}

/// Expected number of generated keys per match, `None` if nothing can match
pub fn calculate_difficulty(words: &[String], identifier_len: usize) -> Option<u64> {
    let p = match_probability(words, identifier_len);
    if p > 0.0 {
        Some((1.0 / p).round() as u64)
    } else {
        None
    }
}

/// Estimate time to the next match based on difficulty and speed
pub fn estimate_time(difficulty: u64, keys_per_sec: f64) -> Duration {
    if keys_per_sec <= 0.0 {
        return Duration::MAX;
    }
    // Capped below the Duration range
    Duration::from_secs_f64((difficulty as f64 / keys_per_sec).min(1e15))
}

/// Format difficulty number as "38.07B", "195.11K", etc.
pub fn format_difficulty(n: u64) -> String {
    if n >= 1_000_000_000_000 {
        format!("{:.2}T", n as f64 / 1_000_000_000_000.0)
    } else if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Format duration as "5.3 hours", "2.5 minutes", "45 seconds", etc.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();

    if secs >= 365 * 86400 {
        format!("{:.1} years", secs as f64 / (365.0 * 86400.0))
    } else if secs >= 86400 {
        format!("{:.1} days", secs as f64 / 86400.0)
    } else if secs >= 3600 {
        format!("{:.1} hours", secs as f64 / 3600.0)
    } else if secs >= 60 {
        format!("{:.1} minutes", secs as f64 / 60.0)
    } else {
        format!("{} seconds", secs)
    }
}
