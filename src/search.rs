//! Parallel dictionary-prefix search
//!
//! Every worker thread loops forever: generate a key in the configured
//! format, derive its address, and compare the uppercase address against each
//! dictionary word. The first word that is a prefix produces a
//! [`VanityMatch`], which is handed to the single consumer through a
//! rendezvous channel. A worker therefore only blocks while the consumer is
//! busy with the previous match.
//!
//! The search has no natural end. [`VanitySearcher::shutdown`] flips a shared
//! stop flag that workers check once per candidate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::address::{KeyFormat, OnionKey};
use crate::error::Result;
use crate::stats::SearchStats;

pub struct VanityConfig {
    pub format: KeyFormat,
    /// Uppercase words, shared read-only by every worker
    pub words: Arc<[String]>,
    pub threads: usize,
}

/// A key whose address starts with a dictionary word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityMatch {
    pub format: KeyFormat,
    /// Lowercase address without the `.onion` suffix
    pub onion: String,
    /// Dictionary word that matched, uppercase
    pub word: String,
    /// Tagged private key, exactly as written to disk
    pub private_key: String,
}

impl VanityMatch {
    /// Address and exported key come from the same generated key, so a match
    /// is either complete or not built at all.
    pub fn from_key(key: &OnionKey, word: &str) -> Result<Self> {
        Ok(Self {
            format: key.format(),
            onion: key.onion().to_lowercase(),
            word: word.to_string(),
            private_key: key.export_private_key()?,
        })
    }

    pub fn file_name(&self) -> String {
        format!("{}.onion", self.onion)
    }
}

/// First dictionary word that `onion` starts with.
///
/// `onion` must already be uppercase. A linear scan is fine here: key
/// generation costs far more than a few thousand prefix comparisons.
#[inline(always)]
pub fn match_prefix<'a>(onion: &str, words: &'a [String]) -> Option<&'a str> {
    words
        .iter()
        .find(|word| onion.starts_with(word.as_str()))
        .map(String::as_str)
}

/// CPU search loop for one worker thread.
///
/// Returns when `running` is cleared or the receiving side is gone. A failed
/// key generation or export drops that candidate only.
pub fn search_continuous(
    format: KeyFormat,
    words: &[String],
    results: &SyncSender<VanityMatch>,
    running: &AtomicBool,
    stats: &SearchStats,
) {
    while running.load(Ordering::Relaxed) {
        let key = match format.generate() {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!(error = %e, "key generation failed, dropping candidate");
                continue;
            }
        };
        stats.record_attempt();

        // Addresses are derived uppercase, the same case as the words
        let Some(word) = match_prefix(key.onion(), words) else {
            continue;
        };

        let found = match VanityMatch::from_key(&key, word) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(error = %e, onion = key.onion(), "key export failed, dropping candidate");
                continue;
            }
        };
        drop(key);

        stats.record_match();
        if results.send(found).is_err() {
            return;
        }
    }
}

/// Running set of search workers and the receiving end of their matches
pub struct VanitySearcher {
    results: Receiver<VanityMatch>,
    workers: Vec<JoinHandle<()>>,
    running: Arc<AtomicBool>,
    stats: Arc<SearchStats>,
}

impl VanitySearcher {
    /// Spawn `config.threads` workers (at least one)
    pub fn start(config: &VanityConfig) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(SearchStats::new());
        // Zero capacity: a send completes only when the consumer receives it
        let (tx, rx) = mpsc::sync_channel(0);

        let mut workers = Vec::with_capacity(config.threads.max(1));
        for id in 0..config.threads.max(1) {
            let format = config.format;
            let words = Arc::clone(&config.words);
            let tx = tx.clone();
            let worker_running = Arc::clone(&running);
            let worker_stats = Arc::clone(&stats);

            let spawned = thread::Builder::new()
                .name(format!("search-{}", id))
                .spawn(move || {
                    search_continuous(format, &words, &tx, &worker_running, &worker_stats)
                });

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    running.store(false, Ordering::SeqCst);
                    drop(rx);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(e.into());
                }
            }
        }

        tracing::info!(
            format = ?config.format,
            threads = workers.len(),
            words = config.words.len(),
            "search workers started"
        );

        Ok(Self {
            results: rx,
            workers,
            running,
            stats,
        })
    }

    /// Matches in arrival order. Receiving blocks until some worker finds one.
    pub fn results(&self) -> &Receiver<VanityMatch> {
        &self.results
    }

    pub fn stats(&self) -> &Arc<SearchStats> {
        &self.stats
    }

    /// Flag that keeps the workers running; clearing it stops the search
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop all workers and wait for them.
    ///
    /// Matches that were found but not yet received are returned so no key is
    /// lost on the way out.
    pub fn shutdown(self) -> Vec<VanityMatch> {
        self.running.store(false, Ordering::SeqCst);

        // Ends once every worker has exited and dropped its sender
        let pending: Vec<VanityMatch> = self.results.iter().collect();

        for handle in self.workers {
            if handle.join().is_err() {
                tracing::error!("search worker panicked");
            }
        }
        pending
    }
}

/// Run a search until the first match, then stop every worker.
///
/// Never returns if no word can match.
pub fn search_first(config: &VanityConfig) -> Result<Option<VanityMatch>> {
    let searcher = VanitySearcher::start(config)?;
    let first = searcher.results().recv().ok();
    searcher.shutdown();
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_match_prefix() {
        let dict = words(&["ONION", "TOR", "TORA"]);

        assert_eq!(match_prefix("TORAXYZ", &dict), Some("TOR"));
        assert_eq!(match_prefix("ONIONABC", &dict), Some("ONION"));
        assert_eq!(match_prefix("ABCDEF", &dict), None);
        assert_eq!(match_prefix("TORAXYZ", &[]), None);
    }

    #[test]
    fn test_match_prefix_is_case_sensitive() {
        let dict = words(&["TOR"]);
        assert_eq!(match_prefix("torabc", &dict), None);
    }

    #[test]
    fn test_match_from_key() {
        let key = KeyFormat::Ed25519.generate().unwrap();
        let found = VanityMatch::from_key(&key, "AB").unwrap();

        assert_eq!(found.onion, key.onion().to_lowercase());
        assert_eq!(found.word, "AB");
        assert!(found.private_key.starts_with("ED25519-V3:"));
        assert_eq!(found.file_name(), format!("{}.onion", found.onion));
    }

    #[test]
    fn test_search_first_ed25519() {
        let config = VanityConfig {
            format: KeyFormat::Ed25519,
            words: words(&["AA", "BB"]).into(),
            threads: 2,
        };

        let found = search_first(&config).unwrap().expect("a match");
        assert!(found.onion.starts_with("aa") || found.onion.starts_with("bb"));
        assert_eq!(&found.onion.to_uppercase()[..2], found.word.as_str());
        assert_eq!(found.onion.len(), 56);
    }

    #[test]
    fn test_one_match_per_candidate() {
        // Every base-32 symbol twice: each key satisfies exactly two words
        let mut dict: Vec<String> = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567"
            .chars()
            .map(|c| c.to_string())
            .collect();
        dict.extend(dict.clone());

        let config = VanityConfig {
            format: KeyFormat::Ed25519,
            words: dict.into(),
            threads: 1,
        };
        let searcher = VanitySearcher::start(&config).unwrap();

        let received: Vec<VanityMatch> = searcher.results().iter().take(20).collect();
        let stats = Arc::clone(searcher.stats());
        let mut all = received;
        all.extend(searcher.shutdown());

        let mut onions: Vec<&str> = all.iter().map(|m| m.onion.as_str()).collect();
        onions.sort_unstable();
        onions.dedup();
        assert_eq!(onions.len(), all.len());
        assert_eq!(stats.get_matches(), all.len() as u64);
    }

    #[test]
    fn test_shutdown_stops_workers() {
        let config = VanityConfig {
            format: KeyFormat::Ed25519,
            words: Vec::<String>::new().into(),
            threads: 3,
        };
        let searcher = VanitySearcher::start(&config).unwrap();
        assert_eq!(searcher.worker_count(), 3);

        std::thread::sleep(std::time::Duration::from_millis(50));
        let stats = Arc::clone(searcher.stats());
        let pending = searcher.shutdown();

        assert!(pending.is_empty());
        assert!(stats.get_attempts() > 0);
        assert_eq!(stats.get_matches(), 0);
    }
}
