use std::fs;
use std::sync::Arc;
use std::time::Duration;

use data_encoding::BASE32;
use onion_vanity::address::{legacy, v3};
use onion_vanity::{
    filter_words, onion_from_private_key, search_first, KeyFormat, KeyWriter, VanityConfig,
    VanitySearcher,
};

const BASE32_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz234567";

fn every_symbol() -> Vec<String> {
    filter_words(BASE32_SYMBOLS.chars().map(|c| c.to_string()), 1)
}

#[test]
fn test_rsa_match_round_trips() {
    // Every address starts with some symbol, so the first key matches
    let config = VanityConfig {
        format: KeyFormat::Rsa,
        words: every_symbol().into(),
        threads: 2,
    };

    let found = search_first(&config).unwrap().expect("a match");
    assert_eq!(found.format, KeyFormat::Rsa);
    assert_eq!(found.onion.len(), 16);
    assert_eq!(found.onion, found.onion.to_lowercase());
    assert!(found.onion.starts_with(&found.word.to_lowercase()));

    let secret = legacy::decode_private_key(&found.private_key).unwrap();
    let rederived = legacy::public_key_to_onion(&secret.to_public_key()).unwrap();
    assert_eq!(rederived.to_lowercase(), found.onion);
}

// Default runs cover the same pipeline through test_rsa_match_round_trips
#[test]
#[ignore = "about a million RSA-1024 keys; run with --ignored --release"]
fn test_rsa_dictionary_word_test() {
    let config = VanityConfig {
        format: KeyFormat::Rsa,
        words: filter_words(["TEST"], 3).into(),
        threads: num_cpus::get(),
    };

    let found = search_first(&config).unwrap().expect("a match");
    assert!(found.onion.starts_with("test"));
    assert_eq!(found.word, "TEST");
    assert_eq!(
        onion_from_private_key(&found.private_key).unwrap().to_lowercase(),
        found.onion
    );
}

#[test]
fn test_ed25519_match_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = KeyWriter::new(dir.path().join("keys")).unwrap();

    let config = VanityConfig {
        format: KeyFormat::Ed25519,
        words: filter_words(["on", "tor", "x"], 2).into(),
        threads: 2,
    };
    let found = search_first(&config).unwrap().expect("a match");
    assert!(found.onion.starts_with("on") || found.onion.starts_with("tor"));

    let raw = BASE32.decode(found.onion.to_uppercase().as_bytes()).unwrap();
    assert_eq!(raw.len(), v3::RAW_ADDRESS_LEN);
    assert_eq!(raw[34], v3::VERSION);

    let path = writer.write(&found).unwrap();
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("{}.onion", found.onion));

    let stored = fs::read_to_string(&path).unwrap();
    assert!(stored.starts_with("ED25519-V3:"));
    assert_eq!(onion_from_private_key(&stored).unwrap().to_lowercase(), found.onion);
}

#[test]
fn test_empty_dictionary_never_matches() {
    // Longer minimum than any word: nothing survives the filter
    let words = filter_words(["abc", "onion", "de"], 10);
    assert!(words.is_empty());

    let config = VanityConfig {
        format: KeyFormat::Ed25519,
        words: words.into(),
        threads: 4,
    };
    let searcher = VanitySearcher::start(&config).unwrap();
    let stats = Arc::clone(searcher.stats());

    let received = searcher.results().recv_timeout(Duration::from_millis(500));
    assert!(received.is_err());

    let pending = searcher.shutdown();
    assert!(pending.is_empty());
    assert_eq!(stats.get_matches(), 0);
    assert!(stats.get_attempts() > 0);
}

#[test]
fn test_matches_from_many_workers_are_distinct() {
    let config = VanityConfig {
        format: KeyFormat::Ed25519,
        words: filter_words(["a", "b", "c", "d"], 1).into(),
        threads: 4,
    };
    let searcher = VanitySearcher::start(&config).unwrap();

    let mut found: Vec<_> = searcher.results().iter().take(40).collect();
    found.extend(searcher.shutdown());

    for m in &found {
        let first = m.onion.chars().next().unwrap();
        assert!("abcd".contains(first));
        assert_eq!(m.word, first.to_ascii_uppercase().to_string());
    }

    let mut onions: Vec<_> = found.iter().map(|m| m.onion.clone()).collect();
    onions.sort();
    onions.dedup();
    assert_eq!(onions.len(), found.len());
}
