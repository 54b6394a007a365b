//! Vanity search for Tor onion addresses
//!
//! Generates RSA-1024 (legacy) or Ed25519 (v3) keys on every CPU core and keeps
//! the ones whose address starts with a word from a dictionary.

pub mod address;
pub mod dictionary;
pub mod difficulty;
pub mod display;
pub mod error;
pub mod search;
pub mod sink;
pub mod stats;

pub use address::{onion_from_private_key, Ed25519OnionKey, KeyFormat, OnionKey, RsaOnionKey};

pub use dictionary::{filter_words, load_dictionary, split_words, DictionarySource};

pub use difficulty::{
    calculate_difficulty, estimate_time, format_difficulty, format_duration, match_probability,
    matchable_words,
};

pub use display::{
    create_progress_bar, display_match, display_search_banner, display_summary, update_progress,
};

pub use error::{Result, VanityError};

pub use search::{
    match_prefix, search_continuous, search_first, VanityConfig, VanityMatch, VanitySearcher,
};

pub use sink::KeyWriter;

pub use stats::{format_number, format_speed, SearchStats};
