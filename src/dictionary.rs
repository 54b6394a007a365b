//! Dictionary loading and filtering
//!
//! Words come from a local file or a plain HTTP GET and are split on
//! whitespace. Filtering keeps words of at least `min_length` characters and
//! uppercases them so they can be compared directly with base-32 addresses.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, VanityError};

/// Upper bound for a downloaded word list (ureq defaults to 10 MB)
pub const MAX_DICTIONARY_BYTES: u64 = 1 << 30;

/// Where the word list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    File(PathBuf),
    Url(String),
}

impl DictionarySource {
    pub fn describe(&self) -> String {
        match self {
            DictionarySource::File(path) => path.display().to_string(),
            DictionarySource::Url(url) => url.clone(),
        }
    }

    /// Read the raw word list.
    ///
    /// Unreadable files and failed downloads are errors; an empty body is not.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn load(&self) -> Result<Vec<String>> {
        let body = match self {
            DictionarySource::File(path) => {
                fs::read(path).map_err(|e| self.error(e.to_string()))?
            }
            DictionarySource::Url(url) => ureq::get(url)
                .call()
                .and_then(|mut response| {
                    response
                        .body_mut()
                        .with_config()
                        .limit(MAX_DICTIONARY_BYTES)
                        .read_to_vec()
                })
                .map_err(|e| self.error(e.to_string()))?,
        };

        Ok(split_words(&String::from_utf8_lossy(&body)))
    }

    fn error(&self, reason: String) -> VanityError {
        VanityError::Dictionary {
            source_name: self.describe(),
            reason,
        }
    }
}

/// Split a dictionary body into words on any whitespace
pub fn split_words(body: &str) -> Vec<String> {
    body.split_whitespace().map(str::to_string).collect()
}

/// Keep words with at least `min_length` characters, uppercased.
///
/// Order is preserved and duplicates are kept.
pub fn filter_words<I, S>(words: I, min_length: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .filter_map(|word| {
            let word = word.as_ref();
            (word.chars().count() >= min_length).then(|| word.to_uppercase())
        })
        .collect()
}

/// Load and filter in one step
pub fn load_dictionary(source: &DictionarySource, min_length: usize) -> Result<Vec<String>> {
    let raw = source.load()?;
    let words = filter_words(&raw, min_length);

    tracing::info!(
        source = %source.describe(),
        loaded = raw.len(),
        kept = words.len(),
        min_length,
        "dictionary loaded"
    );

    if words.is_empty() {
        tracing::warn!(
            min_length,
            "no dictionary word meets the minimum length; the search will never match"
        );
    }

    Ok(words)
}
