//! Key file output
//!
//! One file per match, `<dir>/<onion>.onion`, holding only the tagged private
//! key. The file is synced before the writer returns so a match that was
//! reported is also on disk.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::search::VanityMatch;

/// Writes matched keys into a single output directory
pub struct KeyWriter {
    output_dir: PathBuf,
    written: u64,
}

impl KeyWriter {
    /// Create the output directory if needed
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            written: 0,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of key files written by this writer
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn key_path(&self, found: &VanityMatch) -> PathBuf {
        self.output_dir.join(found.file_name())
    }

    /// Persist one match and return the path of its key file.
    ///
    /// An existing file for the same address is overwritten.
    pub fn write(&mut self, found: &VanityMatch) -> Result<PathBuf> {
        let path = self.key_path(found);

        let mut file = open_key_file(&path)?;
        file.write_all(found.private_key.as_bytes())?;
        file.sync_all()?;

        self.written += 1;
        tracing::info!(onion = %found.onion, path = %path.display(), "key written");
        Ok(path)
    }
}

#[cfg(unix)]
fn open_key_file(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_key_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
