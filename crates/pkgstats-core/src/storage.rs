//! Download file lifecycle.
//!
//! Bodies are streamed into `<name>.part` and renamed over `<name>` once the
//! transfer succeeds, so a failed download never leaves a truncated index
//! under its final name.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `Contents-all.gz` → `Contents-all.gz.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for one download.
pub struct StorageWriter {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl StorageWriter {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)?;
        Ok(Self {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Sync and rename the temp file over the final path, replacing any existing file.
    /// On failure the temp file is removed and the final path is left untouched.
    pub fn finalize(self) -> io::Result<PathBuf> {
        let synced = self.file.sync_all();
        drop(self.file);
        if let Err(e) = synced.and_then(|()| std::fs::rename(&self.temp_path, &self.final_path)) {
            if let Err(rm) = std::fs::remove_file(&self.temp_path) {
                tracing::warn!("failed to remove {}: {}", self.temp_path.display(), rm);
            }
            return Err(e);
        }
        Ok(self.final_path)
    }

    /// Drop the temp file; the final path is left untouched.
    pub fn discard(self) {
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&self.temp_path) {
            tracing::warn!("failed to remove {}: {}", self.temp_path.display(), e);
        }
    }
}

impl Write for StorageWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
