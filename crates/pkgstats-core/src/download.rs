//! Sequential batch download of Contents indexes.
//!
//! A batch is one unit of correlated failure: the first URL that fails stops
//! the batch, later URLs are never requested, and files already saved stay on
//! disk. The error says which URL failed, what was saved before it, and what
//! was never attempted.

use crate::error::{ErrorKind, FetchError};
use crate::fetch::{self, FetchOptions};
use crate::listing::grammar;
use crate::storage::StorageWriter;
use std::path::{Path, PathBuf};

/// One file written by a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of a batch that ran to completion.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub dest_dir: PathBuf,
    pub saved: Vec<SavedFile>,
}

impl DownloadReport {
    /// `"<name>[, <name>...] saved to <dir>"`, or `None` when nothing was saved.
    pub fn summary_line(&self) -> Option<String> {
        if self.saved.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.saved.iter().map(|s| s.file_name.as_str()).collect();
        Some(format!(
            "{} saved to {}",
            names.join(", "),
            self.dest_dir.display()
        ))
    }
}

/// A batch stopped at its first failing URL.
#[derive(Debug, thiserror::Error)]
#[error("download of {url} failed after {} saved file(s), {} not attempted", .completed.len(), .not_attempted.len())]
pub struct BatchError {
    pub url: String,
    pub completed: Vec<SavedFile>,
    pub not_attempted: Vec<String>,
    #[source]
    pub source: FetchError,
}

impl BatchError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Local file name for an index URL, derived with the listing's name rule
/// applied to the last path segment.
pub fn file_name_for_url(url: &str) -> Option<&str> {
    let last = url.rsplit('/').next()?;
    grammar::index_file_name(last)
}

/// Downloads `urls` in order into `dest_dir`.
///
/// `on_start` is called with each file name right before its request.
/// An empty `urls` is a no-op.
pub fn download_all<F>(
    urls: &[&str],
    dest_dir: &Path,
    opts: &FetchOptions,
    mut on_start: F,
) -> Result<DownloadReport, BatchError>
where
    F: FnMut(&str),
{
    let mut saved = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        match download_one(url, dest_dir, opts, &mut on_start) {
            Ok(file) => {
                tracing::info!("saved {} ({} bytes)", file.path.display(), file.bytes);
                saved.push(file);
            }
            Err(source) => {
                let not_attempted: Vec<String> =
                    urls[i + 1..].iter().map(|u| u.to_string()).collect();
                tracing::warn!(
                    "batch aborted at {}: {} ({} not attempted)",
                    url,
                    source,
                    not_attempted.len()
                );
                return Err(BatchError {
                    url: url.to_string(),
                    completed: saved,
                    not_attempted,
                    source,
                });
            }
        }
    }
    Ok(DownloadReport {
        dest_dir: dest_dir.to_path_buf(),
        saved,
    })
}

fn download_one<F>(
    url: &str,
    dest_dir: &Path,
    opts: &FetchOptions,
    on_start: &mut F,
) -> Result<SavedFile, FetchError>
where
    F: FnMut(&str),
{
    let file_name = file_name_for_url(url).ok_or_else(|| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: "no Contents index file name in URL".to_string(),
    })?;
    on_start(file_name);

    let write_err = |source: std::io::Error| FetchError::Write {
        url: url.to_string(),
        source,
    };
    let mut writer = StorageWriter::create(&dest_dir.join(file_name)).map_err(write_err)?;
    let bytes = match fetch::fetch_to_writer(url, opts, &mut writer) {
        Ok(n) => n,
        Err(e) => {
            writer.discard();
            return Err(e);
        }
    };
    let path = writer.finalize().map_err(write_err)?;

    Ok(SavedFile {
        file_name: file_name.to_string(),
        path,
        bytes,
    })
}
