//! Error taxonomy shared by the fetch, listing and download stages.
//!
//! Every error exposes a [`ErrorKind`] so callers (and tests) can branch on the
//! failure class without matching on messages.

use std::io;
use std::num::ParseIntError;
use std::string::FromUtf8Error;

/// Coarse failure class of any pkgstats error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The URL could not be parsed or uses an unsupported scheme.
    InvalidUrl,
    /// DNS, connect, TLS, timeout or other transfer-level failure.
    Transport,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The listing body was not valid UTF-8.
    Decode,
    /// A listing line matched the index marker but did not follow the line grammar.
    Parse,
    /// Writing a downloaded file to disk failed.
    Storage,
}

/// Failure of a single HTTP GET.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("HTTP Error {code}: {url}")]
    Http { url: String, code: u32 },

    #[error("response from {url} is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("writing body of {url} failed")]
    Write {
        url: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            FetchError::Transport { .. } => ErrorKind::Transport,
            FetchError::Http { .. } => ErrorKind::HttpStatus,
            FetchError::Decode { .. } => ErrorKind::Decode,
            FetchError::Write { .. } => ErrorKind::Storage,
        }
    }

    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Http { url, .. }
            | FetchError::Decode { url, .. }
            | FetchError::Write { url, .. } => url,
        }
    }
}

/// A listing line carried the index marker but broke the line grammar.
///
/// `line` is 1-based; `text` is the offending line as it appeared in the listing.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("listing line {line}: no `.gz` suffix after the index name: {text}")]
    MissingSuffix { line: usize, text: String },

    #[error("listing line {line}: no architecture in index name {file_name}")]
    MissingArch { line: usize, file_name: String },

    #[error("listing line {line}: no trailing file count: {text}")]
    MissingCount { line: usize, text: String },

    #[error("listing line {line}: file count {token:?} is not an integer")]
    InvalidCount {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },
}

impl ListingError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Parse
    }

    pub fn line(&self) -> usize {
        match self {
            ListingError::MissingSuffix { line, .. }
            | ListingError::MissingArch { line, .. }
            | ListingError::MissingCount { line, .. }
            | ListingError::InvalidCount { line, .. } => *line,
        }
    }
}
