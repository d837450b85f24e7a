//! Blocking HTTP GET over libcurl.
//!
//! One request at a time, redirects followed, no retry. HTTP error statuses
//! are reported as [`FetchError::Http`], everything curl itself rejects as
//! [`FetchError::Transport`].

use crate::error::FetchError;
use std::io::{self, Write};
use std::time::Duration;

/// Per-request settings.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            user_agent: None,
        }
    }
}

/// Checks that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<url::Url, FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", other),
        }),
    }
}

fn transport(url: &str, source: curl::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        source,
    }
}

fn prepare(url: &str, opts: &FetchOptions) -> Result<curl::easy::Easy, FetchError> {
    validate_url(url)?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    easy.get(true).map_err(|e| transport(url, e))?;
    easy.follow_location(true).map_err(|e| transport(url, e))?;
    easy.max_redirections(10).map_err(|e| transport(url, e))?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(|e| transport(url, e))?;
    // 4xx/5xx abort before any body reaches the writer.
    easy.fail_on_error(true).map_err(|e| transport(url, e))?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua).map_err(|e| transport(url, e))?;
    }
    Ok(easy)
}

/// GETs `url` and streams the body into `out`. Returns the number of bytes written.
///
/// A failing `out` aborts the transfer and is reported as [`FetchError::Write`].
pub fn fetch_to_writer<W: Write>(
    url: &str,
    opts: &FetchOptions,
    out: &mut W,
) -> Result<u64, FetchError> {
    let mut easy = prepare(url, opts)?;
    let mut written: u64 = 0;
    let mut write_err: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("write failed for {}: {}", url, e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(|e| transport(url, e))?;
        transfer.perform()
    };

    if let Some(source) = write_err {
        return Err(FetchError::Write {
            url: url.to_string(),
            source,
        });
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let code = easy.response_code().unwrap_or(0);
            return Err(FetchError::Http {
                url: url.to_string(),
                code,
            });
        }
        return Err(transport(url, e));
    }

    let code = easy.response_code().map_err(|e| transport(url, e))?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }

    tracing::debug!("GET {} -> {} ({} bytes)", url, code, written);
    Ok(written)
}

/// GETs `url` and returns the body decoded as UTF-8.
pub fn fetch_text(url: &str, opts: &FetchOptions) -> Result<String, FetchError> {
    let mut body = Vec::new();
    fetch_to_writer(url, opts, &mut body)?;
    String::from_utf8(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
