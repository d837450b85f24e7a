//! Second line of the failure diagnostic, chosen by error kind.

use pkgstats_core::download::BatchError;
use pkgstats_core::error::{ErrorKind, FetchError, ListingError};

const REQUEST_ISSUE: &str =
    "There was an issue with the request and nothing was downloaded. The program will now exit.";
const UNEXPECTED_ISSUE: &str =
    "There was an unexpected issue and nothing was downloaded. The program will now exit.";
const PARSE_ISSUE: &str =
    "The mirror listing could not be parsed and nothing was downloaded. The program will now exit.";

fn kind_of(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<FetchError>()
        .map(FetchError::kind)
        .or_else(|| err.downcast_ref::<ListingError>().map(ListingError::kind))
}

/// Human-readable explanation printed under the error itself.
pub fn explain(err: &anyhow::Error) -> String {
    if let Some(batch) = err.downcast_ref::<BatchError>() {
        return format!(
            "Downloading stopped at {}; {} file(s) saved before it, {} not attempted. The program will now exit.",
            batch.url,
            batch.completed.len(),
            batch.not_attempted.len()
        );
    }
    match kind_of(err) {
        Some(ErrorKind::HttpStatus) => REQUEST_ISSUE.to_string(),
        Some(ErrorKind::Parse) => PARSE_ISSUE.to_string(),
        _ => UNEXPECTED_ISSUE.to_string(),
    }
}
