//! Architecture selection over parsed listing records.

use crate::listing::ContentRecord;

/// URLs of the records whose `arch` equals `arch` exactly, in listing order.
///
/// An unknown architecture yields an empty list, not an error.
pub fn urls_for_arch<'a>(arch: &str, records: &'a [ContentRecord]) -> Vec<&'a str> {
    records
        .iter()
        .filter(|r| r.arch == arch)
        .map(|r| r.file_url.as_str())
        .collect()
}
