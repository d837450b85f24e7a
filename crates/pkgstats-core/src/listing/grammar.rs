//! Line grammar of a mirror directory listing.
//!
//! An index line contains [`MARKER`]. Its fields are:
//!
//! - file name: from the first [`FILE_PREFIX`] up to and including the first
//!   [`FILE_SUFFIX`] after it;
//! - architecture: the part of the file name between its last `-` and the suffix;
//! - file count: the token after the last whitespace of the line, which must
//!   follow the file name. Trailing whitespace leaves that token empty, so the
//!   line has no count.
//!
//! ```text
//! <a href="Contents-arm64.gz">Contents-arm64.gz</a>              10
//!          ^^^^^^^^^^^^^^^^^ name        arch ^^^^^   count ^^
//! ```

/// Substring identifying a hyperlink to a Contents index.
pub const MARKER: &str = "<a href=\"Contents";

/// Leading part of every index file name.
pub const FILE_PREFIX: &str = "Contents";

/// Compressed-file suffix closing every index file name.
pub const FILE_SUFFIX: &str = ".gz";

/// Byte offset of [`MARKER`] if the line is a hyperlink to a Contents index.
pub fn index_marker(line: &str) -> Option<usize> {
    line.find(MARKER)
}

/// Index file name in `text`: first `Contents` through the following `.gz`, inclusive.
pub fn index_file_name(text: &str) -> Option<&str> {
    let start = text.find(FILE_PREFIX)?;
    let rest = &text[start..];
    let end = rest.find(FILE_SUFFIX)? + FILE_SUFFIX.len();
    Some(&rest[..end])
}

/// Architecture tag of an index file name (`Contents-udeb-arm64.gz` -> `arm64`).
pub fn arch_of(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(FILE_SUFFIX)?;
    let (_, arch) = stem.rsplit_once('-')?;
    if arch.is_empty() {
        None
    } else {
        Some(arch)
    }
}

/// Trailing token of a line (after its last whitespace), if it is non-empty.
pub fn trailing_token(line: &str) -> Option<&str> {
    match line.rsplit_once(char::is_whitespace)? {
        (_, "") => None,
        (_, token) => Some(token),
    }
}
