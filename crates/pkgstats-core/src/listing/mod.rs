//! Mirror directory listing: Contents index records and their parser.

pub mod grammar;

use crate::error::ListingError;

/// One Contents index discovered in a mirror listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// Bare file name, e.g. `Contents-arm64.gz`.
    pub file_name: String,
    /// Mirror base URL joined with `file_name`.
    pub file_url: String,
    /// Architecture tag, e.g. `arm64`.
    pub arch: String,
    /// Number of files the mirror lists for this index; only used for ranking.
    pub file_number: u64,
}

/// Joins a mirror base URL and a file name with exactly one `/` between them.
pub fn join_url(base: &str, file_name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file_name)
}

/// Parses a raw listing into records, in listing order.
///
/// Lines without [`grammar::MARKER`] are ignored. Index lines that break the
/// line grammar fail the whole parse; nothing is skipped silently.
pub fn parse_listing(base_url: &str, text: &str) -> Result<Vec<ContentRecord>, ListingError> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let Some(pos) = grammar::index_marker(line) else {
            continue;
        };
        records.push(parse_index_line(base_url, idx + 1, line, pos)?);
    }
    tracing::debug!("parsed {} Contents records from {}", records.len(), base_url);
    Ok(records)
}

fn parse_index_line(
    base_url: &str,
    line_no: usize,
    line: &str,
    marker_pos: usize,
) -> Result<ContentRecord, ListingError> {
    // Name search starts inside the href, where the marker puts `Contents`.
    let name_start = marker_pos + grammar::MARKER.len() - grammar::FILE_PREFIX.len();
    let file_name = grammar::index_file_name(&line[name_start..]).ok_or_else(|| {
        ListingError::MissingSuffix {
            line: line_no,
            text: line.to_string(),
        }
    })?;

    let arch = grammar::arch_of(file_name).ok_or_else(|| ListingError::MissingArch {
        line: line_no,
        file_name: file_name.to_string(),
    })?;

    let after_name = &line[name_start + file_name.len()..];
    let token = grammar::trailing_token(after_name).ok_or_else(|| ListingError::MissingCount {
        line: line_no,
        text: line.to_string(),
    })?;
    let file_number = token
        .parse::<u64>()
        .map_err(|source| ListingError::InvalidCount {
            line: line_no,
            token: token.to_string(),
            source,
        })?;

    Ok(ContentRecord {
        file_name: file_name.to_string(),
        file_url: join_url(base_url, file_name),
        arch: arch.to_string(),
        file_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const BASE: &str = "http://ftp.uk.debian.org/debian/dists/stable/main/";

    #[test]
    fn single_line_round_trip() {
        let text = "<a href=\"Contents-arm64.gz\">Contents-arm64.gz</a>              10";
        let records = parse_listing(BASE, text).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.file_name, "Contents-arm64.gz");
        assert_eq!(r.arch, "arm64");
        assert_eq!(r.file_number, 10);
        assert_eq!(
            r.file_url,
            "http://ftp.uk.debian.org/debian/dists/stable/main/Contents-arm64.gz"
        );
    }

    #[test]
    fn join_url_never_doubles_or_drops_separator() {
        let want = "http://ftp.uk.debian.org/debian/dists/stable/main/Contents-arm64.gz";
        assert_eq!(
            join_url("http://ftp.uk.debian.org/debian/dists/stable/main", "Contents-arm64.gz"),
            want
        );
        assert_eq!(
            join_url("http://ftp.uk.debian.org/debian/dists/stable/main/", "Contents-arm64.gz"),
            want
        );
        assert_eq!(
            join_url("http://ftp.uk.debian.org/debian/dists/stable/main//", "Contents-arm64.gz"),
            want
        );
    }

    #[test]
    fn ignores_unmarked_lines_and_keeps_order() {
        let text = "<html><body><pre>\r\n\
<a href=\"../\">../</a>\r\n\
<a href=\"Contents-amd64.gz\">Contents-amd64.gz</a>   300\r\n\
<a href=\"Release\">Release</a>   5\r\n\
<a href=\"Contents-udeb-amd64.gz\">Contents-udeb-amd64.gz</a>   7\r\n\
<a href=\"Contents-all.gz\">Contents-all.gz</a>   123420\r\n\
</pre></body></html>\r\n";
        let records = parse_listing(BASE, text).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(
            names,
            ["Contents-amd64.gz", "Contents-udeb-amd64.gz", "Contents-all.gz"]
        );
        assert_eq!(records[1].arch, "amd64");
        assert_eq!(records[2].file_number, 123420);
    }

    #[test]
    fn empty_listing_yields_no_records() {
        assert!(parse_listing(BASE, "").unwrap().is_empty());
        assert!(parse_listing(BASE, "<html></html>\n").unwrap().is_empty());
    }

    #[test]
    fn missing_count_fails_loudly() {
        let text = "<a href=\"Contents-all.gz\">Contents-all.gz</a>   1\n<a href=\"Contents-arm64.gz\">Contents-arm64.gz</a>\n";
        let err = parse_listing(BASE, text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.line(), 2);
        assert!(matches!(err, ListingError::MissingCount { .. }));
    }

    #[test]
    fn trailing_whitespace_after_count_is_missing_count() {
        let text = "<a href=\"Contents-all.gz\">Contents-all.gz</a>  10 \r\n";
        let err = parse_listing(BASE, text).unwrap_err();
        assert!(matches!(err, ListingError::MissingCount { line: 1, .. }));
    }

    #[test]
    fn non_numeric_count_fails_loudly() {
        let text = "<a href=\"Contents-all.gz\">Contents-all.gz</a>  2023-06-10 09:04   45M";
        let err = parse_listing(BASE, text).unwrap_err();
        match err {
            ListingError::InvalidCount { line, token, .. } => {
                assert_eq!(line, 1);
                assert_eq!(token, "45M");
            }
            other => panic!("expected InvalidCount, got {:?}", other),
        }
    }

    #[test]
    fn marker_without_suffix_fails() {
        let text = "<a href=\"Contents-arm64.xz\">Contents-arm64.xz</a>   10";
        let err = parse_listing(BASE, text).unwrap_err();
        assert!(matches!(err, ListingError::MissingSuffix { line: 1, .. }));
    }

    #[test]
    fn name_without_arch_fails() {
        let text = "<a href=\"Contents.gz\">Contents.gz</a>   10";
        let err = parse_listing(BASE, text).unwrap_err();
        assert!(matches!(err, ListingError::MissingArch { line: 1, .. }));
    }
}
