//! Top-N table of Contents indexes by file count.

use crate::listing::ContentRecord;

/// Number of rows in the report.
pub const TOP_N: usize = 10;

/// Width of the file name column; longer names are truncated.
pub const NAME_WIDTH: usize = 25;

/// The `n` records with the highest `file_number`, highest first.
/// Ties keep their listing order.
pub fn top_records(records: &[ContentRecord], n: usize) -> Vec<&ContentRecord> {
    let mut sorted: Vec<&ContentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.file_number.cmp(&a.file_number));
    sorted.truncate(n);
    sorted
}

/// One table row: rank right-aligned in 4 columns, name in [`NAME_WIDTH`], count.
pub fn format_row(rank: usize, record: &ContentRecord) -> String {
    let name: String = record.file_name.chars().take(NAME_WIDTH).collect();
    format!(
        "{:>4}. {:<width$}{}",
        rank,
        name,
        record.file_number,
        width = NAME_WIDTH
    )
}

/// The top-ten table, one newline-terminated row per record.
pub fn render_top(records: &[ContentRecord]) -> String {
    let mut out = String::new();
    for (i, record) in top_records(records, TOP_N).into_iter().enumerate() {
        out.push_str(&format_row(i + 1, record));
        out.push('\n');
    }
    out
}
