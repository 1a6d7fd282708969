//! TSV loading for review datasets.
//!
//! Each line is expected to be `rating<TAB>text`. Lines that do not have
//! exactly two columns, or whose rating does not parse as an integer in
//! 1..=5, are skipped and counted rather than aborting the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{Review, ReviewDataset};
use crate::error::Result;

/// Counts of what happened during a TSV load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Total lines read from the file.
    pub total_lines: usize,
    /// Lines successfully parsed into reviews.
    pub loaded: usize,
    /// Lines skipped because of a wrong column count or bad rating.
    pub skipped: usize,
}

/// Load a review dataset from a two-column TSV file.
///
/// Malformed rows are skipped and counted in the returned
/// [`LoadReport`] instead of failing the whole load.
pub fn load_tsv<P: AsRef<Path>>(path: P) -> Result<ReviewDataset> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut reviews = Vec::new();
    let mut report = LoadReport::default();

    for line in reader.lines() {
        let line = line?;
        report.total_lines += 1;

        match parse_line(&line) {
            Some(review) => {
                reviews.push(review);
                report.loaded += 1;
            }
            None => {
                report.skipped += 1;
            }
        }
    }

    Ok(ReviewDataset { reviews, report })
}

/// Parse a single `rating<TAB>text` line.
fn parse_line(line: &str) -> Option<Review> {
    let mut columns = line.splitn(2, '\t');
    let rating_str = columns.next()?;
    let text = columns.next()?;

    let rating: u8 = rating_str.trim().parse().ok()?;
    if !(1..=5).contains(&rating) {
        return None;
    }

    Some(Review::new(rating, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_line() {
        let review = parse_line("5\tA wonderful book").unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.text, "A wonderful book");
        assert!(review.label());
    }

    #[test]
    fn test_parse_line_keeps_embedded_tabs_in_text() {
        let review = parse_line("2\tslow\tand dull").unwrap();
        assert_eq!(review.text, "slow\tand dull");
    }

    #[test]
    fn test_parse_line_rejects_bad_rows() {
        assert!(parse_line("no tab here").is_none());
        assert!(parse_line("abc\ttext").is_none());
        assert!(parse_line("0\ttext").is_none());
        assert!(parse_line("6\ttext").is_none());
    }

    #[test]
    fn test_load_tsv_skips_malformed_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reviews.tsv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "5\tGreat read").unwrap();
        writeln!(file, "not a rating\tbroken").unwrap();
        writeln!(file, "1\tTerrible").unwrap();
        writeln!(file, "garbage line").unwrap();
        drop(file);

        let dataset = load_tsv(&path).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.report.total_lines, 4);
        assert_eq!(dataset.report.loaded, 2);
        assert_eq!(dataset.report.skipped, 2);
        assert_eq!(dataset.labels(), vec![true, false]);
    }
}
