//! One-time HTTP download of the review dataset.

use std::fs;
use std::path::Path;

use crate::error::{PolarityError, Result};

/// Default location of the Amazon book review TSV (10k rows, rating + text).
pub const DEFAULT_DATASET_URL: &str =
    "https://amldockerdatasets.azureedge.net/BookReviewsFromAmazon10K.tsv";

/// Ensure the dataset file exists locally, downloading it if absent.
///
/// Returns `true` if a download happened, `false` if the file was already
/// present. Parent directories are created as needed. A failed download
/// leaves no partial file behind.
pub fn ensure_dataset<P: AsRef<Path>>(path: P, url: &str) -> Result<bool> {
    let path = path.as_ref();

    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.bytes()?;

    if body.is_empty() {
        return Err(PolarityError::dataset(format!(
            "Downloaded dataset from {url} is empty"
        )));
    }

    // Write to a sibling temp file first so an interrupted write cannot be
    // mistaken for a complete dataset.
    let tmp_path = path.with_extension("download");
    fs::write(&tmp_path, &body)?;
    fs::rename(&tmp_path, path)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_existing_file_is_not_downloaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reviews.tsv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "5\tGreat").unwrap();
        drop(file);

        // URL is never contacted when the file exists
        let downloaded = ensure_dataset(&path, "http://invalid.example/none").unwrap();
        assert!(!downloaded);
    }
}
