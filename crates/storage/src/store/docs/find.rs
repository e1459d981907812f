#![forbid(unsafe_code)]

use super::super::{DocStore, FindReport, MatchType, SearchMatch, StoreError};
use super::walk::list_files;
use std::path::Path;

const BINARY_SNIFF_BYTES: usize = 1024;

enum Scan {
    Text(String),
    Skipped(&'static str),
}

fn read_scannable(path: &Path, max_file_bytes: usize) -> Scan {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > max_file_bytes as u64 => return Scan::Skipped("too_large"),
        Ok(_) => {}
        Err(_) => return Scan::Skipped("unreadable"),
    }
    let Ok(bytes) = std::fs::read(path) else {
        return Scan::Skipped("unreadable");
    };
    // The file may have grown between stat and read.
    if bytes.len() > max_file_bytes {
        return Scan::Skipped("too_large");
    }
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
    if sniff.contains(&0) {
        return Scan::Skipped("binary");
    }
    Scan::Text(String::from_utf8_lossy(&bytes).into_owned())
}

impl DocStore {
    /// Case-insensitive substring search over relative paths first, then file contents.
    ///
    /// A path hit short-circuits the content scan for that file. Oversized, binary and
    /// unreadable files are counted in `skipped_files` rather than failing the search.
    pub fn find(
        &self,
        query: &str,
        max_results: usize,
        max_file_bytes: usize,
    ) -> Result<FindReport, StoreError> {
        if query.trim().is_empty() {
            return Err(StoreError::InvalidQuery);
        }

        let files = list_files(&self.root)?;
        let needle = query.to_lowercase();
        let mut report = FindReport {
            query: query.to_string(),
            ..FindReport::default()
        };

        for file in files {
            if report.matches.len() >= max_results {
                break;
            }

            if file.relative.to_lowercase().contains(&needle) {
                report.matches.push(SearchMatch {
                    path: file.relative,
                    match_type: MatchType::Path,
                });
                continue;
            }

            match read_scannable(&file.absolute, max_file_bytes) {
                Scan::Skipped(reason) => {
                    report.skipped_files += 1;
                    tracing::trace!(path = %file.relative, reason, "find: skipped file");
                }
                Scan::Text(content) => {
                    report.scanned_files += 1;
                    if content.to_lowercase().contains(&needle) {
                        report.matches.push(SearchMatch {
                            path: file.relative,
                            match_type: MatchType::Content,
                        });
                    }
                }
            }
        }

        report.total_matches = report.matches.len();
        tracing::debug!(
            query,
            total_matches = report.total_matches,
            scanned = report.scanned_files,
            skipped = report.skipped_files,
            "find: done"
        );
        Ok(report)
    }
}
