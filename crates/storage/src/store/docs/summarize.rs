#![forbid(unsafe_code)]

use super::super::{DocStore, DocSummary, StoreError};

const ELLIPSIS: char = '…';

/// Collapses whitespace runs to single spaces and caps the result at `max_chars` characters,
/// the last of which is `…` when anything was cut.
pub(crate) fn collapse_and_truncate(content: &str, max_chars: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out = collapsed
        .chars()
        .take(max_chars - 1)
        .collect::<String>();
    out.push(ELLIPSIS);
    out
}

impl DocStore {
    /// Reads one document and returns a whitespace-collapsed, length-capped summary.
    ///
    /// Unlike `find`, a missing or unreadable target is a hard error.
    pub fn summarize(
        &self,
        path: Option<&str>,
        max_summary_chars: usize,
        include_content: bool,
    ) -> Result<DocSummary, StoreError> {
        let raw = path
            .filter(|p| !p.trim().is_empty())
            .ok_or(StoreError::MissingPath {
                action: "summarize",
            })?;
        let doc = self.resolve(raw)?;

        let bytes = std::fs::read(doc.absolute())
            .map_err(|source| StoreError::io("read", doc.absolute(), source))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let summary = collapse_and_truncate(&content, max_summary_chars);

        Ok(DocSummary {
            path: doc.relative().to_string(),
            bytes: bytes.len(),
            summary,
            content: include_content.then_some(content),
        })
    }
}
