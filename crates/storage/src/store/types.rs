#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Path,
    Content,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub path: String,
    pub match_type: MatchType,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FindReport {
    pub query: String,
    pub total_matches: usize,
    pub scanned_files: usize,
    pub skipped_files: usize,
    pub matches: Vec<SearchMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocSummary {
    pub path: String,
    pub bytes: usize,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub path: String,
    pub bytes_written: usize,
}
