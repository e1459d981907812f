#![forbid(unsafe_code)]

use super::super::{DocStore, StoreError, UpdateReport};

impl DocStore {
    /// Creates or fully replaces a document, creating parent directories as needed.
    /// Concurrent writers to the same path race; the last write wins.
    pub fn update(
        &self,
        path: Option<&str>,
        content: Option<&str>,
    ) -> Result<UpdateReport, StoreError> {
        let raw = path
            .filter(|p| !p.trim().is_empty())
            .ok_or(StoreError::MissingPath { action: "update" })?;
        let content = content.ok_or(StoreError::MissingContent)?;
        let doc = self.resolve(raw)?;

        if let Some(parent) = doc.absolute().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| StoreError::io("create", parent, source))?;
        }
        std::fs::write(doc.absolute(), content)
            .map_err(|source| StoreError::io("write", doc.absolute(), source))?;

        tracing::debug!(path = doc.relative(), bytes = content.len(), "update: wrote doc");
        Ok(UpdateReport {
            path: doc.relative().to_string(),
            bytes_written: content.len(),
        })
    }
}
