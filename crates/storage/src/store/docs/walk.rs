#![forbid(unsafe_code)]

use super::super::StoreError;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub(crate) struct DocFile {
    pub(crate) relative: String,
    pub(crate) absolute: PathBuf,
}

/// Lists regular files under `root`, sorted by their `/`-joined relative path.
/// Symlinks are neither followed nor listed.
pub(crate) fn list_files(root: &Path) -> Result<Vec<DocFile>, StoreError> {
    let mut files = Vec::new();
    let mut pending = vec![(root.to_path_buf(), String::new())];

    while let Some((dir, prefix)) = pending.pop() {
        let entries =
            std::fs::read_dir(&dir).map_err(|source| StoreError::io("read dir", &dir, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::io("read dir", &dir, source))?;
            let file_type = entry
                .file_type()
                .map_err(|source| StoreError::io("stat", &entry.path(), source))?;
            let name = entry.file_name().to_string_lossy().to_string();
            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            if file_type.is_dir() {
                pending.push((entry.path(), relative));
            } else if file_type.is_file() {
                files.push(DocFile {
                    relative,
                    absolute: entry.path(),
                });
            }
        }
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}
