#![forbid(unsafe_code)]

mod docs;
mod error;
mod types;

pub use error::StoreError;
pub use types::*;

use std::path::{Path, PathBuf};
use wf_core::paths::{self, DocPath};

/// Sandboxed document directory. Holds no cached state; every operation re-reads disk.
#[derive(Clone, Debug)]
pub struct DocStore {
    root: PathBuf,
}

impl DocStore {
    /// Opens (creating if absent) the document root. Relative roots are made absolute
    /// against the current directory so the path guard compares like with like.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let absolute =
            std::path::absolute(root).map_err(|source| StoreError::io("resolve", root, source))?;
        let root = paths::normalize_root(&absolute);
        std::fs::create_dir_all(&root)
            .map_err(|source| StoreError::io("create", &root, source))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, raw: &str) -> Result<DocPath, StoreError> {
        paths::resolve(&self.root, raw).map_err(StoreError::from)
    }
}
