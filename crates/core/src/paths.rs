#![forbid(unsafe_code)]

use std::path::{Component, Path, PathBuf};

/// A caller-supplied document path after it has been confined to a root directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocPath {
    absolute: PathBuf,
    relative: String,
}

impl DocPath {
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Root-relative form with `/` separators; empty when the path is the root itself.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocPathError {
    Escape { raw: String },
}

impl DocPathError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Escape { .. } => "path escapes docs directory",
        }
    }
}

impl std::fmt::Display for DocPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Escape { raw } => write!(f, "{}: {raw}", self.message()),
        }
    }
}

impl std::error::Error for DocPathError {}

/// Lexically cleans a root directory (`.` dropped, `..` applied) without touching disk.
pub fn normalize_root(root: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in root.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Resolves `raw` against `root`, failing when the result is neither `root` nor inside it.
///
/// Backslashes are read as separators and leading slashes are dropped, so absolute inputs
/// are treated as root-relative. `..` segments are applied against the full root path, which
/// means `../docs/x` is accepted when the root is named `docs` and lands back inside it.
/// `root` is expected to be absolute and already normalized (see [`normalize_root`]).
pub fn resolve(root: &Path, raw: &str) -> Result<DocPath, DocPathError> {
    let normalized = raw.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');

    let mut absolute = root.to_path_buf();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                absolute.pop();
            }
            name => absolute.push(name),
        }
    }

    let escape = || DocPathError::Escape {
        raw: raw.to_string(),
    };
    let Ok(rest) = absolute.strip_prefix(root) else {
        return Err(escape());
    };
    let mut parts = Vec::new();
    for component in rest.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            _ => return Err(escape()),
        }
    }

    Ok(DocPath {
        absolute,
        relative: parts.join("/"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/project/docs")
    }

    #[test]
    fn plain_relative_paths_resolve_under_root() {
        let path = resolve(&root(), "plans/2024/plan.md").expect("resolve");
        assert_eq!(path.relative(), "plans/2024/plan.md");
        assert_eq!(
            path.absolute(),
            Path::new("/srv/project/docs/plans/2024/plan.md")
        );
    }

    #[test]
    fn backslashes_and_leading_slashes_are_normalized() {
        let path = resolve(&root(), "\\designs\\a.md").expect("resolve");
        assert_eq!(path.relative(), "designs/a.md");

        let path = resolve(&root(), "///learnings/./b.md").expect("resolve");
        assert_eq!(path.relative(), "learnings/b.md");
    }

    #[test]
    fn traversal_out_of_root_is_rejected_at_any_depth() {
        for depth in 1..8 {
            let raw = format!("{}etc/passwd", "../".repeat(depth));
            let err = resolve(&root(), &raw).expect_err("escape must fail");
            assert_eq!(err, DocPathError::Escape { raw: raw.clone() });
        }
        assert!(resolve(&root(), "a/../../outside.md").is_err());
        assert!(resolve(&root(), "..\\..\\x").is_err());
    }

    #[test]
    fn sibling_directories_sharing_a_prefix_are_rejected() {
        assert!(resolve(&root(), "../docs-private/secret.md").is_err());
    }

    #[test]
    fn traversal_that_returns_inside_root_is_accepted() {
        let path = resolve(&root(), "../docs/a.md").expect("resolve");
        assert_eq!(path.relative(), "a.md");

        let path = resolve(&root(), "a/../b/c.md").expect("resolve");
        assert_eq!(path.relative(), "b/c.md");
    }

    #[test]
    fn root_itself_is_allowed() {
        for raw in ["", ".", "/", "a/.."] {
            let path = resolve(&root(), raw).expect("resolve");
            assert!(path.is_root(), "{raw:?} should resolve to root");
        }
    }

    #[test]
    fn normalize_root_applies_dot_segments() {
        assert_eq!(
            normalize_root(Path::new("/srv/./project/tmp/../docs")),
            PathBuf::from("/srv/project/docs")
        );
    }
}
