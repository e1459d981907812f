#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

/// Where the `br` executable came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BinSource {
    Explicit(String),
    SearchPath(PathBuf),
    /// Nothing found; the bare name is spawned and the failure surfaces per command.
    BareName(String),
}

impl BinSource {
    pub(crate) fn into_program(self) -> String {
        match self {
            Self::Explicit(bin) | Self::BareName(bin) => bin,
            Self::SearchPath(path) => path.to_string_lossy().into_owned(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "explicit",
            Self::SearchPath(_) => "path",
            Self::BareName(_) => "bare",
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}

pub(crate) fn search_dirs(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.trim().is_empty() {
        return None;
    }
    dirs.iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn search_path_env(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    search_dirs(name, &std::env::split_paths(&path_var).collect::<Vec<_>>())
}

/// Explicit override first, then `$PATH`, then the bare name.
pub(crate) fn resolve_bin(explicit: Option<String>, default_name: &str) -> BinSource {
    let source = match explicit.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(bin) => BinSource::Explicit(bin),
        None => match search_path_env(default_name) {
            Some(path) => BinSource::SearchPath(path),
            None => BinSource::BareName(default_name.to_string()),
        },
    };
    tracing::debug!(kind = source.kind(), ?source, "br: executable resolved");
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let file = dir.join(name);
        fs::write(&file, "#!/bin/sh\necho ok\n").expect("write stub");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&file).expect("meta").permissions();
            perms.set_mode(mode);
            fs::set_permissions(&file, perms).expect("chmod");
        }
        #[cfg(not(unix))]
        let _ = mode;
        file
    }

    #[test]
    fn search_dirs_skips_empty_entries_and_finds_stub() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stub = touch(dir.path(), "br", 0o755);

        let dirs = [PathBuf::new(), dir.path().to_path_buf()];
        assert_eq!(search_dirs("br", &dirs), Some(stub));
        assert_eq!(search_dirs("bd", &dirs), None);
        assert_eq!(search_dirs(" ", &dirs), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_are_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        touch(dir.path(), "br", 0o644);
        assert_eq!(search_dirs("br", &[dir.path().to_path_buf()]), None);
    }

    #[test]
    fn explicit_override_wins_and_blank_falls_through() {
        assert_eq!(
            resolve_bin(Some(" /opt/tools/br ".to_string()), "br"),
            BinSource::Explicit("/opt/tools/br".to_string())
        );
        let fallback = resolve_bin(Some("   ".to_string()), "wf-runner-test-missing-bin");
        assert_eq!(
            fallback.into_program(),
            "wf-runner-test-missing-bin".to_string()
        );
    }
}
