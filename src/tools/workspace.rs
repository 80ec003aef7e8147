//! Workspace root confinement for file tools

use std::path::{Component, Path, PathBuf};

use crate::core::ToolExecutionError;

/// Directory that file paths are resolved against and may not leave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = std::fs::canonicalize(root).unwrap_or_else(|_| normalize(root));
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` against the root
    ///
    /// Absolute paths and `..` are fine as long as the result stays under
    /// the root, both lexically and after following symlinks of the part
    /// that already exists.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ToolExecutionError> {
        let candidate = Path::new(path);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };

        let resolved = normalize(&joined);
        if !resolved.starts_with(&self.root) {
            return Err(ToolExecutionError::PathEscape(path.to_string()));
        }

        if let Some(real) = existing_ancestor(&resolved).and_then(|p| std::fs::canonicalize(p).ok()) {
            if !real.starts_with(&self.root) {
                return Err(ToolExecutionError::PathEscape(path.to_string()));
            }
        }

        Ok(resolved)
    }

    /// Path relative to the root, for messages
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

/// Lexically collapse `.` and `..`
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors().find(|p| p.exists())
}
