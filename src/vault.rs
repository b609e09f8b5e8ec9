use std::path::{Component, Path, PathBuf};

use crate::{Error, ExportConfig, Result};

/// Read-only handle to an Obsidian vault root.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    cfg: ExportConfig,
}

impl Vault {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(root, ExportConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, cfg: ExportConfig) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(Error::VaultNotFound(root));
        }
        if !root.is_dir() {
            return Err(Error::VaultNotADirectory(root));
        }
        let root = std::fs::canonicalize(&root).map_err(|e| Error::io(&root, e))?;
        Ok(Self { root, cfg })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ExportConfig {
        &self.cfg
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components().any(|c| {
            let Component::Normal(part) = c else {
                return false;
            };
            let s = part.to_string_lossy();
            self.cfg.ignore_dirs.iter().any(|d| d == &s)
        })
    }

    /// Whether a scan should pick up this path: not ignored, not a dotfile.
    pub fn is_scannable(&self, path: &Path) -> bool {
        if self.is_ignored(path) {
            return false;
        }
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if file_name.starts_with('.') {
            // Obsidian notes can be dotfiles, but default to ignoring.
            return false;
        }
        true
    }

    pub fn is_note_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.cfg.note_extension))
    }

    pub fn read_note(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }
}
