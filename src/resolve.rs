use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::Vault;

/// Note file stem -> first-discovered absolute path.
///
/// Built by one recursive scan of the vault's note files; stem collisions
/// keep whichever path the walk visits first.
#[derive(Debug, Default)]
pub(crate) struct NoteIndex {
    by_stem: HashMap<String, PathBuf>,
}

impl NoteIndex {
    fn build(vault: &Vault) -> Self {
        let mut by_stem = HashMap::new();
        for entry in walkdir::WalkDir::new(vault.root())
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !vault.is_scannable(path) || !vault.is_note_path(path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            by_stem
                .entry(stem.to_string())
                .or_insert_with(|| path.to_path_buf());
        }
        Self { by_stem }
    }

    fn get(&self, stem: &str) -> Option<&PathBuf> {
        self.by_stem.get(stem)
    }
}

/// Maps reference targets to files on disk.
///
/// The note index initializes on the first note resolution and stays
/// immutable for the rest of the run.
#[derive(Debug)]
pub struct Resolver<'a> {
    vault: &'a Vault,
    index: OnceCell<NoteIndex>,
}

impl<'a> Resolver<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self {
            vault,
            index: OnceCell::new(),
        }
    }

    pub fn vault(&self) -> &Vault {
        self.vault
    }

    fn index(&self) -> &NoteIndex {
        self.index.get_or_init(|| NoteIndex::build(self.vault))
    }

    /// Resolve a note target: direct vault-relative path first (with the
    /// note extension appended when none is present), then a stem lookup in
    /// the note index. Any `#fragment` sub-target is stripped.
    pub fn resolve_note(&self, target: &str) -> Option<PathBuf> {
        let target = target.split('#').next().unwrap_or(target).trim();
        if target.is_empty() {
            return None;
        }

        let mut direct = self.vault.root().join(target);
        if direct.extension().is_none() {
            direct.set_extension(&self.vault.config().note_extension);
        }
        if direct.is_file() {
            return Some(direct);
        }

        let stem = Path::new(target).file_stem().and_then(|s| s.to_str())?;
        self.index().get(stem).cloned()
    }

    /// Resolve an attachment target: direct vault-relative path first, then
    /// a recursive filename search through the conventional attachment
    /// directories, in their configured order.
    pub fn resolve_attachment(&self, target: &str) -> Option<PathBuf> {
        let target = target.trim();
        if target.is_empty() {
            return None;
        }

        let direct = self.vault.root().join(target);
        if direct.is_file() {
            return Some(direct);
        }

        let name = Path::new(target).file_name()?;
        for dir in &self.vault.config().attachment_dirs {
            let base = if dir.is_empty() {
                self.vault.root().to_path_buf()
            } else {
                self.vault.root().join(dir)
            };
            if !base.is_dir() {
                continue;
            }
            for entry in walkdir::WalkDir::new(&base)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file()
                    && entry.file_name() == name
                    && self.vault.is_scannable(entry.path())
                {
                    return Some(entry.into_path());
                }
            }
        }
        None
    }
}
