use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::{Collection, Converter, Error, Resolver, Result, Vault, collect_notes};

/// Structured outcome of one export run.
#[derive(Debug, Default, Serialize)]
pub struct ExportReport {
    pub notes_collected: usize,
    pub notes_exported: usize,
    pub attachments_collected: usize,
    pub attachments_exported: usize,
    /// Soft failures: unreadable notes and failed attachment copies.
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Exports the subgraph reachable from a root note into one flat directory.
#[derive(Debug)]
pub struct Exporter {
    vault: Vault,
    output: PathBuf,
    max_depth: u32,
}

impl Exporter {
    pub fn new(vault: Vault, output: impl Into<PathBuf>, max_depth: u32) -> Self {
        Self {
            vault,
            output: output.into(),
            max_depth,
        }
    }

    /// Run the export. Only root resolution failure is fatal; every other
    /// failure is recorded in the report and the run keeps going.
    pub fn export(&self, root: &str) -> Result<ExportReport> {
        let resolver = Resolver::new(&self.vault);

        let root_note = resolver.resolve_note(root).or_else(|| {
            let direct = self.vault.root().join(root);
            direct.is_file().then_some(direct)
        });
        let Some(root_note) = root_note else {
            return Err(Error::RootNoteNotFound(root.to_string()));
        };

        info!(
            "exporting from {} at max depth {}",
            root_note.display(),
            self.max_depth
        );

        let mut collection = Collection::default();
        collect_notes(&resolver, &mut collection, &root_note, 0, self.max_depth);

        fs::create_dir_all(&self.output).map_err(|e| Error::io(&self.output, e))?;

        let converter = Converter::new(&resolver);
        let Collection {
            notes,
            mut attachments,
        } = collection;

        let mut report = ExportReport {
            notes_collected: notes.len(),
            ..ExportReport::default()
        };

        let mut note_paths: Vec<PathBuf> = notes.into_keys().collect();
        note_paths.sort();
        for note in &note_paths {
            let text = match self.vault.read_note(note) {
                Ok(text) => text,
                Err(err) => {
                    warn!("could not export {}: {err}", note.display());
                    report.skipped.push(SkippedFile {
                        path: note.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            let converted = converter.convert(&text, &mut attachments);
            let name = file_name_of(note);
            let target = self.collision_free_target(name);
            match fs::write(&target, converted) {
                Ok(()) => report.notes_exported += 1,
                Err(err) => {
                    warn!("could not write {}: {err}", target.display());
                    report.skipped.push(SkippedFile {
                        path: note.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        // Conversion may have discovered attachments in max-depth notes.
        report.attachments_collected = attachments.len();

        let mut attachment_paths: Vec<PathBuf> = attachments.into_iter().collect();
        attachment_paths.sort();
        for attachment in &attachment_paths {
            let name = file_name_of(attachment);
            let target = self.collision_free_target(name);
            match fs::copy(attachment, &target) {
                Ok(_) => report.attachments_exported += 1,
                Err(err) => {
                    warn!("could not copy {}: {err}", attachment.display());
                    report.skipped.push(SkippedFile {
                        path: attachment.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            "exported {} notes and {} attachments to {}",
            report.notes_exported,
            report.attachments_exported,
            self.output.display()
        );
        Ok(report)
    }

    /// First free output path for `name`, suffixing `_1`, `_2`, ... before
    /// the extension until no existing file is in the way.
    fn collision_free_target(&self, name: &str) -> PathBuf {
        let candidate = self.output.join(name);
        if !candidate.exists() {
            return candidate;
        }

        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name);
        let ext = Path::new(name).extension().and_then(|s| s.to_str());
        let mut counter = 1u32;
        loop {
            let next = match ext {
                Some(ext) => format!("{stem}_{counter}.{ext}"),
                None => format!("{stem}_{counter}"),
            };
            let candidate = self.output.join(next);
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn file_name_of(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or_default()
}
