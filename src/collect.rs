use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{Resolver, extract_references};

/// Traversal context: every note reached within the depth budget, plus every
/// attachment resolved along the way.
#[derive(Debug, Default)]
pub struct Collection {
    /// Note path -> minimum depth at which it was reached.
    pub notes: HashMap<PathBuf, u32>,
    pub attachments: HashSet<PathBuf>,
}

/// Depth-bounded DFS over note references starting at `note`.
///
/// A note is re-expanded only when reached at a strictly shallower depth
/// than previously recorded. A note at `max_depth` is collected but its own
/// references are not followed. An unreadable note stays collected; the
/// branch just stops there.
pub fn collect_notes(
    resolver: &Resolver<'_>,
    collection: &mut Collection,
    note: &Path,
    depth: u32,
    max_depth: u32,
) {
    if collection.notes.get(note).is_some_and(|&d| d <= depth) {
        return;
    }
    collection.notes.insert(note.to_path_buf(), depth);

    if depth >= max_depth {
        return;
    }

    let text = match resolver.vault().read_note(note) {
        Ok(text) => text,
        Err(err) => {
            warn!("could not read {}: {err}", note.display());
            return;
        }
    };

    for r in extract_references(&text) {
        let filename = r.filename();
        if filename.is_empty() {
            continue;
        }
        if resolver.vault().config().classify(filename).is_attachment() {
            if let Some(path) = resolver.resolve_attachment(filename) {
                collection.attachments.insert(path);
            }
        } else if let Some(linked) = resolver.resolve_note(filename) {
            collect_notes(resolver, collection, &linked, depth + 1, max_depth);
        }
    }
}
