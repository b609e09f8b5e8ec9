use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::{Reference, Resolver, TargetKind, extract_references};

/// Rewrites Obsidian-flavored note text into portable Markdown.
///
/// `%%...%%` comment spans are removed first; every embed and link
/// occurrence is then substituted in place. Attachment references that
/// resolve are recorded into the shared set as a side effect.
#[derive(Debug)]
pub struct Converter<'a> {
    resolver: &'a Resolver<'a>,
    comment_re: Regex,
}

impl<'a> Converter<'a> {
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self {
            resolver,
            comment_re: Regex::new(r"(?s)%%.*?%%").expect("valid comment pattern"),
        }
    }

    pub fn convert(&self, text: &str, attachments: &mut HashSet<PathBuf>) -> String {
        let text = self.comment_re.replace_all(text, "");

        let mut refs = extract_references(&text);
        refs.sort_by_key(|r| r.span.start);

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0usize;
        for r in &refs {
            out.push_str(&text[cursor..r.span.start]);
            out.push_str(&self.rewrite(r, attachments));
            cursor = r.span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }

    fn rewrite(&self, r: &Reference, attachments: &mut HashSet<PathBuf>) -> String {
        let cfg = self.resolver.vault().config();
        let filename = r.filename();
        let kind = cfg.classify(filename);

        if kind.is_attachment() {
            // Record the attachment if it resolves; the output keeps the
            // bare filename either way.
            if let Some(path) = self.resolver.resolve_attachment(filename) {
                attachments.insert(path);
            }
            let name = base_name(filename);
            return match (r.embed, kind) {
                (true, TargetKind::Image) => {
                    let display = r.alias.as_deref().unwrap_or_else(|| stem(filename));
                    format!("![{display}]({name})")
                }
                (true, _) => {
                    let display = r.alias.as_deref().unwrap_or(name);
                    format!("[{display}]({name})")
                }
                (false, _) => {
                    let display = r.alias.as_deref().unwrap_or(&r.target);
                    format!("[{display}]({name})")
                }
            };
        }

        // Note reference; embeds degrade to plain links.
        let display = r.alias.as_deref().unwrap_or(&r.target);
        if !r.embed && filename.is_empty() {
            // Same-note heading link: the original target is the only
            // usable destination.
            return format!("[{display}]({})", r.target);
        }
        format!("[{display}]({}.{})", stem(filename), cfg.note_extension)
    }
}

fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
}

fn stem(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}
