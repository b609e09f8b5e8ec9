use std::ops::Range;

/// One `[[...]]` or `![[...]]` occurrence in note text.
///
/// `target` keeps any `#heading`/`#^block` sub-target; `span` covers the
/// whole occurrence in the source (including the `!` of an embed), so a
/// rewrite pass can substitute in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target: String,
    /// First pipe-separated trailing segment.
    pub alias: Option<String>,
    /// Second trailing segment, e.g. `300` or `300x200`. Dropped on rewrite.
    pub size: Option<String>,
    pub embed: bool,
    pub span: Range<usize>,
}

impl Reference {
    /// Target with any sub-target fragment removed.
    pub fn filename(&self) -> &str {
        self.target
            .split('#')
            .next()
            .unwrap_or(self.target.as_str())
            .trim()
    }
}

/// Extract every embed and link occurrence from `text`.
///
/// Embeds precede links in the returned sequence; each group keeps source
/// order. Matching is an innermost scan: from each `[[`, the inner text runs
/// to the next `]]`. Unbalanced or nested brackets get no special handling.
pub fn extract_references(text: &str) -> Vec<Reference> {
    let mut embeds = Vec::new();
    let mut links = Vec::new();

    let bytes = text.as_bytes();
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        if bytes[i] != b'[' || bytes[i + 1] != b'[' {
            i += 1;
            continue;
        }
        let embed = i > 0 && bytes[i - 1] == b'!';
        let start = if embed { i - 1 } else { i };

        let mut j = i + 2;
        while j + 1 < bytes.len() && !(bytes[j] == b']' && bytes[j + 1] == b']') {
            j += 1;
        }
        if j + 1 >= bytes.len() {
            break;
        }

        if let Some(r) = parse_inner(&text[i + 2..j], embed, start..j + 2) {
            if embed {
                embeds.push(r);
            } else {
                links.push(r);
            }
        }
        i = j + 2;
    }

    embeds.extend(links);
    embeds
}

fn parse_inner(inner: &str, embed: bool, span: Range<usize>) -> Option<Reference> {
    let mut parts = inner.split('|');
    let target = parts.next().unwrap_or("").trim();
    if target.is_empty() {
        return None;
    }

    let tail: Vec<&str> = parts.collect();
    let alias = tail
        .first()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let size = if tail.len() >= 2 {
        tail.last()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    Some(Reference {
        target: target.to_string(),
        alias,
        size,
        embed,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_precede_links() {
        let refs = extract_references("[[First]] then ![[pic.png]] then [[Second]]");
        assert_eq!(refs.len(), 3);
        assert!(refs[0].embed);
        assert_eq!(refs[0].target, "pic.png");
        assert_eq!(refs[1].target, "First");
        assert_eq!(refs[2].target, "Second");
    }

    #[test]
    fn spans_cover_whole_occurrence() {
        let text = "a ![[pic.png]] b [[Note]]";
        let refs = extract_references(text);
        assert_eq!(&text[refs[0].span.clone()], "![[pic.png]]");
        assert_eq!(&text[refs[1].span.clone()], "[[Note]]");
    }

    #[test]
    fn alias_and_size_split_positionally() {
        let refs = extract_references("![[image.png|description|300x200]]");
        assert_eq!(refs[0].target, "image.png");
        assert_eq!(refs[0].alias.as_deref(), Some("description"));
        assert_eq!(refs[0].size.as_deref(), Some("300x200"));
    }

    #[test]
    fn lone_trailing_segment_is_alias_even_when_numeric() {
        let refs = extract_references("![[image.png|300]]");
        assert_eq!(refs[0].alias.as_deref(), Some("300"));
        assert_eq!(refs[0].size, None);
    }

    #[test]
    fn fragment_is_kept_in_target_and_stripped_by_filename() {
        let refs = extract_references("[[Note Name#Heading]]");
        assert_eq!(refs[0].target, "Note Name#Heading");
        assert_eq!(refs[0].filename(), "Note Name");
    }

    #[test]
    fn empty_targets_are_skipped() {
        assert!(extract_references("[[]] [[|alias]] [[   ]]").is_empty());
    }

    #[test]
    fn unterminated_pair_yields_nothing() {
        assert!(extract_references("start [[dangling").is_empty());
    }

    #[test]
    fn heading_only_target_is_kept() {
        let refs = extract_references("[[#Section]]");
        assert_eq!(refs[0].target, "#Section");
        assert_eq!(refs[0].filename(), "");
    }

    #[test]
    fn no_matches_yields_empty() {
        assert!(extract_references("plain [text](link.md) only").is_empty());
    }
}
