//! Exclusion zone tracking.
//!
//! Before any term matching happens, a document is scanned line by line to
//! decide which text is off limits: front-matter, fenced code blocks, heading
//! and tag lines, and spans that are already links. Matching then only ever
//! considers characters outside these zones, which is also what makes the
//! whole pipeline idempotent: a rewritten span is a wikilink, and wikilinks
//! are masked on the next pass.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Wikilink spans, `[[target|alias]]` or `[[target]]`.
static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[^\[\]]*\]\]").expect("wikilink regex"));

/// Standard markdown links, `[label](target)`.
static MD_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\[\]]*\]\([^()]*\)").expect("markdown link regex"));

const FRONT_MATTER_DELIMITER: &str = "---";

/// Line-scanning state. Both non-normal states fail safe: if the closing
/// delimiter never arrives, the rest of the document stays protected rather
/// than guessing where the block was meant to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneState {
    Normal,
    InFrontMatter,
    InFencedBlock,
}

/// Per-line protection info produced by [track].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineZones {
    /// The whole line is off limits (front-matter, fence, heading, tag line).
    pub protected: bool,
    /// Byte ranges within an otherwise open line that must not be rewritten.
    pub masked: Vec<Range<usize>>,
}

impl LineZones {
    fn fully_protected() -> Self {
        LineZones {
            protected: true,
            masked: vec![],
        }
    }

    /// Whether `start..end` may be rewritten.
    pub fn permits(&self, start: usize, end: usize) -> bool {
        !self.protected && !self.masked.iter().any(|r| r.start < end && start < r.end)
    }
}

fn is_fence_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Heading lines and tag lines both start with `#`; neither is body prose.
fn is_structural_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn inline_masks(line: &str) -> Vec<Range<usize>> {
    let mut masked: Vec<Range<usize>> = WIKILINK.find_iter(line).map(|m| m.range()).collect();
    for m in MD_LINK.find_iter(line) {
        // Wikilink alias syntax also matches the markdown link pattern when
        // followed by parens; keep only spans not already covered.
        if !masked.iter().any(|r| r.start < m.end() && m.start() < r.end) {
            masked.push(m.range());
        }
    }
    masked.sort_by_key(|r| r.start);
    masked
}

/// Scan a document's lines and produce one [LineZones] per line.
///
/// Front-matter only opens when the document's first line is the `---`
/// delimiter; the delimiter lines themselves are protected. A fence marker
/// line toggles the fenced state and is protected in both directions.
pub fn track<S: AsRef<str>>(lines: &[S]) -> Vec<LineZones> {
    let mut state = ZoneState::Normal;
    let mut zones = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let delimiter = line.trim_end() == FRONT_MATTER_DELIMITER;
        match state {
            ZoneState::Normal if idx == 0 && delimiter => {
                state = ZoneState::InFrontMatter;
                zones.push(LineZones::fully_protected());
            }
            ZoneState::InFrontMatter => {
                if delimiter {
                    state = ZoneState::Normal;
                }
                zones.push(LineZones::fully_protected());
            }
            ZoneState::InFencedBlock => {
                if is_fence_line(line) {
                    state = ZoneState::Normal;
                }
                zones.push(LineZones::fully_protected());
            }
            ZoneState::Normal => {
                if is_fence_line(line) {
                    state = ZoneState::InFencedBlock;
                    zones.push(LineZones::fully_protected());
                } else if is_structural_line(line) {
                    zones.push(LineZones::fully_protected());
                } else {
                    zones.push(LineZones {
                        protected: false,
                        masked: inline_masks(line),
                    });
                }
            }
        }
    }
    if state != ZoneState::Normal {
        tracing::debug!(
            "Document ended in {state:?}; trailing lines were left protected"
        );
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_front_matter_protected() {
        let lines = ["---", "tags: [glossary]", "---", "body text"];
        let zones = track(&lines);
        assert!(zones[0].protected);
        assert!(zones[1].protected);
        assert!(zones[2].protected);
        assert!(!zones[3].protected);
    }

    #[test]
    fn test_front_matter_only_opens_on_first_line() {
        let lines = ["intro", "---", "not front matter"];
        let zones = track(&lines);
        assert!(!zones[0].protected);
        // A lone horizontal rule mid-document is structural ambiguity we
        // accept: it opens nothing because line 0 was prose.
        assert!(!zones[2].protected);
    }

    #[test]
    fn test_fenced_block_toggles() {
        let lines = ["before", "```rust", "let x = 1;", "```", "after"];
        let zones = track(&lines);
        assert!(!zones[0].protected);
        assert!(zones[1].protected);
        assert!(zones[2].protected);
        assert!(zones[3].protected);
        assert!(!zones[4].protected);
    }

    #[test]
    fn test_unterminated_fence_protects_remainder() {
        let lines = ["before", "```", "code", "more code"];
        let zones = track(&lines);
        assert!(!zones[0].protected);
        assert!(zones[1].protected);
        assert!(zones[2].protected);
        assert!(zones[3].protected);
    }

    #[test]
    fn test_unterminated_front_matter_protects_remainder() {
        let lines = ["---", "tags: [glossary]", "never closed"];
        let zones = track(&lines);
        assert!(zones.iter().all(|z| z.protected));
    }

    #[test]
    fn test_heading_and_tag_lines_protected() {
        let lines = ["# Cache", "#daily-note", "  ## Indented heading", "prose"];
        let zones = track(&lines);
        assert!(zones[0].protected);
        assert!(zones[1].protected);
        assert!(zones[2].protected);
        assert!(!zones[3].protected);
    }

    #[test]
    fn test_existing_links_masked() {
        let line = "see [[Glossary.md#cache|cache]] and [docs](http://a.b) here";
        let zones = track(&[line]);
        let wiki_start = line.find("[[").unwrap();
        let wiki_end = line.find("]]").unwrap() + 2;
        assert!(!zones[0].permits(wiki_start, wiki_end));
        assert!(!zones[0].permits(wiki_start + 2, wiki_start + 5));
        let md_start = line.find("[docs]").unwrap();
        assert!(!zones[0].permits(md_start + 1, md_start + 5));
        assert!(zones[0].permits(0, 4));
    }
}
