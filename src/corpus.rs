//! The definition corpus: every known term bound to the glossary document
//! that declares it.
//!
//! The corpus is rebuilt wholesale whenever the glossary source set changes
//! and published as an immutable snapshot through [CorpusCell]; a rewrite
//! pass always binds to one fully built snapshot, never a partially
//! populated list.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Heading marker followed by a word-character run. Multi-word headings
/// contribute their first word; multi-word term recognition is out of scope.
static HEADING_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+([A-Za-z][A-Za-z0-9_-]*)").expect("heading regex"));

/// Basename with a `.md` extension stripped, casing preserved. Rendered link
/// targets carry the declaring document's name as written; lowercasing is a
/// blacklist-comparison concern, not a rendering one.
pub fn doc_stem(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.strip_suffix(".md")
        .or_else(|| base.strip_suffix(".MD"))
        .unwrap_or(base)
}

/// One glossary binding: a term and the stem of the document declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub glossary: String,
}

/// Ordered, immutable set of definitions.
///
/// Order is the matching priority: descending term length, ties broken by
/// declaration order. Longer terms are tried first so a term that is a
/// substring of another never steals its match. Duplicate terms from
/// different glossaries are kept as declared; the first one wins any tie
/// through its earlier position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionCorpus {
    definitions: Vec<Definition>,
}

impl DefinitionCorpus {
    pub fn new(definitions: impl IntoIterator<Item = Definition>) -> Self {
        let mut definitions: Vec<Definition> = definitions
            .into_iter()
            .filter_map(|d| {
                let term = d.term.trim();
                if term.is_empty() {
                    return None;
                }
                Some(Definition {
                    term: term.to_string(),
                    glossary: d.glossary,
                })
            })
            .collect();
        // sort_by is stable, so declaration order survives equal lengths.
        definitions.sort_by(|a, b| b.term.len().cmp(&a.term.len()));
        DefinitionCorpus { definitions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Definition> {
        self.definitions.get(index)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    tags: Vec<String>,
}

/// The YAML block between a leading `---` line and the next one, if any.
fn front_matter_block(text: &str) -> Option<String> {
    let mut lines = text.lines();
    if lines.next()?.trim_end() != "---" {
        return None;
    }
    let mut block = String::new();
    for line in lines {
        if line.trim_end() == "---" {
            return Some(block);
        }
        block.push_str(line);
        block.push('\n');
    }
    None
}

/// Whether a document declares one of the configured glossary tags in its
/// front-matter. Unparseable front-matter means "not a glossary".
pub fn is_glossary(text: &str, glossary_tags: &BTreeSet<String>) -> bool {
    let Some(block) = front_matter_block(text) else {
        return false;
    };
    match serde_yaml::from_str::<FrontMatter>(&block) {
        Ok(fm) => fm
            .tags
            .iter()
            .any(|t| glossary_tags.contains(&t.to_lowercase())),
        Err(e) => {
            tracing::debug!("Skipping document with unparseable front-matter: {e}");
            false
        }
    }
}

/// Extract the terms a single glossary document declares, in heading order.
pub fn extract_terms(text: &str) -> Vec<String> {
    HEADING_TERM
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Build a corpus from `(document name, document body)` pairs.
///
/// Only documents carrying one of `glossary_tags` contribute. File discovery
/// stays with the caller; this function never touches the file system.
pub fn build_corpus<'a, I, N, B>(sources: I, glossary_tags: &BTreeSet<String>) -> DefinitionCorpus
where
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str> + 'a,
    B: AsRef<str> + 'a,
{
    let mut definitions = Vec::new();
    for (name, body) in sources {
        let (name, body) = (name.as_ref(), body.as_ref());
        if !is_glossary(body, glossary_tags) {
            continue;
        }
        let glossary = doc_stem(name).to_string();
        let terms = extract_terms(body);
        tracing::debug!("Glossary '{}' declares {} terms", glossary, terms.len());
        for term in terms {
            definitions.push(Definition {
                term,
                glossary: glossary.clone(),
            });
        }
    }
    DefinitionCorpus::new(definitions)
}

/// Published corpus snapshot holder.
///
/// Rebuilds replace the whole corpus atomically; readers clone the `Arc` and
/// keep matching against the snapshot they took even while a rebuild
/// publishes a successor.
#[derive(Debug, Default)]
pub struct CorpusCell {
    inner: RwLock<Arc<DefinitionCorpus>>,
}

impl CorpusCell {
    pub fn new(corpus: DefinitionCorpus) -> Self {
        CorpusCell {
            inner: RwLock::new(Arc::new(corpus)),
        }
    }

    pub fn snapshot(&self) -> Arc<DefinitionCorpus> {
        self.inner.read().clone()
    }

    pub fn publish(&self, corpus: DefinitionCorpus) {
        tracing::debug!("Publishing corpus snapshot with {} definitions", corpus.len());
        *self.inner.write() = Arc::new(corpus);
    }
}
