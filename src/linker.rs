//! The rewriting pipeline: zones, matching, conflict resolution, blacklist
//! filtering and link rendering, tied together per document.

use crate::{
    config::{normalize_doc_name, LinkerConfig},
    corpus::DefinitionCorpus,
    error::GlossError,
    matcher::{CandidateSpan, CompiledCorpus},
    resolver::resolve,
    zones::track,
};

/// What a call to [Linker::annotate] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotateStatus {
    /// At least one span was rewritten.
    Rewritten { links: usize },
    /// Nothing qualified; the text is byte-identical to the input.
    Unchanged,
    /// The document is on the file blacklist; the pass was a no-op.
    SkippedBlacklisted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateResult {
    pub text: String,
    pub status: AnnotateStatus,
    /// Per-term soft failures (pattern compilation); never fatal to the pass.
    pub warnings: Vec<GlossError>,
}

/// Rewrites glossary-term occurrences in a document into wikilinks.
///
/// One `Linker` may serve many documents; each [Linker::annotate] call is
/// synchronous, owns all of its transient state, and reads the corpus
/// snapshot it was handed without mutating it.
#[derive(Debug, Clone)]
pub struct Linker {
    config: LinkerConfig,
}

impl Linker {
    pub fn new(config: LinkerConfig) -> Self {
        Linker {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Rewrite every qualifying occurrence in `text` exactly once.
    ///
    /// Re-running over the output is a no-op: the spans written here are
    /// wikilinks, which the zone tracker masks on the next pass.
    #[tracing::instrument(skip_all, fields(doc = doc_name))]
    pub fn annotate(
        &self,
        doc_name: &str,
        text: &str,
        corpus: &DefinitionCorpus,
    ) -> AnnotateResult {
        if self
            .config
            .file_blacklist
            .contains(&normalize_doc_name(doc_name))
        {
            tracing::debug!("Document is blacklisted, skipping pass");
            return AnnotateResult {
                text: text.to_string(),
                status: AnnotateStatus::SkippedBlacklisted,
                warnings: vec![],
            };
        }

        let compiled = CompiledCorpus::compile(corpus);
        let lines: Vec<&str> = text.split('\n').collect();
        let zones = track(&lines);
        debug_assert_eq!(lines.len(), zones.len());

        let mut links = 0;
        let mut out_lines = Vec::with_capacity(lines.len());
        for (line, zone) in lines.iter().zip(&zones) {
            if zone.protected {
                out_lines.push(line.to_string());
                continue;
            }
            let candidates = compiled.find_candidates(line, zone);
            let accepted = self.filter_blacklisted(resolve(candidates));
            links += accepted.len();
            out_lines.push(render_line(line, &accepted, corpus));
        }

        let status = if links > 0 {
            AnnotateStatus::Rewritten { links }
        } else {
            AnnotateStatus::Unchanged
        };
        tracing::debug!("Annotation pass complete: {status:?}");
        AnnotateResult {
            text: out_lines.join("\n"),
            status,
            warnings: compiled.warnings().to_vec(),
        }
    }

    fn filter_blacklisted(&self, accepted: Vec<CandidateSpan>) -> Vec<CandidateSpan> {
        if self.config.word_blacklist.is_empty() {
            return accepted;
        }
        accepted
            .into_iter()
            .filter(|span| {
                let keep = !self
                    .config
                    .word_blacklist
                    .contains(&span.surface.to_lowercase());
                if !keep {
                    tracing::trace!("Dropping blacklisted term '{}'", span.surface);
                }
                keep
            })
            .collect()
    }
}

/// Replace each accepted span with its wikilink.
///
/// `accepted` arrives right-to-left from the resolver, so every
/// `replace_range` leaves the offsets of the remaining spans intact. The
/// anchor is the canonical term; the display alias is the surface text as it
/// appeared, casing and plural suffix included.
fn render_line(line: &str, accepted: &[CandidateSpan], corpus: &DefinitionCorpus) -> String {
    let mut out = line.to_string();
    for span in accepted {
        let Some(definition) = corpus.get(span.definition) else {
            tracing::warn!("Span references definition {} outside corpus", span.definition);
            continue;
        };
        let link = format!(
            "[[{}.md#{}|{}]]",
            definition.glossary, definition.term, span.surface
        );
        out.replace_range(span.start..span.end, &link);
    }
    out
}
