//! Scanning a line for candidate term occurrences.

use crate::{
    corpus::DefinitionCorpus,
    error::GlossError,
    pattern::TermPattern,
    zones::LineZones,
};

/// One potential rewrite: a half-open byte range within a line, the surface
/// text found there, and the index of the corpus definition it resolves to.
/// Offsets are only meaningful for the line they were computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSpan {
    pub start: usize,
    pub end: usize,
    pub surface: String,
    /// Index into the corpus, which is already priority order (longest term
    /// first, declaration order on ties).
    pub definition: usize,
}

impl CandidateSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn overlaps(&self, other: &CandidateSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A corpus with its patterns compiled once per pass.
///
/// Definitions whose pattern fails to compile are skipped for the whole pass
/// and reported through [CompiledCorpus::warnings]; everything else still
/// applies.
pub struct CompiledCorpus<'c> {
    corpus: &'c DefinitionCorpus,
    patterns: Vec<Option<TermPattern>>,
    warnings: Vec<GlossError>,
}

impl<'c> CompiledCorpus<'c> {
    pub fn compile(corpus: &'c DefinitionCorpus) -> Self {
        let mut patterns = Vec::with_capacity(corpus.len());
        let mut warnings = Vec::new();
        for definition in corpus.iter() {
            match TermPattern::compile(&definition.term) {
                Ok(pattern) => patterns.push(Some(pattern)),
                Err(e) => {
                    tracing::warn!("Skipping definition for this pass: {e}");
                    warnings.push(e);
                    patterns.push(None);
                }
            }
        }
        CompiledCorpus {
            corpus,
            patterns,
            warnings,
        }
    }

    pub fn corpus(&self) -> &'c DefinitionCorpus {
        self.corpus
    }

    pub fn warnings(&self) -> &[GlossError] {
        &self.warnings
    }

    /// All mask-respecting occurrences of every term in `line`.
    ///
    /// Candidates from different definitions may overlap each other; the
    /// conflict resolver decides which survive. Spans touching a masked
    /// range never become candidates at all.
    pub fn find_candidates(&self, line: &str, zones: &LineZones) -> Vec<CandidateSpan> {
        if zones.protected {
            return vec![];
        }
        let mut candidates = Vec::new();
        for (index, pattern) in self.patterns.iter().enumerate() {
            let Some(pattern) = pattern else { continue };
            for m in pattern.find_iter(line) {
                if !zones.permits(m.start(), m.end()) {
                    continue;
                }
                candidates.push(CandidateSpan {
                    start: m.start(),
                    end: m.end(),
                    surface: m.as_str().to_string(),
                    definition: index,
                });
            }
        }
        candidates
    }
}
