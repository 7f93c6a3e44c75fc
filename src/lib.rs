//! # gloss-core
//!
//! A Rust library for rewriting glossary-term occurrences in markdown text
//! into annotated wikilink references.
//!
//! ## Overview
//!
//! gloss-core takes a document body and a corpus of `(term, glossary)`
//! bindings and rewrites every qualifying occurrence of a known term into a
//! `[[glossary.md#term|surface]]` reference, exactly once, preserving the
//! casing and plural form found in the text. Text that must not be touched
//! is never touched: YAML front-matter, fenced code blocks, heading and tag
//! lines, and spans that are already links.
//!
//! ### Key Properties
//!
//! - **Idempotent**: re-running a pass over its own output changes nothing,
//!   because freshly written links are masked as exclusion zones on the next
//!   pass
//! - **Non-corrupting**: overlapping matches are resolved to one winner
//!   before any text moves, and replacements apply right to left so pending
//!   offsets stay valid
//! - **Longest match wins**: the corpus is ordered longest-term-first and
//!   the conflict resolver prefers longer spans, so a term that is a
//!   substring of another never fires inside it
//! - **Fail safe**: an unterminated front-matter block or code fence
//!   protects the rest of the document instead of guessing; a term whose
//!   pattern cannot compile is skipped with a warning, never an abort
//!
//! ## Quick Start
//!
//! ```rust
//! use gloss_core::{config::LinkerConfig, corpus::build_corpus, linker::Linker};
//!
//! let config = LinkerConfig::default();
//! let glossary = "---\ntags: [glossary]\n---\n# Cache\nStores things.\n";
//! let corpus = build_corpus([("Glossary.md", glossary)], &config.glossary_tags);
//!
//! let linker = Linker::new(config);
//! let result = linker.annotate("Notes.md", "The cache stores data.", &corpus);
//! assert_eq!(result.text, "The [[Glossary.md#Cache|cache]] stores data.");
//!
//! // Running again over the output is a no-op.
//! let again = linker.annotate("Notes.md", &result.text, &corpus);
//! assert_eq!(again.text, result.text);
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs per document, per line:
//!
//! - **[`zones`]**: exclusion zone tracking (front-matter, fences, headings,
//!   existing links) via an explicit line-scanning state machine
//! - **[`corpus`]**: the immutable, priority-ordered definition corpus and
//!   the snapshot cell used to publish rebuilds atomically
//! - **[`pattern`]**: per-term surface-form generation (plural suffixes,
//!   word boundaries, metacharacter escaping)
//! - **[`matcher`]**: candidate span discovery against the zone mask
//! - **[`resolver`]**: overlap resolution, longest match first
//! - **[`linker`]**: blacklist filtering, link rendering, and the
//!   per-document driver
//!
//! Corpus construction from glossary documents ([`corpus::build_corpus`])
//! works on `(name, body)` pairs; file discovery, UI, and trigger timing
//! belong to the host application, not this crate.

pub mod config;
pub mod corpus;
pub mod error;
pub mod linker;
pub mod matcher;
pub mod pattern;
pub mod resolver;
pub mod zones;

pub use error::*;
