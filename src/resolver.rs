//! Conflict resolution between overlapping candidate spans.

use crate::matcher::CandidateSpan;

/// Reduce `candidates` to the authoritative, pairwise non-overlapping set.
///
/// Candidates are ranked by span length descending, then start offset
/// ascending, then corpus position ascending, and accepted greedily: a span
/// survives only if it overlaps nothing already accepted. "class" inside an
/// accepted "classes" is rejected here; so is a second definition of the same
/// term declared later.
///
/// The result is ordered right to left by start offset. Rewriting must apply
/// replacements in that order so that offsets of not-yet-processed spans stay
/// valid while the line mutates underneath them.
pub fn resolve(mut candidates: Vec<CandidateSpan>) -> Vec<CandidateSpan> {
    candidates.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then(a.start.cmp(&b.start))
            .then(a.definition.cmp(&b.definition))
    });
    let mut accepted: Vec<CandidateSpan> = Vec::new();
    for candidate in candidates {
        if accepted.iter().any(|a| a.overlaps(&candidate)) {
            tracing::trace!(
                "Rejecting overlapped span '{}' at {}..{}",
                candidate.surface,
                candidate.start,
                candidate.end
            );
            continue;
        }
        accepted.push(candidate);
    }
    accepted.sort_by(|a, b| b.start.cmp(&a.start));
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn span(start: usize, end: usize, surface: &str, definition: usize) -> CandidateSpan {
        CandidateSpan {
            start,
            end,
            surface: surface.to_string(),
            definition,
        }
    }

    #[test]
    fn test_longest_span_wins() {
        // "classes" matched both as class+es and as a literal longer term.
        let resolved = resolve(vec![
            span(0, 5, "class", 1),
            span(0, 7, "classes", 0),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].surface, "classes");
    }

    #[test]
    fn test_equal_spans_break_on_corpus_order() {
        let resolved = resolve(vec![
            span(0, 5, "nodes", 1),
            span(0, 5, "nodes", 0),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].definition, 0);
    }

    #[test]
    fn test_disjoint_spans_all_survive_right_to_left() {
        let resolved = resolve(vec![
            span(0, 5, "cache", 0),
            span(10, 14, "node", 1),
            span(20, 25, "class", 2),
        ]);
        let starts: Vec<usize> = resolved.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![20, 10, 0]);
    }

    #[test]
    fn test_output_pairwise_non_overlapping() {
        let resolved = resolve(vec![
            span(0, 7, "classes", 0),
            span(0, 5, "class", 1),
            span(3, 8, "sses x", 2),
            span(6, 10, "s xy", 3),
        ]);
        for (i, a) in resolved.iter().enumerate() {
            for b in &resolved[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}
