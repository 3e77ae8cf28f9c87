//! Top-N nearest-neighbor lookup by similarity ratio.

use std::cmp::Ordering;

use crate::error::{DifflibError, Result};
use crate::matcher::SequenceMatcher;
use crate::select::n_largest;

#[derive(Debug, Clone)]
struct ScoredCandidate<'a> {
    score: f64,
    candidate: &'a str,
}

impl PartialEq for ScoredCandidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.candidate == other.candidate
    }
}
impl Eq for ScoredCandidate<'_> {}

impl PartialOrd for ScoredCandidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ScoredCandidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score).then_with(|| self.candidate.cmp(other.candidate))
    }
}

/// Returns up to `n` entries from `possibilities` most similar to `word`,
/// best match first, each scoring above `cutoff` on all three of
/// [`SequenceMatcher::real_quick_ratio`], [`SequenceMatcher::quick_ratio`],
/// and [`SequenceMatcher::ratio`] (checked in that short-circuit order,
/// cheapest first).
///
/// `word` is pinned as the matcher's `b` side so its index is built once and
/// reused across every candidate.
pub fn get_close_matches(word: &str, possibilities: &[&str], n: usize, cutoff: f64) -> Result<Vec<String>> {
    if n == 0 {
        return Err(DifflibError::InvalidCloseMatchCount(0));
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(DifflibError::InvalidCutoff(cutoff));
    }

    let word_chars: Vec<char> = word.chars().collect();
    let candidate_chars: Vec<Vec<char>> = possibilities.iter().map(|c| c.chars().collect()).collect();

    let mut matcher: SequenceMatcher<char> = SequenceMatcher::new(None, &[], &word_chars, true);

    let mut scored: Vec<ScoredCandidate> = Vec::new();
    for (idx, chars) in candidate_chars.iter().enumerate() {
        matcher.set_seq1(chars);
        if matcher.real_quick_ratio() > cutoff && matcher.quick_ratio() > cutoff {
            let score = matcher.ratio();
            if score > cutoff {
                scored.push(ScoredCandidate { score, candidate: possibilities[idx] });
            }
        }
    }

    let top = n_largest(scored, n);
    Ok(top.into_iter().map(|sc| sc.candidate.to_string()).collect())
}
