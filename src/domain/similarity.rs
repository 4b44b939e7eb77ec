//! Multiset similarity between decks
//!
//! `similarity(A, B) = Σ min(A[k], B[k]) / Σ max(A[k], B[k])` over the union
//! of card names. 1.0 means identical multisets, 0.0 means nothing shared.
//!
//! With lands stripped, swapping `S` cards in an `N`-card deck scores
//! `(N - S) / (N + S)`; the default threshold of 51/69 tolerates nine swaps
//! in a 60-card deck.

use super::CardMultiset;

/// Default duplicate threshold, about 0.7391
pub const DEFAULT_THRESHOLD: f64 = 51.0 / 69.0;

/// Computes the multiset overlap of two decks
///
/// Returns 0.0 when both are empty.
pub fn similarity(a: &CardMultiset, b: &CardMultiset) -> f64 {
    // Sums of u64 quantities can exceed u64::MAX
    let mut shared = 0u128;
    let mut union = 0u128;

    for (name, &qa) in a {
        let qb = b.get(name);
        shared += u128::from(qa.min(qb));
        union += u128::from(qa.max(qb));
    }

    for (name, &qb) in b {
        if !a.contains(name) {
            union += u128::from(qb);
        }
    }

    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

/// Closest candidate found by [`best_match`]
#[derive(Debug)]
pub struct Match<'a, T> {
    pub candidate: &'a T,
    pub similarity: f64,
}

impl<T> Match<'_, T> {
    pub fn meets(&self, threshold: f64) -> bool {
        self.similarity >= threshold
    }
}

/// Scans candidates in order for the most similar deck
///
/// Stops at the first candidate scoring at least `threshold`, so the result
/// is the first sufficiently similar deck rather than the global best. Only
/// strictly positive scores are tracked, and ties keep the earlier candidate.
pub fn best_match<'a, T, I>(deck: &CardMultiset, candidates: I, threshold: f64) -> Option<Match<'a, T>>
where
    T: 'a,
    I: IntoIterator<Item = (&'a T, &'a CardMultiset)>,
{
    let mut best: Option<Match<'a, T>> = None;

    for (candidate, cards) in candidates {
        let score = similarity(deck, cards);

        if score > best.as_ref().map_or(0.0, |m| m.similarity) {
            best = Some(Match {
                candidate,
                similarity: score,
            });
        }

        if score >= threshold {
            break;
        }
    }

    best
}
