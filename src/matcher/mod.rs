//! Subsequence matching and scoring of a query against one candidate.
//!
//! A candidate matches when every character of the folded query occurs in
//! the folded candidate in order (not necessarily contiguously). A linear
//! forward scan rejects non-matches early. Matches are then placed by a
//! dynamic program that picks, among every occurrence of the query as a
//! subsequence, the one scoring highest under the additive formula
//! documented on [`ScoringWeights`].

use crate::normalize::{NormalizedText, normalize};
use crate::options::{RankOptions, ScoringWeights};

/// A successful match of a query against one candidate string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    /// Relevance score; higher is better.
    pub score: f64,
    /// Indices (in `char`s) of the matched characters in the ORIGINAL
    /// candidate string, ascending and without duplicates. Empty for the
    /// empty query.
    pub positions: Vec<usize>,
}

/// A query folded once and reused for every candidate of a ranking call.
///
/// Holds one folded term per whitespace-separated word when terms are
/// split, a single term for the whole (trimmed) query otherwise, and no
/// terms at all for the empty query.
pub(crate) struct PreparedQuery {
    terms: Vec<NormalizedText>,
}

impl PreparedQuery {
    /// Fold `query` according to `options`.
    pub(crate) fn new(query: &str, options: &RankOptions) -> Self {
        let trimmed = query.trim();
        let terms: Vec<NormalizedText> = if options.split_terms {
            trimmed
                .split_whitespace()
                .map(|term| normalize(term, options.keep_diacritics))
                .filter(|term| !term.is_empty())
                .collect()
        } else {
            let term = normalize(trimmed, options.keep_diacritics);
            if term.is_empty() { Vec::new() } else { vec![term] }
        };
        Self { terms }
    }

    /// Returns `true` for a query with nothing left to match after
    /// trimming and folding.
    pub(crate) fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Match this query against an already folded candidate.
    ///
    /// The empty query matches everything with score `0.0`.
    pub(crate) fn match_normalized(
        &self,
        candidate: &NormalizedText,
        weights: &ScoringWeights,
    ) -> Option<TextMatch> {
        if self.terms.is_empty() {
            return Some(TextMatch {
                score: 0.0,
                positions: Vec::new(),
            });
        }

        let mut score = 0.0;
        let mut positions = Vec::new();
        for term in &self.terms {
            let found = find_positions(term, candidate, weights)?;
            score += score_positions(&found, candidate, weights);
            positions.extend(found.iter().map(|&p| candidate.origins()[p]));
        }

        // Split terms can overlap or arrive out of order, and several
        // folded characters can share one original character.
        if self.terms.len() > 1 {
            positions.sort_unstable();
        }
        positions.dedup();

        Some(TextMatch { score, positions })
    }
}

/// Forward scan: the folded-candidate index at which the last query
/// character is first completed, or `None` if `query` is not a
/// subsequence of `candidate`.
fn forward_end(query: &NormalizedText, candidate: &NormalizedText) -> Option<usize> {
    if query.len() > candidate.len() {
        return None;
    }

    let mut end = 0;
    if query.is_ascii() && candidate.is_ascii() {
        // Byte offsets equal char indices here, so memchr can jump straight
        // to the next occurrence.
        let haystack = candidate.as_str().as_bytes();
        let mut from = 0;
        for &needle in query.as_str().as_bytes() {
            let found = from + memchr::memchr(needle, &haystack[from..])?;
            end = found;
            from = found + 1;
        }
    } else {
        let mut rest = candidate.chars().iter().enumerate();
        for &needle in query.chars() {
            let (found, _) = rest.find(|&(_, &c)| c == needle)?;
            end = found;
        }
    }
    Some(end)
}

/// Highest-scoring placement of `query` in `candidate`, as folded-candidate
/// positions.
///
/// Dynamic program over (query char, candidate position): `row[j]` holds the
/// best partial score with the current query char at `j`. Since the matched
/// count and the candidate length are fixed, only the boundary, contiguity
/// and gap terms take part. Gaps are linear, so the best non-adjacent
/// predecessor is tracked as a running maximum of `row[k] + gap * k`, which
/// keeps the whole search at `O(query * candidate)`.
///
/// Ties prefer the later predecessor (the tighter window) and the earlier
/// end. Comparisons never reject the first reachable cell, so a subsequence
/// is found even when weights are NaN.
fn best_positions(
    query: &NormalizedText,
    candidate: &NormalizedText,
    weights: &ScoringWeights,
) -> Option<Vec<usize>> {
    let needles = query.chars();
    let haystack = candidate.chars();
    let boundaries = candidate.boundaries();
    let (m, n) = (needles.len(), haystack.len());
    let bonus = |j: usize| {
        if boundaries[j] {
            weights.boundary_bonus
        } else {
            0.0
        }
    };

    // links[i * n + j]: position of query char i - 1 when char i sits at j.
    let mut links = vec![usize::MAX; m * n];
    let mut row: Vec<Option<f64>> = haystack
        .iter()
        .enumerate()
        .map(|(j, &c)| (c == needles[0]).then(|| bonus(j)))
        .collect();

    for (i, &needle) in needles.iter().enumerate().skip(1) {
        let mut next = vec![None; n];
        let mut far: Option<(f64, usize)> = None;
        for j in 0..n {
            if j >= 2 {
                if let Some(value) = row[j - 2] {
                    let value = value + weights.gap_penalty * (j - 2) as f64;
                    if far.is_none_or(|(top, _)| value >= top) {
                        far = Some((value, j - 2));
                    }
                }
            }
            if haystack[j] != needle {
                continue;
            }

            let mut best =
                far.map(|(value, k)| (value - weights.gap_penalty * (j - 1) as f64, k));
            if let Some(value) = j.checked_sub(1).and_then(|k| row[k]) {
                let value = value + weights.contiguity_bonus;
                if best.is_none_or(|(top, _)| value >= top) {
                    best = Some((value, j - 1));
                }
            }
            if let Some((value, k)) = best {
                next[j] = Some(value + bonus(j));
                links[i * n + j] = k;
            }
        }
        row = next;
    }

    let mut end: Option<(f64, usize)> = None;
    for (j, value) in row.iter().enumerate() {
        if let Some(value) = *value {
            if end.is_none_or(|(top, _)| value > top) {
                end = Some((value, j));
            }
        }
    }

    let (_, mut at) = end?;
    let mut positions = vec![0; m];
    for i in (0..m).rev() {
        positions[i] = at;
        if i > 0 {
            at = links[i * n + at];
        }
    }
    Some(positions)
}

/// Folded-candidate positions matching `query`, or `None` when `query` is
/// not a subsequence. `query` must be non-empty.
fn find_positions(
    query: &NormalizedText,
    candidate: &NormalizedText,
    weights: &ScoringWeights,
) -> Option<Vec<usize>> {
    forward_end(query, candidate)?;
    best_positions(query, candidate, weights)
}

/// Score ascending folded-candidate `positions` with the additive formula.
pub(crate) fn score_positions(
    positions: &[usize],
    candidate: &NormalizedText,
    weights: &ScoringWeights,
) -> f64 {
    let matched = positions.len();
    let boundaries = candidate.boundaries();

    let mut on_boundary = 0usize;
    let mut contiguous = 0usize;
    let mut skipped = 0usize;
    let mut prev: Option<usize> = None;

    for &pos in positions {
        if boundaries[pos] {
            on_boundary += 1;
        }
        if let Some(prev) = prev {
            let gap = pos - prev - 1;
            if gap == 0 {
                contiguous += 1;
            } else {
                skipped += gap;
            }
        }
        prev = Some(pos);
    }

    let unmatched = candidate.len().saturating_sub(matched);

    matched as f64 * weights.match_char
        + on_boundary as f64 * weights.boundary_bonus
        + contiguous as f64 * weights.contiguity_bonus
        - skipped as f64 * weights.gap_penalty
        - unmatched as f64 * weights.length_penalty
}

/// Match `query` against `candidate` and report the score together with
/// the matched positions in the original candidate.
///
/// Returns `None` when the folded query is not a subsequence of the folded
/// candidate. The empty (or whitespace-only) query matches everything,
/// including the empty candidate, with score `0.0`. A non-empty query never
/// matches the empty candidate.
///
/// # Examples
///
/// ```
/// use tasksift::{RankOptions, match_text};
///
/// let opts = RankOptions::default();
/// let m = match_text("tsk", "Task One", &opts).unwrap();
/// assert_eq!(m.positions, vec![0, 2, 3]);
///
/// assert!(match_text("tsk", "Ask", &opts).is_none());
/// ```
pub fn match_text(query: &str, candidate: &str, options: &RankOptions) -> Option<TextMatch> {
    let prepared = PreparedQuery::new(query, options);
    let candidate = normalize(candidate, options.keep_diacritics);
    prepared.match_normalized(&candidate, &options.weights)
}

/// Score `query` against `candidate` with default options.
///
/// Shorthand for [`match_text`] with [`RankOptions::default`], keeping only
/// the score.
///
/// # Examples
///
/// ```
/// use tasksift::score;
///
/// let contiguous = score("task", "task list").unwrap();
/// let scattered = score("task", "the ask lit").unwrap();
/// assert!(contiguous > scattered);
///
/// assert_eq!(score("xyz", "apple"), None);
/// assert_eq!(score("", "apple"), Some(0.0));
/// ```
pub fn score(query: &str, candidate: &str) -> Option<f64> {
    match_text(query, candidate, &RankOptions::default()).map(|m| m.score)
}
