//! Ranking a collection of items against a query.
//!
//! Every entry point funnels into one loop: extract the strings of each
//! item, score them with the matcher, keep the best per item, then order
//! and truncate. The free functions fold every candidate afresh; a
//! [`Ranker`] keeps a bounded [`NormalizationCache`] across calls.

use crate::cache::{NormalizationCache, TextSource, Uncached};
use crate::error::OptionsError;
use crate::key::{Candidate, Key, extract_values};
use crate::matcher::PreparedQuery;
use crate::no_keys::AsMatchStr;
use crate::options::RankOptions;
use crate::sort::order_results;

/// One item that matched the query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a, T> {
    /// The matched item.
    pub item: &'a T,
    /// Position of the item in the input collection.
    pub index: usize,
    /// Score of the best-matching string, bias included. `0.0` for every
    /// item when the query is empty.
    pub score: f64,
    /// Index of the winning string among all strings extracted from the
    /// item (keys in order, each key's strings in order).
    pub key_index: usize,
    /// The winning string (the first extracted string for the empty query,
    /// `""` when the item has none).
    pub matched_value: &'a str,
    /// Matched character indices in `matched_value`, for highlighting.
    pub positions: Vec<usize>,
}

/// The ranking loop shared by every entry point.
///
/// `extract` appends `(string, bias)` pairs for one item; their order
/// defines `key_index`.
pub(crate) fn rank_with<'a, T, S, E>(
    query: &str,
    items: &'a [T],
    options: &RankOptions,
    source: &mut S,
    extract: E,
) -> Vec<MatchResult<'a, T>>
where
    S: TextSource,
    E: Fn(&'a T, &mut Vec<(&'a str, f64)>),
{
    if items.is_empty() || options.limit == Some(0) {
        return Vec::new();
    }

    let prepared = PreparedQuery::new(query, options);
    let mut values: Vec<(&'a str, f64)> = Vec::new();

    if prepared.is_empty() {
        let take = options.limit.unwrap_or(items.len());
        return items
            .iter()
            .enumerate()
            .take(take)
            .map(|(index, item)| {
                values.clear();
                extract(item, &mut values);
                MatchResult {
                    item,
                    index,
                    score: 0.0,
                    key_index: 0,
                    matched_value: values.first().map_or("", |&(value, _)| value),
                    positions: Vec::new(),
                }
            })
            .collect();
    }

    let mut results = Vec::new();
    for (index, item) in items.iter().enumerate() {
        values.clear();
        extract(item, &mut values);

        let mut best: Option<MatchResult<'a, T>> = None;
        for (key_index, &(value, bias)) in values.iter().enumerate() {
            let candidate = source.normalized(value);
            let Some(found) = prepared.match_normalized(&candidate, &options.weights) else {
                continue;
            };
            let score = found.score + bias;
            // Strictly better only: on ties the earlier key_index stays.
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(MatchResult {
                    item,
                    index,
                    score,
                    key_index,
                    matched_value: value,
                    positions: found.positions,
                });
            }
        }

        if let Some(result) = best {
            if options.min_score.is_none_or(|min| result.score >= min) {
                results.push(result);
            }
        }
    }

    order_results(&mut results, options.limit);
    results
}

/// Rank candidates against `query`.
///
/// Each candidate scores as the best of its texts. Non-matching candidates
/// are dropped; the rest come back best first, ties in input order, cut to
/// `options.limit`. The empty query returns every candidate in input order
/// with score `0.0`.
///
/// # Examples
///
/// ```
/// use tasksift::{Candidate, RankOptions, rank};
///
/// let candidates = vec![
///     Candidate::new(1, "Task One"),
///     Candidate::new(2, "Ask"),
///     Candidate::new(3, "The Sky King"),
/// ];
/// let results = rank("tsk", &candidates, &RankOptions::default());
/// let ids: Vec<_> = results.iter().map(|r| r.item.payload).collect();
/// assert_eq!(ids, vec![3, 1]);
/// ```
pub fn rank<'a, P>(
    query: &str,
    candidates: &'a [Candidate<P>],
    options: &RankOptions,
) -> Vec<MatchResult<'a, Candidate<P>>> {
    let mut source = Uncached {
        keep_diacritics: options.keep_diacritics,
    };
    rank_with(query, candidates, options, &mut source, candidate_texts)
}

/// Rank arbitrary items through `keys`.
///
/// # Examples
///
/// ```
/// use tasksift::{Key, RankOptions, rank_by};
///
/// struct Task { name: String, list: String }
///
/// let tasks = vec![
///     Task { name: "Renew domain".into(), list: "Ops".into() },
///     Task { name: "Draft blog post".into(), list: "Marketing".into() },
/// ];
/// let keys = vec![
///     Key::new(|t: &Task| t.name.as_str()),
///     Key::new(|t: &Task| t.list.as_str()).bias(-1.0),
/// ];
/// let results = rank_by("mkt", &tasks, &keys, &RankOptions::default());
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].matched_value, "Marketing");
/// assert_eq!(results[0].key_index, 1);
/// ```
pub fn rank_by<'a, T>(
    query: &str,
    items: &'a [T],
    keys: &[Key<T>],
    options: &RankOptions,
) -> Vec<MatchResult<'a, T>> {
    let mut source = Uncached {
        keep_diacritics: options.keep_diacritics,
    };
    rank_with(query, items, options, &mut source, |item, out| {
        extract_values(item, keys, out)
    })
}

fn candidate_texts<'a, P>(candidate: &'a Candidate<P>, out: &mut Vec<(&'a str, f64)>) {
    out.extend(candidate.texts().iter().map(|text| (text.as_str(), 0.0)));
}

pub(crate) fn string_value<'a, S: AsMatchStr + ?Sized>(item: &'a S, out: &mut Vec<(&'a str, f64)>) {
    out.push((item.as_match_str(), 0.0));
}

/// A ranker with its own bounded normalization cache.
///
/// Meant to live as long as the launcher's filter box: consecutive
/// keystrokes re-rank mostly the same strings, and the cache saves folding
/// them again. Results are identical to the free functions given the same
/// options.
///
/// Operations run inside a `rank` debug span and emit a trace event with
/// the match count and cache statistics.
///
/// # Examples
///
/// ```
/// use tasksift::{RankOptions, Ranker};
///
/// let mut ranker = Ranker::new(RankOptions::default()).unwrap();
/// let lists = ["Backlog", "Sprint 42", "Done"];
///
/// let first = ranker.rank_strings("s4", &lists);
/// assert_eq!(first.len(), 1);
/// assert_eq!(*first[0].item, "Sprint 42");
///
/// // Typing on re-uses the cached foldings.
/// let second = ranker.rank_strings("s42", &lists);
/// assert_eq!(second.len(), 1);
/// assert!(ranker.cache().hits() > 0);
/// ```
#[derive(Debug)]
pub struct Ranker {
    options: RankOptions,
    cache: NormalizationCache,
}

impl Ranker {
    /// Cache capacity used by [`Ranker::new`].
    pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

    /// Create a ranker with the default cache capacity.
    ///
    /// # Errors
    ///
    /// Any error from [`RankOptions::validate`].
    pub fn new(options: RankOptions) -> Result<Self, OptionsError> {
        Self::with_capacity(options, Self::DEFAULT_CACHE_CAPACITY)
    }

    /// Create a ranker caching at most `capacity` foldings.
    ///
    /// # Errors
    ///
    /// Any error from [`RankOptions::validate`], or
    /// [`OptionsError::ZeroCacheCapacity`].
    pub fn with_capacity(options: RankOptions, capacity: usize) -> Result<Self, OptionsError> {
        options.validate()?;
        let cache = NormalizationCache::new(capacity, options.keep_diacritics)?;
        Ok(Self { options, cache })
    }

    /// The options in effect.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Replace the options. Cached foldings survive unless
    /// `keep_diacritics` changes.
    ///
    /// # Errors
    ///
    /// Any error from [`RankOptions::validate`]; the previous options stay
    /// in effect.
    pub fn set_options(&mut self, options: RankOptions) -> Result<(), OptionsError> {
        options.validate()?;
        self.cache.set_keep_diacritics(options.keep_diacritics);
        self.options = options;
        Ok(())
    }

    /// The ranker's cache.
    pub fn cache(&self) -> &NormalizationCache {
        &self.cache
    }

    /// Drop every cached folding, e.g. after the candidate list was
    /// refreshed from the service.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cached counterpart of [`rank`](crate::rank()).
    pub fn rank<'a, P>(
        &mut self,
        query: &str,
        candidates: &'a [Candidate<P>],
    ) -> Vec<MatchResult<'a, Candidate<P>>> {
        self.run(query, candidates, candidate_texts)
    }

    /// Cached counterpart of [`rank_by`].
    pub fn rank_by<'a, T>(
        &mut self,
        query: &str,
        items: &'a [T],
        keys: &[Key<T>],
    ) -> Vec<MatchResult<'a, T>> {
        self.run(query, items, |item, out| extract_values(item, keys, out))
    }

    /// Cached counterpart of [`rank_strings`](crate::rank_strings).
    pub fn rank_strings<'a, S: AsMatchStr>(
        &mut self,
        query: &str,
        items: &'a [S],
    ) -> Vec<MatchResult<'a, S>> {
        self.run(query, items, string_value)
    }

    fn run<'a, T, E>(&mut self, query: &str, items: &'a [T], extract: E) -> Vec<MatchResult<'a, T>>
    where
        E: Fn(&'a T, &mut Vec<(&'a str, f64)>),
    {
        let _span = tracing::debug_span!(
            "rank",
            query_len = query.len(),
            candidates = items.len()
        )
        .entered();

        let results = rank_with(query, items, &self.options, &mut self.cache, extract);

        tracing::trace!(
            matched = results.len(),
            cache_len = self.cache.len(),
            cache_hits = self.cache.hits(),
            cache_misses = self.cache.misses(),
            "ranked candidates"
        );
        results
    }
}
