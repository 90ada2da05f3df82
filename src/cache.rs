//! Bounded cache of folded candidate strings.
//!
//! Launcher lists change rarely while the user types, so the same titles
//! are folded again on every keystroke. A [`NormalizationCache`] keeps the
//! most recently used foldings, up to a fixed capacity, for the
//! [`Ranker`](crate::Ranker) that owns it. The cache only saves work: a
//! cached and an uncached ranking of the same input are identical.

use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::error::OptionsError;
use crate::normalize::{NormalizedText, normalize};

/// Where the ranking loop gets folded candidate strings from.
pub(crate) trait TextSource {
    /// The folded form of `raw`.
    fn normalized(&mut self, raw: &str) -> Cow<'_, NormalizedText>;
}

/// Folds every string afresh.
pub(crate) struct Uncached {
    pub(crate) keep_diacritics: bool,
}

impl TextSource for Uncached {
    fn normalized(&mut self, raw: &str) -> Cow<'_, NormalizedText> {
        Cow::Owned(normalize(raw, self.keep_diacritics))
    }
}

/// Least-recently-used cache from raw strings to their folded form.
///
/// Entries are folded with the cache's `keep_diacritics` setting; a cache
/// never mixes both foldings.
///
/// # Examples
///
/// ```
/// use tasksift::NormalizationCache;
///
/// let mut cache = NormalizationCache::new(2, false).unwrap();
/// assert_eq!(cache.get_or_normalize("Café").as_str(), "cafe");
/// assert_eq!(cache.get_or_normalize("Café").as_str(), "cafe");
/// assert_eq!((cache.hits(), cache.misses()), (1, 1));
/// ```
pub struct NormalizationCache {
    entries: LruCache<String, NormalizedText>,
    keep_diacritics: bool,
    hits: u64,
    misses: u64,
}

impl NormalizationCache {
    /// Create a cache holding at most `capacity` foldings.
    ///
    /// # Errors
    ///
    /// [`OptionsError::ZeroCacheCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize, keep_diacritics: bool) -> Result<Self, OptionsError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(OptionsError::ZeroCacheCapacity)?;
        Ok(Self {
            entries: LruCache::new(capacity),
            keep_diacritics,
            hits: 0,
            misses: 0,
        })
    }

    /// The folded form of `raw`, from the cache when present. A miss folds
    /// `raw`, stores it, and evicts the least recently used entry when full.
    pub fn get_or_normalize(&mut self, raw: &str) -> Cow<'_, NormalizedText> {
        if self.entries.contains(raw) {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.entries
                .put(raw.to_owned(), normalize(raw, self.keep_diacritics));
        }
        match self.entries.get(raw) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(normalize(raw, self.keep_diacritics)),
        }
    }

    /// Whether foldings keep diacritics.
    pub fn keep_diacritics(&self) -> bool {
        self.keep_diacritics
    }

    /// Number of cached foldings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached foldings.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Lookups answered from the cache since creation or the last
    /// [`clear`](Self::clear).
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to fold since creation or the last
    /// [`clear`](Self::clear).
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every entry and reset the hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Switch the folding mode, dropping entries folded the other way.
    pub(crate) fn set_keep_diacritics(&mut self, keep_diacritics: bool) {
        if self.keep_diacritics != keep_diacritics {
            self.clear();
            self.keep_diacritics = keep_diacritics;
        }
    }
}

impl TextSource for NormalizationCache {
    fn normalized(&mut self, raw: &str) -> Cow<'_, NormalizedText> {
        self.get_or_normalize(raw)
    }
}

impl fmt::Debug for NormalizationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizationCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("keep_diacritics", &self.keep_diacritics)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
