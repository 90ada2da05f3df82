//! Ranking string-like items directly.
//!
//! Tag names, priority labels and list names are plain strings; building
//! [`Key`](crate::key::Key)s for them is noise. Anything implementing
//! [`AsMatchStr`] can be ranked with [`rank_strings`].

use std::borrow::Cow;

use crate::cache::Uncached;
use crate::options::RankOptions;
use crate::rank::{MatchResult, rank_with, string_value};

/// Types that can be matched as a single string.
///
/// # Built-in Implementations
///
/// - [`String`]
/// - [`str`]
/// - [`&str`]
/// - [`Cow<'_, str>`]
///
/// # Examples
///
/// ```
/// use tasksift::AsMatchStr;
///
/// struct Priority { label: &'static str, level: u8 }
///
/// impl AsMatchStr for Priority {
///     fn as_match_str(&self) -> &str {
///         self.label
///     }
/// }
///
/// let urgent = Priority { label: "Urgent", level: 1 };
/// assert_eq!(urgent.as_match_str(), "Urgent");
/// ```
pub trait AsMatchStr {
    /// The string to match against.
    fn as_match_str(&self) -> &str;
}

impl AsMatchStr for String {
    fn as_match_str(&self) -> &str {
        self.as_str()
    }
}

impl AsMatchStr for str {
    fn as_match_str(&self) -> &str {
        self
    }
}

// Needed so `T = &str` satisfies the bound without double references.
impl AsMatchStr for &str {
    fn as_match_str(&self) -> &str {
        self
    }
}

impl AsMatchStr for Cow<'_, str> {
    fn as_match_str(&self) -> &str {
        self.as_ref()
    }
}

/// Rank string-like items against `query`.
///
/// Same contract as [`rank`](crate::rank()), with each item matched as its
/// own single string.
///
/// # Examples
///
/// ```
/// use tasksift::{RankOptions, rank_strings};
///
/// let tags = ["bug", "backend", "blocked", "design"];
/// let results = rank_strings("bk", &tags, &RankOptions::default());
/// let names: Vec<&str> = results.iter().map(|r| *r.item).collect();
/// assert_eq!(names, vec!["backend", "blocked"]);
/// ```
pub fn rank_strings<'a, S: AsMatchStr>(
    query: &str,
    items: &'a [S],
    options: &RankOptions,
) -> Vec<MatchResult<'a, S>> {
    let mut source = Uncached {
        keep_diacritics: options.keep_diacritics,
    };
    rank_with(query, items, options, &mut source, string_value)
}
