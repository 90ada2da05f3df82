#![warn(missing_docs)]

//! Fuzzy filtering and ranking for launcher result lists.
//!
//! `tasksift` scores how well a short typed query matches each candidate
//! title (a task, a list, a folder, a space) and returns the candidates
//! best first. A query matches when its characters appear in the candidate
//! in order; token starts and adjacent runs score higher, skipped
//! characters and long candidates score lower. Matching is case- and
//! diacritic-insensitive by default.
//!
//! ```
//! use tasksift::{Candidate, RankOptions, rank};
//!
//! let tasks = vec![
//!     Candidate::new("t1", "Task One"),
//!     Candidate::new("t2", "Ask"),
//!     Candidate::new("t3", "The Sky King"),
//! ];
//! let results = rank("tsk", &tasks, &RankOptions::default());
//! assert_eq!(results[0].item.title(), "The Sky King");
//! assert_eq!(results[0].positions, vec![0, 4, 5]);
//! ```

/// Bounded LRU cache of folded candidate strings.
pub mod cache;

/// Errors reported when validating options.
pub mod error;

/// Key extraction and the ready-made [`Candidate`] item type.
pub mod key;

/// Scoring a single candidate string against a query.
pub mod matcher;

/// Ranking string-like items directly without key extractors.
pub mod no_keys;

/// Case and diacritic folding with token-boundary detection.
pub mod normalize;

/// Scoring weights and ranking options.
pub mod options;

/// Ranking collections and the caching [`Ranker`].
pub mod rank;

/// Result ordering.
pub mod sort;

pub use cache::NormalizationCache;
pub use error::OptionsError;
pub use key::{Candidate, Key};
pub use matcher::{TextMatch, match_text, score};
pub use no_keys::{AsMatchStr, rank_strings};
pub use normalize::{NormalizedText, normalize};
pub use options::{RankOptions, ScoringWeights};
pub use rank::{MatchResult, Ranker, rank, rank_by};
pub use sort::compare_results;
