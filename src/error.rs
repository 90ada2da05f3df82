//! Configuration errors.
//!
//! Ranking itself never fails. The only fallible surface is building a
//! [`Ranker`](crate::Ranker) from options that would produce meaningless
//! scores, or asking for a cache that cannot hold anything.

/// Rejected ranking configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// A scoring weight is NaN or infinite.
    #[error("scoring weight `{name}` must be finite, got {value}")]
    NonFiniteWeight {
        /// Field name of the offending weight.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A scoring weight is below zero. Bonuses and penalties carry their
    /// sign in the formula, so every weight is a magnitude.
    #[error("scoring weight `{name}` must not be negative, got {value}")]
    NegativeWeight {
        /// Field name of the offending weight.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The minimum score is NaN or infinite.
    #[error("minimum score must be finite, got {0}")]
    NonFiniteMinScore(f64),

    /// A normalization cache was requested with room for zero entries.
    #[error("normalization cache capacity must be non-zero")]
    ZeroCacheCapacity,
}
