//! Configuration for scoring and ranking.
//!
//! [`ScoringWeights`] holds the magnitudes of the bonuses and penalties the
//! matcher combines into a score. [`RankOptions`] wraps the weights together
//! with the settings that control which matches survive and how many are
//! returned.

use crate::error::OptionsError;

/// Magnitudes used by the additive scoring formula.
///
/// For `m` matched characters at positions `p_0 < ... < p_{m-1}` in a
/// normalized candidate of `n` characters:
///
/// ```text
/// score = m * match_char
///       + boundary_bonus   * (matched chars that start a token)
///       + contiguity_bonus * (matched chars directly after the previous one)
///       - gap_penalty      * (chars skipped between matched chars)
///       - length_penalty   * (n - m)
/// ```
///
/// Every field is a non-negative magnitude; see [`ScoringWeights::validate`].
///
/// # Defaults
///
/// | Field              | Default |
/// |--------------------|---------|
/// | `match_char`       | 1.0     |
/// | `boundary_bonus`   | 1.5     |
/// | `contiguity_bonus` | 1.0     |
/// | `gap_penalty`      | 0.2     |
/// | `length_penalty`   | 0.01    |
///
/// # Examples
///
/// ```
/// use tasksift::ScoringWeights;
///
/// // Favour dense matches more than the defaults do.
/// let weights = ScoringWeights { gap_penalty: 0.5, ..Default::default() };
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScoringWeights {
    /// Base score for every matched character.
    pub match_char: f64,
    /// Bonus for a matched character that starts a token (start of string,
    /// after a separator, camelCase hump, start of a digit run).
    pub boundary_bonus: f64,
    /// Bonus for a matched character immediately following the previous
    /// matched character.
    pub contiguity_bonus: f64,
    /// Penalty per candidate character skipped between two matched
    /// characters.
    pub gap_penalty: f64,
    /// Penalty per unmatched candidate character, so short candidates win
    /// over long ones containing the same subsequence.
    pub length_penalty: f64,
}

impl ScoringWeights {
    /// The default weights as a constant.
    pub const DEFAULT: Self = Self {
        match_char: 1.0,
        boundary_bonus: 1.5,
        contiguity_bonus: 1.0,
        gap_penalty: 0.2,
        length_penalty: 0.01,
    };

    /// Check that every weight is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// [`OptionsError::NonFiniteWeight`] or [`OptionsError::NegativeWeight`]
    /// naming the first offending field.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(OptionsError::NonFiniteWeight { name, value });
            }
            if value < 0.0 {
                return Err(OptionsError::NegativeWeight { name, value });
            }
        }
        Ok(())
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("match_char", self.match_char),
            ("boundary_bonus", self.boundary_bonus),
            ("contiguity_bonus", self.contiguity_bonus),
            ("gap_penalty", self.gap_penalty),
            ("length_penalty", self.length_penalty),
        ]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options controlling a ranking call.
///
/// # Defaults
///
/// - `weights`: [`ScoringWeights::default`]
/// - `keep_diacritics`: `false` ("cafe" matches "café")
/// - `split_terms`: `false` (the whole query is one subsequence)
/// - `limit`: `None` (return every match)
/// - `min_score`: `None` (keep every match)
///
/// # Examples
///
/// ```
/// use tasksift::RankOptions;
///
/// let opts = RankOptions { limit: Some(10), ..Default::default() };
/// assert!(!opts.keep_diacritics);
/// assert_eq!(opts.limit, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RankOptions {
    /// Scoring weights.
    pub weights: ScoringWeights,

    /// When `true`, diacritics are compared as-is. When `false` (default),
    /// combining marks are stripped from query and candidates alike.
    pub keep_diacritics: bool,

    /// When `true`, the query is split on whitespace and every term must
    /// match on its own, in any order. Scores of the terms are summed.
    ///
    /// Defaults to `false`, unlike the per-word filtering of the script
    /// launcher this crate replaces: "sky king" then requires the space and
    /// does not match "King of the Sky". Hosts that want the per-word
    /// behaviour set this to `true`.
    pub split_terms: bool,

    /// Maximum number of results, applied after ordering.
    pub limit: Option<usize>,

    /// Matches scoring below this are dropped. Ignored for the empty query,
    /// which matches everything at score zero.
    pub min_score: Option<f64>,
}

impl RankOptions {
    /// Check the weights and the minimum score.
    ///
    /// # Errors
    ///
    /// Any error from [`ScoringWeights::validate`], or
    /// [`OptionsError::NonFiniteMinScore`].
    pub fn validate(&self) -> Result<(), OptionsError> {
        self.weights.validate()?;
        match self.min_score {
            Some(min) if !min.is_finite() => Err(OptionsError::NonFiniteMinScore(min)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_match_constant() {
        assert_eq!(ScoringWeights::default(), ScoringWeights::DEFAULT);
        assert_eq!(ScoringWeights::DEFAULT.boundary_bonus, 1.5);
        assert_eq!(ScoringWeights::DEFAULT.length_penalty, 0.01);
    }

    #[test]
    fn default_weights_are_valid() {
        assert_eq!(ScoringWeights::default().validate(), Ok(()));
    }

    #[test]
    fn zero_weights_are_valid() {
        let weights = ScoringWeights {
            match_char: 0.0,
            boundary_bonus: 0.0,
            contiguity_bonus: 0.0,
            gap_penalty: 0.0,
            length_penalty: 0.0,
        };
        assert_eq!(weights.validate(), Ok(()));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let weights = ScoringWeights {
            gap_penalty: -0.1,
            ..Default::default()
        };
        assert_eq!(
            weights.validate(),
            Err(OptionsError::NegativeWeight {
                name: "gap_penalty",
                value: -0.1
            })
        );
    }

    #[test]
    fn nan_weight_is_rejected() {
        let weights = ScoringWeights {
            boundary_bonus: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(OptionsError::NonFiniteWeight {
                name: "boundary_bonus",
                ..
            })
        ));
    }

    #[test]
    fn infinite_weight_is_rejected() {
        let weights = ScoringWeights {
            length_penalty: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(OptionsError::NonFiniteWeight {
                name: "length_penalty",
                ..
            })
        ));
    }

    #[test]
    fn default_options() {
        let opts = RankOptions::default();
        assert!(!opts.keep_diacritics);
        assert!(!opts.split_terms);
        assert_eq!(opts.limit, None);
        assert_eq!(opts.min_score, None);
        assert_eq!(opts.validate(), Ok(()));
    }

    #[test]
    fn options_reject_nan_min_score() {
        let opts = RankOptions {
            min_score: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::NonFiniteMinScore(_))
        ));
    }

    #[test]
    fn options_propagate_weight_errors() {
        let opts = RankOptions {
            weights: ScoringWeights {
                match_char: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::NegativeWeight {
                name: "match_char",
                ..
            })
        ));
    }

    #[test]
    fn struct_update_syntax() {
        let opts = RankOptions {
            keep_diacritics: true,
            ..Default::default()
        };
        assert!(opts.keep_diacritics);
        assert_eq!(opts.weights, ScoringWeights::DEFAULT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_deserialize_with_missing_fields() {
        let opts: RankOptions =
            serde_json::from_str(r#"{ "limit": 5, "weights": { "gap_penalty": 0.4 } }"#)
                .expect("valid options json");
        assert_eq!(opts.limit, Some(5));
        assert_eq!(opts.weights.gap_penalty, 0.4);
        assert_eq!(opts.weights.boundary_bonus, 1.5);
        assert!(!opts.keep_diacritics);
    }
}
