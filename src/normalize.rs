//! Case and diacritics folding with token-boundary detection.
//!
//! [`normalize`] turns a string into a [`NormalizedText`]: the lowercase,
//! optionally diacritic-free characters the matcher compares against, plus
//! two parallel tables the scorer needs. `origins` maps every folded
//! character back to the index of the original character it came from, so
//! highlight positions survive folding that changes the character count.
//! `boundaries` flags folded characters that start a token.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Coarse character class used to find token boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    /// Alphabetic without case (CJK, Arabic, ...).
    Letter,
    Digit,
    Separator,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphanumeric() {
            CharClass::Letter
        } else {
            CharClass::Separator
        }
    }
}

/// Returns whether a character of class `cur` starts a token when preceded
/// by a character of class `prev` (`None` at the start of the string).
fn starts_token(prev: Option<CharClass>, cur: CharClass) -> bool {
    match (prev, cur) {
        (None, _) => true,
        (_, CharClass::Separator) => false,
        (Some(CharClass::Separator), _) => true,
        (Some(CharClass::Lower), CharClass::Upper) => true,
        (Some(prev), CharClass::Digit) => prev != CharClass::Digit,
        _ => false,
    }
}

/// A string folded for comparison.
///
/// Built by [`normalize`]. All three tables have one entry per folded
/// character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    folded: String,
    chars: Vec<char>,
    origins: Vec<usize>,
    boundaries: Vec<bool>,
}

impl NormalizedText {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            folded: String::with_capacity(capacity),
            chars: Vec::with_capacity(capacity),
            origins: Vec::with_capacity(capacity),
            boundaries: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, c: char, origin: usize, boundary: bool) {
        self.folded.push(c);
        self.chars.push(c);
        self.origins.push(origin);
        self.boundaries.push(boundary);
    }

    /// The folded text.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// The folded characters.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// For every folded character, the index (in `char`s) of the original
    /// character it was produced from.
    pub fn origins(&self) -> &[usize] {
        &self.origins
    }

    /// For every folded character, whether it starts a token.
    pub fn boundaries(&self) -> &[bool] {
        &self.boundaries
    }

    /// Number of folded characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` when folding produced no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns `true` when the folded text is pure ASCII. Byte offsets and
    /// character indices then coincide.
    pub fn is_ascii(&self) -> bool {
        self.folded.is_ascii()
    }
}

/// Fold `text` for comparison.
///
/// Every character is lowercased. Unless `keep_diacritics` is set, it is
/// first canonically decomposed and its combining marks are dropped, so
/// "Café" and "cafe\u{0301}" both fold to "cafe". Hangul syllables are
/// never decomposed.
///
/// Token boundaries are decided on the original characters (case matters
/// for camelCase) and attached to the first folded character each original
/// character produces. A character starts a token when it is the first
/// character of the string, follows a separator (whitespace, punctuation,
/// symbols), is an uppercase letter after a lowercase one, or is a digit
/// after a non-digit. Combining marks are transparent to that decision.
///
/// # Examples
///
/// ```
/// use tasksift::normalize::normalize;
///
/// let text = normalize("Café Menu", false);
/// assert_eq!(text.as_str(), "cafe menu");
/// assert_eq!(text.boundaries()[5], true);
///
/// let text = normalize("cafe\u{0301}!", false);
/// assert_eq!(text.as_str(), "cafe!");
/// // '!' is the sixth original char; the dropped accent was the fifth.
/// assert_eq!(text.origins()[4], 5);
/// ```
pub fn normalize(text: &str, keep_diacritics: bool) -> NormalizedText {
    if text.is_ascii() {
        return normalize_ascii(text);
    }

    let mut out = NormalizedText::with_capacity(text.len());
    let mut prev: Option<CharClass> = None;

    for (index, c) in text.chars().enumerate() {
        if is_combining_mark(c) {
            // A mark never starts a token and does not reset the class of
            // the character it decorates.
            if keep_diacritics {
                out.push(c, index, false);
            }
            continue;
        }

        let class = CharClass::of(c);
        let mut boundary = starts_token(prev, class);
        prev = Some(class);

        if keep_diacritics || is_hangul_syllable(c) {
            for lower in c.to_lowercase() {
                out.push(lower, index, boundary);
                boundary = false;
            }
        } else {
            decompose_canonical(c, |base| {
                if is_combining_mark(base) {
                    return;
                }
                // Lowercasing can itself produce marks ('İ' -> "i\u{0307}").
                for lower in base.to_lowercase().filter(|l| !is_combining_mark(*l)) {
                    out.push(lower, index, boundary);
                    boundary = false;
                }
            });
        }
    }

    out
}

/// Precomposed Hangul syllables decompose into conjoining jamo, which are
/// letters rather than marks; they are kept whole so one syllable stays one
/// character.
fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// ASCII fast path: no decomposition, one folded byte per input byte.
fn normalize_ascii(text: &str) -> NormalizedText {
    let mut out = NormalizedText::with_capacity(text.len());
    let mut prev: Option<CharClass> = None;
    for (index, &b) in text.as_bytes().iter().enumerate() {
        let c = b as char;
        let class = CharClass::of(c);
        out.push(c.to_ascii_lowercase(), index, starts_token(prev, class));
        prev = Some(class);
    }
    out
}
