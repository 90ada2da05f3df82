//! Pulling matchable strings out of caller items.
//!
//! A [`Key<T>`] borrows one or more strings from an item of type `T` (a
//! task's name, its list, its tags) and can shift every score it produces
//! by a constant [`bias`](Key::bias). [`Candidate<P>`] is the ready-made
//! item type for callers that just have an opaque payload and a few display
//! strings.

/// Boxed extractor closure stored inside a [`Key`].
type Extractor<T> = Box<dyn Fn(&T) -> Vec<&str>>;

/// Describes how to extract matchable strings from an item.
///
/// # Examples
///
/// ```
/// use tasksift::Key;
///
/// struct Task { name: String, list: String, tags: Vec<String> }
///
/// let keys = vec![
///     Key::new(|t: &Task| t.name.as_str()),
///     // List and tag hits count, but below a name hit.
///     Key::new(|t: &Task| t.list.as_str()).bias(-2.0),
///     Key::multi(|t: &Task| t.tags.iter().map(String::as_str).collect()).bias(-1.0),
/// ];
/// assert_eq!(keys.len(), 3);
/// ```
pub struct Key<T> {
    extractor: Extractor<T>,
    bias: f64,
}

impl<T> Key<T> {
    /// Create a key from a closure returning a single borrowed string.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> &str + 'static,
    {
        Self::multi(move |item| vec![f(item)])
    }

    /// Create a key from a closure returning several borrowed strings, such
    /// as a tags field. An empty vector means the item offers nothing to
    /// match through this key.
    pub fn multi<F>(f: F) -> Self
    where
        F: Fn(&T) -> Vec<&str> + 'static,
    {
        Self {
            extractor: Box::new(f),
            bias: 0.0,
        }
    }

    /// Add `bias` to every score produced through this key.
    ///
    /// A negative bias demotes secondary fields (subtitles, parent list
    /// names) below primary ones. Defaults to `0.0`. The empty query
    /// ignores bias: every item scores `0.0`.
    #[must_use]
    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// The score adjustment applied to this key's matches.
    pub fn bias_value(&self) -> f64 {
        self.bias
    }

    /// Extract this key's strings from `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasksift::Key;
    ///
    /// let key = Key::new(|s: &String| s.as_str());
    /// assert_eq!(key.extract(&"hello".to_owned()), vec!["hello"]);
    /// ```
    pub fn extract<'a>(&self, item: &'a T) -> Vec<&'a str> {
        (self.extractor)(item)
    }
}

/// Append every `(string, bias)` pair the `keys` extract from `item`, keys
/// in order and each key's strings in order. The position of a pair in
/// `out` is its `key_index`.
pub(crate) fn extract_values<'a, T>(item: &'a T, keys: &[Key<T>], out: &mut Vec<(&'a str, f64)>) {
    for key in keys {
        let bias = key.bias;
        out.extend(key.extract(item).into_iter().map(|value| (value, bias)));
    }
}

/// An opaque payload with the display strings to match it by.
///
/// The first text is the title; further texts (subtitle, parent list,
/// tags, ...) are matched too, the best-scoring one deciding the
/// candidate's score.
///
/// # Examples
///
/// ```
/// use tasksift::Candidate;
///
/// let candidate = Candidate::new("task-86a1", "Write release notes")
///     .with_text("Marketing / Launch");
/// assert_eq!(candidate.title(), "Write release notes");
/// assert_eq!(candidate.texts().len(), 2);
/// assert_eq!(candidate.payload, "task-86a1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<P> {
    /// Caller data handed back with the match (an id, an index, a URL...).
    pub payload: P,
    texts: Vec<String>,
}

impl<P> Candidate<P> {
    /// Create a candidate with a title.
    pub fn new(payload: P, title: impl Into<String>) -> Self {
        Self {
            payload,
            texts: vec![title.into()],
        }
    }

    /// Create a candidate from any number of texts, highest priority first.
    /// A candidate without texts only ever matches the empty query.
    pub fn from_texts<I, S>(payload: P, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            payload,
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }

    /// Append another text to match against.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.texts.push(text.into());
        self
    }

    /// All texts, title first.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// The first text, or `""` for a candidate without texts.
    pub fn title(&self) -> &str {
        self.texts.first().map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Task {
        name: String,
        list: String,
        tags: Vec<String>,
    }

    fn sample_task() -> Task {
        Task {
            name: "Fix login bug".to_owned(),
            list: "Backlog".to_owned(),
            tags: vec!["auth".to_owned(), "urgent".to_owned()],
        }
    }

    // --- Key ---

    #[test]
    fn new_extracts_single_value() {
        let key = Key::new(|t: &Task| t.name.as_str());
        assert_eq!(key.extract(&sample_task()), vec!["Fix login bug"]);
    }

    #[test]
    fn multi_extracts_all_values_in_order() {
        let key = Key::multi(|t: &Task| t.tags.iter().map(String::as_str).collect());
        assert_eq!(key.extract(&sample_task()), vec!["auth", "urgent"]);
    }

    #[test]
    fn multi_may_extract_nothing() {
        let key = Key::multi(|_: &Task| Vec::new());
        assert!(key.extract(&sample_task()).is_empty());
    }

    #[test]
    fn default_bias_is_zero() {
        let key = Key::new(|t: &Task| t.name.as_str());
        assert_eq!(key.bias_value(), 0.0);
    }

    #[test]
    fn bias_builder_sets_value() {
        let key = Key::new(|t: &Task| t.list.as_str()).bias(-1.5);
        assert_eq!(key.bias_value(), -1.5);
    }

    #[test]
    fn extract_values_flattens_keys_in_order() {
        let keys = vec![
            Key::new(|t: &Task| t.name.as_str()),
            Key::multi(|t: &Task| t.tags.iter().map(String::as_str).collect()).bias(-1.0),
            Key::new(|t: &Task| t.list.as_str()).bias(-2.0),
        ];
        let task = sample_task();
        let mut out = Vec::new();
        extract_values(&task, &keys, &mut out);
        assert_eq!(
            out,
            vec![
                ("Fix login bug", 0.0),
                ("auth", -1.0),
                ("urgent", -1.0),
                ("Backlog", -2.0),
            ]
        );
    }

    #[test]
    fn extract_values_with_no_keys() {
        let task = sample_task();
        let mut out = Vec::new();
        extract_values(&task, &[], &mut out);
        assert!(out.is_empty());
    }

    // --- Candidate ---

    #[test]
    fn candidate_new_has_title() {
        let candidate = Candidate::new(7u32, "Sprint planning");
        assert_eq!(candidate.title(), "Sprint planning");
        assert_eq!(candidate.texts(), &["Sprint planning".to_owned()]);
        assert_eq!(candidate.payload, 7);
    }

    #[test]
    fn candidate_with_text_appends() {
        let candidate = Candidate::new((), "Title").with_text("Subtitle");
        assert_eq!(
            candidate.texts(),
            &["Title".to_owned(), "Subtitle".to_owned()]
        );
    }

    #[test]
    fn candidate_from_texts() {
        let candidate = Candidate::from_texts("id", ["a", "b", "c"]);
        assert_eq!(candidate.texts().len(), 3);
        assert_eq!(candidate.title(), "a");
    }

    #[test]
    fn candidate_without_texts_has_empty_title() {
        let candidate = Candidate::from_texts("id", Vec::<String>::new());
        assert_eq!(candidate.title(), "");
        assert!(candidate.texts().is_empty());
    }
}
