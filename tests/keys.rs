//! Integration tests for key extraction and per-key bias.
//!
//! Uses a realistic `Task` with a name, a parent list and tags, ranked
//! through [`tasksift::rank_by`] and a [`tasksift::Ranker`].

use tasksift::{Key, MatchResult, RankOptions, Ranker, rank_by};

// ---------------------------------------------------------------------------
// Shared test fixtures
// ---------------------------------------------------------------------------

/// A task with single- and multi-valued matchable fields.
#[derive(Debug, PartialEq)]
struct Task {
    name: String,
    list: String,
    tags: Vec<String>,
}

impl Task {
    fn new(name: &str, list: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            list: list.to_owned(),
            tags: tags.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("Fix login bug", "Backlog", &["auth", "urgent"]),
        Task::new("Update pricing page", "Website", &["marketing"]),
        Task::new("Quarterly taxes", "Finance", &[]),
    ]
}

/// Name first, then tags one point down, then the list two points down.
fn task_keys() -> Vec<Key<Task>> {
    vec![
        Key::new(|t: &Task| t.name.as_str()),
        Key::multi(|t: &Task| t.tags.iter().map(String::as_str).collect()).bias(-1.0),
        Key::new(|t: &Task| t.list.as_str()).bias(-2.0),
    ]
}

fn names<'a>(results: &[MatchResult<'a, Task>]) -> Vec<&'a str> {
    results.iter().map(|r| r.item.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// key_index and matched_value
// ---------------------------------------------------------------------------

#[test]
fn name_hit_reports_first_key_index() {
    let tasks = sample_tasks();
    let results = rank_by("login", &tasks, &task_keys(), &RankOptions::default());
    assert_eq!(names(&results), vec!["Fix login bug"]);
    assert_eq!(results[0].key_index, 0);
    assert_eq!(results[0].matched_value, "Fix login bug");
    assert_eq!(results[0].positions, vec![4, 5, 6, 7, 8]);
}

#[test]
fn multi_value_key_indices_are_flattened() {
    // name = 0, "auth" = 1, "urgent" = 2, list = 3.
    let tasks = sample_tasks();
    let results = rank_by("urg", &tasks, &task_keys(), &RankOptions::default());
    // "Update pricing page" matches too, scattered and far below.
    assert_eq!(names(&results), vec!["Fix login bug", "Update pricing page"]);
    assert_eq!(results[0].key_index, 2);
    assert_eq!(results[0].matched_value, "urgent");
}

#[test]
fn empty_multi_value_shifts_nothing() {
    // No tags, so the list sits right after the name.
    let tasks = sample_tasks();
    let results = rank_by("fin", &tasks, &task_keys(), &RankOptions::default());
    let taxes = results
        .iter()
        .find(|r| r.item.name == "Quarterly taxes")
        .unwrap();
    assert_eq!(taxes.key_index, 1);
    assert_eq!(taxes.matched_value, "Finance");
}

#[test]
fn empty_query_reports_first_value() {
    let tasks = sample_tasks();
    let results = rank_by("", &tasks, &task_keys(), &RankOptions::default());
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.key_index == 0 && r.score == 0.0));
    assert_eq!(results[1].matched_value, "Update pricing page");
}

// ---------------------------------------------------------------------------
// Bias
// ---------------------------------------------------------------------------

#[test]
fn bias_shifts_score_exactly() {
    let tasks = vec![Task::new("zzz", "Backlog", &[])];
    let unbiased = vec![Key::new(|t: &Task| t.list.as_str())];
    let biased = vec![Key::new(|t: &Task| t.list.as_str()).bias(-2.0)];

    let plain = rank_by("back", &tasks, &unbiased, &RankOptions::default());
    let shifted = rank_by("back", &tasks, &biased, &RankOptions::default());
    assert!((plain[0].score - 2.0 - shifted[0].score).abs() < 1e-9);
}

#[test]
fn bias_picks_between_keys_of_one_item() {
    // Both keys hold the same text; the unbiased one must win.
    let tasks = vec![Task::new("Backlog", "Backlog", &[])];
    let keys = vec![
        Key::new(|t: &Task| t.list.as_str()).bias(-1.0),
        Key::new(|t: &Task| t.name.as_str()),
    ];
    let results = rank_by("back", &tasks, &keys, &RankOptions::default());
    assert_eq!(results[0].key_index, 1);
}

#[test]
fn positive_bias_promotes() {
    let tasks = vec![
        Task::new("Backlog grooming", "Meetings", &[]),
        Task::new("Write docs", "Backlog", &[]),
    ];
    let keys = vec![
        Key::new(|t: &Task| t.name.as_str()),
        Key::new(|t: &Task| t.list.as_str()).bias(5.0),
    ];
    let results = rank_by("backlog", &tasks, &keys, &RankOptions::default());
    assert_eq!(names(&results), vec!["Write docs", "Backlog grooming"]);
}

#[test]
fn min_score_sees_biased_score() {
    let tasks = sample_tasks();
    let opts = RankOptions {
        min_score: Some(0.0),
        ..Default::default()
    };
    let keys = vec![Key::new(|t: &Task| t.list.as_str()).bias(-100.0)];
    assert!(rank_by("back", &tasks, &keys, &opts).is_empty());
}

// ---------------------------------------------------------------------------
// Ranker with keys
// ---------------------------------------------------------------------------

#[test]
fn ranker_rank_by_matches_free_function() {
    let tasks = sample_tasks();
    let keys = task_keys();
    let mut ranker = Ranker::new(RankOptions::default()).unwrap();
    for query in ["", "a", "fix", "urg", "web", "fin", "zz"] {
        assert_eq!(
            ranker.rank_by(query, &tasks, &keys),
            rank_by(query, &tasks, &keys, &RankOptions::default()),
            "query {query:?}"
        );
    }
}
