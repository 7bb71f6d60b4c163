//! Integration tests for loading a saved index and querying it

use siteseek::index::{IndexStore, InvertedIndex, Occurrence, StoreError};
use siteseek::query::{paginate, QueryEngine};
use std::fs;
use tempfile::TempDir;

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

fn write_index_file(dir: &TempDir, json: &str) -> IndexStore {
    let path = dir.path().join("index.json");
    fs::write(&path, json).unwrap();
    IndexStore::new(path)
}

#[test]
fn test_query_hand_written_index_file() {
    let dir = TempDir::new().unwrap();
    let store = write_index_file(
        &dir,
        r#"{
            "good": ["https://q.example/a|0", "https://q.example/b|4", "https://q.example/a|2"],
            "friends": ["https://q.example/a|1", "https://q.example/c|0"]
        }"#,
    );

    let index = store.load().unwrap();
    assert_eq!(index.len(), 2);

    let rows = QueryEngine::new(&index).find(&["good", "friends"]);
    let urls: Vec<&str> = rows.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://q.example/a", "https://q.example/b", "https://q.example/c"]
    );

    // good@0, friends@1, good@2: two adjacent pairs
    assert_eq!((rows[0].hits, rows[0].count, rows[0].adjacency), (2, 3, 2));
}

#[test]
fn test_url_containing_separator_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path().join("index.json"));

    let mut index = InvertedIndex::new();
    index.index_page("https://q.example/search?q=a|b", &words("pipes everywhere"));
    store.save(&index).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(
        loaded.occurrences("everywhere"),
        Some(&[Occurrence::new("https://q.example/search?q=a|b", 1)][..])
    );
}

#[test]
fn test_saved_file_is_json_object_of_strings() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path().join("nested").join("index.json"));

    let mut index = InvertedIndex::new();
    index.index_page("https://q.example/", &words("quick brown fox"));
    store.save(&index).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["brown"], serde_json::json!(["https://q.example/|1"]));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path().join("absent.json"));

    let err = store.load().unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_malformed_occurrence_rejected() {
    let dir = TempDir::new().unwrap();
    let store = write_index_file(&dir, r#"{"word": ["no-separator-here"]}"#);

    assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
}

#[test]
fn test_repeated_token_rejected() {
    let dir = TempDir::new().unwrap();
    let store = write_index_file(&dir, r#"{"a": ["u|0"], "a": ["v|1"]}"#);

    assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
}

#[test]
fn test_wrong_shape_rejected() {
    let dir = TempDir::new().unwrap();
    let store = write_index_file(&dir, r#"["not", "an", "object"]"#);

    assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
}

#[test]
fn test_results_paginate_in_rank_order() {
    let mut index = InvertedIndex::new();
    for i in 0..45 {
        index.index_page(&format!("https://q.example/{:02}", i), &words("term"));
    }

    let rows = QueryEngine::new(&index).find(&["term"]);
    let pages: Vec<_> = paginate(&rows, 40).collect();

    assert_eq!(pages.len(), 2);
    assert!(pages[0].is_full);
    assert_eq!(pages[1].first_rank, 41);
    assert_eq!(pages[1].rows[0].url, "https://q.example/40");
}
