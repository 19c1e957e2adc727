//! WASM browser tests for the JS-facing drill and timer handles.
//!
//! Run with: wasm-pack test --headless --chrome  (or --firefox / --node)
#![cfg(target_arch = "wasm32")]

use kana_shuffle::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_start_is_idempotent() {
    wasm_start();
    wasm_start();
    set_log_level("debug");
    set_log_level("nonsense");
}

#[wasm_bindgen_test]
fn test_fixed_grid() {
    let mut drill = KanaDrill::new("hiragana", false, "", "abc123", false);
    let grid = drill.grid(0);
    assert_eq!(grid.len(), GRID_SIZE);
    assert_eq!(&grid[..4], &[14, 1, 6, 42]);
    assert_eq!(drill.kana(1).as_deref(), Some("い"));
}

#[wasm_bindgen_test]
fn test_endless_more() {
    let mut drill = KanaDrill::new("katakana", true, "", "", true);
    assert_eq!(drill.grid(80).len(), 80);
    let more = drill.more(20);
    assert_eq!(more.len(), 20);
    assert_eq!(drill.grid(80).len(), 100);
    assert!(drill.seed_used().starts_with("day"));
}

#[wasm_bindgen_test]
fn test_set_strategy_rejects_unknown() {
    let mut drill = KanaDrill::new("hiragana", false, "", "x", false);
    assert!(drill.set_strategy("weighted").is_ok());
    assert!(drill.set_strategy("shuffle-harder").is_err());
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen_test]
fn test_from_json_errors() {
    assert!(KanaDrill::from_json("{not json").is_err());
    let mut drill = KanaDrill::from_json(r#"{"rows":["vowels"],"seed":"v"}"#).unwrap();
    assert_eq!(drill.pool_len(), 5);
    assert!(drill.cells_json().unwrap().contains("\"romaji\""));
}

#[wasm_bindgen_test]
fn test_seed_helpers() {
    assert_eq!(sanitize_seed("ABC-123"), "abc123");
    assert!(today_seed().starts_with("day"));
    assert_eq!(today_seed().len(), 11);
}

#[wasm_bindgen_test]
fn test_timer() {
    let mut timer = KanaTimer::new(3.0);
    assert_eq!(timer.display(), "00:03");
    timer.toggle();
    assert!(timer.running());
    assert!(!timer.tick());
    timer.pause();
    assert!(!timer.tick());
    assert_eq!(timer.remaining(), 2);
    timer.reset(Some("bad".into()));
    assert_eq!(timer.remaining(), 3);
}
