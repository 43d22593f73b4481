// Host-side tests for DOM constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct_and_selector_safe() {
    let ids = [CANVAS_ID, SETTINGS_PANEL_ID, DOWNLOAD_BUTTON_ID, PROFILE_BUTTON_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn external_links_are_absolute() {
    assert!(PROFILE_URL.starts_with("https://"));
    assert!(DOWNLOAD_HREF.starts_with('/'));
    assert!(DOWNLOAD_HREF.ends_with(DOWNLOAD_FILENAME));
    assert!(COMPANION_ATTR.starts_with("data-"));
}
