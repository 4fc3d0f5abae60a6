//! Tag extraction utilities for parsing Nostr events
//!
//! Provides helper functions to reduce boilerplate when parsing tags from
//! events. Tags are ordered string arrays; only the first value after the
//! tag name is meaningful for the tags this client consumes.

use nostr_sdk::Event;

/// Extract a single string value from a tag by name.
/// Returns the first occurrence if multiple tags exist.
pub fn first_tag_value<'a>(event: &'a Event, tag_name: &str) -> Option<&'a str> {
    for tag in event.tags.iter() {
        let slice = tag.as_slice();
        if slice.first().map(|s| s.as_str()) == Some(tag_name) {
            return slice.get(1).map(|s| s.as_str());
        }
    }
    None
}

/// Extract all string values for a given tag name.
/// Useful for tags that appear multiple times (e.g., "t", "a", "r").
pub fn all_tag_values(event: &Event, tag_name: &str) -> Vec<String> {
    let mut values = Vec::new();
    for tag in event.tags.iter() {
        let slice = tag.as_slice();
        if slice.first().map(|s| s.as_str()) == Some(tag_name) {
            if let Some(value) = slice.get(1) {
                values.push(value.clone());
            }
        }
    }
    values
}
