//! Embedded chat + map page served at `/`.
//!
//! The page keeps the conversation in a single state object, posts the full
//! history to `/api/chat` and replaces the map pins with the returned markers.

pub mod index;

const MAPS_KEY_PLACEHOLDER: &str = "__GOOGLE_MAPS_API_KEY__";

/// Google Maps browser keys are plain `[A-Za-z0-9_-]` tokens. Anything else is
/// dropped so the value cannot break out of the script string.
fn sanitize_key(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

pub fn render_index(maps_api_key: &str) -> String {
    index::INDEX_HTML.replace(MAPS_KEY_PLACEHOLDER, &sanitize_key(maps_api_key))
}
