//! Read-time resolution of multilingual translation blobs.
//!
//! The indexing pipeline carries name/description translations as verbatim
//! JSON strings and never validates them. Consumers that need a display
//! string call [`resolve_translation`] here; a malformed blob degrades to an
//! empty string rather than failing or discarding the document.

use serde_json::Value;

/// The language used when the requested one has no translation.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Pick the translation for `language` out of a JSON blob, falling back to
/// [`FALLBACK_LANGUAGE`] and then to the empty string.
///
/// Malformed JSON, non-object blobs and non-string values all resolve to
/// an empty string.
pub fn resolve_translation(blob: &str, language: &str) -> String {
    let parsed: Value = match serde_json::from_str(blob) {
        Ok(value) => value,
        Err(_) => return String::new(),
    };

    let map = match parsed.as_object() {
        Some(map) => map,
        None => return String::new(),
    };

    map.get(language)
        .or_else(|| map.get(FALLBACK_LANGUAGE))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_requested_language() {
        let blob = r#"{"en":"Kitchen","fr":"Cuisine"}"#;
        assert_eq!(resolve_translation(blob, "fr"), "Cuisine");
    }

    #[test]
    fn test_falls_back_to_default_language() {
        let blob = r#"{"en":"Kitchen"}"#;
        assert_eq!(resolve_translation(blob, "sw"), "Kitchen");
    }

    #[test]
    fn test_malformed_blob_resolves_to_empty() {
        assert_eq!(resolve_translation("not json at all", "en"), "");
        assert_eq!(resolve_translation(r#"{"en": 42}"#, "en"), "");
        assert_eq!(resolve_translation(r#"["en"]"#, "en"), "");
        assert_eq!(resolve_translation("", "en"), "");
    }

    #[test]
    fn test_missing_everything_resolves_to_empty() {
        assert_eq!(resolve_translation(r#"{"fr":"Cuisine"}"#, "sw"), "");
    }
}
