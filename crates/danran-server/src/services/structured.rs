//! Lenient parsing of structured model output
//!
//! The generation service is asked for JSON but is free to wrap it in code
//! fences or prose. Parsing never panics; failure is a `None` the caller
//! turns into a typed skip.

use serde_json::Value;

/// Extract the outermost JSON object embedded in free-form text.
///
/// Strips Markdown code fences, then takes the slice between the first `{`
/// and the last `}`. Returns `None` when no parseable object is present.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let cleaned = strip_code_fences(text);

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&cleaned[start..=end])
        .ok()
        .filter(Value::is_object)
}

fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a string field, tolerating absence
pub fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read a string-array field, tolerating absence and mixed types
pub fn string_list_field(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let value = extract_json_object(r#"{"activity": "散歩"}"#).unwrap();
        assert_eq!(string_field(&value, "activity"), "散歩");
    }

    #[test]
    fn test_fenced_object_with_prose() {
        let text = "はい、こちらです。\n```json\n{\"traits\": [\"優しい\", \"元気\"]}\n```";
        let value = extract_json_object(text).unwrap();
        assert_eq!(
            string_list_field(&value, "traits"),
            vec!["優しい".to_string(), "元気".to_string()]
        );
    }

    #[test]
    fn test_non_json_is_none() {
        assert!(extract_json_object("ごめんなさい、わかりません。").is_none());
        assert!(extract_json_object("").is_none());
    }

    #[test]
    fn test_truncated_json_is_none() {
        assert!(extract_json_object(r#"{"activity": "散歩""#).is_none());
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let value = extract_json_object("{}").unwrap();
        assert_eq!(string_field(&value, "activity"), "");
        assert!(string_list_field(&value, "emotions").is_empty());
    }
}
