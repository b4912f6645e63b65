use serde::Serialize;
use serde_json::Value;

/// Outcome of one extraction pass over a raw model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    Parsed(Value),
    Failed(FailReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    /// The text contains nothing resembling JSON (no `{` anywhere).
    NoJsonStartFound,
    /// A JSON-looking substring exists but does not decode (e.g. truncated
    /// by a token limit).
    MalformedJson,
}

impl FailReason {
    pub fn code(&self) -> &'static str {
        match self {
            FailReason::NoJsonStartFound => "no_json_start_found",
            FailReason::MalformedJson => "malformed_json",
        }
    }
}

/// Best-effort JSON extraction from model output.
///
/// Models asked for JSON-only output still routinely wrap it in prose or
/// markdown fences, so a single strict decode has too high a false-negative
/// rate. Ordered attempts, first success wins:
/// 1. strip surrounding ``` fences (optional language tag) and trim,
/// 2. decode the whole remaining text,
/// 3. otherwise decode from the first `{` to the end.
///
/// No repair of malformed JSON (trailing commas etc.) is attempted; that
/// would risk fabricating data the model never produced.
pub fn extract(raw: &str) -> ExtractionResult {
    let text = strip_fences(raw);

    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return ExtractionResult::Parsed(v);
    }

    let start = match text.find('{') {
        Some(i) => i,
        None => return ExtractionResult::Failed(FailReason::NoJsonStartFound),
    };

    match serde_json::from_str::<Value>(&text[start..]) {
        Ok(v) => ExtractionResult::Parsed(v),
        Err(_) => ExtractionResult::Failed(FailReason::MalformedJson),
    }
}

/// Remove a surrounding markdown fence pair, if present. The leading fence
/// may carry a language hint (```json); anything up to the first newline is
/// treated as part of the fence line.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let rest = match trimmed.strip_prefix("```") {
        Some(r) => r,
        None => return trimmed,
    };
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(raw: &str) -> Value {
        match extract(raw) {
            ExtractionResult::Parsed(v) => v,
            other => panic!("expected Parsed for {:?}, got {:?}", raw, other),
        }
    }

    fn failed(raw: &str) -> FailReason {
        match extract(raw) {
            ExtractionResult::Failed(r) => r,
            other => panic!("expected Failed for {:?}, got {:?}", raw, other),
        }
    }

    #[test]
    fn bare_minimal_json_decodes_whole() {
        assert_eq!(parsed(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn non_object_values_decode_whole() {
        assert_eq!(parsed("[1,2,3]"), json!([1, 2, 3]));
        assert_eq!(parsed("42"), json!(42));
    }

    #[test]
    fn fenced_json_with_language_tag() {
        assert_eq!(parsed("```json\n{\"a\":1}\n```"), json!({"a": 1}));
    }

    #[test]
    fn fenced_json_without_language_tag() {
        assert_eq!(parsed("```\n{\"a\":1}\n```"), json!({"a": 1}));
    }

    #[test]
    fn single_line_fence() {
        assert_eq!(parsed("```json {\"a\":1} ```"), json!({"a": 1}));
    }

    #[test]
    fn prose_prefix_falls_back_to_first_brace() {
        let v = parsed(r#"Sure! Here is your itinerary: {"title":"Paris Trip","days":[]}"#);
        assert_eq!(v, json!({"title": "Paris Trip", "days": []}));
    }

    #[test]
    fn refusal_text_has_no_json_start() {
        assert_eq!(failed("Sorry, I cannot comply."), FailReason::NoJsonStartFound);
    }

    #[test]
    fn empty_and_whitespace_inputs() {
        assert_eq!(failed(""), FailReason::NoJsonStartFound);
        assert_eq!(failed("  \n\t "), FailReason::NoJsonStartFound);
    }

    #[test]
    fn truncated_object_is_malformed() {
        assert_eq!(failed(r#"{"title":"Rome"#), FailReason::MalformedJson);
        assert_eq!(failed(r#"{"title": "Trip"#), FailReason::MalformedJson);
    }

    #[test]
    fn prose_with_truncated_object_is_malformed() {
        assert_eq!(
            failed(r#"Here you go: {"days": [{"day": 1,"#),
            FailReason::MalformedJson
        );
    }

    #[test]
    fn round_trip_is_stable() {
        let v = parsed("```json\n{\"title\":\"Paris Trip\",\"days\":[{\"day\":1}]}\n```");
        let reserialized = serde_json::to_string(&v).unwrap();
        assert_eq!(parsed(&reserialized), v);
    }

    #[test]
    fn failure_codes_are_machine_readable() {
        assert_eq!(FailReason::NoJsonStartFound.code(), "no_json_start_found");
        assert_eq!(FailReason::MalformedJson.code(), "malformed_json");
        assert_eq!(
            serde_json::to_value(FailReason::MalformedJson).unwrap(),
            json!("malformed_json")
        );
    }
}
