use serde_json::Value;

use crate::models::{AnalysisError, AnalysisErrorKind};

/// Decode a model completion into JSON, best effort.
///
/// The whole trimmed text is tried first. Failing that, the slice from the
/// first `{` to the last `}` is tried. That slice may cover several objects
/// and whatever sits between them. Decoded values are returned untouched;
/// the keys are never checked.
pub fn parse_completion(response_text: &str) -> Result<Value, AnalysisError> {
    let cleaned = response_text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Ok(value);
    }

    let Some(span) = brace_span(cleaned) else {
        log::warn!("⚠️ No JSON object found in model response");
        return Err(AnalysisError::new(AnalysisErrorKind::JsonNotFound, response_text));
    };

    match serde_json::from_str::<Value>(span) {
        Ok(value) => {
            log::debug!("🧹 Recovered JSON from surrounding text");
            Ok(value)
        }
        Err(e) => {
            log::warn!("⚠️ Extracted span is not valid JSON: {}", e);
            Err(AnalysisError::new(AnalysisErrorKind::InvalidJson, response_text))
        }
    }
}

/// Slice from the first `{` through the last `}`, inclusive.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
