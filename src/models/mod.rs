use serde::{Deserialize, Serialize};

/// Body of `POST /analyze_meal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealQuery {
    pub dish_name: String,
}

/// Shape the model is asked to reply with. Replies are never validated
/// against it; it only gives typed access when a reply happens to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAnalysis {
    pub dish_name: String,
    pub ingredients: Vec<String>,
    pub macros: Macros,
    pub analysis_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MealAnalysis {
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    /// A brace span was found but it did not decode.
    InvalidJson,
    /// No `{...}` span in the reply.
    JsonNotFound,
}

impl AnalysisErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            AnalysisErrorKind::InvalidJson => "Model returned invalid JSON, please try again.",
            AnalysisErrorKind::JsonNotFound => "Unable to extract JSON from response.",
        }
    }
}

impl std::fmt::Display for AnalysisErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AnalysisErrorKind::InvalidJson => "invalid_json",
            AnalysisErrorKind::JsonNotFound => "json_not_found",
        };
        write!(f, "{}", s)
    }
}

/// Failure body returned when the model reply could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisError {
    #[serde(skip)]
    pub kind: AnalysisErrorKind,
    pub error: String,
    pub raw_response: String,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, raw_response: &str) -> Self {
        Self {
            kind,
            error: kind.message().to_string(),
            raw_response: raw_response.to_string(),
        }
    }
}

/// Either the decoded model reply, verbatim, or an [`AnalysisError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Analysis(serde_json::Value),
    Failed(AnalysisError),
}

impl From<Result<serde_json::Value, AnalysisError>> for AnalysisOutcome {
    fn from(result: Result<serde_json::Value, AnalysisError>) -> Self {
        match result {
            Ok(value) => AnalysisOutcome::Analysis(value),
            Err(err) => AnalysisOutcome::Failed(err),
        }
    }
}
