use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::error::Elapsed;

use crate::models::{AnalysisOutcome, MealAnalysis};
use crate::services::{build_meal_prompt, parse_completion, CompletionService};

/// Turns a dish name into a nutritional estimate using the injected model.
pub struct MealAnalyzer {
    model: Arc<dyn CompletionService>,
    timeout: Duration,
}

impl MealAnalyzer {
    pub fn new(model: Arc<dyn CompletionService>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Model transport failures are returned as `Err`. Unparseable replies
    /// are not errors here; they come back as [`AnalysisOutcome::Failed`].
    pub async fn analyze_meal(&self, dish_name: &str) -> Result<AnalysisOutcome> {
        log::info!("🍽️ Analyzing meal: {}", dish_name);

        let prompt = build_meal_prompt(dish_name);
        let response_text = tokio::time::timeout(self.timeout, self.model.complete(&prompt))
            .await
            .with_context(|| format!("Model call timed out after {:?}", self.timeout))?
            .context("Model completion failed")?;

        let outcome = AnalysisOutcome::from(parse_completion(&response_text));

        match &outcome {
            AnalysisOutcome::Analysis(value) => match MealAnalysis::from_value(value) {
                Some(meal) => log::info!(
                    "✅ {}: {} kcal, {} ingredients",
                    meal.dish_name,
                    meal.macros.calories,
                    meal.ingredients.len()
                ),
                None => log::warn!("⚠️ Model reply parsed but does not match the expected shape"),
            },
            AnalysisOutcome::Failed(err) => {
                log::warn!("⚠️ Meal analysis failed ({}) for: {}", err.kind, dish_name)
            }
        }

        Ok(outcome)
    }
}

/// Whether `err` was caused by the model call exceeding its deadline.
pub fn is_timeout(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<Elapsed>())
}
