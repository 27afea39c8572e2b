pub mod meal_analyzer;

pub use meal_analyzer::MealAnalyzer;
