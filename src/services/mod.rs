pub mod ai_service;
pub mod completion_parser;
pub mod groq; // Groq chat completions
pub mod prompt;

pub use ai_service::CompletionService;
pub use completion_parser::parse_completion;
pub use groq::GroqService;
pub use prompt::build_meal_prompt;
