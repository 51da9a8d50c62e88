//! Move sources: a person at a terminal and an LLM opponent.

mod console;
mod llm;
mod timeout;

pub use console::{ConsoleSource, prompt_mark};
pub use llm::LlmSource;
pub use timeout::TimeoutSource;
