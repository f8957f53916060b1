pub mod chatbot;
pub mod prompt;
pub mod provider;
pub mod risk;
