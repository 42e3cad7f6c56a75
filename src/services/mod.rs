pub mod chatbot;
pub mod fallback;
pub mod providers;
