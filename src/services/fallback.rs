// src/services/fallback.rs

pub const FALLBACK_LABEL: &str = "Smart Fallback";

const CANNED_REPLIES: &[(&str, &str)] = &[
    ("hello", "Hello! I'm your AI assistant. How can I help?"),
    ("hi", "Hi there! I'm here to assist you with anything."),
    ("who are you", "I'm your personal AI assistant."),
    ("what is your name", "I'm your AI assistant, here to help."),
    ("help", "I can answer questions, help with coding, explain concepts, and more!"),
    ("thank you", "You're welcome! Happy to help."),
    ("bye", "Goodbye! Come back anytime you need assistance."),
    ("2+2", "2 + 2 = 4"),
    ("capital of france", "The capital of France is Paris."),
    ("how are you", "I'm doing great! Ready to help you."),
    ("what can you do", "I can chat, answer questions, help with learning, writing, and more!"),
];

pub fn canned_reply(message: &str) -> Option<&'static str> {
    let normalized = message.trim().to_lowercase();
    CANNED_REPLIES
        .iter()
        .find(|(question, _)| *question == normalized)
        .map(|(_, answer)| *answer)
}

/// Reply for a transient provider failure: a canned answer if one matches,
/// otherwise an apology that echoes the message back.
pub fn transient_reply(message: &str) -> String {
    match canned_reply(message) {
        Some(answer) => answer.to_string(),
        None => format!(
            "You asked: \"{}\". Sorry, the AI service is unavailable right now, please try again shortly.",
            message.trim()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_lookup_ignores_case_and_padding() {
        assert_eq!(canned_reply("  Capital of FRANCE "), Some("The capital of France is Paris."));
        assert_eq!(canned_reply("2+2"), Some("2 + 2 = 4"));
        assert_eq!(canned_reply("hello there"), None);
    }

    #[test]
    fn unknown_message_is_echoed() {
        let reply = transient_reply("What is Rust?");
        assert!(reply.contains("You asked: \"What is Rust?\""));
    }
}
