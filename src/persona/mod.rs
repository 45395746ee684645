// src/persona/mod.rs
// Alva persona prompts used by the answer engines

pub mod alva;

pub use alva::{ALVA_REPLY_PROMPT, ALVA_REWRITE_PROMPT};

/// Which persona prompt an engine sends as its system message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaOverlay {
    /// Answer the conversation directly
    Reply,
    /// Restyle domain material into a tweet
    Rewrite,
}

impl PersonaOverlay {
    pub fn prompt(&self) -> &'static str {
        match self {
            PersonaOverlay::Reply => ALVA_REPLY_PROMPT,
            PersonaOverlay::Rewrite => ALVA_REWRITE_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_prompt_constraints() {
        let prompt = PersonaOverlay::Rewrite.prompt();
        assert!(prompt.contains("plain text"));
        assert!(prompt.contains("markdown"));
        assert!(prompt.contains("numbers"));
        assert!(prompt.contains("main language used in the response material"));
    }

    #[test]
    fn test_reply_prompt_is_alva() {
        assert!(PersonaOverlay::Reply.prompt().contains("You are Alva"));
    }
}
