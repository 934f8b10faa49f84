/// Fixed bot reply shown whenever a query cannot be answered.
pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn is_user(self) -> bool {
        matches!(self, Self::User)
    }
}

/// One message in the transcript. Turns are never edited after they are appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub content: String,
}

impl ChatTurn {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Speaker::Bot, content)
    }

    /// Bot turn used in place of a reply when the query fails for any reason.
    pub fn apology() -> Self {
        Self::bot(APOLOGY_MESSAGE)
    }
}
