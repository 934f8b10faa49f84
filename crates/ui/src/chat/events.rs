/// Emitted on every keystroke that changes the message input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputChanged {
    pub text: String,
}

/// Emitted when the user asks to send the current input.
///
/// Carries the text at the moment of the request so the session sees exactly what
/// was on screen, even if no change event preceded the key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub content: String,
}

impl Submit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Emitted by the session entity after any observable change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionChanged {
    Transcript,
    Awaiting,
    Sidebar,
}
