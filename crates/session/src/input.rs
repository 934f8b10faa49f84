/// Enter key press as seen by the message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnterKey {
    pub shift: bool,
}

impl EnterKey {
    pub const fn plain() -> Self {
        Self { shift: false }
    }

    pub const fn with_shift() -> Self {
        Self { shift: true }
    }
}

/// What the message input should do with an Enter press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterAction {
    Submit,
    InsertNewline,
    Ignore,
}

/// Keyboard gating for the message input.
///
/// The pending text itself lives in `SessionState`; this type only decides whether a
/// key press may turn into a submission. While an IME composition is open, Enter
/// commits the composed characters and must never submit.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    composing: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors the editor's IME state: marked (uncommitted) text means a composition
    /// is open.
    pub fn sync_composition(&mut self, has_marked_text: bool) {
        self.composing = has_marked_text;
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn key_enter(&self, key: EnterKey) -> EnterAction {
        if self.composing {
            EnterAction::Ignore
        } else if key.shift {
            EnterAction::InsertNewline
        } else {
            EnterAction::Submit
        }
    }

    /// Submission is allowed only for non-blank text and only when no reply is awaited.
    pub fn can_submit(text: &str, awaiting_reply: bool) -> bool {
        !awaiting_reply && !text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_enter_submits_and_shift_enter_breaks_line() {
        let controller = InputController::new();

        assert_eq!(controller.key_enter(EnterKey::plain()), EnterAction::Submit);
        assert_eq!(
            controller.key_enter(EnterKey::with_shift()),
            EnterAction::InsertNewline
        );
    }

    #[test]
    fn enter_is_ignored_during_composition() {
        let mut controller = InputController::new();
        controller.sync_composition(true);

        assert!(controller.is_composing());
        assert_eq!(controller.key_enter(EnterKey::plain()), EnterAction::Ignore);
        assert_eq!(controller.key_enter(EnterKey::with_shift()), EnterAction::Ignore);

        controller.sync_composition(false);
        assert_eq!(controller.key_enter(EnterKey::plain()), EnterAction::Submit);
    }

    #[test]
    fn blank_or_busy_input_cannot_submit() {
        assert!(InputController::can_submit("hello", false));
        assert!(!InputController::can_submit("", false));
        assert!(!InputController::can_submit(" \n\t ", false));
        assert!(!InputController::can_submit("hello", true));
    }
}
