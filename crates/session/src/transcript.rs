use std::slice::Iter;

use crate::turn::ChatTurn;

/// Ordered, append-only history of the current chat.
///
/// Insertion order is display order. The only way to drop turns is to replace the
/// whole transcript, which `SessionState::start_new_chat` does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn iter(&self) -> Iter<'_, ChatTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Speaker;

    #[test]
    fn append_keeps_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.append(ChatTurn::user("first"));
        transcript.append(ChatTurn::bot("second"));
        transcript.append(ChatTurn::user("third"));

        let contents = transcript
            .iter()
            .map(|turn| turn.content.as_str())
            .collect::<Vec<_>>();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(transcript.turns()[2].speaker, Speaker::User);
    }

    #[test]
    fn duplicate_turns_are_kept() {
        let mut transcript = Transcript::new();
        transcript.append(ChatTurn::user("same"));
        transcript.append(ChatTurn::user("same"));

        assert_eq!(transcript.len(), 2);
    }
}
