use clinical_session::{ChatTurn, PendingQuery, ReplyOutcome, RequestTicket, SessionState};
use gpui::*;

use crate::chat::events::SessionChanged;

/// Shared handle to the window's `SessionState`.
///
/// The shell, the sidebar and the chat view all hold the same entity and mutate it
/// only through these setters, which emit `SessionChanged` so dependants re-render.
pub struct ChatSession {
    state: SessionState,
}

impl EventEmitter<SessionChanged> for ChatSession {}

impl ChatSession {
    pub fn new(cx: &mut App) -> Entity<Self> {
        cx.new(|_| Self {
            state: SessionState::new(),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>, _cx: &mut Context<Self>) {
        self.state.set_pending_input(text);
    }

    pub fn submit_pending(&mut self, cx: &mut Context<Self>) -> Option<PendingQuery> {
        let pending = self.state.submit_pending()?;
        cx.emit(SessionChanged::Transcript);
        cx.emit(SessionChanged::Awaiting);
        cx.notify();
        Some(pending)
    }

    pub fn complete_submission(
        &mut self,
        ticket: RequestTicket,
        reply: ChatTurn,
        cx: &mut Context<Self>,
    ) -> ReplyOutcome {
        let was_awaiting = self.state.awaiting_reply();
        let outcome = self.state.complete_submission(ticket, reply);
        if outcome == ReplyOutcome::Appended {
            cx.emit(SessionChanged::Transcript);
        }
        if was_awaiting != self.state.awaiting_reply() {
            cx.emit(SessionChanged::Awaiting);
        }
        cx.notify();
        outcome
    }

    pub fn start_new_chat(&mut self, cx: &mut Context<Self>) {
        self.state.start_new_chat();
        tracing::info!(epoch = self.state.epoch().0, "started new chat");
        cx.emit(SessionChanged::Transcript);
        cx.emit(SessionChanged::Sidebar);
        cx.notify();
    }

    pub fn toggle_sidebar(&mut self, cx: &mut Context<Self>) {
        self.state.toggle_sidebar();
        cx.emit(SessionChanged::Sidebar);
        cx.notify();
    }

    pub fn close_sidebar(&mut self, cx: &mut Context<Self>) {
        if !self.state.is_sidebar_open() {
            return;
        }
        self.state.close_sidebar();
        cx.emit(SessionChanged::Sidebar);
        cx.notify();
    }
}
