use crate::input::InputController;
use crate::submission::{ChatEpoch, RequestTicket, SubmissionPhase, SubmissionTransition};
use crate::transcript::Transcript;
use crate::turn::ChatTurn;

/// Everything the query client needs to answer one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub ticket: RequestTicket,
    pub message: String,
    /// Transcript as it was before the new user turn was appended.
    pub prior_transcript: Vec<ChatTurn>,
}

/// What happened to a reply handed back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Appended,
    DiscardedStale,
}

/// State of one chat window for the lifetime of the process.
///
/// All mutation goes through the methods below; the UI layer never edits the
/// transcript directly.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    transcript: Transcript,
    pending_input: String,
    phase: SubmissionPhase,
    sidebar_open: bool,
    epoch: ChatEpoch,
    next_sequence: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    pub fn awaiting_reply(&self) -> bool {
        self.phase.is_submitting()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn epoch(&self) -> ChatEpoch {
        self.epoch
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn can_submit(&self) -> bool {
        InputController::can_submit(&self.pending_input, self.awaiting_reply())
    }

    /// Hands the pending input off as a new user turn.
    ///
    /// Returns `None` without touching any state when the input is blank or a reply
    /// is still awaited. On success the pending input is cleared, the user turn is
    /// appended and the session waits for `complete_submission`.
    pub fn submit_pending(&mut self) -> Option<PendingQuery> {
        if !self.can_submit() {
            return None;
        }

        let ticket = RequestTicket::new(self.epoch, self.next_sequence);
        let next_phase = match self.phase.apply(SubmissionTransition::Begin(ticket)) {
            Ok(phase) => phase,
            Err(rejection) => {
                tracing::warn!(?rejection, "submission rejected by phase guard");
                return None;
            }
        };

        self.next_sequence = self.next_sequence.saturating_add(1);
        let message = std::mem::take(&mut self.pending_input);
        let prior_transcript = self.transcript.turns().to_vec();

        self.transcript.append(ChatTurn::user(message.clone()));
        self.phase = next_phase;

        Some(PendingQuery {
            ticket,
            message,
            prior_transcript,
        })
    }

    /// Settles the submission identified by `ticket` with the bot turn it produced.
    ///
    /// The session returns to idle either way. A reply requested before the last
    /// `start_new_chat` is not appended.
    pub fn complete_submission(&mut self, ticket: RequestTicket, reply: ChatTurn) -> ReplyOutcome {
        match self.phase.apply(SubmissionTransition::Settle(ticket)) {
            Ok(next_phase) => self.phase = next_phase,
            Err(rejection) => {
                tracing::warn!(?rejection, "reply does not match the active submission");
                return ReplyOutcome::DiscardedStale;
            }
        }

        if ticket.epoch != self.epoch {
            tracing::debug!(
                reply_epoch = ticket.epoch.0,
                current_epoch = self.epoch.0,
                "dropping reply addressed to a previous chat"
            );
            return ReplyOutcome::DiscardedStale;
        }

        self.transcript.append(reply);
        ReplyOutcome::Appended
    }

    /// Clears the transcript and closes the side panel.
    ///
    /// An outstanding request stays in flight: the session keeps awaiting it, so no
    /// second request can start, and its reply is dropped when it settles.
    pub fn start_new_chat(&mut self) {
        self.transcript = Transcript::new();
        self.sidebar_open = false;
        self.epoch = self.epoch.next();
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }
}
