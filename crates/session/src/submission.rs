/// Generation counter for the chat. Bumped by every "new chat" so replies that were
/// requested for an older chat can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChatEpoch(pub u64);

impl ChatEpoch {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Routing key for one submission cycle.
///
/// `sequence` changes on every submit, so two tickets never compare equal even
/// within the same epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub epoch: ChatEpoch,
    pub sequence: u64,
}

impl RequestTicket {
    pub const fn new(epoch: ChatEpoch, sequence: u64) -> Self {
        Self { epoch, sequence }
    }
}

/// Lifecycle of the single submission the session allows at a time.
///
/// A failed request settles back to `Idle` like a successful one; the failure only
/// shows up as an extra bot turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting(RequestTicket),
}

/// State transition input for the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTransition {
    Begin(RequestTicket),
    Settle(RequestTicket),
}

/// Rejection reason for illegal submission transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRejection {
    AlreadySubmitting {
        active: RequestTicket,
        attempted: RequestTicket,
    },
    NoActiveSubmission,
    TicketMismatch {
        active: RequestTicket,
        attempted: RequestTicket,
    },
}

pub type SubmissionResult = Result<SubmissionPhase, SubmissionRejection>;

impl SubmissionPhase {
    pub fn active_ticket(&self) -> Option<RequestTicket> {
        match self {
            Self::Submitting(ticket) => Some(*ticket),
            Self::Idle => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    pub fn apply(&self, transition: SubmissionTransition) -> SubmissionResult {
        match transition {
            SubmissionTransition::Begin(ticket) => self.apply_begin(ticket),
            SubmissionTransition::Settle(ticket) => self.apply_settle(ticket),
        }
    }

    fn apply_begin(&self, ticket: RequestTicket) -> SubmissionResult {
        match self {
            Self::Submitting(active) => Err(SubmissionRejection::AlreadySubmitting {
                active: *active,
                attempted: ticket,
            }),
            Self::Idle => Ok(Self::Submitting(ticket)),
        }
    }

    fn apply_settle(&self, ticket: RequestTicket) -> SubmissionResult {
        match self {
            Self::Submitting(active) if *active == ticket => Ok(Self::Idle),
            Self::Submitting(active) => Err(SubmissionRejection::TicketMismatch {
                active: *active,
                attempted: ticket,
            }),
            Self::Idle => Err(SubmissionRejection::NoActiveSubmission),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(epoch: u64, sequence: u64) -> RequestTicket {
        RequestTicket::new(ChatEpoch::new(epoch), sequence)
    }

    #[test]
    fn begin_then_settle_returns_to_idle() {
        let submitting = SubmissionPhase::Idle
            .apply(SubmissionTransition::Begin(ticket(0, 1)))
            .unwrap();
        assert_eq!(submitting.active_ticket(), Some(ticket(0, 1)));

        let settled = submitting
            .apply(SubmissionTransition::Settle(ticket(0, 1)))
            .unwrap();
        assert_eq!(settled, SubmissionPhase::Idle);
    }

    #[test]
    fn second_begin_is_rejected_while_submitting() {
        let submitting = SubmissionPhase::Submitting(ticket(0, 1));

        assert_eq!(
            submitting.apply(SubmissionTransition::Begin(ticket(0, 2))),
            Err(SubmissionRejection::AlreadySubmitting {
                active: ticket(0, 1),
                attempted: ticket(0, 2),
            })
        );
    }

    #[test]
    fn settle_requires_matching_ticket() {
        let submitting = SubmissionPhase::Submitting(ticket(1, 4));

        assert_eq!(
            submitting.apply(SubmissionTransition::Settle(ticket(0, 4))),
            Err(SubmissionRejection::TicketMismatch {
                active: ticket(1, 4),
                attempted: ticket(0, 4),
            })
        );
        assert_eq!(
            SubmissionPhase::Idle.apply(SubmissionTransition::Settle(ticket(0, 1))),
            Err(SubmissionRejection::NoActiveSubmission)
        );
    }
}
