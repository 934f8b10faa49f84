#![deny(unsafe_code)]

//! In-memory chat session model: the transcript, the pending input and the
//! single in-flight submission cycle.
//!
//! Nothing in this crate touches the network or the UI toolkit, so every rule the
//! chat window relies on can be exercised with plain unit tests.

pub mod input;
pub mod state;
pub mod submission;
pub mod transcript;
pub mod turn;

pub use input::{EnterAction, EnterKey, InputController};
pub use state::{PendingQuery, ReplyOutcome, SessionState};
pub use submission::{
    ChatEpoch, RequestTicket, SubmissionPhase, SubmissionRejection, SubmissionResult,
    SubmissionTransition,
};
pub use transcript::Transcript;
pub use turn::{APOLOGY_MESSAGE, ChatTurn, Speaker};
