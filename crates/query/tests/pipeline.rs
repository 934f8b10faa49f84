use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use clinical_query::{APOLOGY_MESSAGE, QueryClient, QueryError, QueryRequest, QueryResult, submit};
use clinical_session::{ChatTurn, ReplyOutcome, SessionState, Speaker};
use futures::future::BoxFuture;

/// Replays canned outcomes and records every request it receives.
struct ScriptedClient {
    outcomes: Mutex<VecDeque<QueryResult<String>>>,
    requests: Mutex<Vec<QueryRequest>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(outcomes: impl IntoIterator<Item = QueryResult<String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl QueryClient for ScriptedClient {
    fn endpoint(&self) -> &str {
        "scripted://query"
    }

    fn query<'a>(&'a self, request: QueryRequest) -> BoxFuture<'a, QueryResult<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error()));
        Box::pin(async move { outcome })
    }
}

fn server_error() -> QueryError {
    QueryError::Status {
        stage: "scripted",
        status: 500,
        body: String::new(),
    }
}

/// Drives one full submit cycle the way the chat view does.
async fn round_trip(state: &mut SessionState, client: &ScriptedClient, text: &str) -> bool {
    state.set_pending_input(text);
    let Some(pending) = state.submit_pending() else {
        return false;
    };
    let reply = submit(client, &pending.message, &pending.prior_transcript).await;
    state.complete_submission(pending.ticket, reply) == ReplyOutcome::Appended
}

#[tokio::test]
async fn hello_round_trip_appends_user_then_bot() {
    let client = ScriptedClient::new([Ok("Hi there".to_string())]);
    let mut state = SessionState::new();

    assert!(round_trip(&mut state, &client, "Hello").await);

    assert_eq!(
        state.transcript().turns(),
        &[ChatTurn::user("Hello"), ChatTurn::bot("Hi there")]
    );
    assert!(!state.awaiting_reply());
}

#[tokio::test]
async fn failing_endpoint_appends_single_apology() {
    let client = ScriptedClient::new([Err(server_error())]);
    let mut state = SessionState::new();

    round_trip(&mut state, &client, "Hello").await;

    assert_eq!(
        state.transcript().turns(),
        &[ChatTurn::user("Hello"), ChatTurn::bot(APOLOGY_MESSAGE)]
    );
    assert!(!state.awaiting_reply());
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn history_sent_excludes_the_new_user_turn() {
    let client = ScriptedClient::new([Ok("one".to_string()), Ok("two".to_string())]);
    let mut state = SessionState::new();

    round_trip(&mut state, &client, "first").await;
    round_trip(&mut state, &client, "second").await;

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].chat_history.is_empty());
    assert_eq!(requests[1].query, "second");
    let sent = requests[1]
        .chat_history
        .iter()
        .map(|turn| turn.content.as_str())
        .collect::<Vec<_>>();
    assert_eq!(sent, ["first", "one"]);
}

#[tokio::test]
async fn blank_input_never_reaches_the_client() {
    let client = ScriptedClient::new([]);
    let mut state = SessionState::new();

    assert!(!round_trip(&mut state, &client, "").await);
    assert!(!round_trip(&mut state, &client, "   ").await);

    assert_eq!(client.calls(), 0);
    assert!(state.transcript().is_empty());
}

#[tokio::test]
async fn submit_while_awaiting_sends_nothing() {
    let client = ScriptedClient::new([Ok("answer".to_string())]);
    let mut state = SessionState::new();

    state.set_pending_input("first");
    let pending = state.submit_pending().unwrap();

    state.set_pending_input("second");
    assert!(state.submit_pending().is_none());

    let reply = submit(&client, &pending.message, &pending.prior_transcript).await;
    state.complete_submission(pending.ticket, reply);

    assert_eq!(client.calls(), 1);
    assert_eq!(state.transcript().len(), 2);
    assert_eq!(state.pending_input(), "second");
}

#[tokio::test]
async fn n_successful_rounds_yield_two_n_alternating_turns() {
    let rounds = 6;
    let client = ScriptedClient::new((0..rounds).map(|round| Ok(format!("reply {round}"))));
    let mut state = SessionState::new();

    for round in 0..rounds {
        assert!(round_trip(&mut state, &client, &format!("message {round}")).await);
    }

    assert_eq!(state.transcript().len(), rounds * 2);
    assert!(
        state
            .transcript()
            .iter()
            .enumerate()
            .all(|(index, turn)| (index % 2 == 0) == (turn.speaker == Speaker::User))
    );
}

#[tokio::test]
async fn reply_arriving_after_new_chat_is_dropped() {
    let client = ScriptedClient::new([Ok("late".to_string())]);
    let mut state = SessionState::new();

    state.set_pending_input("Hello");
    let pending = state.submit_pending().unwrap();
    state.start_new_chat();

    assert!(state.awaiting_reply());
    state.set_pending_input("Fresh start");
    assert!(state.submit_pending().is_none());

    let reply = submit(&client, &pending.message, &pending.prior_transcript).await;

    assert_eq!(
        state.complete_submission(pending.ticket, reply),
        ReplyOutcome::DiscardedStale
    );
    assert!(state.transcript().is_empty());
    assert!(!state.awaiting_reply());
    assert_eq!(state.pending_input(), "Fresh start");
}

#[tokio::test]
async fn new_chat_while_awaiting_starts_no_second_request() {
    let client = ScriptedClient::new([Ok("late".to_string()), Ok("fresh".to_string())]);
    let mut state = SessionState::new();

    state.set_pending_input("first");
    let first = state.submit_pending().unwrap();
    state.start_new_chat();

    // Still gated: a retry after New Chat must not reach the client.
    assert!(!round_trip(&mut state, &client, "second").await);
    let stale_reply = submit(&client, &first.message, &first.prior_transcript).await;
    assert_eq!(client.calls(), 1);

    state.complete_submission(first.ticket, stale_reply);
    assert!(round_trip(&mut state, &client, "second").await);

    assert_eq!(client.calls(), 2);
    assert_eq!(
        state.transcript().turns(),
        &[ChatTurn::user("second"), ChatTurn::bot("fresh")]
    );
    assert!(client.requests()[1].chat_history.is_empty());
}
