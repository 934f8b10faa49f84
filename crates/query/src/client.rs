use clinical_session::ChatTurn;
use futures::future::BoxFuture;

use crate::error::QueryResult;
use crate::wire::QueryRequest;

/// Remote service that answers one chat query.
///
/// Implementations report failures as `QueryError`; turning them into a
/// user-facing turn is the job of [`submit`].
pub trait QueryClient: Send + Sync {
    fn endpoint(&self) -> &str;
    fn query<'a>(&'a self, request: QueryRequest) -> BoxFuture<'a, QueryResult<String>>;
}

/// Sends `message` with the transcript that preceded it and returns the bot turn to
/// append. Never fails: transport errors, error statuses and unreadable bodies all
/// become the fixed apology turn.
pub async fn submit(
    client: &dyn QueryClient,
    message: &str,
    prior_transcript: &[ChatTurn],
) -> ChatTurn {
    let request = QueryRequest::new(message, prior_transcript);
    let history_len = request.chat_history.len();

    tracing::debug!(
        endpoint = %client.endpoint(),
        history_len,
        "dispatching chat query"
    );

    match client.query(request).await {
        Ok(reply) => ChatTurn::bot(reply),
        Err(error) => {
            tracing::error!(
                endpoint = %client.endpoint(),
                error = %error,
                "chat query failed; replying with apology"
            );
            ChatTurn::apology()
        }
    }
}
