use std::sync::Arc;

use clinical_query::{HttpQueryClient, QueryClient};
use clinical_session::{ChatTurn, PendingQuery, ReplyOutcome, RequestTicket};
use gpui::*;
use gpui_component::{ActiveTheme, v_flex};
use gpui_tokio_bridge::Tokio;

use crate::chat::events::{InputChanged, SessionChanged, Submit};
use crate::chat::{ChatSession, MessageInput, MessageList};

/// Coordinator between the session, the transcript list, the input box and the backend.
pub struct ChatView {
    session: Entity<ChatSession>,
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    client: Option<Arc<dyn QueryClient>>,
    /// The in-flight request; the session refuses another submit until it settles.
    request_task: Option<Task<()>>,
}

impl ChatView {
    pub fn new(session: Entity<ChatSession>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let client = match HttpQueryClient::new() {
            Ok(client) => Some(Arc::new(client) as Arc<dyn QueryClient>),
            Err(error) => {
                tracing::error!(%error, "query client unavailable; replies will be apologies");
                None
            }
        };

        Self::with_client(session, client, window, cx)
    }

    fn with_client(
        session: Entity<ChatSession>,
        client: Option<Arc<dyn QueryClient>>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&message_input, |this, _, event: &InputChanged, cx| {
            let text = event.text.clone();
            this.session
                .update(cx, |session, cx| session.set_pending_input(text, cx));
        })
        .detach();

        cx.subscribe_in(&message_input, window, |this, _, event: &Submit, window, cx| {
            this.handle_submit(event.clone(), window, cx);
        })
        .detach();

        cx.subscribe(&session, |this, _, event: &SessionChanged, cx| {
            this.handle_session_changed(*event, cx);
        })
        .detach();

        let mut view = Self {
            session,
            message_list,
            message_input,
            client,
            request_task: None,
        };
        view.sync_from_session(cx);
        view
    }

    fn handle_submit(&mut self, event: Submit, window: &mut Window, cx: &mut Context<Self>) {
        let pending = self.session.update(cx, |session, cx| {
            session.set_pending_input(event.content, cx);
            session.submit_pending(cx)
        });
        let Some(pending) = pending else {
            return;
        };

        self.message_input
            .update(cx, |input, cx| input.clear(window, cx));
        self.dispatch_query(pending, cx);
    }

    fn dispatch_query(&mut self, pending: PendingQuery, cx: &mut Context<Self>) {
        let ticket = pending.ticket;
        tracing::debug!(
            epoch = ticket.epoch.0,
            sequence = ticket.sequence,
            history = pending.prior_transcript.len(),
            "dispatching query"
        );

        let Some(client) = self.client.clone() else {
            self.handle_reply(ticket, ChatTurn::apology(), cx);
            return;
        };

        let request = Tokio::spawn(cx, async move {
            clinical_query::submit(client.as_ref(), &pending.message, &pending.prior_transcript)
                .await
        });

        self.request_task = Some(cx.spawn(async move |this, cx| {
            let reply = match request.await {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::error!(%error, "query task failed to complete");
                    ChatTurn::apology()
                }
            };

            let _ = this.update(cx, |this, cx| {
                this.handle_reply(ticket, reply, cx);
            });
        }));
    }

    fn handle_reply(&mut self, ticket: RequestTicket, reply: ChatTurn, cx: &mut Context<Self>) {
        let outcome = self
            .session
            .update(cx, |session, cx| session.complete_submission(ticket, reply, cx));

        if outcome == ReplyOutcome::DiscardedStale {
            tracing::debug!(
                epoch = ticket.epoch.0,
                sequence = ticket.sequence,
                "discarded reply for a previous chat"
            );
        }
        if !self.session.read(cx).state().awaiting_reply() {
            self.request_task = None;
        }
    }

    fn handle_session_changed(&mut self, event: SessionChanged, cx: &mut Context<Self>) {
        match event {
            SessionChanged::Transcript | SessionChanged::Awaiting => self.sync_from_session(cx),
            SessionChanged::Sidebar => {}
        }
    }

    fn sync_from_session(&mut self, cx: &mut Context<Self>) {
        let (turns, awaiting_reply) = {
            let state = self.session.read(cx).state();
            (state.transcript().turns().to_vec(), state.awaiting_reply())
        };

        self.message_list.update(cx, |list, cx| {
            list.set_transcript(turns, awaiting_reply, cx);
        });
        self.message_input.update(cx, |input, cx| {
            input.set_awaiting_reply(awaiting_reply, cx);
        });
        cx.notify();
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .id("chat-view")
            .relative()
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(theme.background)
            .child(
                div()
                    .id("chat-view-message-list")
                    .flex_1()
                    .min_h_0()
                    .child(self.message_list.clone()),
            )
            .child(
                div()
                    .id("chat-view-message-input")
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(self.message_input.clone()),
            )
    }
}
