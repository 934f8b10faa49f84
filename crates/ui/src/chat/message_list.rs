use std::time::Duration;

use clinical_session::ChatTurn;
use gpui::*;
use gpui_component::{ActiveTheme, Icon, IconName, h_flex, label::Label, text::TextView, v_flex};

const BUBBLE_MAX_WIDTH: Pixels = px(640.);
const BUBBLE_PADDING: Pixels = px(14.);
const SPEAKER_ICON_SIZE: Pixels = px(18.);
const SPEAKER_ICON_GAP: Pixels = px(12.);
const TYPING_DOT_SIZE: Pixels = px(8.);
const TYPING_PULSE_DURATION: Duration = Duration::from_millis(900);
const MARKDOWN_SAFE_FALLBACK_THRESHOLD_BYTES: usize = 128 * 1024;

/// One visual row: a stored turn, or the transient "awaiting reply" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Turn(usize),
    Typing,
}

fn rows(turn_count: usize, awaiting_reply: bool) -> impl Iterator<Item = Row> {
    (0..turn_count)
        .map(Row::Turn)
        .chain(awaiting_reply.then_some(Row::Typing))
}

/// Renders the transcript in chronological order and keeps the newest row in view.
pub struct MessageList {
    turns: Vec<ChatTurn>,
    awaiting_reply: bool,
    scroll_handle: ScrollHandle,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            turns: Vec::new(),
            awaiting_reply: false,
            scroll_handle: ScrollHandle::new(),
        }
    }

    /// Replaces the rendered transcript and scrolls to its tail.
    pub fn set_transcript(
        &mut self,
        turns: Vec<ChatTurn>,
        awaiting_reply: bool,
        cx: &mut Context<Self>,
    ) {
        if turns == self.turns && awaiting_reply == self.awaiting_reply {
            return;
        }

        self.turns = turns;
        self.awaiting_reply = awaiting_reply;
        // Applied on the next layout, once the new rows have a height.
        self.scroll_handle.scroll_to_bottom();
        cx.notify();
    }

    fn render_row(&self, row: Row, cx: &Context<Self>) -> Option<AnyElement> {
        match row {
            Row::Turn(index) => {
                let turn = self.turns.get(index)?;
                Some(render_turn_row(turn, index, cx))
            }
            Row::Typing => Some(render_typing_row(cx)),
        }
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let items = rows(self.turns.len(), self.awaiting_reply)
            .filter_map(|row| self.render_row(row, cx))
            .collect::<Vec<_>>();

        div()
            .id("message-list")
            .size_full()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle)
            .child(v_flex().w_full().px_4().py_3().gap_4().children(items))
    }
}

fn render_turn_row(turn: &ChatTurn, index: usize, cx: &App) -> AnyElement {
    let theme = cx.theme();

    if turn.speaker.is_user() {
        return h_flex()
            .w_full()
            .justify_end()
            .items_start()
            .gap(SPEAKER_ICON_GAP)
            .child(
                div()
                    .max_w(BUBBLE_MAX_WIDTH)
                    .p(BUBBLE_PADDING)
                    .rounded_lg()
                    .bg(theme.primary)
                    .text_color(theme.primary_foreground)
                    .child(Label::new(turn.content.clone()).text_sm()),
            )
            .child(speaker_icon(IconName::User, theme.muted_foreground))
            .into_any_element();
    }

    h_flex()
        .w_full()
        .justify_start()
        .items_start()
        .gap(SPEAKER_ICON_GAP)
        .child(speaker_icon(IconName::Bot, theme.muted_foreground))
        .child(
            div()
                .max_w(BUBBLE_MAX_WIDTH)
                .p(BUBBLE_PADDING)
                .rounded_lg()
                .border_1()
                .border_color(theme.border)
                .bg(theme.background)
                .child(render_bot_content(turn, index)),
        )
        .into_any_element()
}

fn render_typing_row(cx: &App) -> AnyElement {
    let theme = cx.theme();
    let dot_color = theme.muted_foreground;

    let dots = (0..3usize).map(|dot| {
        div()
            .id(("typing-dot", dot))
            .size(TYPING_DOT_SIZE)
            .rounded_full()
            .bg(dot_color)
            .with_animation(
                ("typing-dot-pulse", dot),
                Animation::new(TYPING_PULSE_DURATION)
                    .repeat()
                    .with_easing(pulsating_between(0.3, 1.0)),
                |el, delta| el.opacity(delta),
            )
    });

    h_flex()
        .id("awaiting-reply")
        .w_full()
        .justify_start()
        .items_start()
        .gap(SPEAKER_ICON_GAP)
        .child(speaker_icon(IconName::Bot, theme.muted_foreground))
        .child(
            h_flex()
                .gap_2()
                .p(BUBBLE_PADDING)
                .rounded_lg()
                .border_1()
                .border_color(theme.border)
                .bg(theme.background)
                .children(dots),
        )
        .into_any_element()
}

fn speaker_icon(icon: IconName, color: Hsla) -> impl IntoElement {
    div()
        .mt(px(6.))
        .flex_shrink_0()
        .child(Icon::new(icon).size(SPEAKER_ICON_SIZE).text_color(color))
}

fn render_bot_content(turn: &ChatTurn, index: usize) -> AnyElement {
    if turn.content.len() > MARKDOWN_SAFE_FALLBACK_THRESHOLD_BYTES {
        // Oversized replies render as plain text to keep layout predictable.
        return Label::new(turn.content.clone()).text_sm().into_any_element();
    }

    // Replies carry markdown citations ("**Sources:**" plus links).
    let markdown_id = ElementId::Name(SharedString::from(format!("bot-markdown-{index}")));
    TextView::markdown(markdown_id, turn.content.clone())
        .selectable(true)
        .into_any_element()
}
