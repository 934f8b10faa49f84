use clinical_session::{EnterAction, EnterKey, InputController};
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
};

use crate::chat::events::{InputChanged, Submit};

/// Text box plus send button.
///
/// Key handling is decided by `InputController`; whether the text may actually be
/// sent is decided by the session, which clears this input through `clear` once the
/// hand-off succeeded.
pub struct MessageInput {
    input_state: Entity<InputState>,
    controller: InputController,
    awaiting_reply: bool,
    pending_newline: bool,
}

impl EventEmitter<InputChanged> for MessageInput {}
impl EventEmitter<Submit> for MessageInput {}

impl MessageInput {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("Type your message...")
                .auto_grow(1, 8)
        });

        cx.subscribe_in(
            &input_state,
            window,
            |this, state, event: &InputEvent, window, cx| match event {
                InputEvent::Change => {
                    let text = state.read(cx).value().to_string();
                    cx.emit(InputChanged { text });
                    cx.notify();
                }
                InputEvent::PressEnter { secondary } => {
                    if *secondary {
                        this.pending_newline = false;
                        return;
                    }

                    this.sync_composition(window, cx);
                    if this.pending_newline {
                        // Shift+Enter already inserted the newline; swallow the follow-up enter.
                        this.pending_newline = false;
                    } else if this.controller.key_enter(EnterKey::plain()) == EnterAction::Submit {
                        this.trim_trailing_newline(window, cx);
                        this.request_submit(cx);
                    }
                }
                _ => {}
            },
        )
        .detach();

        Self {
            input_state,
            controller: InputController::new(),
            awaiting_reply: false,
            pending_newline: false,
        }
    }

    pub fn set_awaiting_reply(&mut self, awaiting_reply: bool, cx: &mut Context<Self>) {
        self.awaiting_reply = awaiting_reply;
        if !awaiting_reply {
            self.pending_newline = false;
        }
        cx.notify();
    }

    pub fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
        self.pending_newline = false;
        cx.notify();
    }

    fn can_submit(&self, cx: &App) -> bool {
        InputController::can_submit(&self.input_state.read(cx).value(), self.awaiting_reply)
    }

    /// Reads the IME state off the editor before an Enter press is interpreted.
    fn sync_composition(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let has_marked_text = self
            .input_state
            .update(cx, |state, cx| state.marked_text_range(window, cx).is_some());
        self.controller.sync_composition(has_marked_text);
    }

    fn handle_shift_enter(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.awaiting_reply {
            return;
        }

        self.sync_composition(window, cx);

        if self.controller.key_enter(EnterKey::with_shift()) != EnterAction::InsertNewline {
            return;
        }

        self.pending_newline = true;
        self.input_state.update(cx, |state, cx| {
            state.insert("\n", window, cx);
        });
        cx.notify();
    }

    fn trim_trailing_newline(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            let value = state.value().to_string();
            if let Some(trimmed) = value.strip_suffix('\n') {
                state.set_value(trimmed.to_string(), window, cx);
            }
        });
    }

    fn request_submit(&mut self, cx: &mut Context<Self>) {
        if !self.can_submit(cx) {
            return;
        }

        let content = self.input_state.read(cx).value().to_string();
        cx.emit(Submit::new(content));
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let send_disabled = !self.can_submit(cx);

        h_flex()
            .w_full()
            .max_w(px(768.))
            .mx_auto()
            .gap_2()
            .p_4()
            .items_end()
            .bg(theme.background)
            .child(
                div()
                    .flex_1()
                    .min_w_0()
                    .px_3()
                    .py_2()
                    .rounded_xl()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                        if event.keystroke.key == "enter" && event.keystroke.modifiers.shift {
                            this.handle_shift_enter(window, cx);
                        }
                    }))
                    .child(
                        Input::new(&self.input_state)
                            .w_full()
                            .disabled(self.awaiting_reply),
                    ),
            )
            .child(
                Button::new("send")
                    .small()
                    .primary()
                    .icon(IconName::ArrowUp)
                    .disabled(send_disabled)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.request_submit(cx);
                    })),
            )
    }
}
