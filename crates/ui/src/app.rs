use std::path::PathBuf;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::notification::NotificationList;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};

use crate::chat::{ChatSession, ChatSidebar, ChatView, SIDEBAR_WIDTH, SessionChanged};

pub const APP_TITLE: &str = "Clinical ChatBot";

/// Returns the default themes directory path.
pub fn default_themes_path() -> PathBuf {
    PathBuf::from("./themes")
}

#[cfg(target_os = "macos")]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 78.0;
#[cfg(not(target_os = "macos"))]
const WINDOW_TOOLBAR_LEFT_SAFE_PADDING: f32 = 16.0;
#[cfg(target_os = "windows")]
const WINDOW_TOOLBAR_RIGHT_SAFE_PADDING: f32 = 120.0;
#[cfg(not(target_os = "windows"))]
const WINDOW_TOOLBAR_RIGHT_SAFE_PADDING: f32 = 16.0;

/// Computes the top toolbar height using a Zed-style responsive formula.
fn window_toolbar_height(window: &Window) -> Pixels {
    (1.75 * window.rem_size()).max(px(34.0))
}

/// Icon shown on the navbar toggle: a close glyph while the panel is open.
pub fn menu_toggle_icon(sidebar_open: bool) -> IconName {
    if sidebar_open {
        IconName::Close
    } else {
        IconName::Menu
    }
}

gpui::actions!(shell, [NewChat, ToggleSidebar, Quit,]);

/// Root layout: navbar, the chat view and the side panel overlay.
pub struct ChatAppShell {
    notification_list: Entity<NotificationList>,
    session: Entity<ChatSession>,
    chat_view: Entity<ChatView>,
    sidebar: Entity<ChatSidebar>,
    title_bar_should_move: bool,
}

impl ChatAppShell {
    pub fn new(
        notification_list: Entity<NotificationList>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let session = ChatSession::new(cx);
        let chat_view = cx.new(|cx| ChatView::new(session.clone(), window, cx));
        let sidebar = cx.new(|cx| ChatSidebar::new(session.clone(), cx));

        cx.subscribe(&session, |_, _, event: &SessionChanged, cx| {
            if *event == SessionChanged::Sidebar {
                cx.notify();
            }
        })
        .detach();

        tracing::info!("chat shell ready");

        Self {
            notification_list,
            session,
            chat_view,
            sidebar,
            title_bar_should_move: false,
        }
    }

    fn toggle_sidebar(&mut self, cx: &mut Context<Self>) {
        self.session
            .update(cx, |session, cx| session.toggle_sidebar(cx));
    }

    fn new_chat(&mut self, cx: &mut Context<Self>) {
        self.session
            .update(cx, |session, cx| session.start_new_chat(cx));
    }
}

impl Render for ChatAppShell {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let toolbar_height = window_toolbar_height(window);
        let sidebar_open = self.session.read(cx).state().is_sidebar_open();

        div()
            .id("app-shell")
            .size_full()
            .relative()
            .bg(theme.background)
            .on_action(cx.listener(|this, _: &NewChat, _window, cx| {
                this.new_chat(cx);
            }))
            .on_action(cx.listener(|this, _: &ToggleSidebar, _window, cx| {
                this.toggle_sidebar(cx);
            }))
            .child(
                v_flex()
                    .size_full()
                    .pt(toolbar_height)
                    .child(
                        v_flex()
                            .id("main-content")
                            .flex_1()
                            .w_full()
                            .min_w_0()
                            .min_h_0()
                            .overflow_hidden()
                            .child(self.chat_view.clone()),
                    ),
            )
            .when(sidebar_open, |shell| {
                shell.child(self.render_sidebar(toolbar_height, cx))
            })
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .right_0()
                    .child(self.render_top_bar(window, toolbar_height, sidebar_open, cx)),
            )
            .child(self.notification_list.clone())
    }
}

impl ChatAppShell {
    fn render_top_bar(
        &self,
        window: &Window,
        toolbar_height: Pixels,
        sidebar_open: bool,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .id("app-top-bar")
            .window_control_area(WindowControlArea::Drag)
            .on_mouse_down_out(cx.listener(|this, _, _window, _cx| {
                this.title_bar_should_move = false;
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = false;
                }),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _, _window, _cx| {
                    this.title_bar_should_move = true;
                }),
            )
            .on_mouse_move(cx.listener(|this, _, window, _cx| {
                if this.title_bar_should_move {
                    this.title_bar_should_move = false;
                    window.start_window_move();
                }
            }))
            .w_full()
            .h(toolbar_height)
            .flex_shrink_0()
            .pl(px(WINDOW_TOOLBAR_LEFT_SAFE_PADDING))
            .pr(px(WINDOW_TOOLBAR_RIGHT_SAFE_PADDING))
            .items_center()
            .gap_2()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .child(
                div()
                    .id("navbar-menu-toggle-area")
                    // Keep the click from starting a window drag.
                    .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                    .child(
                        Button::new("navbar-menu-toggle")
                            .ghost()
                            .small()
                            .icon(menu_toggle_icon(sidebar_open))
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.toggle_sidebar(cx);
                            })),
                    ),
            )
            .child(
                div()
                    .id("navbar-title")
                    .text_sm()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(theme.foreground)
                    .child(APP_TITLE),
            )
            .child(div().flex_1())
            .when(
                cfg!(target_os = "linux") && window.window_controls().window_menu,
                |title_bar| {
                    title_bar.on_mouse_down(MouseButton::Right, |event, window, _| {
                        window.show_window_menu(event.position);
                    })
                },
            )
            .child(self.render_linux_window_controls(window, cx))
    }

    fn render_linux_window_controls(&self, window: &Window, cx: &Context<Self>) -> AnyElement {
        #[cfg(target_os = "linux")]
        {
            let maximize_icon = if window.is_maximized() {
                IconName::WindowRestore
            } else {
                IconName::WindowMaximize
            };

            h_flex()
                .id("linux-window-controls")
                .items_center()
                // Clicks on window controls must not reach title bar gestures.
                .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                .on_mouse_down(MouseButton::Right, |_, _, cx| cx.stop_propagation())
                .gap_2()
                .ml_2()
                .child(
                    Button::new("linux-window-minimize")
                        .ghost()
                        .small()
                        .icon(IconName::WindowMinimize)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.minimize_window();
                        })),
                )
                .child(
                    Button::new("linux-window-maximize")
                        .ghost()
                        .small()
                        .icon(maximize_icon)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.zoom_window();
                        })),
                )
                .child(
                    Button::new("linux-window-close")
                        .ghost()
                        .small()
                        .icon(IconName::WindowClose)
                        .on_click(cx.listener(|_, _, window, _| {
                            window.remove_window();
                        })),
                )
                .into_any_element()
        }

        #[cfg(not(target_os = "linux"))]
        {
            let _ = (window, cx);
            div().into_any_element()
        }
    }

    fn render_sidebar(&self, toolbar_height: Pixels, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .id("sidebar-container")
            .absolute()
            .top(toolbar_height)
            .left_0()
            .bottom_0()
            .w(px(SIDEBAR_WIDTH))
            .overflow_hidden()
            .bg(theme.background)
            .border_r_1()
            .border_color(theme.border)
            .shadow_lg()
            .child(self.sidebar.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_icon_reflects_panel_state() {
        assert!(matches!(menu_toggle_icon(false), IconName::Menu));
        assert!(matches!(menu_toggle_icon(true), IconName::Close));
    }


    #[test]
    fn themes_live_next_to_the_binary() {
        assert_eq!(default_themes_path(), PathBuf::from("./themes"));
    }
}
