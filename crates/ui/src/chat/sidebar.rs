use gpui::*;
use gpui_component::{
    ActiveTheme, Icon, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    list::ListItem,
    v_flex,
};

use crate::chat::session::ChatSession;

/// Width of the side panel when it is shown.
pub const SIDEBAR_WIDTH: f32 = 256.0;

/// Entries of the "Navigation" group, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEntry {
    Home,
    NewChat,
    SavedChats,
    Settings,
    ClinicalBlogs,
}

impl NavigationEntry {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::NewChat,
        Self::SavedChats,
        Self::Settings,
        Self::ClinicalBlogs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::NewChat => "New Chat",
            Self::SavedChats => "Saved Chats",
            Self::Settings => "Settings",
            Self::ClinicalBlogs => "Clinical Blogs",
        }
    }

    /// Only "New Chat" does more than close the panel; the other destinations do not
    /// exist yet.
    pub fn starts_new_chat(self) -> bool {
        matches!(self, Self::NewChat)
    }

    fn icon(self) -> IconName {
        match self {
            Self::Home => IconName::LayoutDashboard,
            Self::NewChat => IconName::Plus,
            Self::SavedChats => IconName::Inbox,
            Self::Settings => IconName::Settings,
            Self::ClinicalBlogs => IconName::BookOpen,
        }
    }
}

/// Collapsible menu panel. Reads and mutates the shared session directly.
pub struct ChatSidebar {
    session: Entity<ChatSession>,
}

impl ChatSidebar {
    pub fn new(session: Entity<ChatSession>, _cx: &mut Context<Self>) -> Self {
        Self { session }
    }

    fn activate(&mut self, entry: NavigationEntry, cx: &mut Context<Self>) {
        self.session.update(cx, |session, cx| {
            if entry.starts_new_chat() {
                // Resetting the session also closes the panel.
                session.start_new_chat(cx);
            } else {
                session.close_sidebar(cx);
            }
        });
    }

    fn close(&mut self, cx: &mut Context<Self>) {
        self.session
            .update(cx, |session, cx| session.close_sidebar(cx));
    }

    fn render_header(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .items_center()
            .justify_between()
            .p_4()
            .border_b_1()
            .border_color(theme.border)
            .child(
                div()
                    .text_lg()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(theme.foreground)
                    .child("Menu"),
            )
            .child(
                Button::new("sidebar-close")
                    .ghost()
                    .small()
                    .icon(IconName::Close)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.close(cx);
                    })),
            )
    }

    fn render_group_title(&self, title: &'static str, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .mb_2()
            .text_xs()
            .font_weight(FontWeight::SEMIBOLD)
            .text_color(theme.muted_foreground)
            .child(title.to_uppercase())
    }

    fn render_navigation(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let items = NavigationEntry::ALL
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                menu_row(("navigation", index), entry.icon(), entry.label(), cx).on_click(
                    cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.activate(entry, cx);
                    }),
                )
            })
            .collect::<Vec<_>>();

        v_flex()
            .mb_6()
            .child(self.render_group_title("Navigation", cx))
            .child(v_flex().gap_1().children(items))
    }

    fn render_resources(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .child(self.render_group_title("Resources", cx))
            .child(
                v_flex()
                    .gap_1()
                    .child(menu_row("research-papers", IconName::File, "Research Papers", cx)),
            )
    }
}

impl Render for ChatSidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let border = theme.border;
        let background = theme.background;

        v_flex()
            .id("chat-sidebar")
            .size_full()
            .min_w_0()
            .overflow_hidden()
            .bg(background)
            .child(self.render_header(cx))
            .child(
                v_flex()
                    .id("chat-sidebar-body")
                    .flex_1()
                    .min_h_0()
                    .overflow_y_scroll()
                    .p_4()
                    .child(self.render_navigation(cx))
                    .child(self.render_resources(cx)),
            )
            .child(div().w_full().p_4().border_t_1().border_color(border))
    }
}

fn menu_row(
    id: impl Into<ElementId>,
    icon: IconName,
    label: &'static str,
    cx: &Context<ChatSidebar>,
) -> ListItem {
    let theme = cx.theme();

    ListItem::new(id).w_full().px_2().py_2().rounded_lg().child(
        h_flex()
            .w_full()
            .items_center()
            .gap_3()
            .child(Icon::new(icon).size(px(18.)).text_color(theme.muted_foreground))
            .child(Label::new(label).text_sm()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_new_chat_resets_the_transcript() {
        let resetting = NavigationEntry::ALL
            .into_iter()
            .filter(|entry| entry.starts_new_chat())
            .map(NavigationEntry::label)
            .collect::<Vec<_>>();

        assert_eq!(resetting, ["New Chat"]);
    }

    #[test]
    fn navigation_order_is_stable() {
        let labels = NavigationEntry::ALL
            .into_iter()
            .map(NavigationEntry::label)
            .collect::<Vec<_>>();

        assert_eq!(
            labels,
            ["Home", "New Chat", "Saved Chats", "Settings", "Clinical Blogs"]
        );
    }
}
