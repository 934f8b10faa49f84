/// Event contracts for chat module wiring.
pub mod events;
pub mod message_input;
pub mod message_list;
/// Window-scoped session entity shared by the shell, sidebar and chat view.
pub mod session;
pub mod sidebar;
pub mod view;

pub use events::{InputChanged, SessionChanged, Submit};
pub use message_input::MessageInput;
pub use message_list::MessageList;
pub use session::ChatSession;
pub use sidebar::{ChatSidebar, NavigationEntry, SIDEBAR_WIDTH};
pub use view::ChatView;
