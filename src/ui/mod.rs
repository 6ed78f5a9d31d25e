pub mod chat_view;
pub mod main_window;
pub mod sidebar;

use gtk4::prelude::*;
use gtk4 as gtk;
use serde::{Deserialize, Serialize};

/// Window-level UI state, owned by the main window and passed into view code.
/// Serializable so a session snapshot stays possible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub selected_chat: Option<i64>,
    pub search_active: bool,
    /// Monotonic token for in-flight message fetches. Only the response
    /// carrying the latest token may touch the chat view; rapid conversation
    /// switching must not let a slow earlier response overwrite a later one.
    pub fetch_seq: u64,
}

impl ViewState {
    /// Record a new conversation selection and return the token its message
    /// fetch has to present when it lands.
    pub fn begin_fetch(&mut self, chat_id: i64) -> u64 {
        self.selected_chat = Some(chat_id);
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// A response may touch the view only when it carries the latest token
    /// and its chat is still the selected one.
    pub fn is_current(&self, chat_id: i64, token: u64) -> bool {
        self.fetch_seq == token && self.selected_chat == Some(chat_id)
    }
}

/// Round initials badge colored by the user's palette slot.
pub(crate) fn avatar_badge(user_id: Option<i64>, name: Option<&str>, size: i32) -> gtk::Label {
    let label = gtk::Label::new(Some(&crate::format::initials(name)));
    label.set_size_request(size, size);
    label.add_css_class("avatar-badge");
    label.add_css_class(&format!("avatar-color-{}", crate::format::avatar_color_index(user_id)));
    label
}

const APP_CSS: &str = "
.avatar-badge {
    border-radius: 9999px;
    color: white;
    font-weight: bold;
}
.avatar-color-0 { background-image: linear-gradient(to bottom right, #f87171, #fecaca); }
.avatar-color-1 { background-image: linear-gradient(to bottom right, #fb923c, #fed7aa); }
.avatar-color-2 { background-image: linear-gradient(to bottom right, #facc15, #fef08a); }
.avatar-color-3 { background-image: linear-gradient(to bottom right, #a3e635, #d9f99d); }
.avatar-color-4 { background-image: linear-gradient(to bottom right, #34d399, #a7f3d0); }
.avatar-color-5 { background-image: linear-gradient(to bottom right, #4ade80, #bbf7d0); }
.avatar-color-6 { background-image: linear-gradient(to bottom right, #22d3ee, #a5f3fc); }
.avatar-color-7 { background-image: linear-gradient(to bottom right, #818cf8, #c7d2fe); }
.avatar-color-8 { background-image: linear-gradient(to bottom right, #e879f9, #f5d0fe); }
.avatar-color-9 { background-image: linear-gradient(to bottom right, #fb7185, #fecdd3); }
.avatar-color-10 { background-image: linear-gradient(to bottom right, #a8a29e, #e7e5e4); }
.bubble {
    border-radius: 12px;
    padding: 6px 10px;
}
.bubble-incoming { background-color: #ffffff; color: #1f2937; }
.bubble-outgoing { background-color: #ecfdf5; color: #1f2937; }
.date-pill {
    background-color: #22c55e;
    color: white;
    border-radius: 9999px;
    padding: 2px 12px;
}
";

pub(crate) fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(APP_CSS);
    if let Some(display) = gtk::gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_fetch_tokens_are_rejected() {
        let mut state = ViewState::default();
        let first = state.begin_fetch(10);
        let second = state.begin_fetch(11);
        assert!(!state.is_current(10, first));
        assert!(state.is_current(11, second));
        assert_eq!(state.selected_chat, Some(11));
    }
}
