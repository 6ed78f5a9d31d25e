use gtk4::prelude::*;
use gtk4 as gtk;

use crate::api::models::{Conversation, Message};
use crate::format;
use crate::timeline::{self, DayGroup};

pub struct ChatView {
    root: gtk::Box,
    avatar_holder: gtk::Box,
    peer_name: gtk::Label,
    last_seen: gtk::Label,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
}

impl ChatView {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let avatar_holder = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        header.append(&avatar_holder);

        let name_col = gtk::Box::new(gtk::Orientation::Vertical, 0);
        let peer_name = gtk::Label::new(None);
        peer_name.add_css_class("heading");
        peer_name.set_halign(gtk::Align::Start);
        name_col.append(&peer_name);

        let last_seen = gtk::Label::new(None);
        last_seen.add_css_class("dim-label");
        last_seen.add_css_class("caption");
        last_seen.set_halign(gtk::Align::Start);
        name_col.append(&last_seen);
        header.append(&name_col);
        root.append(&header);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        // Viewing only; the entry is the familiar affordance but sends nothing.
        let entry = gtk::Entry::new();
        entry.set_placeholder_text(Some("Message"));
        entry.set_hexpand(true);
        root.append(&entry);

        Self {
            root,
            avatar_holder,
            peer_name,
            last_seen,
            scroller,
            messages_box,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Update the header for a newly selected conversation. Messages from the
    /// previous conversation stay on screen until their replacement arrives;
    /// a failed fetch must not blank the view.
    pub fn show_conversation(&self, conv: &Conversation) {
        while let Some(child) = self.avatar_holder.first_child() {
            self.avatar_holder.remove(&child);
        }
        let avatar = super::avatar_badge(conv.creator.id, conv.creator.name.as_deref(), 36);
        self.avatar_holder.append(&avatar);
        self.peer_name.set_text(conv.creator.name.as_deref().unwrap_or("Unknown"));
        self.last_seen.set_text("");
    }

    /// Replace the message area with the given day groups. Groups arrive
    /// newest-day-first; rendering walks them in reverse so the newest message
    /// ends up at the bottom of the scroller.
    pub fn set_messages(&self, groups: &[DayGroup], peer_id: Option<i64>) {
        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }

        match timeline::last_seen(groups) {
            Some(ts) => self.last_seen.set_text(&format!("at {}", format::format_last_seen(ts))),
            None => self.last_seen.set_text(""),
        }

        for group in groups.iter().rev() {
            let pill = gtk::Label::new(Some(&format::format_day_heading(&group.date_key)));
            pill.add_css_class("date-pill");
            pill.set_halign(gtk::Align::Center);
            pill.set_margin_top(8);
            self.messages_box.append(&pill);

            for message in group.messages.iter().rev() {
                self.messages_box.append(&build_bubble(message, &group.date_key, peer_id));
            }
        }

        let adj = self.scroller.vadjustment();
        adj.set_value(adj.upper());
    }
}

fn build_bubble(message: &Message, date_key: &str, peer_id: Option<i64>) -> gtk::Widget {
    let incoming = message.sender.id.is_some() && message.sender.id == peer_id;

    let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
    bubble.add_css_class("bubble");
    bubble.add_css_class(if incoming { "bubble-incoming" } else { "bubble-outgoing" });
    bubble.set_halign(if incoming { gtk::Align::Start } else { gtk::Align::End });

    let text = gtk::Label::new(Some(&message.message));
    text.set_wrap(true);
    text.set_max_width_chars(46);
    text.set_xalign(0.0);
    bubble.append(&text);

    let when = gtk::Label::new(Some(&format::format_bubble_time(&message.updated_at, date_key)));
    when.add_css_class("dim-label");
    when.add_css_class("caption");
    when.set_halign(gtk::Align::End);
    bubble.append(&when);

    bubble.upcast()
}
