use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::models::Conversation;
use crate::format;

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
    search: gtk::SearchEntry,
    items: Rc<RefCell<Vec<Conversation>>>,
}

impl Sidebar {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let menu_btn = gtk::MenuButton::new();
        menu_btn.set_icon_name("open-menu-symbolic");
        menu_btn.set_popover(Some(&build_menu_popover()));
        header.append(&menu_btn);

        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some("Search"));
        search.set_hexpand(true);
        header.append(&search);
        root.append(&header);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .build();
        scroller.set_child(Some(&list));
        root.append(&scroller);

        let items: Rc<RefCell<Vec<Conversation>>> = Rc::new(RefCell::new(Vec::new()));
        let query = Rc::new(RefCell::new(String::new()));

        {
            let query = query.clone();
            let items = items.clone();
            list.set_filter_func(move |row| {
                let q = query.borrow();
                if q.is_empty() {
                    return true;
                }
                match items.borrow().get(row.index() as usize) {
                    Some(conv) => conv
                        .creator
                        .name
                        .as_deref()
                        .unwrap_or("Unknown")
                        .to_lowercase()
                        .contains(q.as_str()),
                    None => true,
                }
            });
        }
        {
            let list = list.clone();
            let query = query.clone();
            search.connect_search_changed(move |entry| {
                *query.borrow_mut() = entry.text().to_lowercase();
                list.invalidate_filter();
            });
        }

        Self { root, list, search, items }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_items(&self, items: Vec<Conversation>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for conv in &items {
            self.list.append(&build_row(conv));
        }
        *self.items.borrow_mut() = items;
        self.list.invalidate_filter();
    }

    /// Invoked with a clone of the conversation whose row was selected.
    pub fn connect_selected<F: Fn(Conversation) + 'static>(&self, f: F) {
        let items = self.items.clone();
        self.list.connect_row_selected(move |_, row| {
            let Some(row) = row else { return };
            let idx = row.index();
            if idx < 0 {
                return;
            }
            if let Some(conv) = items.borrow().get(idx as usize) {
                f(conv.clone());
            }
        });
    }

    /// Reports whether the search box currently narrows the list.
    pub fn connect_search_toggled<F: Fn(bool) + 'static>(&self, f: F) {
        self.search.connect_search_changed(move |entry| {
            f(!entry.text().is_empty());
        });
    }
}

fn build_row(conv: &Conversation) -> gtk::ListBoxRow {
    let name = conv.creator.name.as_deref().unwrap_or("Unknown");

    let row_box = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    row_box.set_margin_top(6);
    row_box.set_margin_bottom(6);
    row_box.set_margin_start(4);
    row_box.set_margin_end(4);

    let avatar = super::avatar_badge(conv.creator.id, conv.creator.name.as_deref(), 48);
    row_box.append(&avatar);

    let text_col = gtk::Box::new(gtk::Orientation::Vertical, 2);
    text_col.set_hexpand(true);

    let top_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let name_label = gtk::Label::new(Some(name));
    name_label.add_css_class("heading");
    name_label.set_halign(gtk::Align::Start);
    name_label.set_hexpand(true);
    name_label.set_ellipsize(gtk::pango::EllipsizeMode::End);
    top_row.append(&name_label);

    let when_label = gtk::Label::new(Some(&format::format_relative_date(&conv.updated_at)));
    when_label.add_css_class("dim-label");
    when_label.add_css_class("caption");
    when_label.set_halign(gtk::Align::End);
    top_row.append(&when_label);
    text_col.append(&top_row);

    let subtitle = gtk::Label::new(Some(&format!("{name} joined Chatgram")));
    subtitle.add_css_class("dim-label");
    subtitle.set_halign(gtk::Align::Start);
    subtitle.set_ellipsize(gtk::pango::EllipsizeMode::End);
    text_col.append(&subtitle);

    row_box.append(&text_col);

    let row = gtk::ListBoxRow::new();
    row.set_child(Some(&row_box));
    row
}

fn build_menu_popover() -> gtk::Popover {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 2);
    for entry in [
        "Saved Messages",
        "Contacts",
        "My Stories",
        "Settings",
        "Night Mode",
        "Report a bug",
    ] {
        let label = gtk::Label::new(Some(entry));
        label.set_halign(gtk::Align::Start);
        let btn = gtk::Button::new();
        btn.set_child(Some(&label));
        btn.add_css_class("flat");
        content.append(&btn);
    }
    let popover = gtk::Popover::new();
    popover.set_child(Some(&content));
    popover
}
