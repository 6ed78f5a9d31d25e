use adw::prelude::*;
use adw::Application;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::app::AppState;
use crate::timeline;
use crate::ui::ViewState;

pub fn show_main_window(app: &Application, state: AppState) {
    crate::ui::load_css();

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Chatgram")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Rc::new(crate::ui::sidebar::Sidebar::new());
    split.set_flap(Some(&sidebar.widget()));

    let chat = Rc::new(crate::ui::chat_view::ChatView::new());
    split.set_content(Some(&chat.widget()));

    overlay.set_child(Some(&split));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Chatgram"));
    header.set_title_widget(Some(&title));

    let refresh_btn = gtk4::Button::from_icon_name("view-refresh-symbolic");
    header.pack_end(&refresh_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    let view_state = Rc::new(RefCell::new(ViewState::default()));
    let base_url = state.api_base_url;

    let load_conversations = {
        let sidebar = sidebar.clone();
        let overlay = overlay.clone();
        let base_url = base_url.clone();
        Rc::new(move || {
            let client = ApiClient::new(&base_url);
            let sidebar = sidebar.clone();
            let overlay = overlay.clone();
            let rx = crate::utils::run_async_to_main(async move { client.conversations().await });
            rx.attach(None, move |res| {
                match res {
                    Ok(items) => {
                        tracing::info!("loaded {} conversations", items.len());
                        sidebar.set_items(items);
                    }
                    Err(err) => {
                        tracing::error!("failed to load conversations: {err}");
                        overlay.add_toast(adw::Toast::new(&format!("Failed to load chats: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        })
    };
    load_conversations();
    {
        let load = load_conversations.clone();
        refresh_btn.connect_clicked(move |_| load());
    }

    {
        let view_state = view_state.clone();
        sidebar.connect_search_toggled(move |active| {
            view_state.borrow_mut().search_active = active;
        });
    }

    {
        let chat = chat.clone();
        let overlay = overlay.clone();
        let view_state = view_state.clone();
        let base_url = base_url.clone();
        sidebar.connect_selected(move |conv| {
            let token = view_state.borrow_mut().begin_fetch(conv.id);
            chat.show_conversation(&conv);

            let client = ApiClient::new(&base_url);
            let chat_id = conv.id;
            let peer_id = conv.creator.id;
            let rx = crate::utils::run_async_to_main(async move { client.chat_messages(chat_id).await });

            let chat = chat.clone();
            let overlay = overlay.clone();
            let view_state = view_state.clone();
            rx.attach(None, move |res| {
                if !view_state.borrow().is_current(chat_id, token) {
                    // a newer selection superseded this fetch
                    return glib::ControlFlow::Continue;
                }
                match res {
                    Ok(messages) => chat.set_messages(&timeline::group_by_day(messages), peer_id),
                    Err(err) => {
                        tracing::error!("failed to load messages for chat {chat_id}: {err}");
                        overlay.add_toast(adw::Toast::new(&format!("Failed to load messages: {err}")));
                    }
                }
                glib::ControlFlow::Continue
            });
        });
    }
}
