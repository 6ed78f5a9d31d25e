use reqwest::Client as HttpClient;

use crate::api::error::ApiError;
use crate::api::models::{ChatListResponse, ChatPage, Conversation, Message, MessageListResponse};

pub struct ApiClient {
    http: HttpClient,
    api_base: String,
}

/// Number of pages needed for `total` items at `per_page` items each. A zero
/// page size would mean an endless page walk; treat it as a single page.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page)
}

fn sort_newest_first(chats: &mut [Conversation]) {
    chats.sort_by(|a, b| {
        crate::timeline::sort_key(&b.updated_at).cmp(&crate::timeline::sort_key(&a.updated_at))
    });
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            api_base: Self::base_api(base_url),
        }
    }

    fn base_api(base_url: &str) -> String {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.ends_with("/api") { trimmed.to_string() } else { format!("{}/api", trimmed) }
    }

    async fn get_json(&self, endpoint: &str) -> Result<String, ApiError> {
        let resp = self.http.get(endpoint).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Api(format!("HTTP {}", resp.status())));
        }
        Ok(resp.text().await?)
    }

    async fn chats_page(&self, page: u64) -> Result<ChatPage, ApiError> {
        let endpoint = format!("{}/get_all_chats?page={}", self.api_base, page);
        let body = self.get_json(&endpoint).await?;
        let parsed: ChatListResponse = serde_json::from_str(&body)?;
        if parsed.status != "success" {
            return Err(ApiError::Api(parsed.status));
        }
        if parsed.data.current_page.is_some_and(|got| got != page) {
            tracing::warn!(
                "asked for chat page {page}, server answered page {:?}",
                parsed.data.current_page
            );
        }
        Ok(parsed.data)
    }

    /// Fetch every page of the chat listing and return the union, sorted by
    /// `updated_at` descending (stable on ties).
    ///
    /// A failing first page aborts the whole load with no partial data. A
    /// failing later page is logged and skipped; the listing simply misses
    /// that page's chats. Nothing is cached between calls.
    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let first = self.chats_page(1).await?;
        let pages = total_pages(first.total, first.per_page);
        let mut chats = first.chats;
        for page in 2..=pages {
            match self.chats_page(page).await {
                Ok(p) => chats.extend(p.chats),
                Err(err) => tracing::warn!("skipping chat page {page}: {err}"),
            }
        }
        sort_newest_first(&mut chats);
        Ok(chats)
    }

    /// Fetch the messages of one chat, in whatever order the server sends them.
    pub async fn chat_messages(&self, chat_id: i64) -> Result<Vec<Message>, ApiError> {
        let endpoint = format!("{}/get_chat_messages?chat_id={}", self.api_base, chat_id);
        let body = self.get_json(&endpoint).await?;
        let parsed: MessageListResponse = serde_json::from_str(&body)?;
        if parsed.status != "success" {
            return Err(ApiError::Api(parsed.status));
        }
        Ok(parsed.data)
    }
}
