use serde::{Deserialize, Serialize};

/// The `creator`/`sender` object attached to chats and messages. The dev API
/// omits either field for some records.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Conversation {
    pub id: i64,
    #[serde(default)]
    pub creator: UserRef,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub id: i64,
    #[serde(default)]
    pub sender: UserRef,
    #[serde(default)]
    pub message: String,
    pub updated_at: String,
}

/// One page of the paginated chat listing, as nested under the envelope's
/// `data` key.
#[derive(Debug, Deserialize)]
pub struct ChatPage {
    #[serde(rename = "data")]
    pub chats: Vec<Conversation>,
    pub total: u64,
    pub per_page: u64,
    #[serde(default)]
    pub current_page: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ChatListResponse {
    pub status: String,
    pub data: ChatPage,
}

#[derive(Debug, Deserialize)]
pub struct MessageListResponse {
    pub status: String,
    pub data: Vec<Message>,
}
