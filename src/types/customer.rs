use super::identifiers::CustomerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer registered by the chat intake. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Free-text chat transcript.
    #[serde(default)]
    pub chat: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Customer {
    #[must_use]
    pub fn new(id: CustomerId, name: &str, phone: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            chat: String::new(),
            created_at: None,
            last_interaction: None,
        }
    }

    #[must_use]
    pub const fn with_last_interaction(mut self, at: DateTime<Utc>) -> Self {
        self.last_interaction = Some(at);
        self
    }
}
