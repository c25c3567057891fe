use super::identifiers::AppointmentId;
use super::status::{StatusValue, SwipeActions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment document. Only `status` is ever written by this crate; the
/// rest is display payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_slot: String,
    pub status: StatusValue,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    #[must_use]
    pub fn new(id: AppointmentId, status: impl Into<StatusValue>) -> Self {
        Self {
            id,
            user_id: String::new(),
            user_name: String::new(),
            phone: String::new(),
            date: None,
            time_slot: String::new(),
            status: status.into(),
            kind: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub const fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn with_customer(mut self, user_id: &str, user_name: &str, phone: &str) -> Self {
        self.user_id = user_id.to_string();
        self.user_name = user_name.to_string();
        self.phone = phone.to_string();
        self
    }

    #[must_use]
    pub fn with_slot(mut self, time_slot: &str, kind: &str) -> Self {
        self.time_slot = time_slot.to_string();
        self.kind = kind.to_string();
        self
    }

    #[must_use]
    pub const fn swipe_actions(&self) -> SwipeActions {
        self.status.swipe_actions()
    }
}
