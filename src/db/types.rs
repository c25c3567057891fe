use sqlx::FromRow;

#[derive(FromRow)]
pub(crate) struct AppointmentRow {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) phone: String,
    pub(crate) date: Option<chrono::DateTime<chrono::Utc>>,
    pub(crate) time_slot: String,
    pub(crate) status: String,
    #[sqlx(rename = "type")]
    pub(crate) kind: String,
    pub(crate) created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub(crate) updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(FromRow)]
pub(crate) struct CustomerRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) phone: String,
    pub(crate) chat: String,
    pub(crate) created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub(crate) last_interaction: Option<chrono::DateTime<chrono::Utc>>,
}
