use super::mappers::{appointment_from_row, customer_from_row};
use super::types::{AppointmentRow, CustomerRow};
use crate::db::BarberDb;
use crate::error::{BarberError, Result};
use crate::feed::{CollectionQuery, Document};
use crate::types::{Appointment, AppointmentId, Customer};
use sqlx::PgPool;

const APPOINTMENT_COLUMNS: &str =
    "id, user_id, user_name, phone, date, time_slot, status, type, created_at, updated_at";
const CUSTOMER_COLUMNS: &str = "id, name, phone, chat, created_at, last_interaction";

/// `ORDER BY` clause for `query`, checked against the document's collection.
pub(crate) fn order_clause_for<T: Document>(query: &CollectionQuery) -> Result<String> {
    if query.collection != T::COLLECTION {
        return Err(BarberError::InvalidQuery(format!(
            "query for {} used on {}",
            query.collection,
            T::COLLECTION
        )));
    }

    query.order_clause().ok_or_else(|| {
        BarberError::InvalidQuery(format!(
            "cannot order {} by {}",
            query.collection, query.order_key
        ))
    })
}

pub(crate) async fn fetch_appointments(
    pool: &PgPool,
    order_clause: &str,
) -> Result<Vec<Appointment>> {
    sqlx::query_as::<_, AppointmentRow>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY {order_clause}, id"
    ))
    .fetch_all(pool)
    .await
    .map(|rows| rows.into_iter().map(appointment_from_row).collect())
    .map_err(|e| BarberError::database("Failed to load appointments", &e))
}

pub(crate) async fn fetch_customers(pool: &PgPool, order_clause: &str) -> Result<Vec<Customer>> {
    sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM chatbot_users ORDER BY {order_clause}, id"
    ))
    .fetch_all(pool)
    .await
    .map(|rows| rows.into_iter().map(customer_from_row).collect())
    .map_err(|e| BarberError::database("Failed to load customers", &e))
}

impl BarberDb {
    /// One-off snapshot of the appointments collection.
    ///
    /// # Errors
    /// Returns an error if the query is invalid or the database read fails.
    pub async fn list_appointments(&self, query: &CollectionQuery) -> Result<Vec<Appointment>> {
        let order_clause = order_clause_for::<Appointment>(query)?;
        fetch_appointments(self.pool(), &order_clause).await
    }

    /// # Errors
    /// Returns an error if the query is invalid or the database read fails.
    pub async fn list_customers(&self, query: &CollectionQuery) -> Result<Vec<Customer>> {
        let order_clause = order_clause_for::<Customer>(query)?;
        fetch_customers(self.pool(), &order_clause).await
    }

    /// # Errors
    /// Returns an error if the database read fails.
    pub async fn get_appointment(&self, id: &AppointmentId) -> Result<Option<Appointment>> {
        sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(self.pool())
        .await
        .map(|row| row.map(appointment_from_row))
        .map_err(|e| BarberError::database(&format!("Failed to load appointment {id}"), &e))
    }
}
