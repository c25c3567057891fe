#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::db::BarberDb;
use crate::error::{BarberError, Result};
use crate::feed::{PortFuture, StatusWriter};
use crate::types::{AppointmentId, AppointmentStatus};
use tracing::{debug, info};

impl BarberDb {
    /// Writes `status` on one appointment and nothing else. The change
    /// reaches subscribers through the table's notification trigger.
    ///
    /// # Errors
    /// Returns [`BarberError::NotFound`] when no appointment has `id`, and
    /// [`BarberError::WriteRejected`] when the database refuses the write.
    pub async fn update_appointment_status(
        &self,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE appointments SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id.value())
            .execute(self.pool())
            .await
            .map_err(|e| BarberError::WriteRejected(format!("Failed to update status: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(BarberError::NotFound(format!("appointment {id}")));
        }

        debug!(appointment_id = %id, %status, "status updated");
        Ok(())
    }

    /// # Errors
    /// Returns an error if any statement of the schema fails.
    pub async fn initialize_schema_from_sql(&self, schema_sql: &str) -> Result<()> {
        sqlx::raw_sql(schema_sql)
            .execute(self.pool())
            .await
            .map(|_result| info!("Schema initialized"))
            .map_err(|e| BarberError::database("Failed to initialize schema", &e))
    }
}

impl StatusWriter for BarberDb {
    fn update_status<'a>(
        &'a self,
        id: &'a AppointmentId,
        status: AppointmentStatus,
    ) -> PortFuture<'a, ()> {
        Box::pin(self.update_appointment_status(id, status))
    }
}
