use super::types::{AppointmentRow, CustomerRow};
use crate::types::{Appointment, AppointmentId, Customer, CustomerId, StatusValue};

pub fn appointment_from_row(row: AppointmentRow) -> Appointment {
    Appointment {
        id: AppointmentId::new(row.id),
        user_id: row.user_id,
        user_name: row.user_name,
        phone: row.phone,
        date: row.date,
        time_slot: row.time_slot,
        status: StatusValue::from(row.status),
        kind: row.kind,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn customer_from_row(row: CustomerRow) -> Customer {
    Customer {
        id: CustomerId::new(row.id),
        name: row.name,
        phone: row.phone,
        chat: row.chat,
        created_at: row.created_at,
        last_interaction: row.last_interaction,
    }
}
