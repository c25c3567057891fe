//! Texts and date formats the staff-facing views use.

use crate::types::{AppointmentStatus, StatusValue, SwipeActions, SwipeDirection};
use chrono::{DateTime, Local, TimeZone, Utc};

pub const MISSING_DATE: &str = "Fecha no disponible";
pub const SWIPE_HINT: &str = "← Desliza para cambiar estado →";

#[must_use]
pub fn status_label(status: &StatusValue) -> &str {
    match status {
        StatusValue::Known(AppointmentStatus::Pending) => "Pendiente",
        StatusValue::Known(AppointmentStatus::Processing) => "En proceso",
        StatusValue::Known(AppointmentStatus::Cancelled) => "Cancelada",
        StatusValue::Known(AppointmentStatus::Completed) => "Completada",
        StatusValue::Unknown(raw) if raw == "confirmed" => "Confirmada",
        StatusValue::Unknown(raw) => raw,
    }
}

#[must_use]
pub fn appointment_type_label(kind: &str) -> &str {
    match kind {
        "scheduled" => "programado",
        "walk-in" => "inmediato",
        other => other,
    }
}

/// Label shown behind an item while it is dragged in `direction`.
#[must_use]
pub const fn swipe_label(actions: SwipeActions, direction: SwipeDirection) -> Option<&'static str> {
    match (direction, actions.target(direction)) {
        (_, None) => None,
        (SwipeDirection::Left, Some(_)) => Some("Cancelar"),
        (SwipeDirection::Right, Some(AppointmentStatus::Processing)) => Some("En proceso"),
        (SwipeDirection::Right, Some(AppointmentStatus::Completed)) => Some("Completada"),
        (SwipeDirection::Right, Some(_)) => Some(""),
    }
}

#[must_use]
pub const fn swipe_hint(actions: SwipeActions) -> Option<&'static str> {
    if actions.is_enabled() {
        Some(SWIPE_HINT)
    } else {
        None
    }
}

/// `dd/MM/yyyy` in `tz`.
#[must_use]
pub fn format_day_in<Tz: TimeZone>(date: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.map_or_else(
        || MISSING_DATE.to_string(),
        |date| date.with_timezone(tz).format("%d/%m/%Y").to_string(),
    )
}

/// `dd/MM/yyyy HH:mm` in `tz`.
#[must_use]
pub fn format_timestamp_in<Tz: TimeZone>(date: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.map_or_else(
        || MISSING_DATE.to_string(),
        |date| date.with_timezone(tz).format("%d/%m/%Y %H:%M").to_string(),
    )
}

#[must_use]
pub fn format_day(date: Option<DateTime<Utc>>) -> String {
    format_day_in(date, &Local)
}

#[must_use]
pub fn format_timestamp(date: Option<DateTime<Utc>>) -> String {
    format_timestamp_in(date, &Local)
}
