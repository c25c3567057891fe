#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::types::{Appointment, AppointmentId, AppointmentStatus, StatusValue, SwipeDirection};
use serde::{Deserialize, Serialize};

/// Target status for a gesture on an item in `current` status. `None` means
/// the caller settles the item back and writes nothing.
#[must_use]
pub const fn trigger(
    current: &StatusValue,
    direction: SwipeDirection,
) -> Option<AppointmentStatus> {
    current.swipe_actions().target(direction)
}

/// The single-field write a gesture resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    appointment_id: AppointmentId,
    status: AppointmentStatus,
}

impl StatusUpdate {
    #[must_use]
    pub const fn new(appointment_id: AppointmentId, status: AppointmentStatus) -> Self {
        Self {
            appointment_id,
            status,
        }
    }

    #[must_use]
    pub const fn appointment_id(&self) -> &AppointmentId {
        &self.appointment_id
    }

    #[must_use]
    pub const fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Field written on the appointment document.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        "status"
    }
}

#[must_use]
pub fn plan_swipe(appointment: &Appointment, direction: SwipeDirection) -> Option<StatusUpdate> {
    trigger(&appointment.status, direction)
        .map(|status| StatusUpdate::new(appointment.id.clone(), status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::{Cancelled, Completed, Pending, Processing};
    use SwipeDirection::{Left, Right};

    #[test]
    fn live_statuses_move_forward_or_cancel() {
        assert_eq!(trigger(&Pending.into(), Left), Some(Cancelled));
        assert_eq!(trigger(&Pending.into(), Right), Some(Processing));
        assert_eq!(trigger(&Processing.into(), Left), Some(Cancelled));
        assert_eq!(trigger(&Processing.into(), Right), Some(Completed));
    }

    #[test]
    fn terminal_and_unknown_statuses_have_no_targets() {
        for direction in [Left, Right] {
            assert_eq!(trigger(&Completed.into(), direction), None);
            assert_eq!(trigger(&Cancelled.into(), direction), None);
            assert_eq!(trigger(&StatusValue::from("confirmed"), direction), None);
            assert_eq!(trigger(&StatusValue::from(""), direction), None);
        }
    }

    #[test]
    fn plan_swipe_targets_only_the_status_field() {
        let appointment = Appointment::new(AppointmentId::new("apt-1"), Pending)
            .with_customer("u1", "Luis", "555-0101");

        let update = plan_swipe(&appointment, Right);
        assert_eq!(
            update,
            Some(StatusUpdate::new(AppointmentId::new("apt-1"), Processing))
        );
        assert_eq!(update.map(|u| u.field()), Some("status"));
    }

    #[test]
    fn plan_swipe_on_completed_settles_back() {
        let appointment = Appointment::new(AppointmentId::new("apt-2"), Completed);
        assert_eq!(plan_swipe(&appointment, Left), None);
        assert_eq!(plan_swipe(&appointment, Right), None);
    }
}
