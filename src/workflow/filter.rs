#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::types::{Appointment, AppointmentStatus, StatusValue};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentFilter {
    #[default]
    Active,
    Cancelled,
    Completed,
}

impl AppointmentFilter {
    pub const ALL: [Self; 3] = [Self::Active, Self::Cancelled, Self::Completed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// `Active` is "not terminal" rather than a list of live statuses, so any
    /// status the store invents later shows up there.
    #[must_use]
    pub fn matches(&self, status: &StatusValue) -> bool {
        match self {
            Self::Active => !status.is_terminal(),
            Self::Cancelled => status.is(AppointmentStatus::Cancelled),
            Self::Completed => status.is(AppointmentStatus::Completed),
        }
    }

    /// Closest filter name to a mistyped one, if any is near enough.
    #[must_use]
    pub fn suggest(typo: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .map(|filter| (filter, strsim::levenshtein(typo, filter.as_str())))
            .filter(|(_, distance)| *distance <= 3)
            .min_by_key(|(_, distance)| *distance)
            .map(|(filter, _)| filter)
    }
}

impl fmt::Display for AppointmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for AppointmentFilter {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(Self::suggest(s).map_or_else(
                || format!("Unknown filter: {s}"),
                |hint| format!("Unknown filter: {s} (did you mean '{hint}'?)"),
            )),
        }
    }
}

impl FromStr for AppointmentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

const fn display_rank(status: &StatusValue) -> u8 {
    match status {
        StatusValue::Known(AppointmentStatus::Processing) => 0,
        StatusValue::Known(AppointmentStatus::Pending) => 1,
        StatusValue::Known(AppointmentStatus::Completed | AppointmentStatus::Cancelled)
        | StatusValue::Unknown(_) => 2,
    }
}

/// Processing first, then pending, then everything else; most recent date
/// first inside each group, undated items last.
#[must_use]
pub fn compare_for_display(a: &Appointment, b: &Appointment) -> Ordering {
    display_rank(&a.status)
        .cmp(&display_rank(&b.status))
        .then_with(|| b.date.cmp(&a.date))
}

/// Stable sort into display order.
#[must_use]
pub fn sort_for_display(appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments
        .into_iter()
        .sorted_by(compare_for_display)
        .collect()
}

/// Visible, ordered subset of a snapshot for one filter.
#[must_use]
pub fn apply_filter(snapshot: &[Appointment], filter: AppointmentFilter) -> Vec<Appointment> {
    snapshot
        .iter()
        .filter(|appointment| filter.matches(&appointment.status))
        .cloned()
        .sorted_by(compare_for_display)
        .collect()
}
