#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Row of the transition table for this status.
    #[must_use]
    pub const fn swipe_actions(&self) -> SwipeActions {
        match self {
            Self::Pending => SwipeActions::new(Some(Self::Cancelled), Some(Self::Processing)),
            Self::Processing => SwipeActions::new(Some(Self::Cancelled), Some(Self::Completed)),
            Self::Completed | Self::Cancelled => SwipeActions::NONE,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for AppointmentStatus {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown appointment status: {s}")),
        }
    }
}

/// Status as stored: one of the known values, or whatever string the store
/// holds. Unknown values are kept verbatim so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusValue {
    Known(AppointmentStatus),
    Unknown(String),
}

impl StatusValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn known(&self) -> Option<AppointmentStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unknown(_) => None,
        }
    }

    #[must_use]
    pub fn is(&self, status: AppointmentStatus) -> bool {
        self.known() == Some(status)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        match self {
            Self::Known(status) => status.is_terminal(),
            Self::Unknown(_) => false,
        }
    }

    #[must_use]
    pub const fn swipe_actions(&self) -> SwipeActions {
        match self {
            Self::Known(status) => status.swipe_actions(),
            Self::Unknown(_) => SwipeActions::NONE,
        }
    }
}

impl From<AppointmentStatus> for StatusValue {
    fn from(status: AppointmentStatus) -> Self {
        Self::Known(status)
    }
}

impl From<String> for StatusValue {
    fn from(raw: String) -> Self {
        AppointmentStatus::try_from(raw.as_str()).map_or(Self::Unknown(raw), Self::Known)
    }
}

impl From<&str> for StatusValue {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<StatusValue> for String {
    fn from(value: StatusValue) -> Self {
        match value {
            StatusValue::Known(status) => status.as_str().to_string(),
            StatusValue::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// End to start.
    Left,
    /// Start to end.
    Right,
}

impl SwipeDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SwipeDirection {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("Unknown swipe direction: {s}")),
        }
    }
}

/// Targets reachable from one status, one per gesture direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeActions {
    left: Option<AppointmentStatus>,
    right: Option<AppointmentStatus>,
}

impl SwipeActions {
    pub const NONE: Self = Self::new(None, None);

    #[must_use]
    pub const fn new(left: Option<AppointmentStatus>, right: Option<AppointmentStatus>) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub const fn left(&self) -> Option<AppointmentStatus> {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> Option<AppointmentStatus> {
        self.right
    }

    #[must_use]
    pub const fn target(&self, direction: SwipeDirection) -> Option<AppointmentStatus> {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Right => self.right,
        }
    }

    /// When false the gesture affordance must be disabled, not offered as a no-op.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}
