#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Staff-facing projections of the live feeds.

use crate::error::Result;
use crate::feed::{FeedState, StatusWriter};
use crate::types::{Appointment, AppointmentId, Customer, StaffSession, SwipeDirection};
use crate::workflow::{
    apply_filter, plan_swipe, split_sections, AppointmentFilter, Section, StatusUpdate,
};
use serde::Serialize;
use tracing::{info, warn};

pub const WRITE_FAILURE_NOTICE: &str = "Error al actualizar el estado";
pub const UNKNOWN_ERROR: &str = "Error desconocido";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum BoardView<T> {
    Loading,
    Failed { message: String },
    Empty { title: &'static str, hint: &'static str },
    Ready(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwipeOutcome {
    /// No transition for this item and direction; nothing was written.
    Settled,
    Requested(StatusUpdate),
    WriteFailed(StatusUpdate),
}

const fn empty_texts(filter: AppointmentFilter) -> (&'static str, &'static str) {
    match filter {
        AppointmentFilter::Active => (
            "No hay citas activas",
            "Las citas pendientes y en proceso aparecerán aquí",
        ),
        AppointmentFilter::Cancelled => (
            "No hay citas canceladas",
            "Las citas canceladas aparecerán aquí",
        ),
        AppointmentFilter::Completed => (
            "No hay citas completadas",
            "Las citas completadas aparecerán aquí",
        ),
    }
}

fn failure_message(message: &str) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message.to_string()
    }
}

/// Appointment list for one signed-in staff member.
#[derive(Debug)]
pub struct AppointmentBoard {
    session: StaffSession,
    filter: AppointmentFilter,
    feed: FeedState<Appointment>,
    notice: Option<String>,
}

impl AppointmentBoard {
    #[must_use]
    pub const fn open(session: StaffSession) -> Self {
        Self {
            session,
            filter: AppointmentFilter::Active,
            feed: FeedState::Loading,
            notice: None,
        }
    }

    #[must_use]
    pub const fn with_filter(mut self, filter: AppointmentFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub const fn session(&self) -> &StaffSession {
        &self.session
    }

    #[must_use]
    pub const fn filter(&self) -> AppointmentFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: AppointmentFilter) {
        self.filter = filter;
    }

    /// Takes the feed's latest state; the previous snapshot is discarded.
    pub fn observe(&mut self, state: FeedState<Appointment>) {
        self.feed = state;
    }

    #[must_use]
    pub fn visible(&self) -> Vec<Appointment> {
        apply_filter(self.feed.snapshot(), self.filter)
    }

    #[must_use]
    pub fn view(&self) -> BoardView<Vec<Section>> {
        match &self.feed {
            FeedState::Loading => BoardView::Loading,
            FeedState::Failed(message) => BoardView::Failed {
                message: failure_message(message),
            },
            FeedState::Ready(_) => {
                let visible = self.visible();
                if visible.is_empty() {
                    let (title, hint) = empty_texts(self.filter);
                    BoardView::Empty { title, hint }
                } else {
                    BoardView::Ready(split_sections(visible, self.filter))
                }
            }
        }
    }

    /// Resolves a gesture on a displayed item without writing anything.
    #[must_use]
    pub fn plan(&self, id: &AppointmentId, direction: SwipeDirection) -> Option<StatusUpdate> {
        self.visible()
            .iter()
            .find(|appointment| &appointment.id == id)
            .and_then(|appointment| plan_swipe(appointment, direction))
    }

    /// Applies a gesture: at most one status write, no local change. The
    /// displayed status only moves when the feed re-delivers.
    pub async fn swipe<W: StatusWriter>(
        &mut self,
        writer: &W,
        id: &AppointmentId,
        direction: SwipeDirection,
    ) -> SwipeOutcome {
        let Some(update) = self.plan(id, direction) else {
            return SwipeOutcome::Settled;
        };

        match self.write(writer, &update).await {
            Ok(()) => SwipeOutcome::Requested(update),
            Err(_) => {
                self.notice = Some(WRITE_FAILURE_NOTICE.to_string());
                SwipeOutcome::WriteFailed(update)
            }
        }
    }

    /// Same gesture as [`Self::swipe`], but hands the writer's error back
    /// instead of raising the notice. `Ok(None)` means nothing was written.
    ///
    /// # Errors
    /// Returns whatever the writer returned for the status update.
    pub async fn try_swipe<W: StatusWriter>(
        &self,
        writer: &W,
        id: &AppointmentId,
        direction: SwipeDirection,
    ) -> Result<Option<StatusUpdate>> {
        let Some(update) = self.plan(id, direction) else {
            return Ok(None);
        };
        self.write(writer, &update).await?;
        Ok(Some(update))
    }

    async fn write<W: StatusWriter>(&self, writer: &W, update: &StatusUpdate) -> Result<()> {
        writer
            .update_status(update.appointment_id(), update.status())
            .await
            .map(|()| {
                info!(
                    staff = %self.session.uid(),
                    appointment_id = %update.appointment_id(),
                    status = %update.status(),
                    "status change requested"
                );
            })
            .map_err(|error| {
                warn!(
                    staff = %self.session.uid(),
                    appointment_id = %update.appointment_id(),
                    %error,
                    "status change failed"
                );
                error
            })
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

/// Customer list; read-only.
#[derive(Debug)]
pub struct CustomerRoster {
    session: StaffSession,
    feed: FeedState<Customer>,
}

impl CustomerRoster {
    #[must_use]
    pub const fn open(session: StaffSession) -> Self {
        Self {
            session,
            feed: FeedState::Loading,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &StaffSession {
        &self.session
    }

    pub fn observe(&mut self, state: FeedState<Customer>) {
        self.feed = state;
    }

    #[must_use]
    pub fn view(&self) -> BoardView<Vec<Customer>> {
        match &self.feed {
            FeedState::Loading => BoardView::Loading,
            FeedState::Failed(message) => BoardView::Failed {
                message: failure_message(message),
            },
            FeedState::Ready(customers) if customers.is_empty() => BoardView::Empty {
                title: "No hay clientes",
                hint: "Aún no hay clientes registrados",
            },
            FeedState::Ready(customers) => BoardView::Ready(customers.to_vec()),
        }
    }
}
