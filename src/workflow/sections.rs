use super::filter::AppointmentFilter;
use crate::types::{Appointment, AppointmentStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Processing,
    Pending,
}

impl SectionKind {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Processing => "En Proceso",
            Self::Pending => "Pendientes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHeading {
    pub kind: SectionKind,
    pub count: usize,
}

impl SectionHeading {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.kind.title(), self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: Option<SectionHeading>,
    pub items: Vec<Appointment>,
}

/// Splits an already filtered and sorted list into the processing group and
/// the remainder. Headings only appear under the active filter; the
/// remainder's heading counts pending items, not every remaining item.
#[must_use]
pub fn split_sections(visible: Vec<Appointment>, filter: AppointmentFilter) -> Vec<Section> {
    let (processing, rest): (Vec<_>, Vec<_>) = visible
        .into_iter()
        .partition(|appointment| appointment.status.is(AppointmentStatus::Processing));

    let headed = filter == AppointmentFilter::Active;
    let pending_count = rest
        .iter()
        .filter(|appointment| appointment.status.is(AppointmentStatus::Pending))
        .count();

    let processing_heading = (headed && !processing.is_empty()).then(|| SectionHeading {
        kind: SectionKind::Processing,
        count: processing.len(),
    });
    let pending_heading = (headed && pending_count > 0).then_some(SectionHeading {
        kind: SectionKind::Pending,
        count: pending_count,
    });

    [
        Section {
            heading: processing_heading,
            items: processing,
        },
        Section {
            heading: pending_heading,
            items: rest,
        },
    ]
    .into_iter()
    .filter(|section| !section.items.is_empty())
    .collect()
}
