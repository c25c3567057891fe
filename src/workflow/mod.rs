//! Appointment status workflow: which appointments a filter shows, in what
//! order, and which status a gesture moves them to.

mod filter;
mod sections;
mod transition;

pub use filter::{apply_filter, compare_for_display, sort_for_display, AppointmentFilter};
pub use sections::{split_sections, Section, SectionHeading, SectionKind};
pub use transition::{plan_swipe, trigger, StatusUpdate};
