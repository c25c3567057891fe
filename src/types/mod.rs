mod appointment;
mod customer;
mod identifiers;
mod session;
mod status;

pub use appointment::Appointment;
pub use customer::Customer;
pub use identifiers::{AppointmentId, CustomerId, StaffUid};
pub use session::StaffSession;
pub use status::{AppointmentStatus, StatusValue, SwipeActions, SwipeDirection};
