#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod board;
pub mod db;
pub mod display;
pub mod error;
pub mod feed;
pub mod types;
pub mod workflow;

pub use board::{AppointmentBoard, BoardView, CustomerRoster, SwipeOutcome};
pub use db::BarberDb;
pub use error::{code, BarberError, Result};
pub use feed::{
    Collection, CollectionQuery, FeedState, LiveFeed, MemoryStore, OrderDirection, SnapshotSource,
    StatusWriter,
};
pub use types::*;
pub use workflow::{apply_filter, plan_swipe, trigger, AppointmentFilter, StatusUpdate};
