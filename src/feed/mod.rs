#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Live collection feeds.
//!
//! A [`SnapshotSource`] hands out lazy streams that re-deliver the whole
//! ordered collection every time anything in it changes. Nothing is fetched
//! until the stream is first polled, and every call to `subscribe` starts an
//! independent stream. A stream ends after it yields an error; subscribing
//! again is up to the consumer. Dropping the stream releases the
//! subscription.

mod live;
mod memory;

pub use live::{FeedState, LiveFeed};
pub use memory::{MemoryCollection, MemoryStore};

use crate::error::Result;
use crate::types::{Appointment, AppointmentId, AppointmentStatus, Customer};
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type SnapshotStream<T> = BoxStream<'static, Result<Vec<T>>>;
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Appointments,
    Customers,
}

impl Collection {
    /// Table / collection name in the store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Appointments => "appointments",
            Self::Customers => "chatbot_users",
        }
    }

    /// Notification channel the store signals on after any write.
    #[must_use]
    pub const fn change_channel(&self) -> &'static str {
        match self {
            Self::Appointments => "appointments_changed",
            Self::Customers => "chatbot_users_changed",
        }
    }

    /// Column backing a document order key, if the key is orderable.
    #[must_use]
    pub fn order_column(&self, key: &str) -> Option<&'static str> {
        match (self, key) {
            (Self::Appointments, "date") => Some("date"),
            (Self::Appointments | Self::Customers, "createdAt") => Some("created_at"),
            (Self::Appointments, "updatedAt") => Some("updated_at"),
            (Self::Customers, "lastInteraction") => Some("last_interaction"),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC NULLS FIRST",
            Self::Descending => "DESC NULLS LAST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CollectionQuery {
    pub collection: Collection,
    pub order_key: &'static str,
    pub direction: OrderDirection,
}

impl CollectionQuery {
    #[must_use]
    pub const fn new(
        collection: Collection,
        order_key: &'static str,
        direction: OrderDirection,
    ) -> Self {
        Self {
            collection,
            order_key,
            direction,
        }
    }

    #[must_use]
    pub const fn appointments_by_date() -> Self {
        Self::new(Collection::Appointments, "date", OrderDirection::Descending)
    }

    #[must_use]
    pub const fn customers_by_last_interaction() -> Self {
        Self::new(
            Collection::Customers,
            "lastInteraction",
            OrderDirection::Descending,
        )
    }

    /// `ORDER BY` clause for this query, or `None` when the key is not
    /// orderable for the collection.
    #[must_use]
    pub fn order_clause(&self) -> Option<String> {
        self.collection
            .order_column(self.order_key)
            .map(|column| format!("{column} {}", self.direction.as_sql()))
    }
}

/// A document type that lives in exactly one collection.
pub trait Document: Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn document_id(&self) -> &str;

    fn assign_id(&mut self, id: String);

    /// Timestamp behind an order key; `None` for absent values and unknown keys.
    fn order_timestamp(&self, key: &str) -> Option<DateTime<Utc>>;

    fn default_query() -> CollectionQuery;
}

impl Document for Appointment {
    const COLLECTION: Collection = Collection::Appointments;

    fn document_id(&self) -> &str {
        self.id.value()
    }

    fn assign_id(&mut self, id: String) {
        self.id = AppointmentId::new(id);
    }

    fn order_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        match key {
            "date" => self.date,
            "createdAt" => self.created_at,
            "updatedAt" => self.updated_at,
            _ => None,
        }
    }

    fn default_query() -> CollectionQuery {
        CollectionQuery::appointments_by_date()
    }
}

impl Document for Customer {
    const COLLECTION: Collection = Collection::Customers;

    fn document_id(&self) -> &str {
        self.id.value()
    }

    fn assign_id(&mut self, id: String) {
        self.id = crate::types::CustomerId::new(id);
    }

    fn order_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        match key {
            "lastInteraction" => self.last_interaction,
            "createdAt" => self.created_at,
            _ => None,
        }
    }

    fn default_query() -> CollectionQuery {
        CollectionQuery::customers_by_last_interaction()
    }
}

pub trait SnapshotSource<T: Document>: Send + Sync {
    fn subscribe(&self, query: CollectionQuery) -> SnapshotStream<T>;
}

/// The one write this crate performs: `status` on a single appointment.
pub trait StatusWriter: Send + Sync {
    fn update_status<'a>(
        &'a self,
        id: &'a AppointmentId,
        status: AppointmentStatus,
    ) -> PortFuture<'a, ()>;
}
