use super::{
    CollectionQuery, Document, OrderDirection, PortFuture, SnapshotSource, SnapshotStream,
    StatusWriter,
};
use crate::error::BarberError;
use crate::types::{Appointment, AppointmentId, AppointmentStatus, Customer, StatusValue};
use futures_util::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
struct Contents<T> {
    documents: Vec<T>,
    failure: Option<String>,
}

/// One collection held in process. Every mutation re-delivers the full
/// collection to all open subscriptions.
#[derive(Clone)]
pub struct MemoryCollection<T: Document> {
    sender: Arc<watch::Sender<Contents<T>>>,
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        let (sender, _) = watch::channel(Contents {
            documents: Vec::new(),
            failure: None,
        });
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl<T: Document> MemoryCollection<T> {
    pub fn replace_all(&self, documents: Vec<T>) {
        self.sender.send_modify(|contents| contents.documents = documents);
    }

    /// Adds a document, assigning a fresh id when it has none. Returns the id.
    pub fn insert(&self, mut document: T) -> String {
        if document.document_id().is_empty() {
            document.assign_id(Uuid::new_v4().to_string());
        }
        let id = document.document_id().to_string();
        self.sender
            .send_modify(|contents| contents.documents.push(document));
        id
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sender.send_if_modified(|contents| {
            let before = contents.documents.len();
            contents.documents.retain(|document| document.document_id() != id);
            contents.documents.len() != before
        })
    }

    /// Applies `change` to the document with `id`; subscribers are only
    /// notified when the document exists.
    pub fn modify(&self, id: &str, change: impl FnOnce(&mut T)) -> bool {
        self.sender.send_if_modified(|contents| {
            contents
                .documents
                .iter_mut()
                .find(|document| document.document_id() == id)
                .map(change)
                .is_some()
        })
    }

    #[must_use]
    pub fn documents(&self) -> Vec<T> {
        self.sender.borrow().documents.clone()
    }

    /// Number of open subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Makes every open and future subscription fail until [`Self::recover`].
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.sender
            .send_modify(|contents| contents.failure = Some(message));
    }

    pub fn recover(&self) {
        self.sender.send_modify(|contents| contents.failure = None);
    }

    #[must_use]
    pub fn subscribe(&self, query: CollectionQuery) -> SnapshotStream<T> {
        if query.collection != T::COLLECTION || query.order_clause().is_none() {
            return stream::once(async move {
                Err(BarberError::InvalidQuery(format!(
                    "cannot order {} by {}",
                    T::COLLECTION,
                    query.order_key
                )))
            })
            .boxed();
        }

        let receiver = self.sender.subscribe();
        stream::unfold(Some((receiver, true)), move |state| async move {
            let (mut receiver, first) = state?;
            if !first && receiver.changed().await.is_err() {
                return None;
            }

            let contents = receiver.borrow_and_update().clone();
            match contents.failure {
                Some(message) => Some((Err(BarberError::SubscriptionError(message)), None)),
                None => {
                    debug!(
                        collection = %query.collection,
                        documents = contents.documents.len(),
                        "delivering snapshot"
                    );
                    Some((
                        Ok(ordered(contents.documents, &query)),
                        Some((receiver, false)),
                    ))
                }
            }
        })
        .boxed()
    }
}

fn ordered<T: Document>(mut documents: Vec<T>, query: &CollectionQuery) -> Vec<T> {
    documents.sort_by(|a, b| {
        let left = a.order_timestamp(query.order_key);
        let right = b.order_timestamp(query.order_key);
        match query.direction {
            OrderDirection::Ascending => left.cmp(&right),
            OrderDirection::Descending => right.cmp(&left),
        }
    });
    documents
}

/// In-process document store holding both collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
    appointments: MemoryCollection<Appointment>,
    customers: MemoryCollection<Customer>,
    write_rejection: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn appointments(&self) -> &MemoryCollection<Appointment> {
        &self.appointments
    }

    #[must_use]
    pub const fn customers(&self) -> &MemoryCollection<Customer> {
        &self.customers
    }

    /// Rejects status writes with `reason` until called again with `None`.
    pub fn reject_writes(&self, reason: Option<String>) {
        match self.write_rejection.lock() {
            Ok(mut guard) => *guard = reason,
            Err(poisoned) => *poisoned.into_inner() = reason,
        }
    }

    fn write_rejection(&self) -> Option<String> {
        match self.write_rejection.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SnapshotSource<Appointment> for MemoryStore {
    fn subscribe(&self, query: CollectionQuery) -> SnapshotStream<Appointment> {
        self.appointments.subscribe(query)
    }
}

impl SnapshotSource<Customer> for MemoryStore {
    fn subscribe(&self, query: CollectionQuery) -> SnapshotStream<Customer> {
        self.customers.subscribe(query)
    }
}

impl StatusWriter for MemoryStore {
    fn update_status<'a>(
        &'a self,
        id: &'a AppointmentId,
        status: AppointmentStatus,
    ) -> PortFuture<'a, ()> {
        Box::pin(async move {
            if let Some(reason) = self.write_rejection() {
                return Err(BarberError::WriteRejected(reason));
            }

            let updated = self.appointments.modify(id.value(), |appointment| {
                appointment.status = StatusValue::Known(status);
            });

            if updated {
                debug!(appointment_id = %id, %status, "status updated");
                Ok(())
            } else {
                Err(BarberError::NotFound(format!("appointment {id}")))
            }
        })
    }
}
