use super::read_ops::{fetch_appointments, fetch_customers, order_clause_for};
use crate::db::BarberDb;
use crate::error::{BarberError, Result};
use crate::feed::{CollectionQuery, Document, SnapshotSource, SnapshotStream};
use crate::types::{Appointment, Customer};
use futures_util::stream::{self, StreamExt};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use std::future::Future;
use tracing::{debug, warn};

enum ListenState {
    Connecting,
    Listening(PgListener),
    Closed,
}

async fn open_listener(pool: &PgPool, channel: &str) -> Result<PgListener> {
    let mut listener = PgListener::connect_with(pool).await.map_err(|e| {
        BarberError::SubscriptionError(format!("Failed to open listener: {e}"))
    })?;
    listener.listen(channel).await.map_err(|e| {
        BarberError::SubscriptionError(format!("Failed to listen on {channel}: {e}"))
    })?;
    debug!(channel, "listening for collection changes");
    Ok(listener)
}

#[derive(Debug, PartialEq, Eq)]
enum Wakeup {
    Notified,
    /// The listener connection dropped; notifications sent meanwhile are gone.
    ConnectionLost,
}

fn wakeup<N>(
    received: std::result::Result<Option<N>, sqlx::Error>,
    channel: &str,
) -> Result<Wakeup> {
    match received {
        Ok(Some(_)) => Ok(Wakeup::Notified),
        Ok(None) => Ok(Wakeup::ConnectionLost),
        Err(e) => Err(BarberError::SubscriptionError(format!(
            "Lost notifications on {channel}: {e}"
        ))),
    }
}

/// Connects on first poll, delivers the current table, then re-reads the
/// whole table after each change notification. The listener is registered
/// before every read, including after a dropped connection, so no change
/// between the two is lost.
fn snapshot_stream<T, F, Fut>(pool: PgPool, query: CollectionQuery, fetch: F) -> SnapshotStream<T>
where
    T: Document,
    F: Fn(PgPool, String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>>> + Send,
{
    let order_clause = match order_clause_for::<T>(&query) {
        Ok(clause) => clause,
        Err(error) => return stream::once(async move { Err(error) }).boxed(),
    };
    let channel = query.collection.change_channel();

    stream::unfold(ListenState::Connecting, move |state| {
        let pool = pool.clone();
        let order_clause = order_clause.clone();
        let fetch = fetch.clone();
        async move {
            let listener = match state {
                ListenState::Closed => return None,
                ListenState::Connecting => None,
                ListenState::Listening(mut listener) => {
                    match wakeup(listener.try_recv().await, channel) {
                        Ok(Wakeup::Notified) => Some(listener),
                        Ok(Wakeup::ConnectionLost) => {
                            warn!(channel, "listener connection lost, re-reading after reconnect");
                            None
                        }
                        Err(error) => return Some((Err(error), ListenState::Closed)),
                    }
                }
            };
            let listener = match listener {
                Some(listener) => listener,
                None => match open_listener(&pool, channel).await {
                    Ok(listener) => listener,
                    Err(error) => return Some((Err(error), ListenState::Closed)),
                },
            };

            match fetch(pool, order_clause).await {
                Ok(documents) => Some((Ok(documents), ListenState::Listening(listener))),
                Err(error) => Some((Err(error), ListenState::Closed)),
            }
        }
    })
    .boxed()
}

impl SnapshotSource<Appointment> for BarberDb {
    fn subscribe(&self, query: CollectionQuery) -> SnapshotStream<Appointment> {
        snapshot_stream(
            self.pool().clone(),
            query,
            |pool: PgPool, order_clause: String| async move {
                fetch_appointments(&pool, &order_clause).await
            },
        )
    }
}

impl SnapshotSource<Customer> for BarberDb {
    fn subscribe(&self, query: CollectionQuery) -> SnapshotStream<Customer> {
        snapshot_stream(
            self.pool().clone(),
            query,
            |pool: PgPool, order_clause: String| async move {
                fetch_customers(&pool, &order_clause).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{wakeup, Wakeup};
    use crate::error::BarberError;

    #[test]
    fn notification_triggers_a_plain_re_read() {
        assert_eq!(
            wakeup(Ok(Some(())), "appointments_changed").ok(),
            Some(Wakeup::Notified)
        );
    }

    #[test]
    fn dropped_connection_is_reported_instead_of_swallowed() {
        assert_eq!(
            wakeup(Ok(None::<()>), "appointments_changed").ok(),
            Some(Wakeup::ConnectionLost)
        );
    }

    #[test]
    fn listener_error_ends_the_feed() {
        let result = wakeup::<()>(Err(sqlx::Error::PoolClosed), "appointments_changed");
        assert!(matches!(
            result,
            Err(BarberError::SubscriptionError(ref message))
                if message.contains("appointments_changed")
        ));
    }
}
