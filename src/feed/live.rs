use super::{CollectionQuery, Document, SnapshotSource};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Latest thing a feed has reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState<T> {
    Loading,
    Ready(Arc<Vec<T>>),
    Failed(String),
}

impl<T> FeedState<T> {
    #[must_use]
    pub fn snapshot(&self) -> &[T] {
        match self {
            Self::Ready(documents) => documents,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// One subscription driven on a background task. The newest state always
/// replaces the previous one. Dropping the feed (or calling
/// [`LiveFeed::release`]) cancels the subscription.
pub struct LiveFeed<T> {
    receiver: watch::Receiver<FeedState<T>>,
    task: JoinHandle<()>,
}

impl<T: Document> LiveFeed<T> {
    /// Must be called inside a tokio runtime.
    pub fn spawn<S: SnapshotSource<T>>(source: &S, query: CollectionQuery) -> Self {
        let mut stream = source.subscribe(query);
        let (sender, receiver) = watch::channel(FeedState::Loading);

        let task = tokio::spawn(async move {
            while let Some(delivery) = stream.next().await {
                match delivery {
                    Ok(documents) => {
                        debug!(
                            collection = %query.collection,
                            documents = documents.len(),
                            "snapshot received"
                        );
                        sender.send_replace(FeedState::Ready(Arc::new(documents)));
                    }
                    Err(error) => {
                        warn!(collection = %query.collection, %error, "feed failed");
                        sender.send_replace(FeedState::Failed(error.to_string()));
                        break;
                    }
                }
            }
        });

        Self { receiver, task }
    }

    #[must_use]
    pub fn current(&self) -> FeedState<T> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next state. `None` once the feed has ended and its last
    /// state has already been observed.
    pub async fn changed(&mut self) -> Option<FeedState<T>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Waits until the feed leaves `Loading`.
    pub async fn settled(&mut self) -> FeedState<T> {
        loop {
            let current = self.receiver.borrow_and_update().clone();
            if !current.is_loading() {
                return current;
            }
            if self.receiver.changed().await.is_err() {
                return self.receiver.borrow().clone();
            }
        }
    }

    pub fn release(self) {
        debug!(collection = %T::COLLECTION, "releasing feed");
    }
}

impl<T> Drop for LiveFeed<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
