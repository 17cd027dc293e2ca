use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;

const PUBLISH_BUFFER: usize = 64;

/// Observable value with replay-latest and ordered delivery.
///
/// The latest value is always readable with [`Property::get`]. Observers pick
/// one of two delivery modes:
///
/// - [`Property::watch`] yields the current value immediately, then the newest
///   value whenever it changes. Slow observers skip intermediate values.
/// - [`Property::subscribe`] yields every value published after the call, in
///   order, so nothing is coalesced.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
    published: broadcast::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Property holding `initial`, with no observers yet.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        let (published, _) = broadcast::channel(PUBLISH_BUFFER);
        Self { tx, rx, published }
    }

    /// Publishes `new_value` unless it equals the current one.
    ///
    /// Returns `true` when watchers and subscribers were notified.
    pub(crate) fn set(&self, new_value: T) -> bool
    where
        T: PartialEq,
    {
        let changed = self.tx.send_if_modified(|current| {
            let differs = *current != new_value;
            if differs {
                current.clone_from(&new_value);
            }
            differs
        });

        if changed {
            let _ = self.published.send(new_value);
        }

        changed
    }

    /// Clone of the latest value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Latest-value stream, starting with the current value.
    pub fn watch(&self) -> impl Stream<Item = T> + Send + use<T> {
        WatchStream::new(self.rx.clone())
    }

    /// Receive every value published from now on.
    ///
    /// Unlike [`Property::watch`] the current value is not replayed. If the
    /// observer falls more than the internal buffer behind, the oldest values
    /// are dropped and the stream resumes with the next published value.
    pub fn subscribe(&self) -> impl Stream<Item = T> + Send + use<T> {
        let mut rx = self.published.subscribe();

        async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok(value) => yield value,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::{FutureExt, StreamExt};

    use super::*;

    #[tokio::test]
    async fn set_skips_equal_values() {
        let property = Property::new(1);

        assert!(!property.set(1));
        assert!(property.set(2));
        assert_eq!(property.get(), 2);
    }

    #[tokio::test]
    async fn subscribe_receives_every_change_in_order() {
        let property = Property::new(0);
        let mut published = Box::pin(property.subscribe());

        property.set(1);
        property.set(2);
        property.set(2);
        property.set(3);

        assert_eq!(published.next().await, Some(1));
        assert_eq!(published.next().await, Some(2));
        assert_eq!(published.next().await, Some(3));
        assert!(published.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn watch_replays_current_value() {
        let property = Property::new("initial".to_string());
        let mut watched = Box::pin(property.watch());

        assert_eq!(watched.next().await.as_deref(), Some("initial"));

        property.set("next".to_string());
        assert_eq!(watched.next().await.as_deref(), Some("next"));
    }
}
