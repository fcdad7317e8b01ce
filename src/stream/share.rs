//! Feed multicasting.

use futures_util::stream::{self, StreamExt};
use tokio::sync::mpsc;

use super::Feed;

/// Multicast one feed to two consumers.
///
/// A forwarding task drives the upstream feed and pushes every value to
/// both consumers; it stops as soon as the upstream terminates or both
/// consumers have been dropped. Each consumer sees every value in order.
///
/// Must be called within a Tokio runtime.
pub fn share<T>(source: Feed<T>) -> (Feed<T>, Feed<T>)
where
    T: Clone + Send + 'static,
{
    let (left_tx, left_rx) = mpsc::unbounded_channel();
    let (right_tx, right_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut source = source;
        while let Some(value) = source.next().await {
            let left_alive = left_tx.send(value.clone()).is_ok();
            let right_alive = right_tx.send(value).is_ok();
            if !left_alive && !right_alive {
                break;
            }
        }
    });

    (receiver_feed(left_rx), receiver_feed(right_rx))
}

/// Adapt an unbounded receiver into a feed that ends when the sender is
/// dropped.
pub(crate) fn receiver_feed<T: Send + 'static>(receiver: mpsc::UnboundedReceiver<T>) -> Feed<T> {
    stream::unfold(receiver, |mut receiver| async move {
        let value = receiver.recv().await?;
        Some((value, receiver))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::feeds::push_feed;

    #[tokio::test]
    async fn both_sides_see_every_value_in_order() {
        let (tx, source) = push_feed::<u32>();
        let (mut left, mut right) = share(source);

        tx.push(1);
        tx.push(2);
        assert_eq!(left.next().await, Some(1));
        assert_eq!(left.next().await, Some(2));
        assert_eq!(right.next().await, Some(1));
        assert_eq!(right.next().await, Some(2));
    }

    #[tokio::test]
    async fn surviving_side_keeps_receiving_after_the_other_drops() {
        let (tx, source) = push_feed::<u32>();
        let (left, mut right) = share(source);
        drop(left);

        tx.push(7);
        assert_eq!(right.next().await, Some(7));
    }

    #[tokio::test]
    async fn consumers_end_when_upstream_ends() {
        let (tx, source) = push_feed::<u32>();
        let (mut left, mut right) = share(source);

        tx.push(1);
        drop(tx);
        assert_eq!(left.next().await, Some(1));
        assert_eq!(left.next().await, None);
        assert_eq!(right.next().await, Some(1));
        assert_eq!(right.next().await, None);
    }
}
