//! Re-subscribing fan-out ("switch to latest").

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{Stream, StreamExt};

use super::Feed;

/// Map every outer snapshot to an inner feed and switch to it.
///
/// Installing a new inner feed drops the previous one, which cancels all
/// subscriptions it holds. The outer leg is drained to its most recent
/// value before the inner feed is polled, so a consumer can never observe
/// an emission built from a superseded outer snapshot.
///
/// The output terminates once the outer feed has terminated and the last
/// inner feed has too.
pub fn switch_map<A, B, F>(outer: Feed<A>, into_inner: F) -> Feed<B>
where
    A: Send + 'static,
    B: Send + 'static,
    F: FnMut(A) -> Feed<B> + Send + Unpin + 'static,
{
    SwitchMap {
        outer: Some(outer),
        inner: None,
        into_inner,
    }
    .boxed()
}

struct SwitchMap<A, B, F> {
    outer: Option<Feed<A>>,
    inner: Option<Feed<B>>,
    into_inner: F,
}

impl<A, B, F> Stream for SwitchMap<A, B, F>
where
    F: FnMut(A) -> Feed<B> + Unpin,
{
    type Item = B;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<B>> {
        let this = self.get_mut();

        // Drain the outer feed to its latest snapshot. Replacing the
        // inner feed here drops the previous epoch's subscriptions.
        loop {
            match this.outer.as_mut() {
                None => break,
                Some(outer) => match outer.poll_next_unpin(cx) {
                    Poll::Ready(Some(snapshot)) => {
                        this.inner = Some((this.into_inner)(snapshot));
                    }
                    Poll::Ready(None) => this.outer = None,
                    Poll::Pending => break,
                },
            }
        }

        if let Some(inner) = this.inner.as_mut() {
            match inner.poll_next_unpin(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => {
                    this.inner = None;
                    if this.outer.is_none() {
                        return Poll::Ready(None);
                    }
                }
                Poll::Pending => {}
            }
        } else if this.outer.is_none() {
            return Poll::Ready(None);
        }

        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::feeds::{feed_of, push_feed};
    use futures_util::stream;

    #[tokio::test]
    async fn switches_to_latest_inner() {
        let (outer_tx, outer) = push_feed::<u32>();
        let mut switched = switch_map(outer, |n| feed_of(vec![n * 10, n * 10 + 1]));

        outer_tx.push(1);
        assert_eq!(switched.next().await, Some(10));
        assert_eq!(switched.next().await, Some(11));

        outer_tx.push(2);
        assert_eq!(switched.next().await, Some(20));
    }

    #[tokio::test]
    async fn new_outer_value_cancels_previous_inner() {
        let (outer_tx, outer) = push_feed::<u32>();
        let (first_tx, first_inner) = push_feed::<u32>();

        // Inner feeds handed out in order: the push feed, then a canned one.
        let mut inners = vec![feed_of(vec![99u32]), first_inner];
        let mut switched = switch_map(outer, move |_| {
            inners.pop().unwrap_or_else(|| stream::pending().boxed())
        });

        outer_tx.push(1);
        first_tx.push(5);
        assert_eq!(switched.next().await, Some(5));
        assert!(!first_tx.is_closed());

        // The second outer snapshot replaces the first inner feed, which
        // drops its subscription.
        outer_tx.push(2);
        assert_eq!(switched.next().await, Some(99));
        assert!(first_tx.is_closed());

        // Pushing into the abandoned inner feed delivers nothing.
        first_tx.push(6);
        assert!(futures_util::poll!(switched.next()).is_pending());
    }

    #[tokio::test]
    async fn drains_outer_before_polling_inner() {
        // Two outer snapshots arrive before anything is polled; only the
        // second epoch's inner feed may emit.
        let outer = feed_of(vec![1u32, 2]);
        let mut switched = switch_map(outer, |n| feed_of(vec![n]));
        assert_eq!(switched.next().await, Some(2));
        assert_eq!(switched.next().await, None);
    }

    #[tokio::test]
    async fn terminates_with_outer_and_inner() {
        let outer = feed_of(vec![1u32]);
        let collected: Vec<u32> = switch_map(outer, |n| feed_of(vec![n, n + 1]))
            .collect()
            .await;
        assert_eq!(collected, vec![1, 2]);
    }
}
