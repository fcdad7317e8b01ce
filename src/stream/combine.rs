//! Latest-value joins.

use futures_util::future;
use futures_util::stream::{self, StreamExt};

use super::Feed;

enum Side<A, B> {
    Left(A),
    Right(B),
}

/// Join two feeds on their latest values.
///
/// Nothing is emitted until both legs have produced at least one value;
/// after that every update of either leg re-emits the pair. When one leg
/// terminates its last value keeps participating in the join.
pub fn combine_latest2<A, B>(left: Feed<A>, right: Feed<B>) -> Feed<(A, B)>
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
{
    let left = left.map(Side::Left);
    let right = right.map(Side::Right);

    stream::select(left, right)
        .scan(
            (None::<A>, None::<B>),
            |latest, side| {
                match side {
                    Side::Left(value) => latest.0 = Some(value),
                    Side::Right(value) => latest.1 = Some(value),
                }
                future::ready(Some(latest.0.clone().zip(latest.1.clone())))
            },
        )
        .filter_map(future::ready)
        .boxed()
}

/// Join any number of feeds on their latest values, preserving input
/// order in the emitted snapshot.
///
/// Blocks until every leg has produced at least one value. The empty set
/// of legs is vacuously ready: it emits one empty snapshot and then stays
/// silent, like a live feed that never updates again.
pub fn combine_latest_all<T>(sources: Vec<Feed<T>>) -> Feed<Vec<T>>
where
    T: Clone + Send + 'static,
{
    if sources.is_empty() {
        return stream::once(future::ready(Vec::new()))
            .chain(stream::pending())
            .boxed();
    }

    let len = sources.len();
    let indexed: Vec<Feed<(usize, T)>> = sources
        .into_iter()
        .enumerate()
        .map(|(index, source)| source.map(move |value| (index, value)).boxed())
        .collect();

    stream::select_all(indexed)
        .scan(vec![None::<T>; len], |latest, (index, value)| {
            latest[index] = Some(value);
            let snapshot = latest
                .iter()
                .all(Option::is_some)
                .then(|| latest.iter().flat_map(Clone::clone).collect::<Vec<T>>());
            future::ready(Some(snapshot))
        })
        .filter_map(future::ready)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::feeds::{feed_of, push_feed};

    #[tokio::test]
    async fn combine_latest2_blocks_until_both_ready() {
        let (left_tx, left) = push_feed::<u32>();
        let (right_tx, right) = push_feed::<&str>();
        let mut joined = combine_latest2(left, right);

        left_tx.push(1);
        left_tx.push(2);
        // Right leg has not produced yet; nothing may come out.
        assert!(futures_util::poll!(joined.next()).is_pending());

        right_tx.push("a");
        assert_eq!(joined.next().await, Some((2, "a")));

        left_tx.push(3);
        assert_eq!(joined.next().await, Some((3, "a")));
    }

    #[tokio::test]
    async fn combine_latest2_keeps_last_value_of_terminated_leg() {
        let left = feed_of(vec![7u32]);
        let (right_tx, right) = push_feed::<&str>();
        let mut joined = combine_latest2(left, right);

        right_tx.push("x");
        assert_eq!(joined.next().await, Some((7, "x")));
        right_tx.push("y");
        assert_eq!(joined.next().await, Some((7, "y")));
    }

    #[tokio::test]
    async fn combine_latest_all_waits_for_every_leg() {
        let (a_tx, a) = push_feed::<u32>();
        let (b_tx, b) = push_feed::<u32>();
        let (c_tx, c) = push_feed::<u32>();
        let mut joined = combine_latest_all(vec![a, b, c]);

        a_tx.push(1);
        b_tx.push(2);
        assert!(futures_util::poll!(joined.next()).is_pending());

        c_tx.push(3);
        assert_eq!(joined.next().await, Some(vec![1, 2, 3]));

        b_tx.push(20);
        assert_eq!(joined.next().await, Some(vec![1, 20, 3]));
    }

    #[tokio::test]
    async fn combine_latest_all_empty_set_is_vacuously_ready() {
        let mut joined = combine_latest_all::<u32>(Vec::new());
        assert_eq!(joined.next().await, Some(Vec::new()));
        // Stays quiet afterwards instead of terminating.
        assert!(futures_util::poll!(joined.next()).is_pending());
    }

    #[tokio::test]
    async fn combine_latest_all_preserves_input_order() {
        let a = feed_of(vec![10u32]);
        let (b_tx, b) = push_feed::<u32>();
        let c = feed_of(vec![30u32]);

        let mut joined = combine_latest_all(vec![a, b, c]);
        b_tx.push(20);
        assert_eq!(joined.next().await, Some(vec![10, 20, 30]));
    }
}
