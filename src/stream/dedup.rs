//! Structural deduplication between pipeline stages.

use futures_util::future;
use futures_util::stream::StreamExt;

use super::Feed;

/// Suppress emissions that are structurally equal to the immediately
/// previous one.
///
/// Downstream consumers treat every emission as "something changed". The
/// memory is scoped to the last emission only.
pub fn distinct_until_changed<T>(source: Feed<T>) -> Feed<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    source
        .scan(None::<T>, |last, item| {
            let changed = last.as_ref() != Some(&item);
            if changed {
                *last = Some(item.clone());
            }
            future::ready(Some(changed.then_some(item)))
        })
        .filter_map(future::ready)
        .boxed()
}
