//! Latest-value join combinators for live feeds.
//!
//! A [`Feed`] is a boxed, push-style stream of snapshots. The overview
//! pipeline is composed from four combinators over feeds:
//!
//! - [`combine_latest2`] / [`combine_latest_all`] - latest-value joins
//!   that block until every leg has produced at least one value;
//! - [`switch_map`] - re-subscribing fan-out: each new outer snapshot
//!   replaces (and thereby cancels) the previous inner feed;
//! - [`distinct_until_changed`] - structural deduplication against the
//!   immediately previous emission;
//! - [`share`] - multicast of one feed to two consumers.
//!
//! All of this runs single-threaded and cooperatively: "concurrent"
//! subscriptions are multiplexed onto the task that polls the output
//! feed, and dropping a feed is cancellation.

mod combine;
mod dedup;
mod share;
mod switch;

pub use combine::{combine_latest2, combine_latest_all};
pub use dedup::distinct_until_changed;
pub use share::share;
pub use switch::switch_map;

use futures_util::stream::BoxStream;

/// A live, push-style sequence of values.
///
/// Feeds never fail in-band; an upstream failure terminates the stream
/// and stalls whatever join depends on it.
pub type Feed<T> = BoxStream<'static, T>;
