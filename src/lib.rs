//! Vaultscope - live aggregation of DeFi vault positions.
//!
//! This crate joins four independently-updating feeds (a user's vault
//! list, per-ilk balances, per-vault automation triggers, and per-vault
//! history) into a single deduplicated feed of
//! [`VaultsOverview`](overview::VaultsOverview): display-ready position
//! view-models plus a portfolio summary.
//!
//! # Architecture
//!
//! - [`domain`] - Pure types and financial calculations: vaults, ilk
//!   balances, history events, stop-loss triggers, PNL and leverage math,
//!   display formatting, the portfolio summary reducer.
//! - [`stream`] - The latest-value join combinators the pipeline is built
//!   from: `combine_latest`, keyed `switch_map` fan-out with cancellation,
//!   structural deduplication, and feed multicasting.
//! - [`feed`] - The feed boundary: the [`OverviewFeeds`](feed::OverviewFeeds)
//!   trait external data sources implement, plus an in-memory
//!   watch-channel implementation and a JSON scenario loader.
//! - [`overview`] - The aggregation pipeline itself and the view-model
//!   mapper that partitions positions into borrow / multiply / earn.
//! - [`config`] - TOML configuration and logging setup.
//! - [`error`] - Error types for the crate boundary.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use futures_util::StreamExt;
//! use vaultscope::domain::Address;
//! use vaultscope::feed::{MemoryFeeds, Redirect};
//! use vaultscope::overview::create_vaults_overview;
//!
//! # async fn run() {
//! let feeds = Arc::new(MemoryFeeds::new());
//! let redirect: Redirect = Arc::new(|vault| {
//!     println!("navigate to vault {}", vault.id);
//! });
//!
//! let mut overview =
//!     create_vaults_overview(feeds, &Address::new("0xdeadbeef"), redirect);
//! while let Some(snapshot) = overview.next().await {
//!     println!("{} positions", snapshot.positions.len());
//! }
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod overview;
pub mod stream;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
