//! Test fixtures and controllable feeds.
//!
//! Compiled into unit tests and, behind the `testkit` feature, into the
//! integration tests. Nothing here is part of the stable API.

pub mod domain;
pub mod feeds;
