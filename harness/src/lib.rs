//! Alchemist Harness: the request boundary around the search engine.
//!
//! The harness loads recipe snapshots, validates recipe queries, dispatches
//! them to `alchemist_search` and renders JSON responses with HTTP-style
//! status codes. It implements no search logic itself.
//!
//! Worlds provide recipe data only; the harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod query;
pub mod snapshot;
pub mod worlds;
