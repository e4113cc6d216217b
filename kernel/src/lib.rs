//! Alchemist Kernel: the immutable recipe graph and its proof utilities.
//!
//! # API Surface
//!
//! - [`graph::RecipeGraph`] -- arena of [`graph::ElementNode`]s keyed by [`graph::ElementId`]
//! - [`snapshot::RecipeSnapshot`] -- persisted recipe data, translated into a graph
//! - [`proof::hash::canonical_hash`] -- domain-separated content hashing for result artifacts
//!
//! # Module Dependency Direction
//!
//! `graph` ← `snapshot`, `proof` standalone.
//!
//! The graph is built once and never mutated afterwards. Nothing in this crate
//! performs network I/O.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph;
pub mod proof;
pub mod snapshot;
