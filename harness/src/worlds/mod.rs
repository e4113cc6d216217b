//! Recipe worlds for tests, benchmarks and the CLI.

pub mod lattice;
pub mod starter;
