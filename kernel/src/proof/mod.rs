//! Proof module: canonical JSON bytes and domain-separated content hashing.
//!
//! Result artifacts (compact DAGs, path results, snapshots) are hashed
//! through this module so repeated searches can be compared byte-for-byte.

pub mod canon;
pub mod hash;
