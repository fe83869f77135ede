//! Weighted consistent hashing.
//!
//! Keys are mapped onto a small, changing set of weighted nodes through
//! virtual nodes on a 32-bit ring. Adding or removing a node moves only a
//! small fraction of keys, and a load adjuster keeps each node's share of
//! the hash space close to its share of the total weight.

pub mod core;
pub mod shared;
