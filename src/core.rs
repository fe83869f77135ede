pub mod adjuster;
pub mod builder;
pub mod config;
pub mod error;
pub mod hash_cache;
pub mod hash_ring;
pub mod ring;
pub mod stats;

pub use hash_ring::*;
pub use config::*;
pub use error::*;

use ring::Digest;

/// Deterministic mapping from bytes to a ring position
pub type HashFn = fn(&[u8]) -> Digest;

/// Default hash function (CRC32 IEEE)
pub fn calculate_hash(data: &[u8]) -> Digest {
	crc32fast::hash(data)
}
