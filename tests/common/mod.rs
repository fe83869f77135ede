#![allow(dead_code)]

use std::{
	collections::hash_map::DefaultHasher,
	hash::Hasher
};
use weighted_ring::core::ring::Digest;
use rand::Rng;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

// Treat the key as a decimal number
pub fn numeric_hash(data: &[u8]) -> Digest {
	std::str::from_utf8(data)
		.ok()
		.and_then(|s| s.parse().ok())
		.unwrap_or(0)
}

// Well-mixed hash for distribution tests
pub fn sip_hash(data: &[u8]) -> Digest {
	let mut hasher = DefaultHasher::new();
	hasher.write(data);
	hasher.finish() as Digest
}

pub fn keys(n: usize) -> Vec<String> {
	(0..n).map(|i| format!("key{}", i)).collect()
}

// Generate random 8-byte keys
pub fn random_keys<T: Rng>(rng: &mut T, n: usize) -> Vec<Vec<u8>> {
	(0..n).map(|_| Vec::from(rng.gen::<[u8; 8]>())).collect()
}

pub fn node_names(n: usize) -> Vec<String> {
	(0..n).map(|i| format!("192.168.{}.{}", i, i)).collect()
}
