use std::collections::BTreeMap;
use super::{
	hash_cache::HashCache,
	ring::Ring,
	HashFn
};

/// Place `weight` virtual nodes for every node and sort them into a ring
///
/// Nodes are visited in ascending id order, so on a hash collision the
/// greater id owns the position.
pub fn build_ring(weights: &BTreeMap<String, u32>, cache: &mut HashCache, hash: HashFn) -> Ring {
	let total: usize = weights.values().map(|&w| w as usize).sum();
	let mut entries = Vec::with_capacity(total);

	for (node, &weight) in weights.iter() {
		for &h in cache.positions(node, weight as usize, hash) {
			entries.push((h, node.clone()));
		}
	}

	Ring::from_entries(entries)
}
