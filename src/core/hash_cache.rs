use std::collections::HashMap;
use super::{ring::Digest, HashFn};

/// Hash of the virtual node `index` of `node`: hash(index ++ node)
pub fn vnode_hash(hash: HashFn, node: &str, index: usize) -> Digest {
	let mut data = index.to_string().into_bytes();
	data.extend_from_slice(node.as_bytes());
	hash(&data)
}

/// Append-only store of virtual node hashes per node
///
/// The hash of a virtual node is computed once and never changes. Lowering
/// a node's weight only uses a shorter prefix of its cached hashes.
#[derive(Debug, Clone, Default)]
pub struct HashCache {
	hashes: HashMap<String, Vec<Digest>>
}

impl HashCache {
	pub fn new() -> Self {
		HashCache::default()
	}

	/// Hashes of the first `count` virtual nodes of `node`
	///
	/// Missing hashes are computed and appended to the cache.
	pub fn positions(&mut self, node: &str, count: usize, hash: HashFn) -> &[Digest] {
		let cached = self.hashes.entry(node.to_string()).or_default();
		for i in cached.len()..count {
			cached.push(vnode_hash(hash, node, i));
		}
		&cached[..count]
	}

	/// Hashes computed so far for `node`
	pub fn cached(&self, node: &str) -> Option<&[Digest]> {
		self.hashes.get(node).map(Vec::as_slice)
	}

	/// Drop all hashes of `node`
	pub fn remove(&mut self, node: &str) -> bool {
		self.hashes.remove(node).is_some()
	}
}
