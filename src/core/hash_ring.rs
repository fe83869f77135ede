use std::collections::BTreeMap;
use log::debug;
use super::{
	adjuster::adjust,
	builder::build_ring,
	config::*,
	error::*,
	hash_cache::HashCache,
	ring::*,
	calculate_hash,
	HashFn
};

/// Weighted consistent hash ring
///
/// Maps keys to nodes through virtual nodes placed on a 32-bit hash space.
/// The ring is rebuilt lazily: membership and weight changes mark it dirty,
/// and the next lookup (or an explicit `rebalance`) rebuilds it.
///
/// The structure is not synchronized. Callers sharing it across threads
/// must hold a lock around every call, or use `SharedRing`.
#[derive(Clone)]
pub struct HashRing {
	config: Config,
	hash: HashFn,
	// target weights
	weights: BTreeMap<String, u32>,
	cache: HashCache,
	ring: Ring,
	dirty: bool
}

impl HashRing {
	/// Create an empty ring using the default CRC32 hash
	pub fn new(config: Config) -> RingResult<Self> {
		Self::with_hasher(config, calculate_hash)
	}

	pub fn with_hasher(config: Config, hash: HashFn) -> RingResult<Self> {
		config.validate()?;
		Ok(HashRing {
			config,
			hash,
			weights: BTreeMap::new(),
			cache: HashCache::new(),
			ring: Ring::new(),
			dirty: true
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns true if no node is registered
	pub fn is_empty(&self) -> bool {
		self.weights.is_empty()
	}

	/// Returns true if the ring must be rebuilt before it reflects membership
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn node_count(&self) -> usize {
		self.weights.len()
	}

	/// Registered node ids in ascending order
	pub fn nodes(&self) -> impl Iterator<Item = &str> {
		self.weights.keys().map(String::as_str)
	}

	pub fn contains(&self, node: &str) -> bool {
		self.weights.contains_key(node)
	}

	/// Target weight of a node
	pub fn weight(&self, node: &str) -> Option<u32> {
		self.weights.get(node).copied()
	}

	/// Add nodes with the default weight
	///
	/// A node already present is reset to the default weight.
	pub fn add<I, S>(&mut self, nodes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>
	{
		let replicas = self.config.replicas;
		for node in nodes {
			self.update_weight(node.into(), replicas);
		}
	}

	/// Add a node or change its weight
	///
	/// Fails when weight is 0; the previous weight is kept in that case.
	pub fn set_weight<S: Into<String>>(&mut self, node: S, weight: u32) -> RingResult<()> {
		let node = node.into();
		if weight < 1 {
			return Err(RingError::InvalidArgument(
				format!("weight of {} should be positive", node)
			));
		}
		self.update_weight(node, weight);
		Ok(())
	}

	fn update_weight(&mut self, node: String, weight: u32) {
		if self.weights.get(&node) == Some(&weight) {
			return;
		}
		debug!("ring: set weight of {} to {}", node, weight);
		self.weights.insert(node, weight);
		self.dirty = true;
	}

	/// Remove a node and its cached hashes
	pub fn remove(&mut self, node: &str) {
		if self.weights.remove(node).is_some() {
			self.cache.remove(node);
			self.dirty = true;
			debug!("ring: removed {}", node);
		}
	}

	/// Rebuild the ring with the configured adjuster settings
	pub fn rebalance(&mut self) {
		self.rebuild(self.config.adjust_tries, self.config.adjust_scale);
	}

	/// Rebuild the ring with explicit adjuster settings
	pub fn rebalance_with(&mut self, tries: u32, scale: f64) -> RingResult<()> {
		validate_scale(scale)?;
		self.rebuild(tries, scale);
		Ok(())
	}

	fn rebuild(&mut self, tries: u32, scale: f64) {
		// Adjusting is not worth it with few nodes or sparse virtual nodes
		if self.weights.len() < 2 || self.config.replicas < self.config.adjust_min_replicas {
			self.ring = build_ring(&self.weights, &mut self.cache, self.hash);
		} else {
			let adjusted = adjust(&self.weights, &mut self.cache, self.hash, tries, scale);
			self.ring = adjusted.ring;
		}
		self.dirty = false;
		debug!("ring: rebuilt with {} nodes and {} positions", self.weights.len(), self.ring.len());
	}

	/// Rebuild only if a mutation happened since the last build
	pub fn rebalance_if_dirty(&mut self) {
		if self.dirty {
			self.rebalance();
		}
	}

	/// The live ring, rebuilt first if dirty
	pub fn ring(&mut self) -> &Ring {
		self.rebalance_if_dirty();
		&self.ring
	}

	/// Number of positions on the live ring
	pub fn vnode_count(&mut self) -> usize {
		self.ring().len()
	}

	/// Positions owned by a node on the live ring, ascending
	pub fn positions_of(&mut self, node: &str) -> Vec<Digest> {
		let ring = self.ring();
		ring.positions()
			.iter()
			.copied()
			.filter(|&p| ring.owner(p) == Some(node))
			.collect()
	}

	/// Owner of a key
	pub fn get<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&str> {
		self.rebalance_if_dirty();
		self.lookup(key)
	}

	/// Owner of a key and a second, distinct owner
	pub fn get2<K: AsRef<[u8]>>(&mut self, key: K) -> (Option<&str>, Option<&str>) {
		self.rebalance_if_dirty();
		self.lookup2(key)
	}

	/// Like `get` but reads the ring as last built, without rebuilding
	pub fn lookup<K: AsRef<[u8]>>(&self, key: K) -> Option<&str> {
		self.ring.successor((self.hash)(key.as_ref()))
	}

	/// Like `get2` but reads the ring as last built, without rebuilding
	pub fn lookup2<K: AsRef<[u8]>>(&self, key: K) -> (Option<&str>, Option<&str>) {
		self.ring.successor_pair((self.hash)(key.as_ref()))
	}

	/// Fraction of the hash space owned by each node on the live ring
	pub fn arc_shares(&mut self) -> BTreeMap<String, f64> {
		let mut shares: BTreeMap<String, f64> = self.weights.keys()
			.map(|n| (n.clone(), 0.0))
			.collect();
		for (node, arc) in self.ring().arc_lengths() {
			shares.insert(node.to_string(), arc as f64 / RING_SIZE as f64);
		}
		shares
	}
}
