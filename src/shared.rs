use std::{
	collections::BTreeMap,
	sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard}
};
use log::debug;
use crate::core::{error::*, HashRing};

/// Thread-safe handle to a hash ring
///
/// Lookups on a built ring share the read lock. A lookup that finds the
/// ring dirty rebuilds it under the write lock first.
#[derive(Clone)]
pub struct SharedRing {
	ring: Arc<RwLock<HashRing>>
}

impl SharedRing {
	pub fn new(ring: HashRing) -> Self {
		SharedRing {
			ring: Arc::new(RwLock::new(ring))
		}
	}

	// The dirty flag is only cleared after a complete rebuild,
	// so a poisoned ring is still consistent
	fn read(&self) -> RwLockReadGuard<'_, HashRing> {
		self.ring.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashRing> {
		self.ring.write().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}

	pub fn node_count(&self) -> usize {
		self.read().node_count()
	}

	pub fn nodes(&self) -> Vec<String> {
		self.read().nodes().map(str::to_string).collect()
	}

	pub fn weight(&self, node: &str) -> Option<u32> {
		self.read().weight(node)
	}

	pub fn add<I, S>(&self, nodes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>
	{
		self.write().add(nodes)
	}

	pub fn set_weight<S: Into<String>>(&self, node: S, weight: u32) -> RingResult<()> {
		self.write().set_weight(node, weight)
	}

	pub fn remove(&self, node: &str) {
		self.write().remove(node)
	}

	pub fn rebalance(&self) {
		self.write().rebalance()
	}

	pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<String> {
		// Use block to drop the read guard before taking the write lock
		{
			let ring = self.read();
			if !ring.is_dirty() {
				return ring.lookup(&key).map(str::to_string);
			}
		}
		debug!("shared ring: rebuilding dirty ring on lookup");
		self.write().get(&key).map(str::to_string)
	}

	pub fn get2<K: AsRef<[u8]>>(&self, key: K) -> (Option<String>, Option<String>) {
		{
			let ring = self.read();
			if !ring.is_dirty() {
				let (first, second) = ring.lookup2(&key);
				return (first.map(str::to_string), second.map(str::to_string));
			}
		}
		debug!("shared ring: rebuilding dirty ring on lookup");
		let mut ring = self.write();
		let (first, second) = ring.get2(&key);
		(first.map(str::to_string), second.map(str::to_string))
	}

	pub fn arc_shares(&self) -> BTreeMap<String, f64> {
		self.write().arc_shares()
	}
}

impl From<HashRing> for SharedRing {
	fn from(ring: HashRing) -> Self {
		SharedRing::new(ring)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Config;
	use std::thread;

	#[test]
	fn test_concurrent_lookups() {
		let ring = SharedRing::new(HashRing::new(Config::default()).unwrap());
		ring.add(["alpha", "beta", "gamma"]);
		let expected: Vec<_> = (0..200).map(|i| ring.get(format!("key{}", i))).collect();

		let handles: Vec<_> = (0..4)
			.map(|_| {
				let ring = ring.clone();
				thread::spawn(move || {
					(0..200).map(|i| ring.get(format!("key{}", i))).collect::<Vec<_>>()
				})
			})
			.collect();

		for h in handles {
			assert_eq!(h.join().unwrap(), expected);
		}
	}

	#[test]
	fn test_lookup_after_mutation_rebuilds() {
		let ring = SharedRing::new(HashRing::new(Config::default()).unwrap());
		assert_eq!(ring.get("key"), None);
		ring.add(["alpha"]);
		assert_eq!(ring.get("key").as_deref(), Some("alpha"));
		assert_eq!(ring.get2("key"), (Some("alpha".to_string()), None));

		ring.add(["beta"]);
		let (first, second) = ring.get2("key");
		assert!(first.is_some() && second.is_some());
		assert_ne!(first, second);

		assert!(ring.set_weight("beta", 0).is_err());
		ring.remove("alpha");
		assert_eq!(ring.get("key").as_deref(), Some("beta"));
		assert_eq!(ring.nodes(), vec!["beta".to_string()]);
	}
}
