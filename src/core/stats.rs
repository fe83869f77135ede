use std::{collections::BTreeMap, fmt};
use super::HashRing;

/// Number of sampled keys owned by each node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
	counts: BTreeMap<String, usize>,
	total: usize
}

impl Distribution {
	/// Count the owner of every key
	///
	/// Every registered node appears in the result, with 0 if it got no key.
	pub fn sample<I, K>(ring: &mut HashRing, keys: I) -> Self
	where
		I: IntoIterator<Item = K>,
		K: AsRef<[u8]>
	{
		let mut counts: BTreeMap<String, usize> = ring.nodes()
			.map(|n| (n.to_string(), 0))
			.collect();
		let mut total = 0;

		ring.rebalance_if_dirty();
		for key in keys {
			if let Some(owner) = ring.lookup(key) {
				*counts.entry(owner.to_string()).or_default() += 1;
			}
			total += 1;
		}

		Distribution { counts, total }
	}

	pub fn counts(&self) -> &BTreeMap<String, usize> {
		&self.counts
	}

	pub fn count(&self, node: &str) -> usize {
		self.counts.get(node).copied().unwrap_or(0)
	}

	/// Number of keys sampled
	pub fn total(&self) -> usize {
		self.total
	}

	pub fn max(&self) -> usize {
		self.counts.values().copied().max().unwrap_or(0)
	}

	pub fn min(&self) -> usize {
		self.counts.values().copied().min().unwrap_or(0)
	}

	/// Difference between the most and the least loaded node
	pub fn spread(&self) -> usize {
		self.max() - self.min()
	}
}

impl fmt::Display for Distribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (node, count) in self.counts.iter() {
			let percent = if self.total > 0 {
				*count as f64 / self.total as f64 * 100.0
			} else {
				0.0
			};
			writeln!(f, "{}: {} ({:.2}%)", node, count, percent)?;
		}
		write!(f, "total {}, spread {}", self.total, self.spread())
	}
}

/// Owner of each key, in key order
pub fn assignments<I, K>(ring: &mut HashRing, keys: I) -> Vec<Option<String>>
where
	I: IntoIterator<Item = K>,
	K: AsRef<[u8]>
{
	keys.into_iter()
		.map(|k| ring.get(k).map(str::to_string))
		.collect()
}

/// Number of keys whose owner differs between two assignments
pub fn moved_keys(before: &[Option<String>], after: &[Option<String>]) -> usize {
	before.iter()
		.zip(after.iter())
		.filter(|(b, a)| b != a)
		.count()
}
