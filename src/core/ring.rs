use std::collections::HashMap;
use log::debug;

pub type Digest = u32;
// size of the hash space, positions live in [0, RING_SIZE)
pub const RING_SIZE: u64 = 1 << 32;

/// Virtual node positions sorted by hash, plus the owner of each position
///
/// Positions are unique. When two virtual nodes hash to the same value,
/// the one written last owns the position.
#[derive(Debug, Clone, Default)]
pub struct Ring {
	// ascending, no duplicates
	positions: Vec<Digest>,
	owners: HashMap<Digest, String>
}

impl Ring {
	pub fn new() -> Self {
		Ring::default()
	}

	/// Build a ring from (hash, owner) pairs in write order
	pub fn from_entries<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (Digest, String)>
	{
		let entries = entries.into_iter();
		let mut positions = Vec::with_capacity(entries.size_hint().0);
		let mut owners = HashMap::with_capacity(entries.size_hint().0);
		let mut collisions = 0usize;

		for (hash, owner) in entries {
			match owners.insert(hash, owner) {
				Some(_) => collisions += 1,
				None => positions.push(hash)
			};
		}
		positions.sort_unstable();

		if collisions > 0 {
			debug!("ring: {} colliding virtual nodes dropped", collisions);
		}
		Ring {
			positions,
			owners
		}
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Number of positions on the ring
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn positions(&self) -> &[Digest] {
		&self.positions
	}

	pub fn owner(&self, hash: Digest) -> Option<&str> {
		self.owners.get(&hash).map(String::as_str)
	}

	// The position at index always exists in owners
	fn owner_at(&self, index: usize) -> &str {
		&self.owners[&self.positions[index]]
	}

	/// Index of the first position >= id, wrapping to 0 past the last one
	pub fn find(&self, id: Digest) -> Option<usize> {
		if self.is_empty() {
			return None;
		}
		let index = self.positions.partition_point(|&p| p < id);
		// Means we have cycled back to the first position
		if index == self.positions.len() {
			Some(0)
		} else {
			Some(index)
		}
	}

	/// Owner of the first position at or after id
	pub fn successor(&self, id: Digest) -> Option<&str> {
		self.find(id).map(|index| self.owner_at(index))
	}

	/// Owner of id and the next distinct owner clockwise from it
	pub fn successor_pair(&self, id: Digest) -> (Option<&str>, Option<&str>) {
		let index = match self.find(id) {
			Some(i) => i,
			None => return (None, None)
		};
		let first = self.owner_at(index);

		// One full turn at most
		let len = self.positions.len();
		let second = (1..len)
			.map(|step| self.owner_at((index + step) % len))
			.find(|owner| *owner != first);

		(Some(first), second)
	}

	/// Total arc length owned by each node
	///
	/// A position owns the span between its predecessor (exclusive) and
	/// itself (inclusive). The first position wraps around to the last one.
	pub fn arc_lengths(&self) -> HashMap<&str, u64> {
		let mut arcs: HashMap<&str, u64> = HashMap::new();
		let (first, last) = match (self.positions.first(), self.positions.last()) {
			(Some(&f), Some(&l)) => (f as u64, l as u64),
			_ => return arcs
		};

		*arcs.entry(self.owner_at(0)).or_default() += first + RING_SIZE - last;
		for (i, pair) in self.positions.windows(2).enumerate() {
			*arcs.entry(self.owner_at(i + 1)).or_default() += (pair[1] - pair[0]) as u64;
		}
		arcs
	}
}
