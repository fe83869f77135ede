use std::collections::BTreeMap;
use log::{debug, trace};
use super::{
	builder::build_ring,
	hash_cache::HashCache,
	ring::{Ring, RING_SIZE},
	HashFn
};

// Corrections smaller than this are treated as noise
const MIN_DELTA: i64 = 2;

/// Result of a load adjustment
#[derive(Debug, Clone)]
pub struct Adjusted {
	pub ring: Ring,
	/// Working weights the ring was built from
	pub weights: BTreeMap<String, u32>,
	/// Number of measure-and-correct passes run
	pub passes: u32
}

/// Nudge working weights so each node's share of the hash space approaches
/// its share of the target weights
///
/// Runs at most `tries` passes. A pass measures the arc owned by every node,
/// moves each working weight by `w * (expect - actual) / expect * scale` and
/// rebuilds the ring. It stops early when a pass changes nothing.
/// This is a best-effort heuristic: balance usually improves but is not
/// guaranteed to be optimal.
pub fn adjust(
	targets: &BTreeMap<String, u32>,
	cache: &mut HashCache,
	hash: HashFn,
	tries: u32,
	scale: f64
) -> Adjusted {
	let mut weights = targets.clone();
	let mut ring = build_ring(&weights, cache, hash);
	let total: u64 = targets.values().map(|&w| w as u64).sum();
	if total == 0 {
		return Adjusted { ring, weights, passes: 0 };
	}

	let mut passes = 0;
	while passes < tries {
		passes += 1;
		let changed = correct_weights(&ring, targets, total, &mut weights, scale);
		if !changed {
			debug!("adjust: converged after {} passes", passes);
			break;
		}
		ring = build_ring(&weights, cache, hash);
		debug!("adjust: pass {} rebuilt ring with {} positions", passes, ring.len());
	}

	Adjusted { ring, weights, passes }
}

// One correction step. Returns whether any weight changed.
fn correct_weights(
	ring: &Ring,
	targets: &BTreeMap<String, u32>,
	total: u64,
	weights: &mut BTreeMap<String, u32>,
	scale: f64
) -> bool {
	let arcs = ring.arc_lengths();
	let mut changed = false;

	for (node, &target) in targets.iter() {
		// a node that lost all its positions owns nothing
		let arc = arcs.get(node.as_str()).copied().unwrap_or(0);
		let actual = arc as f64 / RING_SIZE as f64;
		let expect = target as f64 / total as f64;

		let weight = match weights.get_mut(node) {
			Some(w) => w,
			None => continue
		};
		let delta = (*weight as f64 * (expect - actual) / expect * scale).round() as i64;
		if delta.abs() < MIN_DELTA {
			continue;
		}

		let next = (*weight as i64 + delta).clamp(1, u32::MAX as i64) as u32;
		if next != *weight {
			trace!("adjust: {} weight {} -> {} (expect {:.4}, actual {:.4})", node, weight, next, expect, actual);
			*weight = next;
			changed = true;
		}
	}
	changed
}
