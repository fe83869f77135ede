use weighted_ring::core::{
	stats::{assignments, moved_keys, Distribution},
	Config,
	HashRing
};
use rand::prelude::*;

// Common mod in tests
mod common;
use common::*;

fn sip_ring(config: Config) -> anyhow::Result<HashRing> {
	Ok(HashRing::with_hasher(config, sip_hash)?)
}

/// Same membership reached in a different order gives the same owners
#[test]
fn test_determinism() -> anyhow::Result<()> {
	init_logger();
	let names = node_names(12);

	let mut ring1 = HashRing::new(Config::default())?;
	ring1.add(names.iter().cloned());
	ring1.set_weight(names[3].clone(), 150)?;

	let mut ring2 = HashRing::new(Config::default())?;
	for name in names.iter().rev() {
		ring2.set_weight(name.clone(), 40)?;
	}
	ring2.set_weight(names[3].clone(), 150)?;
	ring2.add(["extra"]);
	ring2.remove("extra");
	for name in names.iter().filter(|n| **n != names[3]) {
		ring2.add([name.clone()]);
	}

	let keys = keys(5000);
	assert_eq!(assignments(&mut ring1, &keys), assignments(&mut ring2, &keys));
	Ok(())
}

/// Adding a node to N nodes moves about 1/(N+1) of the keys, all to the new node
#[test]
fn test_minimal_disruption() -> anyhow::Result<()> {
	init_logger();
	let config = Config {
		adjust_tries: 0,
		..Config::default()
	};
	let mut ring = sip_ring(config)?;
	ring.add(node_names(10));

	let keys = keys(20000);
	let before = assignments(&mut ring, &keys);
	ring.add(["0.0.0.0"]);
	let after = assignments(&mut ring, &keys);

	let moved = moved_keys(&before, &after);
	let fraction = moved as f64 / keys.len() as f64;
	assert!((0.04..0.16).contains(&fraction), "moved {:.3} of keys", fraction);
	for (b, a) in before.iter().zip(after.iter()) {
		if b != a {
			assert_eq!(a.as_deref(), Some("0.0.0.0"));
		}
	}

	// removing it again restores every owner
	ring.remove("0.0.0.0");
	assert_eq!(assignments(&mut ring, &keys), before);
	Ok(())
}

#[test]
fn test_adjusted_disruption_stays_partial() -> anyhow::Result<()> {
	init_logger();
	let mut ring = sip_ring(Config::default())?;
	ring.add(node_names(10));

	let keys = keys(20000);
	let before = assignments(&mut ring, &keys);
	ring.add(["0.0.0.0"]);
	let after = assignments(&mut ring, &keys);

	let moved = moved_keys(&before, &after);
	assert!(moved > 0);
	assert!(moved < keys.len() / 2, "moved {} of {} keys", moved, keys.len());
	Ok(())
}

/// Load adjustment never makes the balance worse than plain placement
#[test]
fn test_balance() -> anyhow::Result<()> {
	init_logger();
	let mut ring = sip_ring(Config::default())?;
	ring.add(node_names(20));
	let keys = keys(100_000);

	ring.rebalance_with(5, 0.0)?;
	let plain = Distribution::sample(&mut ring, &keys);

	for scale in [0.5, 0.75, 1.0] {
		for tries in 1..6 {
			ring.rebalance_with(tries, scale)?;
			let adjusted = Distribution::sample(&mut ring, &keys);
			assert!(
				adjusted.spread() <= plain.spread(),
				"scale {} tries {}: spread {} vs {}", scale, tries, adjusted.spread(), plain.spread()
			);
		}
	}
	Ok(())
}

#[test]
fn test_adjuster_skipped_below_min_replicas() -> anyhow::Result<()> {
	init_logger();
	let config = Config {
		replicas: 9,
		..Config::default()
	};
	let mut ring = sip_ring(config)?;
	ring.add(node_names(5));
	// every node keeps exactly its target number of positions
	for name in node_names(5) {
		assert_eq!(ring.positions_of(&name).len(), 9);
	}
	Ok(())
}

#[test]
fn test_weighted_nodes_proportional_keys() -> anyhow::Result<()> {
	init_logger();
	let mut ring = sip_ring(Config::default())?;
	ring.set_weight("small", 100)?;
	ring.set_weight("large", 200)?;

	let mut rng = StdRng::seed_from_u64(0);
	let keys = random_keys(&mut rng, 30000);
	let dist = Distribution::sample(&mut ring, &keys);

	let ratio = dist.count("large") as f64 / dist.count("small") as f64;
	assert!((1.5..=2.6).contains(&ratio), "ratio {:.2}", ratio);

	let shares = ring.arc_shares();
	assert!((shares["large"] - 2.0 / 3.0).abs() < 0.1);
	Ok(())
}
