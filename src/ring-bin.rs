use weighted_ring::core::{
	stats::Distribution,
	Config,
	HashRing
};
use clap::Parser;
use inquire::{Text, CustomUserError};
use anyhow::anyhow;
use rand::prelude::*;

#[derive(Parser)]
struct Args {
	/// Initial nodes, added with the default weight
	nodes: Vec<String>,

	/// Default number of virtual nodes per node
	#[clap(short, long, default_value_t = 100)]
	replicas: u32,

	/// Max passes of the load adjuster
	#[clap(short, long, default_value_t = 5)]
	tries: u32,

	/// Load adjuster aggressiveness in [0, 1]
	#[clap(short, long, default_value_t = 0.75)]
	scale: f64
}

// (command, arguments)
const COMMANDS: [(&str, &str); 6] = [
	("add", "<id> [weight]"),
	("remove", "<id>"),
	("get", "<key>"),
	("get2", "<key>"),
	("nodes", ""),
	("stats", "[samples] [seed]")
];

const DEFAULT_SAMPLES: usize = 100_000;

fn usage() -> String {
	COMMANDS.iter()
		.map(|(command, args)| format!("{} {}", command, args).trim_end().to_string())
		.collect::<Vec<_>>()
		.join(" | ")
}

// Commands for the first word, registered node ids for the argument of add/remove
fn suggest_command(nodes: &[String], v: &str) -> Result<Vec<String>, CustomUserError> {
	let mut result = Vec::new();
	match v.split_once(' ') {
		None => {
			for (command, _) in COMMANDS {
				if v.len() > 0 && command.starts_with(v) {
					result.push(command.to_string());
				}
			}
		},
		Some((command @ ("add" | "remove"), prefix)) if !prefix.contains(' ') => {
			for node in nodes.iter().filter(|n| n.starts_with(prefix)) {
				result.push(format!("{} {}", command, node));
			}
		},
		Some(_) => ()
	};
	Ok(result)
}

fn complete_command(nodes: &[String], v: &str) -> Result<Option<String>, CustomUserError> {
	let result = suggest_command(nodes, v)?;
	let command = match result.first() {
		// a bare command still needs its arguments
		Some(s) if !s.contains(' ') => Some(s.clone() + " "),
		Some(s) => Some(s.clone()),
		None => None
	};
	Ok(command)
}

fn print_stats(ring: &mut HashRing, samples: usize, seed: Option<u64>) {
	let mut rng = match seed {
		Some(s) => StdRng::seed_from_u64(s),
		None => StdRng::from_entropy()
	};
	let keys: Vec<[u8; 8]> = (0..samples).map(|_| rng.gen()).collect();
	let dist = Distribution::sample(ring, &keys);

	for (node, share) in ring.arc_shares() {
		println!(
			"{}: weight {}, arc {:.2}%, keys {}",
			node,
			ring.weight(&node).unwrap_or(0),
			share * 100.0,
			dist.count(&node)
		);
	}
	println!("total {}, spread {}", dist.total(), dist.spread());
}

fn execute_command(ring: &mut HashRing, command: &str) -> anyhow::Result<()> {
	// execute command
	let words: Vec<_> = command.split_whitespace().collect();
	if words.len() == 0 {
		return Err(anyhow!("invalid command"));
	}

	match words[0] {
		"add" => {
			match words.len() {
				2 => ring.add([words[1]]),
				3 => ring.set_weight(words[1], words[2].parse()?)?,
				_ => return Err(anyhow!("add: invalid number of arguments"))
			};
		},
		"remove" => {
			if words.len() != 2 {
				return Err(anyhow!("remove: invalid number of arguments"));
			}
			if !ring.contains(words[1]) {
				return Err(anyhow!("remove: node doesn't exist"));
			}
			ring.remove(words[1]);
		},
		"get" => {
			if words.len() != 2 {
				return Err(anyhow!("get: invalid number of arguments"));
			}
			match ring.get(words[1]) {
				Some(node) => println!("{}", node),
				None => return Err(anyhow!("get: ring is empty"))
			};
		},
		"get2" => {
			if words.len() != 2 {
				return Err(anyhow!("get2: invalid number of arguments"));
			}
			match ring.get2(words[1]) {
				(Some(first), Some(second)) => println!("{} {}", first, second),
				(Some(first), None) => println!("{} (no second owner)", first),
				_ => return Err(anyhow!("get2: ring is empty"))
			};
		},
		"nodes" => {
			for node in ring.nodes() {
				println!("{} {}", node, ring.weight(node).unwrap_or(0));
			}
		},
		"stats" => {
			if words.len() > 3 {
				return Err(anyhow!("stats: invalid number of arguments"));
			}
			let samples = match words.get(1) {
				Some(s) => s.parse()?,
				None => DEFAULT_SAMPLES
			};
			let seed = match words.get(2) {
				Some(s) => Some(s.parse()?),
				None => None
			};
			print_stats(ring, samples, seed);
		},
		_ => {
			return Err(anyhow!("invalid command"));
		}
	};
	Ok(())
}


fn main() -> anyhow::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let config = Config {
		replicas: args.replicas,
		adjust_tries: args.tries,
		adjust_scale: args.scale,
		..Config::default()
	};
	let mut ring = HashRing::new(config)?;
	ring.add(args.nodes);

	let help = usage();
	loop {
		// node ids as of this prompt
		let nodes: Vec<String> = ring.nodes().map(str::to_string).collect();
		let suggester = |v: &str| suggest_command(&nodes, v);
		let completer = |v: &str| complete_command(&nodes, v);

		let command = Text::new("ring>")
			.with_help_message(&help)
			.with_suggester(&suggester)
			.with_completer(&completer)
			.prompt()?;

		match execute_command(&mut ring, &command) {
			Ok(_) => (),
			Err(e) => println!("Error: {}", e)
		};
	}
}
