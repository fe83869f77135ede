use std::default::Default;
use super::error::*;

#[derive(Clone, Debug)]
pub struct Config {
	// default number of virtual nodes for a node added without a weight
	pub replicas: u32,
	// max passes of the load adjuster (0 means plain builds)
	pub adjust_tries: u32,
	// correction aggressiveness in [0, 1] (0 disables correction)
	pub adjust_scale: f64,
	/// The adjuster is skipped when `replicas` is below this value
	pub adjust_min_replicas: u32
}

impl Default for Config {
	fn default() -> Self {
		Self {
			replicas: 100,
			adjust_tries: 5,
			adjust_scale: 0.75,
			adjust_min_replicas: 10
		}
	}
}

impl Config {
	/// Reject values the ring cannot work with
	pub fn validate(&self) -> RingResult<()> {
		if self.replicas < 1 {
			return Err(RingError::InvalidArgument(
				"replicas should be positive".to_string()
			));
		}
		validate_scale(self.adjust_scale)
	}
}

pub fn validate_scale(scale: f64) -> RingResult<()> {
	// NaN fails the range check as well
	if !(0.0..=1.0).contains(&scale) {
		return Err(RingError::InvalidArgument(
			format!("adjust scale {} not in [0, 1]", scale)
		));
	}
	Ok(())
}
