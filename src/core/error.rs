use thiserror::Error;
use std::result::Result;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String)
}

pub type RingResult<T> = Result<T, RingError>;
