// Copyright 2025 Irreducible Inc.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("no lanes were loaded since the last absorb")]
	NotLoaded,
	#[error("squeeze requires a preceding absorb")]
	NotAbsorbed,
	#[error("hashes can only be read after a squeeze")]
	NotSqueezed,
	#[error("the accumulator holds absorbed or squeezed data and must be cleared before loading")]
	NotCleared,
	#[error("chunk count {count} exceeds the maximum of {max} lanes")]
	TooManyChunks { count: usize, max: usize },
	#[error("input holds {actual} trytes, {expected} are required")]
	TruncatedInput { expected: usize, actual: usize },
	#[error("expected hash buffer holds {actual} trytes, {expected} are required")]
	BufferSizeMismatch { expected: usize, actual: usize },
	#[error("record {index} holds {length} trytes, expected {expected}")]
	RecordLengthMismatch {
		index: usize,
		length: usize,
		expected: usize,
	},
	#[error("Curl-P with {0} rounds is not supported")]
	UnsupportedRounds(usize),
	#[error("environment variable {name} holds an invalid value")]
	InvalidEnvVar { name: &'static str },
	#[error("ternary conversion error: {0}")]
	Trinary(#[from] curlbatch_trinary::Error),
}
