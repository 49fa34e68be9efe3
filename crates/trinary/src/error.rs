// Copyright 2025 Irreducible Inc.

/// Error thrown when a ternary conversion fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("symbol {symbol:#04x} at position {position} is not in the tryte alphabet")]
	InvalidSymbol { symbol: u8, position: usize },
	#[error("value {0} is not a balanced trit")]
	InvalidTrit(i8),
	#[error("length {length} is not a multiple of {multiple_of}")]
	InvalidLength { length: usize, multiple_of: usize },
	#[error("expected at least {expected} digits, got {actual}")]
	Truncated { expected: usize, actual: usize },
	#[error("lane {lane} is out of range 0..{max}")]
	LaneOutOfRange { lane: usize, max: usize },
	#[error("width {width} exceeds the accumulator capacity of {max} digits")]
	WidthExceeded { width: usize, max: usize },
}
