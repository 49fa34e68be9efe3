// Copyright 2025 Irreducible Inc.

//! Balanced ternary representations used by the batched Curl hasher.
//!
//! Three encodings of the same digits live here:
//!
//! * [`Trit`] sequences, one digit per element;
//! * [`Trytes`], the 27-symbol text encoding where each character carries three trits;
//! * [`PackedTrit`] words, which hold the same digit position of up to [`MAX_LANES`] independent
//!   records, one bit per record.
//!
//! A [`LaneAccumulator`] is one sponge block worth of packed words, filled and read one lane at a
//! time.

pub mod accumulator;
mod error;
pub mod packed;
pub mod trit;
pub mod tryte;

pub use accumulator::*;
pub use error::*;
pub use packed::*;
pub use trit::*;
pub use tryte::*;

/// Number of trits encoded by a single tryte symbol.
pub const TRITS_PER_TRYTE: usize = 3;

/// Number of tryte symbols in one record chunk.
pub const TRYTES_PER_CHUNK: usize = 81;

/// Number of trits in one record chunk, which is also the width of the sponge rate.
pub const TRITS_PER_CHUNK: usize = TRYTES_PER_CHUNK * TRITS_PER_TRYTE;

/// Maximum number of records processed side by side in one packed word.
pub const MAX_LANES: usize = u64::BITS as usize;
