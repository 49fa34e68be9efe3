// Copyright 2024-2025 Irreducible Inc.
// Copyright (c) 2024 The Plonky3 Authors

//! [`Permutation`] is taken from [p3_symmetric](https://github.com/Plonky3/Plonky3/blob/main/symmetric/src/permutation.rs) in [Plonky3].
//!
//! [Plonky3]: <https://github.com/plonky3/plonky3>

use curlbatch_trinary::LaneAccumulator;

/// A permutation in the mathematical sense.
pub trait Permutation<T: Clone>: Clone + Sync {
	fn permute(&self, mut input: T) -> T {
		self.permute_mut(&mut input);
		input
	}

	fn permute_mut(&self, input: &mut T);
}

/// The absorb/squeeze contract of a sponge that works on a whole [`LaneAccumulator`] at once.
///
/// Both operations act on every bit-lane of the block simultaneously and cost the same no matter
/// how many lanes carry real data. Lanes the caller does not use must already be zero; an
/// implementation never clears them itself.
pub trait SpongePermutation {
	/// Mix the block into the internal state. Must be a deterministic function of the state and
	/// the full content of `block`.
	fn absorb(&mut self, block: &LaneAccumulator);

	/// Overwrite `block` with output digits taken from the internal state, advancing the state.
	fn squeeze(&mut self, block: &mut LaneAccumulator);

	/// Return the internal state to the one of a freshly constructed instance.
	fn reset(&mut self);
}
