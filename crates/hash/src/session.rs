// Copyright 2025 Irreducible Inc.

use curlbatch_trinary::{LaneAccumulator, MAX_LANES, Trit};
use curlbatch_utils::{bail, ensure};
use tracing::trace;

use crate::{Error, curl::CurlP, permutation::SpongePermutation};

/// What the shared accumulator of a [`SpongeState`] currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
	/// Fresh sponge, nothing loaded.
	Created,
	/// The accumulator holds input that has not been absorbed yet.
	Loaded,
	/// At least one block was absorbed and no output has been squeezed.
	Absorbed,
	/// The accumulator holds sponge output.
	Squeezed,
}

/// A batched hashing session: one [`LaneAccumulator`] plus the sponge it feeds.
///
/// The accumulator is both the absorb input and the squeeze output, so the session tracks its
/// [`Phase`] and rejects every operation that would read it under the wrong interpretation.
/// Each session has a single owner; mutation requires `&mut self` and there is no internal
/// locking.
#[derive(Debug, Clone)]
pub struct SpongeState<P = CurlP> {
	permutation: P,
	accumulator: Box<LaneAccumulator>,
	phase: Phase,
	absorbed_blocks: usize,
	loaded_lanes: u64,
	/// Set once the accumulator content has been consumed by absorb or replaced by squeeze.
	stale: bool,
}

impl<P: SpongePermutation> SpongeState<P> {
	pub fn new(permutation: P) -> Self {
		Self {
			permutation,
			accumulator: Box::default(),
			phase: Phase::Created,
			absorbed_blocks: 0,
			loaded_lanes: 0,
			stale: false,
		}
	}

	#[inline]
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Number of blocks absorbed since the sponge was last reset.
	#[inline]
	pub fn absorbed_blocks(&self) -> usize {
		self.absorbed_blocks
	}

	/// Mask of the lanes written since the accumulator was last cleared.
	#[inline]
	pub fn loaded_lanes(&self) -> u64 {
		self.loaded_lanes
	}

	#[inline]
	pub fn accumulator(&self) -> &LaneAccumulator {
		&self.accumulator
	}

	#[inline]
	pub fn permutation(&self) -> &P {
		&self.permutation
	}

	/// Zero the accumulator and reset the sponge, returning to the state of a fresh session.
	///
	/// Legal from every phase, including after a failed operation. Nothing absorbed before the
	/// call influences later output.
	pub fn clear(&mut self) {
		self.accumulator.clear();
		self.permutation.reset();
		self.phase = Phase::Created;
		self.absorbed_blocks = 0;
		self.loaded_lanes = 0;
		self.stale = false;
		trace!("session cleared");
	}

	/// Zero the accumulator but keep the sponge state, so the next load continues the records
	/// absorbed so far.
	pub(crate) fn next_block(&mut self) -> Result<(), Error> {
		ensure!(self.phase == Phase::Absorbed, Error::NotAbsorbed);
		self.accumulator.clear();
		self.loaded_lanes = 0;
		self.stale = false;
		trace!(absorbed_blocks = self.absorbed_blocks, "accumulator cleared for next block");
		Ok(())
	}

	/// Mark the accumulator as holding input for the next absorb, even if no lane gets written.
	pub(crate) fn begin_load(&mut self) -> Result<(), Error> {
		ensure!(!self.stale && self.phase != Phase::Squeezed, Error::NotCleared);
		self.phase = Phase::Loaded;
		Ok(())
	}

	/// Write one block of trits into `lane`. Other lanes are untouched.
	pub fn load_lane(&mut self, lane: usize, trits: &[Trit]) -> Result<(), Error> {
		ensure!(!self.stale && self.phase != Phase::Squeezed, Error::NotCleared);
		self.accumulator.load_lane(lane, trits)?;
		self.loaded_lanes |= 1 << lane;
		self.phase = Phase::Loaded;
		Ok(())
	}

	/// Absorb the loaded block into the sponge.
	pub fn absorb(&mut self) -> Result<(), Error> {
		if self.phase != Phase::Loaded {
			bail!(Error::NotLoaded);
		}

		self.permutation.absorb(&self.accumulator);
		self.absorbed_blocks += 1;
		self.stale = true;
		self.phase = Phase::Absorbed;
		trace!(
			absorbed_blocks = self.absorbed_blocks,
			lanes = self.loaded_lanes.count_ones(),
			"absorbed"
		);
		Ok(())
	}

	/// Overwrite the accumulator with one block of sponge output.
	///
	/// May be repeated to read further output blocks.
	pub fn squeeze(&mut self) -> Result<(), Error> {
		match self.phase {
			Phase::Absorbed | Phase::Squeezed => {}
			Phase::Created | Phase::Loaded => {
				bail!(Error::NotAbsorbed);
			}
		}

		self.permutation.squeeze(&mut self.accumulator);
		self.stale = true;
		self.phase = Phase::Squeezed;
		trace!(absorbed_blocks = self.absorbed_blocks, "squeezed");
		Ok(())
	}

	/// Read the squeezed output of `lane`.
	pub fn read_lane(&self, lane: usize) -> Result<Vec<Trit>, Error> {
		ensure!(self.phase == Phase::Squeezed, Error::NotSqueezed);
		Ok(self.accumulator.read_lane(lane)?)
	}
}

impl Default for SpongeState<CurlP> {
	fn default() -> Self {
		Self::new(CurlP::default())
	}
}

const _: () = assert!(MAX_LANES <= u64::BITS as usize);
