// Copyright 2025 Irreducible Inc.

//! Curl-P over balanced trits, in a scalar form for one record and a bit-sliced form for
//! [`MAX_LANES`](curlbatch_trinary::MAX_LANES) records at once.

use std::fmt;

use curlbatch_trinary::{LaneAccumulator, PackedTrit, TRITS_PER_CHUNK, Trit};

use crate::{Error, permutation::Permutation, permutation::SpongePermutation};

/// Number of trits in the full sponge state: the rate plus twice its width of capacity.
pub const STATE_TRITS: usize = 3 * TRITS_PER_CHUNK;

pub type TritState = [Trit; STATE_TRITS];
pub type PackedState = [PackedTrit; STATE_TRITS];

/// Round count variants of Curl-P.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurlMode {
	P27,
	#[default]
	P81,
}

impl CurlMode {
	pub const fn rounds(self) -> usize {
		match self {
			Self::P27 => 27,
			Self::P81 => 81,
		}
	}
}

impl TryFrom<usize> for CurlMode {
	type Error = Error;

	fn try_from(rounds: usize) -> Result<Self, Error> {
		match rounds {
			27 => Ok(Self::P27),
			81 => Ok(Self::P81),
			_ => Err(Error::UnsupportedRounds(rounds)),
		}
	}
}

/// Output of the substitution box, indexed by `a + 4 * b + 5`. Indices 3 and 7 are unreachable.
const TRUTH_TABLE: [Trit; 11] = [
	Trit::One,
	Trit::Zero,
	Trit::MinusOne,
	Trit::Zero,
	Trit::One,
	Trit::MinusOne,
	Trit::Zero,
	Trit::Zero,
	Trit::MinusOne,
	Trit::One,
	Trit::Zero,
];

#[inline(always)]
const fn next_index(index: usize) -> usize {
	if index < 365 { index + 364 } else { index - 365 }
}

#[inline(always)]
fn sbox(a: Trit, b: Trit) -> Trit {
	TRUTH_TABLE[(a.value() + 4 * b.value() + 5) as usize]
}

/// The substitution box evaluated on every lane of two packed digits.
#[inline(always)]
fn packed_sbox(a: PackedTrit, b: PackedTrit) -> PackedTrit {
	let a_zero = a.zeros();
	let b_zero = b.zeros();
	PackedTrit {
		pos: (a.neg & !b.pos) | (a_zero & b.pos),
		neg: (a.pos & b.neg) | (a_zero & b_zero) | (a.neg & b.pos),
	}
}

/// The Curl-P state transformation for a fixed number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurlTransform {
	rounds: usize,
}

impl CurlTransform {
	pub const fn new(mode: CurlMode) -> Self {
		Self {
			rounds: mode.rounds(),
		}
	}

	pub const fn rounds(&self) -> usize {
		self.rounds
	}
}

impl Permutation<TritState> for CurlTransform {
	fn permute_mut(&self, state: &mut TritState) {
		let mut scratch = [Trit::Zero; STATE_TRITS];
		for _ in 0..self.rounds {
			scratch.copy_from_slice(state);
			let mut index = 0;
			for out in state.iter_mut() {
				let a = scratch[index];
				index = next_index(index);
				*out = sbox(a, scratch[index]);
			}
		}
	}
}

impl Permutation<PackedState> for CurlTransform {
	fn permute_mut(&self, state: &mut PackedState) {
		let mut scratch = [PackedTrit::ZERO; STATE_TRITS];
		for _ in 0..self.rounds {
			scratch.copy_from_slice(state);
			let mut index = 0;
			for out in state.iter_mut() {
				let a = scratch[index];
				index = next_index(index);
				*out = packed_sbox(a, scratch[index]);
			}
		}
	}
}

/// Scalar Curl-P sponge hashing a single trit stream.
#[derive(Clone)]
pub struct Curl {
	transform: CurlTransform,
	state: Box<TritState>,
}

impl Curl {
	pub fn new(mode: CurlMode) -> Self {
		Self {
			transform: CurlTransform::new(mode),
			state: Box::new([Trit::Zero; STATE_TRITS]),
		}
	}

	/// Absorb `trits` one rate-sized chunk at a time. A short final chunk only overwrites the
	/// leading part of the rate.
	pub fn absorb(&mut self, trits: &[Trit]) {
		for chunk in trits.chunks(TRITS_PER_CHUNK) {
			self.state[..chunk.len()].copy_from_slice(chunk);
			self.transform.permute_mut(&mut *self.state);
		}
	}

	pub fn squeeze(&mut self, out: &mut [Trit]) {
		for chunk in out.chunks_mut(TRITS_PER_CHUNK) {
			chunk.copy_from_slice(&self.state[..chunk.len()]);
			self.transform.permute_mut(&mut *self.state);
		}
	}

	pub fn reset(&mut self) {
		self.state.fill(Trit::Zero);
	}

	/// Hash `trits` with a fresh sponge and squeeze one chunk of output.
	pub fn digest(mode: CurlMode, trits: &[Trit]) -> [Trit; TRITS_PER_CHUNK] {
		let mut curl = Self::new(mode);
		curl.absorb(trits);
		let mut out = [Trit::Zero; TRITS_PER_CHUNK];
		curl.squeeze(&mut out);
		out
	}
}

impl fmt::Debug for Curl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Curl")
			.field("rounds", &self.transform.rounds())
			.finish_non_exhaustive()
	}
}

/// Bit-sliced Curl-P running one independent sponge per lane.
#[derive(Clone)]
pub struct CurlP {
	transform: CurlTransform,
	state: Box<PackedState>,
}

impl CurlP {
	pub fn new(mode: CurlMode) -> Self {
		Self {
			transform: CurlTransform::new(mode),
			state: Box::new([PackedTrit::ZERO; STATE_TRITS]),
		}
	}

	pub fn rounds(&self) -> usize {
		self.transform.rounds()
	}
}

impl Default for CurlP {
	fn default() -> Self {
		Self::new(CurlMode::default())
	}
}

impl SpongePermutation for CurlP {
	fn absorb(&mut self, block: &LaneAccumulator) {
		self.state[..TRITS_PER_CHUNK].copy_from_slice(block.words());
		self.transform.permute_mut(&mut *self.state);
	}

	fn squeeze(&mut self, block: &mut LaneAccumulator) {
		block
			.words_mut()
			.copy_from_slice(&self.state[..TRITS_PER_CHUNK]);
		self.transform.permute_mut(&mut *self.state);
	}

	fn reset(&mut self) {
		bytemuck::fill_zeroes(&mut self.state[..]);
	}
}

impl fmt::Debug for CurlP {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CurlP")
			.field("rounds", &self.transform.rounds())
			.finish_non_exhaustive()
	}
}
