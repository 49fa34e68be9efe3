// Copyright 2025 Irreducible Inc.

use std::fmt;

use curlbatch_utils::ensure;

use crate::{Error, MAX_LANES, PackedTrit, TRITS_PER_CHUNK, Trit, packed::check_lane};

/// One sponge block of packed digits, filled and read one lane at a time.
///
/// Word `i` holds trit position `i` of every lane, so lane `l` of the block is bit `l` of all
/// [`TRITS_PER_CHUNK`] words. Nothing in the storage says whether the words are fresh input or
/// sponge output; the owner has to track that.
#[derive(Clone, PartialEq, Eq)]
pub struct LaneAccumulator {
	words: [PackedTrit; TRITS_PER_CHUNK],
}

impl LaneAccumulator {
	pub const CAPACITY: usize = TRITS_PER_CHUNK;

	pub const fn new() -> Self {
		Self {
			words: [PackedTrit::ZERO; TRITS_PER_CHUNK],
		}
	}

	/// Zero every word, i.e. set every lane to all-zero trits.
	pub fn clear(&mut self) {
		bytemuck::fill_zeroes(&mut self.words);
	}

	/// Write a full block of trits into `lane`.
	pub fn load_lane(&mut self, lane: usize, trits: &[Trit]) -> Result<(), Error> {
		ensure!(
			trits.len() == Self::CAPACITY,
			Error::InvalidLength {
				length: trits.len(),
				multiple_of: Self::CAPACITY
			}
		);
		trits_to_packed_lane(trits, self, lane, Self::CAPACITY)
	}

	/// Read a full block of trits back out of `lane`.
	pub fn read_lane(&self, lane: usize) -> Result<Vec<Trit>, Error> {
		packed_lane_to_trits(self, lane, Self::CAPACITY)
	}

	#[inline]
	pub fn words(&self) -> &[PackedTrit; TRITS_PER_CHUNK] {
		&self.words
	}

	#[inline]
	pub fn words_mut(&mut self) -> &mut [PackedTrit; TRITS_PER_CHUNK] {
		&mut self.words
	}

	/// Mask of the lanes with at least one non-zero digit.
	pub fn active_lanes(&self) -> u64 {
		self.words
			.iter()
			.fold(0, |mask, word| mask | word.occupied())
	}

	pub fn is_zero(&self) -> bool {
		self.active_lanes() == 0
	}
}

impl Default for LaneAccumulator {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for LaneAccumulator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LaneAccumulator")
			.field("active_lanes", &format_args!("{:#018x}", self.active_lanes()))
			.finish_non_exhaustive()
	}
}

fn check_width(width: usize) -> Result<(), Error> {
	ensure!(
		width <= LaneAccumulator::CAPACITY,
		Error::WidthExceeded {
			width,
			max: LaneAccumulator::CAPACITY
		}
	);
	Ok(())
}

/// Write the first `width` trits into bit `lane` of the first `width` words of `acc`.
///
/// Every other lane of those words, and every word past `width`, is left untouched.
pub fn trits_to_packed_lane(
	trits: &[Trit],
	acc: &mut LaneAccumulator,
	lane: usize,
	width: usize,
) -> Result<(), Error> {
	check_lane(lane)?;
	check_width(width)?;
	ensure!(
		trits.len() >= width,
		Error::Truncated {
			expected: width,
			actual: trits.len()
		}
	);

	let bit = 1u64 << lane;
	for (word, &trit) in acc.words[..width].iter_mut().zip(trits) {
		word.pos &= !bit;
		word.neg &= !bit;
		match trit {
			Trit::MinusOne => word.neg |= bit,
			Trit::Zero => {}
			Trit::One => word.pos |= bit,
		}
	}
	Ok(())
}

/// Read `width` trits of `lane` without modifying `acc`.
pub fn packed_lane_to_trits(
	acc: &LaneAccumulator,
	lane: usize,
	width: usize,
) -> Result<Vec<Trit>, Error> {
	let mut trits = vec![Trit::Zero; width];
	packed_lane_to_trits_into(acc, lane, &mut trits)?;
	Ok(trits)
}

/// Read `out.len()` trits of `lane` into `out`.
pub fn packed_lane_to_trits_into(
	acc: &LaneAccumulator,
	lane: usize,
	out: &mut [Trit],
) -> Result<(), Error> {
	check_lane(lane)?;
	check_width(out.len())?;

	let bit = 1u64 << lane;
	for (trit, word) in out.iter_mut().zip(&acc.words) {
		*trit = if word.pos & bit != 0 {
			Trit::One
		} else if word.neg & bit != 0 {
			Trit::MinusOne
		} else {
			Trit::Zero
		};
	}
	Ok(())
}

const _: () = assert!(MAX_LANES == PackedTrit::WIDTH);
