// Copyright 2025 Irreducible Inc.

use std::fmt;

use bytemuck::{Pod, Zeroable};

use crate::{Error, MAX_LANES, Trit};

/// One trit position of up to [`MAX_LANES`] records, bit-sliced over two planes.
///
/// Bit `i` of `pos` set means lane `i` holds `+1`, bit `i` of `neg` set means it holds `-1`, and
/// neither set means `0`. The two planes never share a set bit, so the all-zero word is the
/// all-zero digit in every lane.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct PackedTrit {
	pub pos: u64,
	pub neg: u64,
}

impl PackedTrit {
	pub const ZERO: Self = Self { pos: 0, neg: 0 };
	pub const WIDTH: usize = MAX_LANES;

	/// The same trit in every lane.
	pub const fn broadcast(trit: Trit) -> Self {
		match trit {
			Trit::MinusOne => Self {
				pos: 0,
				neg: u64::MAX,
			},
			Trit::Zero => Self::ZERO,
			Trit::One => Self {
				pos: u64::MAX,
				neg: 0,
			},
		}
	}

	/// Mask of the lanes holding `0`.
	#[inline]
	pub const fn zeros(self) -> u64 {
		!(self.pos | self.neg)
	}

	/// Mask of the lanes holding a non-zero digit.
	#[inline]
	pub const fn occupied(self) -> u64 {
		self.pos | self.neg
	}

	#[inline]
	pub const fn is_well_formed(self) -> bool {
		self.pos & self.neg == 0
	}

	#[inline]
	pub fn get_checked(self, lane: usize) -> Result<Trit, Error> {
		check_lane(lane)?;
		let bit = 1u64 << lane;
		Ok(if self.pos & bit != 0 {
			Trit::One
		} else if self.neg & bit != 0 {
			Trit::MinusOne
		} else {
			Trit::Zero
		})
	}

	#[inline]
	pub fn set_checked(&mut self, lane: usize, trit: Trit) -> Result<(), Error> {
		check_lane(lane)?;
		let bit = 1u64 << lane;
		self.pos &= !bit;
		self.neg &= !bit;
		match trit {
			Trit::MinusOne => self.neg |= bit,
			Trit::Zero => {}
			Trit::One => self.pos |= bit,
		}
		Ok(())
	}

	/// # Panics
	/// Panics if `lane >= MAX_LANES`.
	#[inline]
	pub fn get(self, lane: usize) -> Trit {
		self.get_checked(lane).expect("lane must be less than MAX_LANES")
	}

	/// # Panics
	/// Panics if `lane >= MAX_LANES`.
	#[inline]
	pub fn set(&mut self, lane: usize, trit: Trit) {
		self.set_checked(lane, trit)
			.expect("lane must be less than MAX_LANES")
	}

	pub fn iter(self) -> impl Iterator<Item = Trit> {
		(0..Self::WIDTH).map(move |lane| self.get(lane))
	}
}

#[inline]
pub(crate) fn check_lane(lane: usize) -> Result<(), Error> {
	if lane < MAX_LANES {
		Ok(())
	} else {
		Err(Error::LaneOutOfRange {
			lane,
			max: MAX_LANES,
		})
	}
}

impl fmt::Debug for PackedTrit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "PackedTrit(pos={:#018x}, neg={:#018x})", self.pos, self.neg)
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;

	#[test]
	fn test_set_get_every_lane() {
		let mut rng = StdRng::seed_from_u64(0);
		let mut word = PackedTrit::ZERO;
		let mut expected = [Trit::Zero; MAX_LANES];

		for _ in 0..1000 {
			let lane = rng.gen_range(0..MAX_LANES);
			let trit = Trit::ALL[rng.gen_range(0..3)];
			word.set(lane, trit);
			expected[lane] = trit;

			assert!(word.is_well_formed());
			assert!(word.iter().eq(expected.iter().copied()));
		}
	}

	#[test]
	fn test_broadcast() {
		for trit in Trit::ALL {
			assert!(PackedTrit::broadcast(trit).iter().all(|t| t == trit));
		}
		assert_eq!(PackedTrit::broadcast(Trit::Zero).zeros(), u64::MAX);
	}

	#[test]
	fn test_lane_out_of_range() {
		let mut word = PackedTrit::ZERO;
		assert_matches!(
			word.set_checked(MAX_LANES, Trit::One),
			Err(Error::LaneOutOfRange { lane: 64, max: 64 })
		);
		assert_matches!(word.get_checked(100), Err(Error::LaneOutOfRange { .. }));
		assert_eq!(word, PackedTrit::ZERO);
	}
}
