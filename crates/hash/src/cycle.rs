// Copyright 2025 Irreducible Inc.

use curlbatch_trinary::{LaneAccumulator, PackedTrit};

use crate::permutation::SpongePermutation;

/// A trivial [`SpongePermutation`] with hand-computable output, meant for tests and examples.
///
/// `absorb` keeps a copy of the block. `squeeze` writes the kept block back with every trit
/// cycled `0 -> 1 -> -1 -> 0`, so a chunk of 81 `'9'` trytes hashes to 81 `'M'` trytes.
#[derive(Debug, Clone, Default)]
pub struct TritCycle {
	kept: LaneAccumulator,
}

impl SpongePermutation for TritCycle {
	fn absorb(&mut self, block: &LaneAccumulator) {
		self.kept.clone_from(block);
	}

	fn squeeze(&mut self, block: &mut LaneAccumulator) {
		for (out, word) in block.words_mut().iter_mut().zip(self.kept.words()) {
			*out = PackedTrit {
				pos: word.zeros(),
				neg: word.pos,
			};
		}
	}

	fn reset(&mut self) {
		self.kept.clear();
	}
}

#[cfg(test)]
mod tests {
	use curlbatch_trinary::Trit;

	use super::*;

	#[test]
	fn test_cycles_every_digit() {
		let mut block = LaneAccumulator::new();
		let input = [Trit::MinusOne, Trit::Zero, Trit::One]
			.into_iter()
			.cycle()
			.take(LaneAccumulator::CAPACITY)
			.collect::<Vec<_>>();
		block.load_lane(7, &input).unwrap();

		let mut stub = TritCycle::default();
		stub.absorb(&block);
		stub.squeeze(&mut block);

		let expected = [Trit::Zero, Trit::One, Trit::MinusOne]
			.into_iter()
			.cycle()
			.take(LaneAccumulator::CAPACITY)
			.collect::<Vec<_>>();
		assert_eq!(block.read_lane(7).unwrap(), expected);
		assert_eq!(block.read_lane(0).unwrap(), vec![Trit::One; LaneAccumulator::CAPACITY]);
	}
}
