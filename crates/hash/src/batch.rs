// Copyright 2025 Irreducible Inc.

//! Tryte-level entry points that drive a [`SpongeState`] through whole batch cycles.

use curlbatch_trinary::{
	Error as TrinaryError, MAX_LANES, TRITS_PER_CHUNK, TRYTES_PER_CHUNK, Trit, Trytes,
	trits_to_trytes, trytes_to_trits_into, validate_trytes,
};
use curlbatch_utils::ensure;
use rayon::prelude::*;
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

use crate::{
	Error, config::HasherConfig, curl::CurlP, permutation::SpongePermutation, session::SpongeState,
};

/// A Curl-P-81 session.
pub fn create_session() -> SpongeState<CurlP> {
	create_session_with(&HasherConfig::default())
}

pub fn create_session_with(config: &HasherConfig) -> SpongeState<CurlP> {
	SpongeState::new(CurlP::new(config.mode))
}

/// Wipe the session's accumulator and sponge state, then drop it.
pub fn release_session<P: SpongePermutation>(mut session: SpongeState<P>) {
	session.clear();
}

fn check_chunk_count(count: usize) -> Result<(), Error> {
	ensure!(
		count <= MAX_LANES,
		Error::TooManyChunks {
			count,
			max: MAX_LANES
		}
	);
	Ok(())
}

/// Shift the position of a decoding error from chunk-relative to input-relative.
fn offset_position(err: TrinaryError, offset: usize) -> TrinaryError {
	match err {
		TrinaryError::InvalidSymbol { symbol, position } => TrinaryError::InvalidSymbol {
			symbol,
			position: offset + position,
		},
		err => err,
	}
}

/// Decode every chunk first, then load chunk `i` into lane `i`.
///
/// Each item pairs a chunk with its offset in the caller's input. Unless `continue_record` is
/// set the session starts a new cycle; otherwise only the accumulator is zeroed and the next
/// absorb extends the records absorbed so far. A decoding failure leaves the session untouched.
fn load_chunk_slices<'a, P: SpongePermutation>(
	session: &mut SpongeState<P>,
	chunks: impl ExactSizeIterator<Item = (usize, &'a [u8])>,
	continue_record: bool,
) -> Result<(), Error> {
	check_chunk_count(chunks.len())?;

	let mut trits = vec![Trit::Zero; chunks.len() * TRITS_PER_CHUNK];
	for ((offset, chunk), out) in chunks.zip(trits.chunks_exact_mut(TRITS_PER_CHUNK)) {
		trytes_to_trits_into(chunk, out).map_err(|err| offset_position(err, offset))?;
	}

	if continue_record {
		session.next_block()?;
	} else {
		session.clear();
	}
	session.begin_load()?;
	for (lane, block) in trits.chunks_exact(TRITS_PER_CHUNK).enumerate() {
		session.load_lane(lane, block)?;
	}
	Ok(())
}

/// Load `chunk_count` consecutive 81-tryte chunks of `trytes` into lanes `0..chunk_count`.
///
/// Every call starts a new cycle: the session is cleared first, so neither lanes at or above
/// `chunk_count` nor blocks absorbed earlier affect the result. Loading zero chunks is legal and
/// leaves an all-zero block ready to absorb.
#[instrument(skip_all, level = "debug", fields(chunk_count = chunk_count))]
pub fn load_chunks<P: SpongePermutation>(
	session: &mut SpongeState<P>,
	trytes: &[u8],
	chunk_count: usize,
) -> Result<(), Error> {
	check_chunk_count(chunk_count)?;
	let expected = chunk_count * TRYTES_PER_CHUNK;
	ensure!(
		trytes.len() >= expected,
		Error::TruncatedInput {
			expected,
			actual: trytes.len()
		}
	);

	let chunks = trytes[..expected]
		.chunks_exact(TRYTES_PER_CHUNK)
		.enumerate()
		.map(|(index, chunk)| (index * TRYTES_PER_CHUNK, chunk));
	load_chunk_slices(session, chunks, false)
}

/// Absorb the loaded block and squeeze one block of output into the accumulator.
#[instrument(skip_all, level = "debug")]
pub fn run_cycle<P: SpongePermutation>(session: &mut SpongeState<P>) -> Result<(), Error> {
	session.absorb()?;
	session.squeeze()
}

/// Read the 81-tryte hash of every lane in `0..chunk_count`, in lane order.
pub fn read_hashes<P: SpongePermutation>(
	session: &SpongeState<P>,
	chunk_count: usize,
) -> Result<Vec<Trytes>, Error> {
	check_chunk_count(chunk_count)?;

	(0..chunk_count)
		.map(|lane| -> Result<Trytes, Error> {
			let trits = session.read_lane(lane)?;
			Ok(trits_to_trytes(&trits, TRITS_PER_CHUNK)?)
		})
		.collect()
}

/// Compare the hash of every lane in `0..chunk_count` with the matching 81-tryte slice of
/// `expected`.
///
/// Every byte of every hash is compared, whether or not an earlier byte differed.
pub fn compare_hashes<P: SpongePermutation>(
	session: &SpongeState<P>,
	chunk_count: usize,
	expected: &[u8],
) -> Result<Vec<bool>, Error> {
	check_chunk_count(chunk_count)?;
	ensure!(
		expected.len() == chunk_count * TRYTES_PER_CHUNK,
		Error::BufferSizeMismatch {
			expected: chunk_count * TRYTES_PER_CHUNK,
			actual: expected.len()
		}
	);

	let hashes = read_hashes(session, chunk_count)?;
	Ok(hashes
		.iter()
		.zip(expected.chunks_exact(TRYTES_PER_CHUNK))
		.map(|(hash, expected)| bool::from(hash.as_bytes().ct_eq(expected)))
		.collect())
}

fn check_record_shape<R: AsRef<[u8]>>(records: &[R]) -> Result<usize, Error> {
	let Some(first) = records.first() else {
		return Ok(0);
	};

	let length = first.as_ref().len();
	ensure!(
		length > 0,
		Error::TruncatedInput {
			expected: TRYTES_PER_CHUNK,
			actual: 0
		}
	);
	ensure!(
		length % TRYTES_PER_CHUNK == 0,
		curlbatch_trinary::Error::InvalidLength {
			length,
			multiple_of: TRYTES_PER_CHUNK
		}
	);

	for (index, record) in records.iter().enumerate() {
		let record = record.as_ref();
		ensure!(
			record.len() == length,
			Error::RecordLengthMismatch {
				index,
				length: record.len(),
				expected: length
			}
		);
		validate_trytes(record)?;
	}
	Ok(length)
}

/// Hash up to [`MAX_LANES`] equal-length records, one per lane.
///
/// Chunk `k` of every record is loaded and absorbed before chunk `k + 1`, then a single squeeze
/// produces all hashes. The session is cleared first, so earlier use does not leak into the
/// result.
#[instrument(skip_all, level = "debug", fields(records = records.len()))]
pub fn hash_records<P: SpongePermutation, R: AsRef<[u8]>>(
	session: &mut SpongeState<P>,
	records: &[R],
) -> Result<Vec<Trytes>, Error> {
	check_chunk_count(records.len())?;
	let length = check_record_shape(records)?;
	hash_checked_records(session, records, length)
}

/// [`hash_records`] for records already known to be valid tryte strings of `length` trytes.
fn hash_checked_records<P: SpongePermutation, R: AsRef<[u8]>>(
	session: &mut SpongeState<P>,
	records: &[R],
	length: usize,
) -> Result<Vec<Trytes>, Error> {
	if records.is_empty() {
		return Ok(Vec::new());
	}

	for offset in (0..length).step_by(TRYTES_PER_CHUNK) {
		let chunks = records
			.iter()
			.map(|record| (offset, &record.as_ref()[offset..offset + TRYTES_PER_CHUNK]));
		load_chunk_slices(session, chunks, offset > 0)?;
		session.absorb()?;
	}
	session.squeeze()?;

	debug!(chunks = length / TRYTES_PER_CHUNK, "records hashed");
	read_hashes(session, records.len())
}

/// Hash any number of equal-length records, [`MAX_LANES`] at a time.
///
/// Every group of records gets its own session, and the groups run on the rayon pool unless
/// `config.parallel` is off. The output follows input order.
#[instrument(skip_all, level = "debug", fields(records = records.len(), parallel = config.parallel))]
pub fn par_hash_records<R: AsRef<[u8]> + Sync>(
	config: &HasherConfig,
	records: &[R],
) -> Result<Vec<Trytes>, Error> {
	let length = check_record_shape(records)?;

	let hash_group = |group: &[R]| {
		let mut session = create_session_with(config);
		let hashes = hash_checked_records(&mut session, group, length);
		release_session(session);
		hashes
	};

	let groups = if config.parallel {
		records
			.par_chunks(MAX_LANES)
			.map(hash_group)
			.collect::<Result<Vec<_>, _>>()?
	} else {
		records
			.chunks(MAX_LANES)
			.map(hash_group)
			.collect::<Result<Vec<_>, _>>()?
	};
	Ok(groups.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::{curl::CurlMode, cycle::TritCycle, session::Phase};

	fn random_trytes(rng: &mut impl Rng, length: usize) -> Vec<u8> {
		(0..length)
			.map(|_| curlbatch_trinary::TRYTE_ALPHABET[rng.gen_range(0..27)])
			.collect()
	}

	fn stub_session() -> SpongeState<TritCycle> {
		SpongeState::new(TritCycle::default())
	}

	#[test]
	fn test_all_nines_hash_to_all_m_with_stub() {
		let mut session = stub_session();
		let input = vec![b'9'; 2 * TRYTES_PER_CHUNK];

		load_chunks(&mut session, &input, 2).unwrap();
		run_cycle(&mut session).unwrap();
		let hashes = read_hashes(&session, 2).unwrap();

		let expected = "M".repeat(TRYTES_PER_CHUNK);
		assert_eq!(hashes.len(), 2);
		assert_eq!(hashes[0], hashes[1]);
		assert_eq!(hashes[0].as_str(), expected);
	}

	#[test]
	fn test_zero_chunks() {
		let mut session = stub_session();
		load_chunks(&mut session, b"", 0).unwrap();
		assert_eq!(session.phase(), Phase::Loaded);
		run_cycle(&mut session).unwrap();
		assert!(read_hashes(&session, 0).unwrap().is_empty());
		assert!(compare_hashes(&session, 0, b"").unwrap().is_empty());
	}

	#[test]
	fn test_chunk_count_bounds() {
		let mut rng = StdRng::seed_from_u64(0);
		let input = random_trytes(&mut rng, (MAX_LANES + 1) * TRYTES_PER_CHUNK);
		let mut session = stub_session();

		load_chunks(&mut session, &input, MAX_LANES).unwrap();
		run_cycle(&mut session).unwrap();
		assert_eq!(read_hashes(&session, MAX_LANES).unwrap().len(), MAX_LANES);

		assert_matches!(
			load_chunks(&mut session, &input, MAX_LANES + 1),
			Err(Error::TooManyChunks { count: 65, max: 64 })
		);
		assert_matches!(read_hashes(&session, MAX_LANES + 1), Err(Error::TooManyChunks { .. }));
	}

	#[test]
	fn test_truncated_input() {
		let mut session = stub_session();
		let input = vec![b'9'; 2 * TRYTES_PER_CHUNK - 1];
		assert_matches!(
			load_chunks(&mut session, &input, 2),
			Err(Error::TruncatedInput {
				expected: 162,
				actual: 161
			})
		);
		assert_eq!(session.phase(), Phase::Created);
	}

	#[test]
	fn test_invalid_symbol_leaves_session_untouched() {
		let mut session = stub_session();
		load_chunks(&mut session, &[b'A'; TRYTES_PER_CHUNK], 1).unwrap();
		let before = session.accumulator().clone();

		let mut input = vec![b'9'; 2 * TRYTES_PER_CHUNK];
		input[TRYTES_PER_CHUNK + 5] = b'?';
		assert_matches!(
			load_chunks(&mut session, &input, 2),
			Err(Error::Trinary(TrinaryError::InvalidSymbol {
				symbol: b'?',
				position: 86
			}))
		);
		assert_eq!(session.accumulator(), &before);
		assert_eq!(session.phase(), Phase::Loaded);
	}

	#[test]
	fn test_stale_lanes_do_not_leak_into_smaller_batch() {
		let mut rng = StdRng::seed_from_u64(1);
		let large = random_trytes(&mut rng, 5 * TRYTES_PER_CHUNK);
		let small = &large[..2 * TRYTES_PER_CHUNK];

		let config = HasherConfig::default().with_mode(CurlMode::P27);
		let mut reused = create_session_with(&config);
		load_chunks(&mut reused, &large, 5).unwrap();
		run_cycle(&mut reused).unwrap();
		load_chunks(&mut reused, small, 2).unwrap();
		assert_eq!(reused.loaded_lanes(), 0b11);
		assert_eq!(reused.accumulator().active_lanes() & !0b11, 0);
		run_cycle(&mut reused).unwrap();

		let mut fresh = create_session_with(&config);
		load_chunks(&mut fresh, small, 2).unwrap();
		run_cycle(&mut fresh).unwrap();

		assert_eq!(read_hashes(&reused, 2).unwrap(), read_hashes(&fresh, 2).unwrap());
	}

	#[test]
	fn test_abandoned_absorb_does_not_leak_into_next_batch() {
		let mut rng = StdRng::seed_from_u64(3);
		let first = random_trytes(&mut rng, 3 * TRYTES_PER_CHUNK);
		let second = random_trytes(&mut rng, 3 * TRYTES_PER_CHUNK);

		let config = HasherConfig::default().with_mode(CurlMode::P27);
		let mut reused = create_session_with(&config);
		load_chunks(&mut reused, &first, 3).unwrap();
		reused.absorb().unwrap();
		load_chunks(&mut reused, &second, 3).unwrap();
		assert_eq!(reused.absorbed_blocks(), 0);
		run_cycle(&mut reused).unwrap();

		let mut fresh = create_session_with(&config);
		load_chunks(&mut fresh, &second, 3).unwrap();
		run_cycle(&mut fresh).unwrap();

		assert_eq!(read_hashes(&reused, 3).unwrap(), read_hashes(&fresh, 3).unwrap());
	}

	#[test]
	fn test_invalid_symbol_position_is_relative_to_record() {
		let mut session = stub_session();
		let mut records = vec![vec![b'9'; 2 * TRYTES_PER_CHUNK]; 2];
		records[1][TRYTES_PER_CHUNK + 3] = b'a';
		assert_matches!(
			hash_records(&mut session, &records),
			Err(Error::Trinary(TrinaryError::InvalidSymbol {
				symbol: b'a',
				position: 84
			}))
		);
	}

	#[test]
	fn test_compare_hashes_per_lane() {
		let mut rng = StdRng::seed_from_u64(2);
		let input = random_trytes(&mut rng, 3 * TRYTES_PER_CHUNK);
		let mut session = stub_session();
		load_chunks(&mut session, &input, 3).unwrap();
		run_cycle(&mut session).unwrap();

		let mut expected = read_hashes(&session, 3)
			.unwrap()
			.iter()
			.flat_map(|hash| hash.as_bytes().to_vec())
			.collect::<Vec<_>>();
		assert_eq!(compare_hashes(&session, 3, &expected).unwrap(), [true, true, true]);

		let last = 2 * TRYTES_PER_CHUNK - 1;
		expected[last] = if expected[last] == b'9' { b'A' } else { b'9' };
		assert_eq!(compare_hashes(&session, 3, &expected).unwrap(), [true, false, true]);

		assert_matches!(
			compare_hashes(&session, 3, &expected[1..]),
			Err(Error::BufferSizeMismatch {
				expected: 243,
				actual: 242
			})
		);
	}

	#[test]
	fn test_hash_records_shape_checks() {
		let mut session = stub_session();
		let records = [vec![b'9'; 2 * TRYTES_PER_CHUNK], vec![b'9'; TRYTES_PER_CHUNK]];
		assert_matches!(
			hash_records(&mut session, &records),
			Err(Error::RecordLengthMismatch {
				index: 1,
				length: 81,
				expected: 162
			})
		);
		assert_matches!(
			hash_records(&mut session, &[vec![b'9'; 100]]),
			Err(Error::Trinary(curlbatch_trinary::Error::InvalidLength { length: 100, .. }))
		);
		assert!(hash_records(&mut session, &Vec::<Vec<u8>>::new()).unwrap().is_empty());
	}

	#[test]
	fn test_release_session() {
		let mut session = create_session();
		load_chunks(&mut session, &[b'Z'; TRYTES_PER_CHUNK], 1).unwrap();
		release_session(session);
	}
}
