// Copyright 2025 Irreducible Inc.

//! Hand-off of hashed transactions to an external bundle validator.
//!
//! Bundle rules (ordering, value balance, signatures) belong to the validator. This module only
//! makes sure every transaction it passes on is well-formed and carries the hash computed here.

use curlbatch_trinary::{TRYTES_PER_CHUNK, Trytes};
use curlbatch_utils::ensure;
use tracing::{instrument, warn};

use crate::{Error, batch::par_hash_records, config::HasherConfig};

/// Number of trytes in one serialized transaction.
pub const TRANSACTION_TRYTES: usize = 2673;

/// Number of sponge blocks absorbed per transaction.
pub const TRANSACTION_CHUNKS: usize = TRANSACTION_TRYTES / TRYTES_PER_CHUNK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
	Valid,
	Invalid,
	StructurallyMalformed,
}

/// A serialized transaction together with its Curl hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedTransaction {
	pub trytes: Trytes,
	pub hash: Trytes,
}

pub trait BundleValidator {
	/// Judge an ordered bundle. `declared_count` is the transaction count the bundle claims.
	fn validate(&self, transactions: &[HashedTransaction], declared_count: usize) -> Verdict;
}

impl<F> BundleValidator for F
where
	F: Fn(&[HashedTransaction], usize) -> Verdict,
{
	fn validate(&self, transactions: &[HashedTransaction], declared_count: usize) -> Verdict {
		self(transactions, declared_count)
	}
}

/// Hash every transaction of a bundle, keeping bundle order.
#[instrument(skip_all, level = "debug", fields(transactions = transactions.len()))]
pub fn hash_bundle(
	config: &HasherConfig,
	transactions: &[Trytes],
) -> Result<Vec<HashedTransaction>, Error> {
	for (index, transaction) in transactions.iter().enumerate() {
		ensure!(
			transaction.len() == TRANSACTION_TRYTES,
			Error::RecordLengthMismatch {
				index,
				length: transaction.len(),
				expected: TRANSACTION_TRYTES
			}
		);
	}

	let hashes = par_hash_records(config, transactions)?;
	Ok(transactions
		.iter()
		.cloned()
		.zip(hashes)
		.map(|(trytes, hash)| HashedTransaction { trytes, hash })
		.collect())
}

/// Hash a bundle and pass it to `validator`.
///
/// Returns [`Verdict::StructurallyMalformed`] without consulting the validator when the bundle
/// is empty, its size differs from `declared_count`, or a transaction cannot be hashed.
pub fn validate_bundle(
	validator: &impl BundleValidator,
	config: &HasherConfig,
	transactions: &[Trytes],
	declared_count: usize,
) -> Verdict {
	if transactions.is_empty() || transactions.len() != declared_count {
		warn!(
			received = transactions.len(),
			declared = declared_count,
			"bundle size does not match its declared count"
		);
		return Verdict::StructurallyMalformed;
	}

	match hash_bundle(config, transactions) {
		Ok(hashed) => validator.validate(&hashed, declared_count),
		Err(err) => {
			warn!(%err, "bundle could not be hashed");
			Verdict::StructurallyMalformed
		}
	}
}
