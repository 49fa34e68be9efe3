// Copyright 2025 Irreducible Inc.

use std::{fmt, str::FromStr};

use curlbatch_utils::ensure;

use crate::{Error, TRITS_PER_TRYTE, Trit};

/// The 27 tryte symbols, indexed by tryte value modulo 27.
///
/// `'9'` is zero, `'A'..='M'` are `1..=13` and `'N'..='Z'` are `-13..=-1`.
pub const TRYTE_ALPHABET: &[u8; 27] = b"9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Trit decomposition of every tryte value, indexed by `value + 13`.
const TRYTE_TRITS: [[Trit; TRITS_PER_TRYTE]; 27] = {
	let mut table = [[Trit::Zero; TRITS_PER_TRYTE]; 27];
	let mut index = 0;
	while index < 27 {
		table[index] = balanced_digits(index as i8 - 13);
		index += 1;
	}
	table
};

const fn balanced_digits(mut value: i8) -> [Trit; TRITS_PER_TRYTE] {
	let mut digits = [Trit::Zero; TRITS_PER_TRYTE];
	let mut i = 0;
	while i < TRITS_PER_TRYTE {
		let mut rem = value % 3;
		value /= 3;
		if rem == 2 {
			rem = -1;
			value += 1;
		} else if rem == -2 {
			rem = 1;
			value -= 1;
		}
		digits[i] = match rem {
			-1 => Trit::MinusOne,
			0 => Trit::Zero,
			_ => Trit::One,
		};
		i += 1;
	}
	digits
}

/// Value in `-13..=13` of a tryte symbol, or `None` if the byte is not in the alphabet.
#[inline]
pub const fn tryte_value(symbol: u8) -> Option<i8> {
	match symbol {
		b'9' => Some(0),
		b'A'..=b'M' => Some((symbol - b'A') as i8 + 1),
		b'N'..=b'Z' => Some((symbol - b'N') as i8 - 13),
		_ => None,
	}
}

/// Symbol of a tryte value in `-13..=13`.
#[inline]
pub const fn tryte_symbol(value: i8) -> u8 {
	debug_assert!(value.unsigned_abs() <= 13);
	TRYTE_ALPHABET[value.rem_euclid(27) as usize]
}

fn decode_symbol(symbol: u8, position: usize) -> Result<&'static [Trit; TRITS_PER_TRYTE], Error> {
	match tryte_value(symbol) {
		Some(value) => Ok(&TRYTE_TRITS[(value + 13) as usize]),
		None => Err(Error::InvalidSymbol { symbol, position }),
	}
}

fn encode_trits(trits: &[Trit]) -> u8 {
	let value = trits
		.iter()
		.rev()
		.fold(0i8, |acc, &trit| acc * 3 + trit.value());
	tryte_symbol(value)
}

/// Decode the first `length` symbols of `trytes` into `3 * length` trits.
pub fn trytes_to_trits(trytes: &[u8], length: usize) -> Result<Vec<Trit>, Error> {
	ensure!(
		trytes.len() >= length,
		Error::Truncated {
			expected: length,
			actual: trytes.len()
		}
	);

	let mut trits = vec![Trit::Zero; length * TRITS_PER_TRYTE];
	trytes_to_trits_into(&trytes[..length], &mut trits)?;
	Ok(trits)
}

/// Decode every symbol of `trytes` into `out`, which must hold exactly three trits per symbol.
pub fn trytes_to_trits_into(trytes: &[u8], out: &mut [Trit]) -> Result<(), Error> {
	ensure!(
		out.len() == trytes.len() * TRITS_PER_TRYTE,
		Error::InvalidLength {
			length: out.len(),
			multiple_of: TRITS_PER_TRYTE
		}
	);

	for (position, (&symbol, digits)) in trytes
		.iter()
		.zip(out.chunks_exact_mut(TRITS_PER_TRYTE))
		.enumerate()
	{
		digits.copy_from_slice(decode_symbol(symbol, position)?);
	}
	Ok(())
}

/// Encode the first `length` trits into `length / 3` tryte symbols.
///
/// `length` counts trits, not trytes, and must be a multiple of three.
pub fn trits_to_trytes(trits: &[Trit], length: usize) -> Result<Trytes, Error> {
	ensure!(
		length % TRITS_PER_TRYTE == 0,
		Error::InvalidLength {
			length,
			multiple_of: TRITS_PER_TRYTE
		}
	);
	ensure!(
		trits.len() >= length,
		Error::Truncated {
			expected: length,
			actual: trits.len()
		}
	);

	let symbols = trits[..length]
		.chunks_exact(TRITS_PER_TRYTE)
		.map(|digits| char::from(encode_trits(digits)))
		.collect();
	Ok(Trytes(symbols))
}

/// Check that every byte of `trytes` is a tryte symbol.
pub fn validate_trytes(trytes: &[u8]) -> Result<(), Error> {
	match trytes.iter().position(|&symbol| tryte_value(symbol).is_none()) {
		Some(position) => Err(Error::InvalidSymbol {
			symbol: trytes[position],
			position,
		}),
		None => Ok(()),
	}
}

/// An owned string of tryte symbols. Every character is guaranteed to be in [`TRYTE_ALPHABET`].
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Trytes(String);

impl Trytes {
	/// A string of `length` `'9'` symbols, i.e. all-zero trits.
	pub fn zeros(length: usize) -> Self {
		Self("9".repeat(length))
	}

	pub fn from_trits(trits: &[Trit]) -> Result<Self, Error> {
		trits_to_trytes(trits, trits.len())
	}

	pub fn to_trits(&self) -> Vec<Trit> {
		let mut trits = vec![Trit::Zero; self.len() * TRITS_PER_TRYTE];
		for (&symbol, digits) in self
			.as_bytes()
			.iter()
			.zip(trits.chunks_exact_mut(TRITS_PER_TRYTE))
		{
			if let Some(value) = tryte_value(symbol) {
				digits.copy_from_slice(&TRYTE_TRITS[(value + 13) as usize]);
			}
		}
		trits
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		self.0.as_bytes()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl TryFrom<&[u8]> for Trytes {
	type Error = Error;

	fn try_from(bytes: &[u8]) -> Result<Self, Error> {
		validate_trytes(bytes)?;
		Ok(Self(bytes.iter().map(|&symbol| char::from(symbol)).collect()))
	}
}

impl FromStr for Trytes {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		validate_trytes(s.as_bytes())?;
		Ok(Self(s.to_owned()))
	}
}

impl AsRef<[u8]> for Trytes {
	fn as_ref(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl fmt::Display for Trytes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for Trytes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Trytes({})", self.0)
	}
}
