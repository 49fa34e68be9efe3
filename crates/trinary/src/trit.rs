// Copyright 2025 Irreducible Inc.

use std::{fmt, ops::Neg};

use crate::Error;

/// A balanced ternary digit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum Trit {
	MinusOne = -1,
	#[default]
	Zero = 0,
	One = 1,
}

impl Trit {
	pub const ALL: [Self; 3] = [Self::MinusOne, Self::Zero, Self::One];

	#[inline]
	pub const fn value(self) -> i8 {
		self as i8
	}

	/// Returns `None` for values outside `-1..=1`.
	#[inline]
	pub const fn from_value(value: i8) -> Option<Self> {
		match value {
			-1 => Some(Self::MinusOne),
			0 => Some(Self::Zero),
			1 => Some(Self::One),
			_ => None,
		}
	}
}

impl Neg for Trit {
	type Output = Self;

	#[inline]
	fn neg(self) -> Self {
		match self {
			Self::MinusOne => Self::One,
			Self::Zero => Self::Zero,
			Self::One => Self::MinusOne,
		}
	}
}

impl TryFrom<i8> for Trit {
	type Error = Error;

	fn try_from(value: i8) -> Result<Self, Error> {
		Self::from_value(value).ok_or(Error::InvalidTrit(value))
	}
}

impl From<Trit> for i8 {
	#[inline]
	fn from(trit: Trit) -> Self {
		trit.value()
	}
}

impl fmt::Display for Trit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.value())
	}
}

/// Convert a slice of raw `i8` digits into trits, failing on the first value outside `-1..=1`.
pub fn trits_from_values(values: &[i8]) -> Result<Vec<Trit>, Error> {
	values.iter().map(|&value| Trit::try_from(value)).collect()
}
