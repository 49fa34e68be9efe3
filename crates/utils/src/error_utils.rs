// Copyright 2024-2025 Irreducible Inc.

//! Early-return helpers shared by the trinary and hash crates.
//!
//! With the `bail_panic` feature enabled every `bail!` panics instead of returning, which makes
//! it easy to get a backtrace at the exact point where a guard failed.

#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
