// Copyright 2025 Irreducible Inc.

use curlbatch_utils::env::{boolean_env_flag_set, parsed_env_var};

use crate::{Error, curl::CurlMode};

/// Settings shared by every session a batch hashing call creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
	pub mode: CurlMode,
	/// Run independent batches on the rayon thread pool.
	pub parallel: bool,
}

impl HasherConfig {
	/// Number of Curl-P rounds, `27` or `81`.
	pub const ROUNDS_ENV: &'static str = "CURLBATCH_ROUNDS";
	/// Boolean flag disabling the thread pool.
	pub const SEQUENTIAL_ENV: &'static str = "CURLBATCH_SEQUENTIAL";

	/// Defaults overridden by [`Self::ROUNDS_ENV`] and [`Self::SEQUENTIAL_ENV`].
	pub fn from_env() -> Result<Self, Error> {
		let mode = match parsed_env_var::<usize>(Self::ROUNDS_ENV) {
			None => CurlMode::default(),
			Some(Ok(rounds)) => CurlMode::try_from(rounds)?,
			Some(Err(_)) => {
				return Err(Error::InvalidEnvVar {
					name: Self::ROUNDS_ENV,
				});
			}
		};

		Ok(Self {
			mode,
			parallel: !boolean_env_flag_set(Self::SEQUENTIAL_ENV),
		})
	}

	#[must_use]
	pub fn with_mode(self, mode: CurlMode) -> Self {
		Self { mode, ..self }
	}

	#[must_use]
	pub fn with_parallel(self, parallel: bool) -> Self {
		Self { parallel, ..self }
	}
}

impl Default for HasherConfig {
	fn default() -> Self {
		Self {
			mode: CurlMode::P81,
			parallel: true,
		}
	}
}
