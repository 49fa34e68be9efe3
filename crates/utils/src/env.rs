// Copyright 2024-2025 Irreducible Inc.

use std::str::FromStr;

/// Read boolean flag from the environment variable.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => ["1", "on", "ON", "true", "TRUE", "yes", "YES"].contains(&val.as_str()),
		Err(_) => false,
	}
}

/// Read and parse a value from the environment variable.
///
/// Returns `None` if the variable is unset, `Some(Err(_))` if it is set but does not parse.
pub fn parsed_env_var<T: FromStr>(name: &str) -> Option<Result<T, T::Err>> {
	std::env::var(name).ok().map(|val| val.trim().parse())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unset_flag_is_false() {
		assert!(!boolean_env_flag_set("CURLBATCH_UTILS_TEST_UNSET_FLAG"));
		assert!(parsed_env_var::<usize>("CURLBATCH_UTILS_TEST_UNSET_VAR").is_none());
	}
}
