// Copyright 2023-2025 Irreducible Inc.

/// Install a global subscriber that prints spans and events to stderr.
///
/// The verbosity is taken from `RUST_LOG` and defaults to `info`. Calling this more than once is
/// harmless, later calls are ignored.
pub fn init_tracing() {
	use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
