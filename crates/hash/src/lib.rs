// Copyright 2023-2025 Irreducible Inc.

//! Batched Curl hashing of fixed-shape ternary records.
//!
//! Up to [`MAX_LANES`](curlbatch_trinary::MAX_LANES) records share one bit-sliced sponge. A
//! [`SpongeState`] owns the shared block buffer and tracks what it currently holds; the functions
//! in [`batch`] drive it from tryte input to tryte hashes.

pub mod batch;
pub mod bundle;
pub mod config;
pub mod curl;
pub mod cycle;
mod error;
pub mod permutation;
pub mod session;

pub use batch::*;
pub use bundle::{BundleValidator, HashedTransaction, Verdict};
pub use config::HasherConfig;
pub use curl::{Curl, CurlMode, CurlP};
pub use cycle::TritCycle;
pub use error::*;
pub use permutation::*;
pub use session::{Phase, SpongeState};
