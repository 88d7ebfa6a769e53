//! RingCentral OAuth 2.0 strategy for Rust: production/sandbox endpoint
//! resolution, signed authorization-code exchanges, and normalized account
//! profiles for any auth middleware.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod profile;
pub mod strategy;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::StrategyOptions,
		http::ReqwestHttpClient,
		strategy::{Strategy, Verify},
	};

	/// Strategy type alias used by reqwest-backed integration tests.
	pub type ReqwestTestStrategy<V> = Strategy<ReqwestHttpClient, V>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates
	/// produced by `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Strategy`] backed by the insecure reqwest transport used
	/// across integration tests.
	pub fn build_reqwest_test_strategy<V>(
		options: &StrategyOptions,
		verify: V,
	) -> ReqwestTestStrategy<V>
	where
		V: Verify,
	{
		Strategy::with_http_client(options, verify, test_reqwest_http_client())
			.expect("Failed to build test strategy.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
