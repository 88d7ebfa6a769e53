//! Strategy-level error types shared across configuration, exchange, and profile code.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token exchange failure reported by the delegated OAuth2 client.
	#[error(transparent)]
	Exchange(#[from] ExchangeError),
	/// Profile fetch or normalization failure.
	#[error(transparent)]
	Profile(#[from] ProfileError),

	/// Verification callback failure raised by application code.
	#[error("Verification callback failed.")]
	Verify {
		/// Application-supplied failure.
		#[source]
		source: BoxError,
	},
}

/// Configuration and validation failures surfaced at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier is missing or blank.
	#[error("Client identifier must not be empty.")]
	MissingClientId,
	/// Client secret is missing or blank.
	#[error("Client secret must not be empty.")]
	MissingClientSecret,
	/// An endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client handle could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Token exchange failures mapped from the delegated OAuth2 client.
#[derive(Debug, ThisError)]
pub enum ExchangeError {
	/// Provider rejected the authorization code exchange.
	#[error("Token endpoint rejected the exchange: {reason}.")]
	Rejected {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Transport failure (DNS, TCP, TLS) during the exchange.
	#[error("Network error occurred while calling the token endpoint.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
	/// Token endpoint returned an otherwise unexpected response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	Unexpected {
		/// Message summarizing the failure.
		message: String,
	},
}
impl ExchangeError {
	/// Wraps a transport failure inside [`ExchangeError::Transport`].
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}

/// Profile fetch and normalization failures.
///
/// Both variants are terminal for the login attempt; the strategy never retries
/// and never hands back a partial profile.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Account resource call failed (network error or non-2xx status).
	#[error("Failed to fetch the account profile.")]
	FetchFailed {
		/// Underlying transport failure.
		#[source]
		source: BoxError,
	},
	/// Account resource body is not valid JSON.
	#[error("Account profile response is not valid JSON.")]
	InvalidResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}
impl ProfileError {
	/// Wraps a transport failure inside [`ProfileError::FetchFailed`].
	pub fn fetch_failed(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::FetchFailed { source: Box::new(src) }
	}
}
