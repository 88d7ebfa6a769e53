//! Strategy options and their validating builder.
//!
//! Options mirror what a host middleware hands the strategy at registration
//! time: application credentials, the redirect target, and the optional
//! endpoint overrides. Required fields are validated when the options are
//! built and again when a strategy is constructed, so misconfiguration
//! surfaces immediately instead of on the first login attempt.

// self
use crate::{_prelude::*, error::ConfigError};

/// Immutable strategy options consumed at construction time.
///
/// The struct deserializes from host configuration files; values produced that
/// way are still validated by [`Strategy`](crate::strategy::Strategy)
/// constructors before any endpoint resolution happens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOptions {
	/// OAuth 2.0 client identifier issued by the provider.
	pub client_id: String,
	/// OAuth 2.0 client secret paired with the identifier.
	pub client_secret: String,
	/// Redirect URI the provider sends the user back to after granting access.
	#[serde(default)]
	pub callback_url: Option<Url>,
	/// Override for the authorization endpoint.
	#[serde(default)]
	pub authorization_url: Option<Url>,
	/// Override for the token endpoint.
	#[serde(default)]
	pub token_url: Option<Url>,
	/// Override for the account resource fetched during profile normalization.
	#[serde(default)]
	pub account_url: Option<Url>,
	/// Selects the sandbox endpoint set; outranks explicit endpoint overrides.
	#[serde(default)]
	pub use_sandbox: bool,
	/// Pass-through flag consumed by the host middleware, not by this crate.
	#[serde(default)]
	pub pass_req_to_callback: bool,
}
impl StrategyOptions {
	/// Creates a new builder seeded with the required credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> StrategyOptionsBuilder {
		StrategyOptionsBuilder::new(client_id, client_secret)
	}

	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.trim().is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		Ok(())
	}
}
impl Debug for StrategyOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyOptions")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("callback_url", &self.callback_url)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("account_url", &self.account_url)
			.field("use_sandbox", &self.use_sandbox)
			.field("pass_req_to_callback", &self.pass_req_to_callback)
			.finish()
	}
}

/// Builder for [`StrategyOptions`] values.
pub struct StrategyOptionsBuilder {
	/// OAuth 2.0 client identifier for the options being constructed.
	pub client_id: String,
	/// OAuth 2.0 client secret for the options being constructed.
	pub client_secret: String,
	/// Optional redirect URI.
	pub callback_url: Option<Url>,
	/// Optional authorization endpoint override.
	pub authorization_url: Option<Url>,
	/// Optional token endpoint override.
	pub token_url: Option<Url>,
	/// Optional account resource override.
	pub account_url: Option<Url>,
	/// Sandbox endpoint selection flag.
	pub use_sandbox: bool,
	/// Host middleware pass-through flag.
	pub pass_req_to_callback: bool,
}
impl StrategyOptionsBuilder {
	/// Creates a new builder seeded with the provided credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			callback_url: None,
			authorization_url: None,
			token_url: None,
			account_url: None,
			use_sandbox: false,
			pass_req_to_callback: false,
		}
	}

	/// Sets the redirect URI the provider returns the user to.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the account resource used for profile fetches.
	///
	/// Without an override the strategy uses the fixed default, which points at
	/// the sandbox host in every environment; production deployments that want
	/// production account data must set this explicitly.
	pub fn account_url(mut self, url: Url) -> Self {
		self.account_url = Some(url);

		self
	}

	/// Selects the sandbox endpoint set. Outranks explicit endpoint overrides.
	pub fn use_sandbox(mut self, use_sandbox: bool) -> Self {
		self.use_sandbox = use_sandbox;

		self
	}

	/// Overrides the host middleware pass-through flag (defaults to `false`).
	pub fn pass_req_to_callback(mut self, pass_req_to_callback: bool) -> Self {
		self.pass_req_to_callback = pass_req_to_callback;

		self
	}

	/// Consumes the builder and validates the resulting options.
	pub fn build(self) -> Result<StrategyOptions, ConfigError> {
		let options = StrategyOptions {
			client_id: self.client_id,
			client_secret: self.client_secret,
			callback_url: self.callback_url,
			authorization_url: self.authorization_url,
			token_url: self.token_url,
			account_url: self.account_url,
			use_sandbox: self.use_sandbox,
			pass_req_to_callback: self.pass_req_to_callback,
		};

		options.validate()?;

		Ok(options)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_rejects_blank_credentials() {
		let err = StrategyOptions::builder("", "secret")
			.build()
			.expect_err("Blank client identifier must be rejected.");

		assert!(matches!(err, ConfigError::MissingClientId));

		let err = StrategyOptions::builder("ABC123", "   ")
			.build()
			.expect_err("Blank client secret must be rejected.");

		assert!(matches!(err, ConfigError::MissingClientSecret));
	}

	#[test]
	fn pass_req_to_callback_defaults_to_false() {
		let options = StrategyOptions::builder("ABC123", "secret")
			.build()
			.expect("Options with credentials should build successfully.");

		assert!(!options.pass_req_to_callback);
		assert!(!options.use_sandbox);

		let options = StrategyOptions::builder("ABC123", "secret")
			.pass_req_to_callback(true)
			.build()
			.expect("Options with credentials should build successfully.");

		assert!(options.pass_req_to_callback);
	}

	#[test]
	fn debug_redacts_client_secret() {
		let options = StrategyOptions::builder("ABC123", "shhh-its-a-secret")
			.build()
			.expect("Options with credentials should build successfully.");
		let rendered = format!("{options:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("shhh-its-a-secret"));
	}

	#[test]
	fn options_deserialize_with_defaults() {
		let options: StrategyOptions =
			serde_json::from_str("{\"client_id\":\"ABC123\",\"client_secret\":\"secret\"}")
				.expect("Minimal options payload should deserialize.");

		assert_eq!(options.client_id, "ABC123");
		assert!(options.callback_url.is_none());
		assert!(!options.use_sandbox);
		assert!(!options.pass_req_to_callback);
	}
}
