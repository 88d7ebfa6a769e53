//! Fixed RingCentral endpoints and the resolver that pins them per strategy.
//!
//! Resolution happens exactly once, at strategy construction; the resulting
//! [`ResolvedEndpoints`] value is immutable shared state for every login
//! attempt afterwards. Precedence per endpoint: `use_sandbox` first, then an
//! explicit override, then the production constant.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, config::StrategyOptions, error::ConfigError};

/// Production authorization endpoint.
pub const PRODUCTION_AUTHORIZATION_URL: &str =
	"https://platform.ringcentral.com/restapi/oauth/authorize";
/// Production token endpoint.
pub const PRODUCTION_TOKEN_URL: &str = "https://platform.ringcentral.com/restapi/oauth/token";
/// Sandbox authorization endpoint.
pub const SANDBOX_AUTHORIZATION_URL: &str =
	"https://platform.devtest.ringcentral.com/restapi/oauth/authorize";
/// Sandbox token endpoint.
pub const SANDBOX_TOKEN_URL: &str = "https://platform.devtest.ringcentral.com/restapi/oauth/token";
/// Default account resource used for profile normalization.
///
/// The default points at the sandbox host in every environment, matching the
/// deployments this strategy interoperates with. Production account data
/// requires an explicit [`account_url`](crate::config::StrategyOptionsBuilder::account_url)
/// override.
pub const DEFAULT_ACCOUNT_URL: &str =
	"https://platform.devtest.ringcentral.com/restapi/v1.0/account/~";

/// Endpoint set pinned for the lifetime of a strategy instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEndpoints {
	/// Authorization endpoint used by the Authorization Code flow.
	pub authorization_url: Url,
	/// Token endpoint used for the code exchange.
	pub token_url: Url,
	/// Account resource fetched during profile normalization.
	pub account_url: Url,
	/// Precomputed Basic credential attached to every token exchange request.
	pub auth_header: BasicAuthorization,
}
impl ResolvedEndpoints {
	/// Resolves the endpoint set for the provided options.
	///
	/// Deterministic and free of I/O. The `Result` exists only because the
	/// fixed constants pass through [`Url::parse`]; no caller-supplied
	/// configuration can make resolution fail.
	pub fn resolve(options: &StrategyOptions) -> Result<Self, ConfigError> {
		let authorization_url = select(
			"authorization",
			options.use_sandbox,
			options.authorization_url.as_ref(),
			SANDBOX_AUTHORIZATION_URL,
			PRODUCTION_AUTHORIZATION_URL,
		)?;
		let token_url = select(
			"token",
			options.use_sandbox,
			options.token_url.as_ref(),
			SANDBOX_TOKEN_URL,
			PRODUCTION_TOKEN_URL,
		)?;
		let account_url = match options.account_url.as_ref() {
			Some(url) => url.clone(),
			None => fixed("account", DEFAULT_ACCOUNT_URL)?,
		};
		let auth_header = BasicAuthorization::derive(&options.client_id, &options.client_secret);

		Ok(Self { authorization_url, token_url, account_url, auth_header })
	}
}

/// Precomputed `Authorization` header value carrying the Basic credential.
///
/// The encoded form is `"Basic " + base64(client_id + ":" + client_secret)`
/// with the raw concatenation the provider expects. `Debug` and `Display`
/// redact the credential.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthorization(String);
impl BasicAuthorization {
	/// Derives the header value from the client credentials.
	pub fn derive(client_id: &str, client_secret: &str) -> Self {
		Self(format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}"))))
	}

	/// Returns the header value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for BasicAuthorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BasicAuthorization").field(&"<redacted>").finish()
	}
}
impl Display for BasicAuthorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

// `use_sandbox` outranks an explicit override; the precedence matches the
// deployments this strategy stays compatible with.
fn select(
	endpoint: &'static str,
	use_sandbox: bool,
	override_url: Option<&Url>,
	sandbox: &'static str,
	production: &'static str,
) -> Result<Url, ConfigError> {
	if use_sandbox {
		return fixed(endpoint, sandbox);
	}

	match override_url {
		Some(url) => Ok(url.clone()),
		None => fixed(endpoint, production),
	}
}

fn fixed(endpoint: &'static str, raw: &'static str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}
