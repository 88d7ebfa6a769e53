//! Strategy composition over the delegated OAuth2 client.
//!
//! The strategy owns the immutable [`ResolvedEndpoints`], the transport, and
//! the verification callback so each login attempt reads shared state without
//! locking. One login attempt is one linear pass: exchange the authorization
//! code, fetch + normalize the profile, invoke the verification callback
//! exactly once.

// self
use crate::{
	_prelude::*,
	config::StrategyOptions,
	endpoint::ResolvedEndpoints,
	error::ProfileError,
	http::StrategyHttpClient,
	oauth::BasicFacade,
	obs::{FlowKind, FlowSpan},
	profile::{PROVIDER, Profile},
	token::TokenGrant,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed error type returned by verification callbacks.
pub type VerifyError = Box<dyn StdError + Send + Sync>;
/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> = Pin<Box<dyn Future<Output = Result<Option<U>, VerifyError>> + 'a + Send>>;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestStrategy<V> = Strategy<ReqwestHttpClient, V>;

/// Verification callback deciding whether an authenticated account maps to an
/// application user.
///
/// Returning `Ok(Some(user))` completes the login; `Ok(None)` rejects the
/// credentials without raising an error; `Err` propagates to the host as
/// [`Error::Verify`](crate::error::Error::Verify). The strategy invokes the
/// callback exactly once per completed login attempt.
pub trait Verify: Send + Sync {
	/// Application user type produced on success.
	type User: Send;

	/// Maps the token grant + normalized profile to an application user.
	fn verify<'a>(&'a self, grant: &'a TokenGrant, profile: &'a Profile)
	-> VerifyFuture<'a, Self::User>;
}

/// RingCentral authentication strategy delegating to a generic OAuth2 client.
///
/// Endpoints are resolved once at construction and never re-resolved; multiple
/// login attempts may run concurrently against one instance since every field
/// is read-only afterwards.
pub struct Strategy<C, V>
where
	C: ?Sized + StrategyHttpClient,
	V: ?Sized + Verify,
{
	endpoints: ResolvedEndpoints,
	pass_req_to_callback: bool,
	facade: BasicFacade<C>,
	http_client: Arc<C>,
	verify: Arc<V>,
}
impl<C, V> Strategy<C, V>
where
	C: ?Sized + StrategyHttpClient,
	V: ?Sized + Verify,
{
	/// Creates a strategy that reuses the caller-provided transport.
	///
	/// Validates the options, resolves the endpoint set, and configures the
	/// delegated OAuth2 client; configuration problems surface here rather
	/// than on the first login attempt.
	pub fn with_http_client(
		options: &StrategyOptions,
		verify: impl Into<Arc<V>>,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		options.validate()?;

		let endpoints = ResolvedEndpoints::resolve(options)?;
		let http_client = http_client.into();
		let facade = BasicFacade::from_endpoints(
			&endpoints,
			&options.client_id,
			options.callback_url.as_ref(),
			http_client.clone(),
		);

		Ok(Self {
			endpoints,
			pass_req_to_callback: options.pass_req_to_callback,
			facade,
			http_client,
			verify: verify.into(),
		})
	}

	/// Strategy name used for host middleware registration.
	pub const fn name(&self) -> &'static str {
		PROVIDER
	}

	/// Endpoint set pinned at construction time.
	pub fn endpoints(&self) -> &ResolvedEndpoints {
		&self.endpoints
	}

	/// Pass-through flag consumed by the host middleware.
	pub const fn pass_req_to_callback(&self) -> bool {
		self.pass_req_to_callback
	}

	/// Exchanges an authorization code for tokens via the delegated client.
	///
	/// The transport attaches the resolved Basic credential to the request;
	/// the access token is never appended to resource URLs afterwards.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
		let span = FlowSpan::new(FlowKind::Exchange, "exchange_code");

		span.instrument(self.facade.exchange_authorization_code(code)).await
	}

	/// Fetches and normalizes the current account profile.
	///
	/// Single attempt: transport failures and non-2xx statuses map to
	/// [`ProfileError::FetchFailed`] without the body ever being parsed;
	/// non-JSON bodies map to
	/// [`ProfileError::InvalidResponse`](crate::error::ProfileError::InvalidResponse).
	pub async fn user_profile(&self, access_token: &str) -> Result<Profile> {
		let span = FlowSpan::new(FlowKind::Profile, "user_profile");

		span.instrument(async move {
			let body = self
				.http_client
				.fetch_account(&self.endpoints.account_url, access_token)
				.await
				.map_err(ProfileError::fetch_failed)?;

			Ok(Profile::from_body(&body)?)
		})
		.await
	}

	/// Runs a full login attempt for a received authorization code.
	///
	/// Exchange, profile fetch, then exactly one verification callback
	/// invocation. `Ok(None)` means the callback rejected the credentials.
	pub async fn authenticate(&self, code: &str) -> Result<Option<V::User>> {
		let span = FlowSpan::new(FlowKind::Authenticate, "authenticate");

		span.instrument(async move {
			let grant = self.exchange_code(code).await?;
			let profile = self.user_profile(grant.access_token.expose()).await?;

			self.verify
				.verify(&grant, &profile)
				.await
				.map_err(|source| Error::Verify { source })
		})
		.await
	}
}
#[cfg(feature = "reqwest")]
impl<V> Strategy<ReqwestHttpClient, V>
where
	V: ?Sized + Verify,
{
	/// Creates a strategy backed by the crate's default reqwest transport.
	pub fn new(options: &StrategyOptions, verify: impl Into<Arc<V>>) -> Result<Self> {
		Self::with_http_client(options, verify, ReqwestHttpClient::default())
	}
}
impl<C, V> Debug for Strategy<C, V>
where
	C: ?Sized + StrategyHttpClient,
	V: ?Sized + Verify,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy")
			.field("name", &self.name())
			.field("endpoints", &self.endpoints)
			.field("pass_req_to_callback", &self.pass_req_to_callback)
			.finish()
	}
}
