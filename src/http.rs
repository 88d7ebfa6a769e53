//! Transport primitives for token exchanges and account resource fetches.
//!
//! The module exposes [`StrategyHttpClient`] so downstream crates can plug in
//! custom HTTP stacks without the strategy depending on any particular client.
//! Implementations produce short-lived [`AsyncHttpClient`] handles for the
//! delegated OAuth2 client and perform the bearer-authenticated account GET
//! used by profile normalization.

// std
use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::header::{AUTHORIZATION, HeaderValue};
// self
use crate::{_prelude::*, error::ConfigError};

/// Boxed future returned by transport operations.
pub type TransportFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing token exchanges and
/// account resource fetches.
///
/// The trait is the strategy's only dependency on an HTTP stack. Callers
/// provide an implementation (typically behind `Arc<T>`) and the strategy
/// requests short-lived [`AsyncHttpClient`] handles for each exchange.
/// Implementations must be `Send + Sync + 'static` so one strategy instance
/// can serve concurrent login attempts, and the futures they return must be
/// `Send` for the lifetime of the in-flight operation.
pub trait StrategyHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle carrying the resolved Basic credential.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds the handle handed to the delegated OAuth2 client for token
	/// exchanges.
	///
	/// # Header Contract
	///
	/// - Attach `authorization` verbatim as the `Authorization` header on every
	///   dispatched request, replacing whatever the delegated client set.
	/// - Never place credentials in the URL query string.
	fn with_authorization(&self, authorization: &str) -> Result<Self::Handle, ConfigError>;

	/// Fetches the account resource with `Authorization: Bearer <access_token>`.
	///
	/// The access token travels in the header only, never as a query
	/// parameter. Non-2xx statuses are failures; the strategy performs exactly
	/// one attempt per login and maps the error without retrying.
	fn fetch_account<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a str,
	) -> TransportFuture<'a, String, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Token requests should not follow redirects, matching OAuth 2.0
/// guidance that token endpoints return results directly; configure any custom
/// [`ReqwestClient`] accordingly before wrapping it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[cfg(feature = "reqwest")]
/// Adapter that implements [`AsyncHttpClient`] for reqwest while forcing the
/// resolved Basic credential onto every dispatched request.
pub(crate) struct AuthorizedHttpClient {
	client: ReqwestClient,
	authorization: HeaderValue,
}

#[cfg(feature = "reqwest")]
/// Public handle returned by [`ReqwestHttpClient`] that satisfies
/// [`StrategyHttpClient`].
#[derive(Clone)]
pub struct AuthorizedHandle(Arc<AuthorizedHttpClient>);
#[cfg(feature = "reqwest")]
impl AuthorizedHandle {
	fn new(client: ReqwestClient, authorization: HeaderValue) -> Self {
		Self(Arc::new(AuthorizedHttpClient { client, authorization }))
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for AuthorizedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, mut request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			request.headers_mut().insert(AUTHORIZATION, client.authorization.clone());

			let response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
#[cfg(feature = "reqwest")]
impl StrategyHttpClient for ReqwestHttpClient {
	type Handle = AuthorizedHandle;
	type TransportError = ReqwestError;

	fn with_authorization(&self, authorization: &str) -> Result<Self::Handle, ConfigError> {
		let authorization =
			HeaderValue::from_str(authorization).map_err(ConfigError::http_client_build)?;

		Ok(AuthorizedHandle::new(self.0.clone(), authorization))
	}

	fn fetch_account<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a str,
	) -> TransportFuture<'a, String, Self::TransportError> {
		Box::pin(async move {
			let response =
				self.0.get(url.clone()).bearer_auth(access_token).send().await?.error_for_status()?;

			response.text().await
		})
	}
}
