#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use ringcentral_oauth2::{
	_preludet::test_reqwest_http_client,
	config::StrategyOptions,
	error::{Error, ProfileError},
	http::ReqwestHttpClient,
	profile::Profile,
	strategy::{Strategy, Verify, VerifyFuture},
	token::TokenGrant,
	url::Url,
};

const ACCOUNT_PATH: &str = "/restapi/v1.0/account/~";

struct NoopVerify;
impl Verify for NoopVerify {
	type User = ();

	fn verify<'a>(
		&'a self,
		_grant: &'a TokenGrant,
		_profile: &'a Profile,
	) -> VerifyFuture<'a, Self::User> {
		Box::pin(async move { Ok(Some(())) })
	}
}

fn build_strategy(account_url: Url) -> Strategy<ReqwestHttpClient, NoopVerify> {
	let options = StrategyOptions::builder("ABC123", "secret")
		.account_url(account_url)
		.build()
		.expect("Options with credentials should build successfully.");

	Strategy::with_http_client(&options, NoopVerify, test_reqwest_http_client())
		.expect("Strategy should build for valid options.")
}

fn account_url(server: &MockServer) -> Url {
	Url::parse(&server.url(ACCOUNT_PATH)).expect("Mock account URL should parse successfully.")
}

#[tokio::test]
async fn fetches_and_normalizes_the_account_profile() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(ACCOUNT_PATH)
				.header("authorization", "Bearer access-token-123");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"200123\",\"mainNumber\":\"+15551234567\",\"status\":\"Confirmed\"}");
		})
		.await;
	let strategy = build_strategy(account_url(&server));
	let profile = strategy
		.user_profile("access-token-123")
		.await
		.expect("Profile fetch should succeed for a valid payload.");

	mock.assert_async().await;

	assert_eq!(profile.provider, "ringcentral");
	assert_eq!(profile.id.as_deref(), Some("200123"));
	assert_eq!(profile.main_number.as_deref(), Some("+15551234567"));
	assert_eq!(profile.raw["status"], "Confirmed");
}

#[tokio::test]
async fn missing_main_number_stays_absent() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNT_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"200123\"}");
		})
		.await;
	let strategy = build_strategy(account_url(&server));
	let profile = strategy
		.user_profile("access-token-123")
		.await
		.expect("Profile fetch should succeed without mainNumber.");

	mock.assert_async().await;

	assert_eq!(profile.id.as_deref(), Some("200123"));
	assert!(profile.main_number.is_none());
}

#[tokio::test]
async fn numeric_account_id_renders_to_string() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNT_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":400123456,\"mainNumber\":\"+15551234567\"}");
		})
		.await;
	let strategy = build_strategy(account_url(&server));
	let profile = strategy
		.user_profile("access-token-123")
		.await
		.expect("Profile fetch should succeed with a numeric id.");

	mock.assert_async().await;

	assert_eq!(profile.id.as_deref(), Some("400123456"));
}

#[tokio::test]
async fn non_json_bodies_map_to_invalid_response() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNT_PATH);
			then.status(200).header("content-type", "text/html").body("<html>error</html>");
		})
		.await;
	let strategy = build_strategy(account_url(&server));
	let err = strategy
		.user_profile("access-token-123")
		.await
		.expect_err("Non-JSON body must fail profile normalization.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Profile(ProfileError::InvalidResponse { .. })));
}

#[tokio::test]
async fn error_statuses_map_to_fetch_failed_after_one_attempt() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(ACCOUNT_PATH);
			then.status(500).body("upstream unavailable");
		})
		.await;
	let strategy = build_strategy(account_url(&server));
	let err = strategy
		.user_profile("access-token-123")
		.await
		.expect_err("Non-2xx status must fail the profile fetch.");

	assert!(matches!(err, Error::Profile(ProfileError::FetchFailed { .. })));
	assert_eq!(mock.hits_async().await, 1, "Profile fetch must not retry.");
}

#[tokio::test]
async fn connection_failures_map_to_fetch_failed() {
	let unreachable = Url::parse("http://127.0.0.1:1/restapi/v1.0/account/~")
		.expect("Unreachable URL should parse successfully.");
	let strategy = build_strategy(unreachable);
	let err = strategy
		.user_profile("access-token-123")
		.await
		.expect_err("Connection failure must fail the profile fetch.");

	assert!(matches!(err, Error::Profile(ProfileError::FetchFailed { .. })));
}
