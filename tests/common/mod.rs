//! Shared helpers for the reqwest-backed integration tests.

#![allow(dead_code)]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
// self
use apptrack_client::{
	auth::{
		AuthSubsystem, AuthenticateCallback, AuthenticateOptions, Middleware, StrategyRegistration,
		UserHook,
	},
	client::{LogEntry, ReqwestClient},
	config::Config,
	error::Result,
	host::{HostApp, LogFn},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
};

pub const KEY: &str = "app-key";
pub const SECRET: &str = "app-secret";

/// Configuration pointing at `server` with the eager token fetch disabled.
pub fn config(server: &MockServer) -> Config {
	Config::new(KEY, SECRET).with_url(server.base_url()).with_app_auth(false)
}

/// Builds a reqwest-backed client for `config`.
pub fn build_client(config: Config, auth: Option<Arc<dyn AuthSubsystem>>) -> Result<ReqwestClient> {
	ReqwestClient::with_http_client(
		config,
		ReqwestHttpClient::default(),
		ReqwestTransportErrorMapper,
		auth,
	)
}

/// Builds a client for `server` whose token slot already holds `token`.
pub fn client_with_token(server: &MockServer, token: &str) -> ReqwestClient {
	let client = build_client(config(server), None).expect("Test client should build.");

	client.token_slot().set(token.into());

	client
}

/// Mocks a successful client-credentials response.
pub async fn mock_app_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = format!("{{\"access_token\":\"{token}\",\"token_type\":\"bearer\"}}");

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/oauth/token")
				.query_param("client_id", KEY)
				.query_param("client_secret", SECRET)
				.query_param("grant_type", "client_credentials");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

/// Polls `condition` until it holds or roughly two seconds have passed.
pub async fn eventually(condition: impl Fn() -> bool) -> bool {
	for _ in 0..100 {
		if condition() {
			return true;
		}

		tokio::time::sleep(Duration::from_millis(20)).await;
	}

	condition()
}

/// Auth subsystem that records every call it receives.
#[derive(Default)]
pub struct RecordingAuthSubsystem {
	pub calls: Mutex<Vec<&'static str>>,
	pub strategies: Mutex<Vec<StrategyRegistration>>,
	pub user_hooks: Mutex<Vec<UserHook>>,
	pub authenticated: Mutex<Vec<(String, AuthenticateOptions)>>,
}
impl AuthSubsystem for RecordingAuthSubsystem {
	fn use_strategy(&self, strategy: StrategyRegistration) {
		self.calls.lock().push("use_strategy");
		self.strategies.lock().push(strategy);
	}

	fn serialize_user(&self, hook: UserHook) {
		self.calls.lock().push("serialize_user");
		self.user_hooks.lock().push(hook);
	}

	fn deserialize_user(&self, hook: UserHook) {
		self.calls.lock().push("deserialize_user");
		self.user_hooks.lock().push(hook);
	}

	fn initialize(&self) -> Middleware {
		self.calls.lock().push("initialize");

		Middleware::new("initialize", ())
	}

	fn session(&self) -> Middleware {
		self.calls.lock().push("session");

		Middleware::new("session", ())
	}

	fn authenticate(
		&self,
		strategy: &str,
		options: AuthenticateOptions,
		callback: Option<AuthenticateCallback>,
	) -> Middleware {
		self.calls.lock().push("authenticate");
		self.authenticated.lock().push((strategy.to_owned(), options));

		Middleware::new(format!("authenticate:{strategy}"), callback.is_some())
	}
}

/// Host application that keeps whatever the client installs.
#[derive(Default)]
pub struct RecordingHostApp {
	pub middleware: Vec<Middleware>,
	pub log: Option<LogFn>,
}
impl RecordingHostApp {
	pub fn middleware_names(&self) -> Vec<&str> {
		self.middleware.iter().map(Middleware::name).collect()
	}

	pub async fn log(&self, entry: impl Into<LogEntry>) -> Result<Option<serde_json::Value>> {
		let log = self.log.as_ref().expect("Host app should have a log function installed.");

		log(entry.into()).await
	}
}
impl HostApp for RecordingHostApp {
	fn use_middleware(&mut self, middleware: Middleware) {
		self.middleware.push(middleware);
	}

	fn set_log(&mut self, log: LogFn) {
		self.log = Some(log);
	}
}
