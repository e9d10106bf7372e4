//! Demonstrates fetching the application token and issuing CRUD and log calls against a mock
//! AppTrack server with the default reqwest transport.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use apptrack_client::{client::ReqwestClient, config::Config, resource::Resource};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth/token").query_param("grant_type", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"token_type\":\"bearer\"}");
		})
		.await;
	let apps_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/apps/7").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":7,\"name\":\"demo\"}");
		})
		.await;
	let log_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/log");
			then.status(200).header("content-type", "application/json").body("{\"ok\":true}");
		})
		.await;
	let client = ReqwestClient::new(
		Config::new("demo-key", "demo-secret").with_url(server.base_url()).with_app_auth(false),
	)?;
	let token = client.token().await?;

	println!("Application token: {token}.");

	let app = client.read(Resource::named("apps").with_id(7)).await?;

	println!("Fetched app: {app}.");

	let logged = client.log_action("demo.viewed", Some(json!({ "app": 7 }))).await?;

	println!("Log response: {logged:?}.");

	token_mock.assert_async().await;
	apps_mock.assert_async().await;
	log_mock.assert_async().await;

	Ok(())
}
