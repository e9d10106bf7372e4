mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use apptrack_client::{
	client::Crud,
	config::Config,
	error::{Error, TransportError},
	resource::{ApiRequest, Resource},
};
use common::*;

#[tokio::test]
async fn create_uses_app_token_after_fetch() {
	let server = MockServer::start_async().await;
	let token_mock = mock_app_token(&server, "app-token").await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/apps")
				.header("authorization", "Bearer app-token")
				.header("content-type", "application/json")
				.json_body(json!({ "name": "demo" }));
			then.status(201).header("content-type", "application/json").body("{\"id\":1}");
		})
		.await;
	let client = build_client(config(&server), None).expect("Client should build.");

	client.token().await.expect("Token fetch should succeed.");

	let created = client
		.create(ApiRequest::path("/apps").with_data(json!({ "name": "demo" })))
		.await
		.expect("Create should succeed once a token exists.");

	assert_eq!(created, json!({ "id": 1 }));

	token_mock.assert_async().await;
	create_mock.assert_async().await;
}

#[tokio::test]
async fn create_defaults_body_to_empty_object() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/events").json_body(json!({}));
			then.status(200).header("content-type", "application/json").body("{\"ok\":true}");
		})
		.await;
	let client = client_with_token(&server, "t");
	let created = client.create("events").await.expect("Create without data should succeed.");

	assert_eq!(created, json!({ "ok": true }));

	mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.path_includes("/api/");
			then.status(200);
		})
		.await;
	let client = build_client(config(&server), None).expect("Client should build.");
	let err = client.read("apps").await.expect_err("Read without a token should fail.");

	assert!(matches!(err, Error::InvalidQuery));
	assert_eq!(err.code(), Some(400));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn request_token_overrides_app_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/apps/7/stats")
				.header("authorization", "Bearer user-token")
				.header("accept", "application/json");
			then.status(200).header("content-type", "application/json").body("[1,2,3]");
		})
		.await;
	let client = client_with_token(&server, "app-token");
	let stats = client
		.read(
			ApiRequest::resource(Resource::named("apps").with_id(7).with_kind("stats"))
				.with_token("user-token"),
		)
		.await
		.expect("Read with an explicit token should succeed.");

	assert_eq!(stats, json!([1, 2, 3]));

	mock.assert_async().await;
}

#[tokio::test]
async fn update_and_destroy_use_put_and_delete() {
	let server = MockServer::start_async().await;
	let update_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/apps/7").json_body(json!({ "name": "renamed" }));
			then.status(200).header("content-type", "application/json").body("{\"id\":7}");
		})
		.await;
	let destroy_mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/apps/7").header("authorization", "Bearer t");
			then.status(204);
		})
		.await;
	let client = client_with_token(&server, "t");
	let app = Resource::named("apps").with_id(7);
	let updated = client
		.update(ApiRequest::resource(app.clone()).with_data(json!({ "name": "renamed" })))
		.await
		.expect("Update should succeed.");
	let destroyed = client.destroy(app.clone()).await.expect("Destroy should succeed.");
	let deleted = client.del(app).await.expect("Del should behave like destroy.");

	assert_eq!(updated, json!({ "id": 7 }));
	assert_eq!(destroyed, Value::Null);
	assert_eq!(deleted, Value::Null);

	update_mock.assert_async().await;
	destroy_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn error_payloads_and_text_bodies_are_returned_as_values() {
	let server = MockServer::start_async().await;
	let _missing = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/missing");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"error\":404,\"message\":\"not found\"}");
		})
		.await;
	let _text = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/health");
			then.status(200).body("ok");
		})
		.await;
	let client = client_with_token(&server, "t");
	let missing = client.read("/missing").await.expect("Error payloads should not fail reads.");
	let health = client.read("/health").await.expect("Text bodies should not fail reads.");

	assert_eq!(missing, json!({ "error": 404, "message": "not found" }));
	assert!(apptrack_client::response::upstream_error(&missing, None).is_some());
	assert_eq!(health, json!("ok"));
}

#[tokio::test]
async fn transport_errors_are_surfaced() {
	let client = build_client(
		Config::new(KEY, SECRET).with_url("http://127.0.0.1:9").with_app_auth(false),
		None,
	)
	.expect("Client should build.");
	let err = client
		.read(ApiRequest::path("apps").with_token("t"))
		.await
		.expect_err("Unreachable server should fail the read.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::Network { .. } | TransportError::Timeout { .. })
	));
}

#[tokio::test]
async fn crud_trait_objects_dispatch_to_the_client() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/apps");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let client = client_with_token(&server, "t");
	let crud: &dyn Crud = &client;
	let apps = crud.read(ApiRequest::path("apps")).await.expect("Trait read should succeed.");

	assert_eq!(apps, json!([]));

	mock.assert_async().await;
}
