//! Response body parsing and error-payload detection.
//!
//! The API reports failures in-band: any JSON object carrying an `error` field is an error,
//! whether the server produced it or [`parse_response`] substituted the malformed-body sentinel.

// self
use crate::{_prelude::*, http::ResponseMetadata};

/// `error` value of the sentinel produced for unparseable bodies.
pub const MALFORMED_CODE: u16 = 500;
/// `message` value of the sentinel produced for unparseable bodies.
pub const MALFORMED_MESSAGE: &str = "API response was malformed";

/// Sentinel payload substituted for bodies that are not valid JSON.
pub fn malformed() -> Value {
	json!({ "error": MALFORMED_CODE, "message": MALFORMED_MESSAGE })
}

/// Parses a raw body as JSON, substituting [`malformed`] when parsing fails.
pub fn parse_response(raw: &str) -> Value {
	let de = &mut serde_json::Deserializer::from_str(raw);

	match serde_path_to_error::deserialize::<_, Value>(de) {
		Ok(value) => value,
		Err(e) => {
			tracing::debug!(path = %e.path(), error = %e.inner(), "body is not valid JSON");

			malformed()
		},
	}
}

/// Returns the error carried by `payload`, if it is an object with a set `error` field.
pub fn upstream_error(payload: &Value, meta: Option<&ResponseMetadata>) -> Option<Error> {
	let fields = payload.as_object()?;
	let code = match fields.get("error")? {
		Value::Null | Value::Bool(false) => return None,
		Value::String(code) if code.is_empty() => return None,
		Value::String(code) => code.clone(),
		other => other.to_string(),
	};
	let message = fields
		.get("message")
		.or_else(|| fields.get("error_description"))
		.and_then(Value::as_str)
		.map(ToOwned::to_owned)
		.unwrap_or_else(|| code.clone());

	Some(Error::Upstream {
		code,
		message,
		status: meta.and_then(|value| value.status),
		retry_after: meta.and_then(|value| value.retry_after),
	})
}

/// Converts an error payload into [`Error::Upstream`] and passes every other value through.
pub fn into_result(payload: Value, meta: Option<&ResponseMetadata>) -> Result<Value> {
	match upstream_error(&payload, meta) {
		Some(err) => Err(err),
		None => Ok(payload),
	}
}

/// Decodes a CRUD response body: JSON when possible, the raw text otherwise, `null` when empty.
pub(crate) fn decode_body(body: &[u8]) -> Value {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Value::Null;
	}

	serde_json::from_slice(body)
		.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
