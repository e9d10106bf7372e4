//! Client-level error types shared across token, CRUD, and registration paths.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The request descriptor or bearer token could not be resolved.
	#[error("not a valid query")]
	InvalidQuery,
	/// The token endpoint answered a password grant with an empty body.
	#[error("no_valid_creds")]
	NoValidCredentials,
	/// The API returned (or the parser produced) a payload carrying an `error` field.
	#[error("API returned an error ({code}): {message}.")]
	Upstream {
		/// Raw `error` field rendered as a string (numeric codes or OAuth error identifiers).
		code: String,
		/// Human-readable message (`message`, then `error_description`, then `code`).
		message: String,
		/// HTTP status of the response, when one was received.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Token endpoint response could not be decoded (for example, `access_token` is absent).
	#[error("Token endpoint response is invalid at `{}`.", .source.path())]
	TokenResponse {
		/// Structured decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	const INVALID_QUERY_CODE: u16 = 400;

	/// Numeric code associated with the error, when one exists.
	///
	/// Local validation failures report `400`; upstream payloads report their numeric `error`
	/// field (the malformed-response sentinel reports `500`).
	pub fn code(&self) -> Option<u16> {
		match self {
			Self::InvalidQuery => Some(Self::INVALID_QUERY_CODE),
			Self::Upstream { code, .. } => code.parse().ok(),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configuration document could not be parsed.
	#[error("Configuration document is invalid at `{}`.", .source.path())]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Body(#[from] serde_json::Error),

	/// Client key was absent or blank.
	#[error("Client key is required.")]
	MissingKey,
	/// Client secret was absent or blank.
	#[error("Client secret is required.")]
	MissingSecret,
	/// User authentication is enabled but no auth subsystem was supplied.
	#[error("User authentication is enabled but no auth subsystem was supplied.")]
	MissingAuthSubsystem,
	/// An auth-subsystem operation was requested while user authentication is disabled.
	#[error("User authentication is disabled for this client.")]
	UserAuthDisabled,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete in time.
	#[error("Request timed out while calling the API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Transport failed for a reason it could only describe as text.
	#[error("HTTP client error occurred while calling the API: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn invalid_query_reports_code_400() {
		let err = Error::InvalidQuery;

		assert_eq!(err.code(), Some(400));
		assert_eq!(err.to_string(), "not a valid query");
	}

	#[test]
	fn upstream_code_parses_numeric_values_only() {
		let numeric = Error::Upstream {
			code: "500".into(),
			message: "API response was malformed".into(),
			status: None,
			retry_after: None,
		};
		let textual = Error::Upstream {
			code: "invalid_grant".into(),
			message: "bad password".into(),
			status: Some(400),
			retry_after: None,
		};

		assert_eq!(numeric.code(), Some(500));
		assert_eq!(textual.code(), None);
		assert!(textual.to_string().contains("bad password"));
	}

	#[test]
	fn config_error_converts_into_client_error_with_source() {
		let err: Error = ConfigError::InvalidUrl { source: url::ParseError::EmptyHost }.into();

		assert!(matches!(err, Error::Config(ConfigError::InvalidUrl { .. })));
		assert!(StdError::source(&err).is_some());
	}
}
