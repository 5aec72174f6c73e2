//! Shared provider client error types
//!
//! Common error enum and response helpers used by every provider client.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Maximum response body size for provider HTTP calls (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Common error type for all provider HTTP clients.
#[derive(Debug, Error)]
pub enum ProviderClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

impl ProviderClientError {
    /// Whether the failure happened below the application layer
    /// (connection, timeout or HTTP status).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_) | Self::Http { .. })
    }
}

/// Standard `{code, message, data}` envelope returned by Bilibili-style APIs.
///
/// `data` is kept as raw JSON so the status code can be checked before the
/// payload shape is enforced; failed calls frequently carry `data: null`.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// Map a non-zero code to [`ProviderClientError::Api`], then decode `data`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ProviderClientError> {
        if self.code != 0 {
            return Err(ProviderClientError::Api {
                code: self.code,
                message: self.message,
            });
        }
        let data = self
            .data
            .ok_or_else(|| ProviderClientError::Parse("Missing data in response".to_string()))?;
        serde_json::from_value(data).map_err(Into::into)
    }
}

/// Read a response body with size limit and deserialize as JSON.
///
/// Checks `Content-Length` hint first (if available), then enforces the
/// limit on the actual body bytes before deserializing.
pub async fn json_with_limit<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderClientError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(ProviderClientError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(ProviderClientError::ResponseTooLarge { size: bytes.len() as u64 });
    }
    serde_json::from_slice(&bytes).map_err(Into::into)
}

/// Check HTTP response status before processing body.
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ProviderClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderClientError::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

impl From<reqwest::Error> for ProviderClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ProviderClientError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_http() {
        let err = ProviderClientError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://example.com/api".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404 Not Found for https://example.com/api");
    }

    #[test]
    fn test_error_display_api() {
        let err = ProviderClientError::Api {
            code: -404,
            message: "啥都木有".to_string(),
        };
        assert_eq!(err.to_string(), "API error (code -404): 啥都木有");
    }

    #[test]
    fn test_error_display_response_too_large() {
        let err = ProviderClientError::ResponseTooLarge { size: 20_000_000 };
        let msg = err.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains(&MAX_RESPONSE_SIZE.to_string()));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ProviderClientError = json_err.into();
        assert!(matches!(err, ProviderClientError::Parse(_)));
    }

    #[test]
    fn test_is_transport() {
        assert!(ProviderClientError::Timeout("slow".into()).is_transport());
        assert!(!ProviderClientError::Parse("eof".into()).is_transport());
        assert!(!ProviderClientError::Api { code: 1, message: String::new() }.is_transport());
    }

    #[test]
    fn test_envelope_nonzero_code_ignores_data_shape() {
        let env: Envelope =
            serde_json::from_str(r#"{"code":-400,"message":"请求错误","data":[]}"#).unwrap();
        let err = env.into_data::<std::collections::HashMap<String, String>>().unwrap_err();
        match err {
            ProviderClientError::Api { code, message } => {
                assert_eq!(code, -400);
                assert_eq!(message, "请求错误");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_missing_data() {
        let env: Envelope = serde_json::from_str(r#"{"code":0,"message":"0"}"#).unwrap();
        let err = env.into_data::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ProviderClientError::Parse(_)));
    }
}
