//! HTTP API Client
//!
//! Functions for communicating with the fraud-detection REST API.

use gloo_net::http::{Request, Response};
use thiserror::Error;

use crate::state::dashboard::{Stats, Transaction};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8001";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("sentinel_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Errors from the fraud-detection API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the credential token
    #[error("credentials rejected")]
    Unauthorized,

    /// Any other non-success response, with the server's own message
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never reached the API
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(String),
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, serde::Deserialize)]
struct TransactionPage {
    transactions: Vec<Transaction>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorDetail {
    detail: String,
}

// ============ API Functions ============

/// Exchange credentials for a token
pub async fn login(username: &str, password: &str) -> Result<String, ApiError> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/token", api_base))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(login_body(username, password))
        .map_err(|e| ApiError::Network(format!("request build error: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(rejection(response).await);
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(token.access_token)
}

/// Fetch aggregate statistics
pub async fn fetch_stats(token: &str) -> Result<Stats, ApiError> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/stats", api_base))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.status() == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !response.ok() {
        return Err(rejection(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Fetch the newest page of scored transactions
pub async fn fetch_transactions(token: &str, limit: usize) -> Result<Vec<Transaction>, ApiError> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/transactions?limit={}", api_base, limit))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.status() == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !response.ok() {
        return Err(rejection(response).await);
    }

    let page: TransactionPage = response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(page.transactions)
}

/// Turn a non-success response into an error, preferring the server's
/// own `detail` message over a canned one
async fn rejection(response: Response) -> ApiError {
    let status = response.status();
    let message = response
        .json::<ErrorDetail>()
        .await
        .map(|e| e.detail)
        .unwrap_or_else(|_| format!("request failed with status {}", status));

    ApiError::Rejected { status, message }
}

/// Form-encode the login credentials
fn login_body(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_body_encoding() {
        assert_eq!(
            login_body("admin", "secret"),
            "username=admin&password=secret"
        );
    }

    #[test]
    fn test_login_body_escapes_reserved_characters() {
        assert_eq!(
            login_body("a&b", "p@ss=1"),
            "username=a%26b&password=p%40ss%3D1"
        );
    }

    #[test]
    fn test_token_response_parses() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc123", "token_type": "bearer"}"#).unwrap();
        assert_eq!(token.access_token, "abc123");
    }

    #[test]
    fn test_error_detail_parses() {
        let err: ErrorDetail =
            serde_json::from_str(r#"{"detail": "Incorrect username or password"}"#).unwrap();
        assert_eq!(err.detail, "Incorrect username or password");
    }

    #[test]
    fn test_error_display_uses_server_message() {
        let e = ApiError::Rejected {
            status: 422,
            message: "validation failed".to_string(),
        };
        assert_eq!(e.to_string(), "validation failed");
        assert_eq!(ApiError::Unauthorized.to_string(), "credentials rejected");
    }
}
