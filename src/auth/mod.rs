//! Authentication against the user API
//!
//! Sessions are cookie based and live only as long as the `AuthClient`.

mod forms;

pub use forms::{LoginForm, MIN_PASSWORD_LEN, SignupForm};

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

/// Auth failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The form failed local validation; nothing was sent
    #[error("{0}")]
    Invalid(String),
    /// The server refused the request
    #[error("{0}")]
    Rejected(String),
    /// Transport failure
    #[error("network error: {0}")]
    Network(String),
}

/// Body the auth API sends with success or failure
#[derive(Debug, Default, Deserialize)]
struct AuthReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for `/users/login`, `/users/signup` and `/users/logout`
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client with its own cookie jar
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/users/{endpoint}", self.base_url)
    }

    /// Log in; returns the server's success message
    pub async fn login(&self, form: &LoginForm) -> Result<String, AuthError> {
        form.validate()?;
        tracing::debug!(email = %form.email, "Logging in");

        let response = self
            .client
            .post(self.api_url("login"))
            .json(form)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Self::read_reply(response, "Login success").await
    }

    /// Create an account; returns the server's success message
    pub async fn signup(&self, form: &SignupForm) -> Result<String, AuthError> {
        form.validate()?;
        tracing::debug!(username = %form.username, "Signing up");

        let response = self
            .client
            .post(self.api_url("signup"))
            .json(form)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Self::read_reply(response, "Successfully signed up").await
    }

    /// End the current session
    pub async fn logout(&self) -> Result<String, AuthError> {
        let response = self
            .client
            .get(self.api_url("logout"))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Self::read_reply(response, "Logout successful").await
    }

    async fn read_reply(response: Response, success: &str) -> Result<String, AuthError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let reply: AuthReply = serde_json::from_str(&body).unwrap_or_default();

        if status.is_success() {
            return Ok(reply.message.unwrap_or_else(|| success.to_string()));
        }

        let message = reply
            .error
            .or(reply.message)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        tracing::warn!(%status, "Auth request rejected: {message}");
        Err(AuthError::Rejected(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_email_fails_before_any_request() {
        // Nothing listens here; a network attempt would surface as AuthError::Network
        let client = AuthClient::new("http://127.0.0.1:9/api", Duration::from_secs(2));
        let form = LoginForm {
            email: "not-an-email".into(),
            password: "long-enough".into(),
        };

        let err = client.login(&form).await.unwrap_err();
        assert_eq!(err, AuthError::Invalid("Invalid email".into()));
    }

    #[tokio::test]
    async fn test_valid_form_reaches_network() {
        let client = AuthClient::new("http://127.0.0.1:9/api", Duration::from_secs(2));
        let form = LoginForm {
            email: "kunti@example.com".into(),
            password: "long-enough".into(),
        };

        let err = client.login(&form).await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
    }

    #[test]
    fn test_api_url() {
        let client = AuthClient::new("http://localhost:3000/api/", Duration::from_secs(1));
        assert_eq!(client.api_url("login"), "http://localhost:3000/api/users/login");
    }
}
