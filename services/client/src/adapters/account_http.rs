//! services/client/src/adapters/account_http.rs
//!
//! This module contains the HTTP adapter for the account collaborator.
//! It implements the `AccountService` port from the `core` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use smartchef_core::ports::{AccountService, PortError, PortResult, SignedIn};

use super::error_from_response;

/// An adapter that implements the `AccountService` port against the recipe
/// backend's auth routes.
#[derive(Clone)]
pub struct HttpAccountService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAccountService {
    /// Creates a new `HttpAccountService`.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    token: String,
    #[serde(default)]
    username: Option<String>,
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn sign_in(&self, username: &str, password: &str) -> PortResult<SignedIn> {
        let response = self
            .http
            .post(format!("{}/auth/signin", self.base_url))
            .json(&CredentialsBody { username, password })
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "account backend").await);
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(SignedIn {
            token: body.token,
            display_name: body.username,
        })
    }

    async fn sign_up(&self, username: &str, password: &str) -> PortResult<()> {
        let response = self
            .http
            .post(format!("{}/auth/signup", self.base_url))
            .json(&CredentialsBody { username, password })
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "account backend").await);
        }
        Ok(())
    }

    async fn delete_account(&self, token: &str) -> PortResult<()> {
        let response = self
            .http
            .delete(format!("{}/auth/account", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "account backend").await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sign_in_responses_tolerate_a_missing_username() {
        let body: SignInResponse =
            serde_json::from_value(serde_json::json!({"token": "t-1"})).unwrap();
        assert_eq!(body.token, "t-1");
        assert_eq!(body.username, None);
    }
}
