// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the Reddit API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Reddit API over HTTPS, essentially a specialized HTTPS client
//! specifically for Reddit.

use crate::auth::{Auth, Credentials};
use crate::http::{HTTPError, HTTPResult, HTTPService};
use log::{debug, trace};
use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// A service for retrieving resources from the Reddit API.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Reddit API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Performs a GET request to the API `path` (such as `/r/rust/hot`)
    /// with the given `query` parameters and returns the raw JSON body.
    fn get_resource(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = HTTPResult<String>> + Send;
}

/// A service that contacts the Reddit API directly to retrieve information.
///
/// The service is meant to be created once and shared. The only state it
/// carries across requests is the current OAuth token, which is refreshed
/// shortly before it expires.
#[derive(Debug)]
pub struct RedditService {
    client: Client,
    auth: Auth,
    endpoints: Endpoints,
    token: Mutex<Option<AccessToken>>,
}

/// Base URIs the service talks to.
#[derive(Debug)]
struct Endpoints {
    public_host: String,
    oauth_host: String,
    token_uri: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            public_host: String::from("https://www.reddit.com"),
            oauth_host: String::from("https://oauth.reddit.com"),
            token_uri: String::from("https://www.reddit.com/api/v1/access_token"),
        }
    }
}

impl HTTPService for RedditService {}

impl RedditService {
    /// Creates a new Reddit service that authenticates with the given
    /// credentials.
    pub fn new(credentials: Credentials) -> HTTPResult<Self> {
        Self::with_endpoints(credentials, Endpoints::default())
    }

    /// Creates a service that sends every request to `host` instead of
    /// Reddit. OAuth requests go to `{host}/oauth`.
    #[cfg(test)]
    fn with_host(credentials: Credentials, host: &str) -> HTTPResult<Self> {
        let endpoints = Endpoints {
            public_host: host.to_string(),
            oauth_host: format!("{host}/oauth"),
            token_uri: format!("{host}/api/v1/access_token"),
        };
        Self::with_endpoints(credentials, endpoints)
    }

    fn with_endpoints(credentials: Credentials, endpoints: Endpoints) -> HTTPResult<Self> {
        let client = Self::client()?;
        let auth = credentials.auth();
        let token = match &auth {
            Auth::AccessToken(value) => Some(AccessToken::permanent(value)),
            _ => None,
        };
        debug!("created Reddit service using {auth:?}");
        Ok(Self {
            client,
            auth,
            endpoints,
            token: Mutex::new(token),
        })
    }

    /// Creates a new Reddit service with credentials from the environment.
    pub fn from_env() -> HTTPResult<Self> {
        Self::new(Credentials::from_env())
    }

    fn host(&self) -> &str {
        if self.auth.is_oauth() {
            &self.endpoints.oauth_host
        } else {
            &self.endpoints.public_host
        }
    }

    fn uri(&self, path: &str) -> String {
        format!("{}{path}.json", self.host())
    }

    async fn bearer_token(&self) -> HTTPResult<Option<String>> {
        if !self.auth.is_oauth() {
            return Ok(None);
        }

        let mut token = self.token.lock().await;
        if let Some(current) = token.as_ref().filter(|t| !t.is_expired()) {
            return Ok(Some(current.value.clone()));
        }

        let fresh = self.request_token().await?;
        let value = fresh.value.clone();
        *token = Some(fresh);
        Ok(Some(value))
    }

    async fn request_token(&self) -> HTTPResult<AccessToken> {
        let (Some(form), Some((client_id, client_secret))) =
            (self.auth.grant(), self.auth.basic_auth())
        else {
            return Err(HTTPError::Http(StatusCode::UNAUTHORIZED));
        };

        debug!("requesting new access token from {}", self.endpoints.token_uri);
        let resp = self
            .client
            .post(&self.endpoints.token_uri)
            .basic_auth(client_id, Some(client_secret))
            .form(&form)
            .send()
            .await?;
        let body = Self::json_body(resp).await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(AccessToken::from(token))
    }

    async fn json_body(resp: Response) -> HTTPResult<String> {
        if !resp.status().is_success() {
            Err(HTTPError::Http(resp.status()))
        } else {
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .ok_or(HTTPError::MissingContentType)?
                .to_str()?;
            if !content_type.starts_with("application/json") {
                Err(HTTPError::UnexpectedContentType(content_type.to_string()))
            } else {
                resp.text().await.map_err(HTTPError::Body)
            }
        }
    }
}

impl Service for RedditService {
    async fn get_resource(&self, path: &str, query: &[(&str, String)]) -> HTTPResult<String> {
        let uri = self.uri(path);
        debug!("GET {uri} {query:?}");

        let mut request = self
            .client
            .get(&uri)
            .query(&[("raw_json", "1")])
            .query(query);
        if let Some(token) = self.bearer_token().await? {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        trace!("{uri} returned HTTP {}", resp.status());
        Self::json_body(resp).await
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// An OAuth bearer token and the moment it should no longer be used.
#[derive(Clone)]
struct AccessToken {
    value: String,
    expires_at: Option<Instant>,
}

impl AccessToken {
    /// Tokens are refreshed this long before Reddit says they expire.
    const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

    fn permanent(value: &str) -> Self {
        Self {
            value: value.to_string(),
            expires_at: None,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

impl From<TokenResponse> for AccessToken {
    fn from(resp: TokenResponse) -> Self {
        // Lifetimes too long to represent never expire.
        let expires_at = resp.expires_in.and_then(|secs| {
            let lifetime = Duration::from_secs(secs).saturating_sub(Self::EXPIRY_MARGIN);
            Instant::now().checked_add(lifetime)
        });
        Self {
            value: resp.access_token,
            expires_at,
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken {{ expires_at = {:?} }}", self.expires_at)
    }
}
