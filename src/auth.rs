//! Authentication for the Reddit API.
//!
//! Credentials are read from three environment variables, in this order:
//!
//! 1. `$REDDIT_CLIENT_ID`
//! 2. `$REDDIT_CLIENT_SECRET`
//! 3. `$REDDIT_REFRESH_TOKEN`
//!
//! Variables that are unset or empty are skipped entirely, and the
//! remaining values are interpreted _positionally_. The number of values
//! that survive determines how mcp-reddit authenticates:
//!
//! | Values | Mode                                                   |
//! |--------|--------------------------------------------------------|
//! | 0      | Anonymous access to the public `.json` endpoints       |
//! | 1      | The value is used directly as a bearer access token    |
//! | 2      | Application-only OAuth (client credentials grant)      |
//! | 3      | User OAuth (refresh token grant)                       |
//!
//! Because the values are positional, setting only `$REDDIT_CLIENT_ID`
//! and `$REDDIT_REFRESH_TOKEN` results in the refresh token being used
//! as the client secret.

use std::{env, fmt};

/// Environment variables holding Reddit credentials, in positional order.
pub const CREDENTIAL_VARS: [&str; 3] = [
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "REDDIT_REFRESH_TOKEN",
];

/// Positional Reddit API credentials.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    values: Vec<String>,
}

impl Credentials {
    /// Creates credentials from the given values, skipping empty ones.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(Into::into)
            .filter(|value: &String| !value.is_empty())
            .collect();
        Self { values }
    }

    /// Reads credentials from the environment.
    ///
    /// Never fails: unset, empty, and non-Unicode variables are simply
    /// omitted.
    pub fn from_env() -> Self {
        Self::new(CREDENTIAL_VARS.iter().filter_map(|var| env::var(var).ok()))
    }

    /// Number of credential values present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no credentials were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The authentication mode implied by the supplied credentials.
    pub fn auth(&self) -> Auth {
        match self.values.as_slice() {
            [] => Auth::Anonymous,
            [token] => Auth::AccessToken(token.clone()),
            [client_id, client_secret] => Auth::ClientCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            },
            [client_id, client_secret, refresh_token, ..] => Auth::RefreshToken {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                refresh_token: refresh_token.clone(),
            },
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials {{ values = <{} redacted> }}", self.len())
    }
}

/// How requests to the Reddit API are authenticated.
#[derive(Clone, PartialEq)]
pub enum Auth {
    /// No credentials; only public endpoints are available.
    Anonymous,

    /// A pre-issued bearer token.
    AccessToken(String),

    /// Application-only OAuth.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },

    /// OAuth on behalf of a user.
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

impl Auth {
    /// True if requests should go to the OAuth API host.
    pub fn is_oauth(&self) -> bool {
        !matches!(self, Auth::Anonymous)
    }

    /// The form parameters for a token request, if this mode obtains
    /// tokens from Reddit's token endpoint.
    pub fn grant(&self) -> Option<Vec<(&'static str, String)>> {
        match self {
            Auth::Anonymous | Auth::AccessToken(_) => None,
            Auth::ClientCredentials { .. } => {
                Some(vec![("grant_type", String::from("client_credentials"))])
            }
            Auth::RefreshToken { refresh_token, .. } => Some(vec![
                ("grant_type", String::from("refresh_token")),
                ("refresh_token", refresh_token.clone()),
            ]),
        }
    }

    /// The HTTP basic auth pair used when requesting a token.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match self {
            Auth::ClientCredentials {
                client_id,
                client_secret,
            }
            | Auth::RefreshToken {
                client_id,
                client_secret,
                ..
            } => Some((client_id.as_str(), client_secret.as_str())),
            Auth::Anonymous | Auth::AccessToken(_) => None,
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            Auth::Anonymous => "Anonymous",
            Auth::AccessToken(_) => "AccessToken",
            Auth::ClientCredentials { .. } => "ClientCredentials",
            Auth::RefreshToken { .. } => "RefreshToken",
        };
        write!(f, "Auth::{mode}")
    }
}
