use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// OAuth token endpoints of the Microsoft identity platform.
pub mod credentials;
/// Access token cache with early refresh.
pub mod token;

use token::{AuthConfig, CachedToken, get_access_token};

/// How requests are authenticated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authentication {
    /// A token obtained elsewhere. Never refreshed.
    AccessToken(String),
    /// Tokens obtained and refreshed through OAuth.
    #[serde(rename = "oauth")]
    OAuth(AuthConfig),
}

impl Authentication {
    /// Current access token, refreshing through `cache` when needed.
    pub async fn access_token(&self, cache: &mut HashMap<String, CachedToken>) -> Result<String> {
        match self {
            Authentication::AccessToken(token) => Ok(token.clone()),
            Authentication::OAuth(config) => {
                get_access_token(config, cache, &config.client_id().to_string()).await
            }
        }
    }
}

/// Credentials and account context sent with every service call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationData {
    pub developer_token: String,
    pub customer_id: Option<i64>,
    pub account_id: Option<i64>,
    pub authentication: Authentication,
}
