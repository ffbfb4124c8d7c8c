use std::collections::HashMap;
use std::hash::Hash;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::auth::credentials::{fetch_client_credentials_token, refresh_authorization_token};
use crate::error::{Error, Result};

const REFRESH_SKEW_SECS: u64 = 300;

#[derive(Clone, Debug)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: Option<u64>,
    /// Latest refresh token handed out by the identity platform, if it rotated one.
    pub refresh_token: Option<String>,
}

/// OAuth settings used to obtain access tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    ClientCredentials {
        client_id: String,
        client_secret: String,
        tenant_id: String,
        scope: String,
    },
    AuthorizationCode {
        client_id: String,
        #[serde(default)]
        client_secret: Option<String>,
        tenant_id: String,
        scope: String,
        #[serde(default)]
        access_token: String,
        refresh_token: String,
        #[serde(default)]
        expires_at: Option<u64>,
    },
}

impl AuthConfig {
    pub fn client_id(&self) -> &str {
        match self {
            AuthConfig::ClientCredentials { client_id, .. }
            | AuthConfig::AuthorizationCode { client_id, .. } => client_id,
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

pub fn is_expiring_soon(expires_at: Option<u64>) -> bool {
    let Some(exp) = expires_at else {
        return true;
    };
    now_secs() + REFRESH_SKEW_SECS >= exp
}

/// Refresh token to present next: the rotated one when cached, else the configured one.
fn current_refresh_token<'a>(configured: &'a str, cached: Option<&'a CachedToken>) -> &'a str {
    cached
        .and_then(|token| token.refresh_token.as_deref())
        .filter(|token| !token.trim().is_empty())
        .unwrap_or(configured)
}

pub async fn fetch_token(auth: &AuthConfig, cached: Option<&CachedToken>) -> Result<CachedToken> {
    match auth {
        AuthConfig::ClientCredentials {
            client_id,
            client_secret,
            tenant_id,
            scope,
        } => {
            let token =
                fetch_client_credentials_token(client_id, client_secret, tenant_id, scope).await?;

            Ok(CachedToken {
                access_token: token.access_token,
                expires_at: Some(token.expires_at),
                refresh_token: None,
            })
        }
        AuthConfig::AuthorizationCode {
            client_id,
            client_secret,
            tenant_id,
            scope,
            refresh_token,
            ..
        } => {
            let refresh_token = current_refresh_token(refresh_token, cached);
            if client_id.trim().is_empty() || refresh_token.trim().is_empty() {
                return Err(Error::Auth(
                    "Authorization code connection cannot refresh without a client id and refresh token."
                        .to_string(),
                ));
            }

            log::debug!("Refreshing access token for client {}", client_id);
            let token = refresh_authorization_token(
                client_id,
                client_secret.as_deref(),
                tenant_id,
                scope,
                refresh_token,
            )
            .await?;

            Ok(CachedToken {
                access_token: token.access_token,
                expires_at: Some(token.expires_at),
                refresh_token: Some(token.refresh_token),
            })
        }
    }
}

/// Seed the cache, reusing a stored access token while it is still fresh.
pub async fn prime_token_cache<K: Eq + Hash + Clone>(
    auth: &AuthConfig,
    cache: &mut HashMap<K, CachedToken>,
    key: K,
) -> Result<()> {
    let token = match auth {
        AuthConfig::ClientCredentials { .. } => fetch_token(auth, None).await?,
        AuthConfig::AuthorizationCode {
            access_token,
            expires_at,
            ..
        } => {
            if access_token.trim().is_empty() || is_expiring_soon(*expires_at) {
                fetch_token(auth, None).await?
            } else {
                CachedToken {
                    access_token: access_token.clone(),
                    expires_at: *expires_at,
                    refresh_token: None,
                }
            }
        }
    };

    cache.insert(key, token);
    Ok(())
}

pub async fn get_access_token<K: Eq + Hash + Clone>(
    auth: &AuthConfig,
    cache: &mut HashMap<K, CachedToken>,
    key: &K,
) -> Result<String> {
    if let Some(cached) = cache.get(key) {
        if !cached.access_token.trim().is_empty() && !is_expiring_soon(cached.expires_at) {
            return Ok(cached.access_token.clone());
        }
    }

    if !cache.contains_key(key) {
        prime_token_cache(auth, cache, key.clone()).await?;
        if let Some(primed) = cache.get(key) {
            return Ok(primed.access_token.clone());
        }
    }

    let refreshed = fetch_token(auth, cache.get(key)).await?;
    let access_token = refreshed.access_token.clone();
    cache.insert(key.clone(), refreshed);
    Ok(access_token)
}
