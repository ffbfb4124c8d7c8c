use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

use reqwest::Client;
use serde_json::Value;

use crate::error::{Error, Result};

/// Scope granting access to the advertising APIs with a refresh token.
pub const ADS_MANAGE_SCOPE: &str = "https://ads.microsoft.com/msads.manage offline_access";
/// Tenant for personal and work accounts alike.
pub const COMMON_TENANT: &str = "common";

pub struct TokenExchange {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: u64,
}

pub struct ClientCredentialsToken {
    pub access_token: String,
    pub expires_at: u64,
}

fn token_url(tenant_id: &str) -> String {
    format!(
        "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
        tenant_id
    )
}

/// Url a user opens to grant consent and obtain an authorization code.
pub fn authorization_url(
    client_id: &str,
    tenant_id: &str,
    scope: &str,
    redirect_uri: &str,
    state: Option<&str>,
) -> String {
    let mut url = format!(
        "https://login.microsoftonline.com/{}/oauth2/v2.0/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
        tenant_id,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(scope)
    );
    if let Some(state) = state {
        url.push_str("&state=");
        url.push_str(&urlencoding::encode(state));
    }
    url
}

async fn post_token_request(tenant_id: &str, params: &HashMap<&str, &str>) -> Result<Value> {
    let client = Client::new();

    let resp = client
        .post(token_url(tenant_id))
        .form(params)
        .send()
        .await?;

    if !resp.status().is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Auth(body));
    }

    Ok(resp.json().await?)
}

fn required_str<'a>(json: &'a Value, key: &str) -> Result<&'a str> {
    json.get(key)
        .and_then(|v| v.as_str())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Auth(format!("No {key} in response")))
}

fn expires_at(json: &Value) -> Result<u64> {
    let expires_in = json
        .get("expires_in")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| Error::Auth("No expires_in in response".to_string()))?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Auth(e.to_string()))?
        .as_secs();

    Ok(now + expires_in)
}

pub async fn fetch_client_credentials_token(
    client_id: &str,
    client_secret: &str,
    tenant_id: &str,
    scope: &str,
) -> Result<ClientCredentialsToken> {
    let mut params = HashMap::new();
    params.insert("client_id", client_id);
    params.insert("client_secret", client_secret);
    params.insert("scope", scope);
    params.insert("grant_type", "client_credentials");

    let json = post_token_request(tenant_id, &params).await?;

    Ok(ClientCredentialsToken {
        access_token: required_str(&json, "access_token")?.to_string(),
        expires_at: expires_at(&json)?,
    })
}

/// Redeem an authorization code. `client_secret` is omitted for public (desktop) clients.
pub async fn exchange_authorization_code(
    client_id: &str,
    client_secret: Option<&str>,
    tenant_id: &str,
    scope: &str,
    authorization_code: &str,
    redirect_uri: &str,
) -> Result<TokenExchange> {
    let mut params = HashMap::new();
    params.insert("client_id", client_id);
    if let Some(secret) = client_secret {
        params.insert("client_secret", secret);
    }
    params.insert("scope", scope);
    params.insert("grant_type", "authorization_code");
    params.insert("code", authorization_code);
    params.insert("redirect_uri", redirect_uri);

    let json = post_token_request(tenant_id, &params).await?;

    Ok(TokenExchange {
        access_token: required_str(&json, "access_token")?.to_string(),
        refresh_token: required_str(&json, "refresh_token")?.to_string(),
        expires_at: expires_at(&json)?,
    })
}

/// Trade a refresh token for a new access token. The service may rotate the refresh token.
pub async fn refresh_authorization_token(
    client_id: &str,
    client_secret: Option<&str>,
    tenant_id: &str,
    scope: &str,
    refresh_token: &str,
) -> Result<TokenExchange> {
    let mut params = HashMap::new();
    params.insert("client_id", client_id);
    if let Some(secret) = client_secret {
        params.insert("client_secret", secret);
    }
    params.insert("scope", scope);
    params.insert("grant_type", "refresh_token");
    params.insert("refresh_token", refresh_token);

    let json = post_token_request(tenant_id, &params).await?;

    let refreshed_token = json
        .get("refresh_token")
        .and_then(|v| v.as_str())
        .unwrap_or(refresh_token)
        .to_string();

    Ok(TokenExchange {
        access_token: required_str(&json, "access_token")?.to_string(),
        refresh_token: refreshed_token,
        expires_at: expires_at(&json)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_encodes_parameters() {
        let url = authorization_url(
            "client-1",
            COMMON_TENANT,
            ADS_MANAGE_SCOPE,
            "https://login.microsoftonline.com/common/oauth2/nativeclient",
            Some("xyz"),
        );
        assert!(url.starts_with("https://login.microsoftonline.com/common/oauth2/v2.0/authorize?"));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("scope=https%3A%2F%2Fads.microsoft.com%2Fmsads.manage%20offline_access"));
        assert!(url.ends_with("&state=xyz"));
    }

    #[test]
    fn token_fields_must_be_present() {
        let json: Value = serde_json::json!({"access_token": "abc", "expires_in": 3600});
        assert_eq!(required_str(&json, "access_token").unwrap(), "abc");
        assert!(matches!(
            required_str(&json, "refresh_token"),
            Err(Error::Auth(_))
        ));
        assert!(expires_at(&json).unwrap() > 3600);
    }
}
