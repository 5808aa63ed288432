//! REST access to the hosted database (PostgREST dialect).
//!
//! Every request carries the project's anon key and, when a session exists,
//! the user's bearer token so row-level security applies.

use crate::shared::config::app_config;
use crate::system::auth::storage;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("API is not configured")]
    NotConfigured,
    #[error("failed to build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("empty response")]
    Empty,
}

impl ApiError {
    /// PostgREST error code, e.g. `PGRST200` for an unknown embedded relation
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Query string pairs, e.g. `[("select", "*"), ("order", "name")]`
pub type Query<'a> = [(&'a str, String)];

/// Build `{base}/rest/v1/{table}?k=v&...` with URL-encoded values.
pub fn rest_url(base: &str, table: &str, query: &Query) -> String {
    let mut url = format!("{}/rest/v1/{}", base.trim_end_matches('/'), table);
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// `eq.<value>` filter pair
pub fn eq(column: &'static str, value: impl std::fmt::Display) -> (&'static str, String) {
    (column, format!("eq.{}", value))
}

fn base_url() -> Result<&'static str, ApiError> {
    let base = app_config().api.base_url.as_str();
    if base.is_empty() {
        return Err(ApiError::NotConfigured);
    }
    Ok(base)
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    let bearer = storage::get_access_token().unwrap_or_else(|| app_config().api.anon_key.clone());
    with_token(builder, &bearer).header("Accept", "application/json")
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
    let (code, message) = match parsed {
        Some(b) => (b.code, b.message.unwrap_or(body)),
        None => (None, body),
    };
    Err(ApiError::Http {
        status,
        code,
        message,
    })
}

/// GET rows of `table`
pub async fn get_rows<T: DeserializeOwned>(table: &str, query: &Query<'_>) -> Result<Vec<T>, ApiError> {
    let url = rest_url(base_url()?, table, query);
    let response = with_auth(Request::get(&url)).send().await?;
    let response = check(response).await?;
    Ok(response.json::<Vec<T>>().await?)
}

/// INSERT one row and return it as stored
pub async fn insert_row<B, T>(table: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = rest_url(base_url()?, table, &[]);
    let request = with_auth(Request::post(&url))
        .header("Prefer", "return=representation")
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?;
    let response = check(request.send().await?).await?;
    response
        .json::<Vec<T>>()
        .await?
        .into_iter()
        .next()
        .ok_or(ApiError::Empty)
}

/// INSERT without reading anything back
pub async fn insert_only<B: Serialize>(table: &str, body: &B) -> Result<(), ApiError> {
    let url = rest_url(base_url()?, table, &[]);
    let request = with_auth(Request::post(&url))
        .header("Prefer", "return=minimal")
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check(request.send().await?).await?;
    Ok(())
}

/// PATCH rows matching `filters`
pub async fn update_rows<B: Serialize>(table: &str, filters: &Query<'_>, body: &B) -> Result<(), ApiError> {
    let url = rest_url(base_url()?, table, filters);
    let request = with_auth(Request::patch(&url))
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?;
    check(request.send().await?).await?;
    Ok(())
}

/// DELETE rows matching `filters`
pub async fn delete_rows(table: &str, filters: &Query<'_>) -> Result<(), ApiError> {
    let url = rest_url(base_url()?, table, filters);
    let response = with_auth(Request::delete(&url)).send().await?;
    check(response).await?;
    Ok(())
}

/// Authenticated user as returned by `/auth/v1/user`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// `{base}/auth/v1/{path}`
pub fn auth_url(base: &str, path: &str) -> String {
    format!("{}/auth/v1/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn with_token(builder: RequestBuilder, access_token: &str) -> RequestBuilder {
    builder
        .header("apikey", &app_config().api.anon_key)
        .header("Authorization", &format!("Bearer {}", access_token))
}

/// Resolve the account behind an access token
pub async fn get_auth_user(access_token: &str) -> Result<AuthUser, ApiError> {
    let url = auth_url(base_url()?, "user");
    let response = with_token(Request::get(&url), access_token).send().await?;
    Ok(check(response).await?.json::<AuthUser>().await?)
}

/// POST to the auth service; `access_token` is sent when the call needs a session.
pub async fn auth_post<B, T>(path: &str, access_token: Option<&str>, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = auth_url(base_url()?, path);
    let anon = app_config().api.anon_key.clone();
    let request = with_token(Request::post(&url), access_token.unwrap_or(&anon))
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?;
    let response = check(request.send().await?).await?;
    let text = response.text().await?;
    // logout answers 204 with no body
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url_without_query() {
        assert_eq!(
            rest_url("https://x.supabase.co/", "departments", &[]),
            "https://x.supabase.co/rest/v1/departments"
        );
    }

    #[test]
    fn test_rest_url_encodes_values() {
        let url = rest_url(
            "https://x.supabase.co",
            "members",
            &[
                ("select", "*,departments(name),churches(name)".to_string()),
                eq("church_id", "abc"),
                ("order", "full_name".to_string()),
            ],
        );
        assert_eq!(
            url,
            "https://x.supabase.co/rest/v1/members?select=%2A%2Cdepartments%28name%29%2Cchurches%28name%29&church_id=eq.abc&order=full_name"
        );
    }

    #[test]
    fn test_auth_url() {
        assert_eq!(
            auth_url("https://x.supabase.co/", "/token?grant_type=refresh_token"),
            "https://x.supabase.co/auth/v1/token?grant_type=refresh_token"
        );
    }

    #[test]
    fn test_error_code_accessor() {
        let e = ApiError::Http {
            status: 400,
            code: Some("PGRST200".into()),
            message: "Could not find a relationship".into(),
        };
        assert_eq!(e.code(), Some("PGRST200"));
        assert_eq!(e.to_string(), "HTTP 400: Could not find a relationship");
        assert_eq!(ApiError::Empty.code(), None);
    }
}
