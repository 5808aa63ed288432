use contracts::system::auth::Profile;
use serde::{Deserialize, Serialize};

use crate::shared::api_utils::{self, auth_post, eq, get_auth_user, ApiError};

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Token pair issued by `/auth/v1/token`
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Profile of the account owning `access_token`
pub async fn get_current_profile(access_token: &str) -> Result<Profile, ApiError> {
    let user = get_auth_user(access_token).await?;
    let rows: Vec<Profile> =
        api_utils::get_rows("profiles", &[("select", "*".to_string()), eq("id", &user.id)]).await?;
    rows.into_iter().next().ok_or(ApiError::Empty)
}

/// Exchange a refresh token for a new session
pub async fn refresh_session(refresh_token: &str) -> Result<SessionTokens, ApiError> {
    auth_post(
        "token?grant_type=refresh_token",
        None,
        &RefreshRequest { refresh_token },
    )
    .await
}

/// Revoke the session server-side
pub async fn logout(access_token: &str) -> Result<(), ApiError> {
    auth_post::<_, Option<serde_json::Value>>("logout", Some(access_token), &serde_json::json!({}))
        .await
        .map(|_| ())
}

/// Persist the language choice on the profile
pub async fn save_profile_language(profile: &Profile, code: &str) -> Result<(), ApiError> {
    api_utils::update_rows(
        "profiles",
        &[eq("id", profile.id)],
        &serde_json::json!({ "language": code }),
    )
    .await
}
