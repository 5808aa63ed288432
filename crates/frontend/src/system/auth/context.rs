use contracts::system::auth::{Profile, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::i18n::LanguageContext;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionStatus {
    /// Stored session is being validated
    #[default]
    Restoring,
    SignedOut,
    SignedIn,
}

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub status: SessionStatus,
    pub access_token: Option<String>,
    pub profile: Option<Profile>,
}

impl AuthState {
    pub fn role(&self) -> Option<UserRole> {
        self.profile.as_ref().map(|p| p.role)
    }

    fn signed_in(access_token: String, profile: Profile) -> Self {
        Self {
            status: SessionStatus::SignedIn,
            access_token: Some(access_token),
            profile: Some(profile),
        }
    }

    fn signed_out() -> Self {
        Self {
            status: SessionStatus::SignedOut,
            ..Default::default()
        }
    }
}

async fn restore_session() -> AuthState {
    let Some(access_token) = storage::get_access_token() else {
        return AuthState::signed_out();
    };

    match api::get_current_profile(&access_token).await {
        Ok(profile) => return AuthState::signed_in(access_token, profile),
        Err(e) => log::warn!("stored session rejected: {}", e),
    }

    // Token expired: try the refresh token once.
    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return AuthState::signed_out();
    };
    match api::refresh_session(&refresh_token).await {
        Ok(tokens) => {
            storage::save_tokens(&tokens.access_token, &tokens.refresh_token);
            match api::get_current_profile(&tokens.access_token).await {
                Ok(profile) => AuthState::signed_in(tokens.access_token, profile),
                Err(e) => {
                    log::error!("failed to load profile after refresh: {}", e);
                    AuthState::signed_out()
                }
            }
        }
        Err(e) => {
            log::warn!("session refresh failed: {}", e);
            storage::clear_tokens();
            AuthState::signed_out()
        }
    }
}

/// Restores the stored session and exposes it to the tree
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());
    let i18n = use_context::<LanguageContext>();

    spawn_local(async move {
        let state = restore_session().await;
        if let (Some(i18n), Some(profile)) = (i18n, state.profile.as_ref()) {
            i18n.adopt_profile_language(profile.language.as_deref());
        }
        set_auth_state.set(state);
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Signed-in profile (reactive); `None` while restoring or signed out
pub fn use_profile() -> Signal<Option<Profile>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| s.profile.clone()))
}

pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(token) = storage::get_access_token() {
        if let Err(e) = api::logout(&token).await {
            log::warn!("logout request failed: {}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::signed_out());
}
