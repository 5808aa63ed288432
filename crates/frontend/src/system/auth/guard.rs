use contracts::system::auth::Section;
use leptos::prelude::*;

use super::context::{use_auth, AuthState, SessionStatus};
use crate::shared::i18n::use_i18n;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    Loading,
    Blocked,
    Allowed,
    SignedOut,
}

fn gate_for(state: &AuthState) -> Gate {
    match (&state.status, state.profile.as_ref()) {
        (SessionStatus::Restoring, _) => Gate::Loading,
        (SessionStatus::SignedIn, Some(profile)) if profile.is_blocked => Gate::Blocked,
        (SessionStatus::SignedIn, Some(_)) => Gate::Allowed,
        _ => Gate::SignedOut,
    }
}

/// Renders children only for a signed-in, unblocked account
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let i18n = use_i18n();
    // Memoized so unrelated session updates do not remount the app.
    let gate = Memo::new(move |_| auth_state.with(gate_for));

    move || match gate.get() {
        Gate::Loading => view! {
            <div class="notice notice--muted">{i18n.t("common.loading")}</div>
        }
        .into_any(),
        Gate::Blocked => view! {
            <div class="notice notice--danger">
                <h2>{i18n.t("auth.blockedTitle")}</h2>
                <p>{i18n.t("auth.blockedMessage")}</p>
            </div>
        }
        .into_any(),
        Gate::Allowed => children().into_any(),
        Gate::SignedOut => view! {
            <div class="notice">
                <h2>{i18n.t("auth.signInRequired")}</h2>
                <p>{i18n.t("auth.signInHint")}</p>
            </div>
        }
        .into_any(),
    }
}

/// Renders children only when the account's role may open `section`
#[component]
pub fn RequireSection(section: Section, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let i18n = use_i18n();

    view! {
        <Show
            when=move || auth_state.with(|s| s.role().is_some_and(|r| r.can_access(section)))
            fallback=move || view! {
                <div class="notice notice--danger">{i18n.t("auth.accessDenied")}</div>
            }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::Profile;

    fn profile(blocked: bool) -> Profile {
        serde_json::from_value(serde_json::json!({
            "id": "22222222-2222-4222-8222-222222222222",
            "role": "pastor",
            "is_blocked": blocked,
        }))
        .unwrap()
    }

    fn state(status: SessionStatus, profile: Option<Profile>) -> AuthState {
        AuthState {
            status,
            access_token: profile.as_ref().map(|_| "token".to_string()),
            profile,
        }
    }

    #[test]
    fn test_gate_follows_session() {
        assert_eq!(gate_for(&state(SessionStatus::Restoring, None)), Gate::Loading);
        assert_eq!(gate_for(&state(SessionStatus::SignedOut, None)), Gate::SignedOut);
        assert_eq!(gate_for(&state(SessionStatus::SignedIn, Some(profile(false)))), Gate::Allowed);
        assert_eq!(gate_for(&state(SessionStatus::SignedIn, Some(profile(true)))), Gate::Blocked);
    }

    #[test]
    fn test_signed_in_without_profile_is_signed_out() {
        assert_eq!(gate_for(&state(SessionStatus::SignedIn, None)), Gate::SignedOut);
    }
}
