//! TopHeader: sidebar toggle, preferences and the signed-in account.

use crate::layout::global_context::use_global_context;
use crate::shared::i18n::{use_i18n, Language, LanguagePicker};
use crate::shared::icons::icon;
use crate::shared::theme::ThemeToggle;
use crate::system::auth::api::save_profile_language;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let i18n = use_i18n();
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    let remember_language = Callback::new(move |language: Language| {
        let Some(profile) = auth_state.with_untracked(|s| s.profile.clone()) else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = save_profile_language(&profile, language.code()).await {
                log::warn!("failed to store language on profile: {}", e);
            }
        });
    });

    let user_name = move || {
        auth_state.with(|s| {
            s.profile
                .as_ref()
                .and_then(|p| p.full_name.clone())
                .unwrap_or_default()
        })
    };
    let role_label = move || {
        auth_state
            .with(|s| s.role())
            .map(|r| i18n.t(r.label_key()))
            .unwrap_or_default()
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || i18n.t("header.toggleNav")
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{move || i18n.t("app.title")}</span>
            </div>

            <div class="top-header__actions">
                <LanguagePicker on_change=remember_language />
                <ThemeToggle />

                <div class="top-header__user">
                    <span class="top-header__user-name">{user_name}</span>
                    <span class="top-header__user-role">{role_label}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title=move || i18n.t("header.logout")>
                    {icon("log-out")}
                </button>
            </div>
        </header>
    }
}
