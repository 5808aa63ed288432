//! Navigation between the console sections the signed-in role may open

use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::system::auth::{Section, UserRole};
use leptos::prelude::*;
use leptos_router::components::A;

fn icon_name(section: Section) -> &'static str {
    match section {
        Section::Churches => "churches",
        Section::Members => "members",
        Section::Departments => "departments",
        Section::Activities => "activities",
    }
}

fn visible_sections(role: Option<UserRole>) -> Vec<Section> {
    Section::all()
        .into_iter()
        .filter(|s| role.is_some_and(|r| r.can_access(*s)))
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let i18n = use_i18n();
    let (auth_state, _) = use_auth();
    let sections = Memo::new(move |_| visible_sections(auth_state.with(|s| s.role())));

    view! {
        <nav class="app-sidebar__content">
            <div class="app-sidebar__brand">{move || i18n.t("app.title")}</div>
            {move || sections.get().into_iter().map(|section| view! {
                <A href=section.path()>
                    <span class="app-sidebar__item">
                        {icon(icon_name(section))}
                        <span>{move || i18n.t(section.label_key())}</span>
                    </span>
                </A>
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servant_sees_members_only() {
        assert_eq!(visible_sections(Some(UserRole::Servant)), vec![Section::Members]);
    }

    #[test]
    fn test_pastor_sees_everything_but_churches() {
        assert_eq!(
            visible_sections(Some(UserRole::Pastor)),
            vec![Section::Departments, Section::Members, Section::Activities]
        );
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(visible_sections(Some(UserRole::SuperAdmin)).len(), 4);
        assert_eq!(visible_sections(Some(UserRole::SuperAdmin))[0], Section::Churches);
    }

    #[test]
    fn test_no_role_no_sections() {
        assert!(visible_sections(None).is_empty());
    }
}
