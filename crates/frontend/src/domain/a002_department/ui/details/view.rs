use super::view_model::DepartmentDetailsViewModel;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::palette::{department_palette, initials, member_palette};
use contracts::domain::a002_department::aggregate::DepartmentSummary;
use contracts::domain::a002_department::roster::DepartmentPerson;
use leptos::prelude::*;

/// Detail pane of a department: headline numbers and the searchable roster
#[component]
pub fn DepartmentDetails(department: DepartmentSummary) -> impl IntoView {
    let i18n = use_i18n();
    let vm = DepartmentDetailsViewModel::new();
    vm.load(department.id_string());

    let palette = department_palette(&department.department.name);
    let church = department
        .church_name
        .clone()
        .unwrap_or_else(|| "-".to_string());
    let member_count = department.member_count;

    view! {
        <div class="department-details" style=palette.css_vars()>
            <div class="department-details__hero">
                <div class="department-details__badge">{initials(&department.department.name)}</div>
                <div>
                    <h2 class="department-details__name">{department.department.name.clone()}</h2>
                    <div class="department-details__church">{church}</div>
                </div>
            </div>

            <div class="stat-row">
                <div class="stat">
                    <span class="stat__value">{member_count}</span>
                    <span class="stat__label">{move || i18n.t("departments.members")}</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || vm.staff_count()}</span>
                    <span class="stat__label">{move || i18n.t("departments.staff")}</span>
                </div>
            </div>

            <div class="department-details__toolbar">
                <h3>{move || i18n.t("departments.roster")}</h3>
                <SearchInput
                    value=vm.filter
                    on_change=Callback::new(move |v: String| vm.filter.set(v))
                    placeholder=Signal::derive(move || i18n.t("departments.searchRoster"))
                />
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show
                when=move || !vm.loading.get()
                fallback=move || view! { <div class="notice notice--muted">{i18n.t("common.loading")}</div> }
            >
                <Show
                    when=move || !vm.visible().is_empty()
                    fallback=move || view! { <div class="empty-state">{i18n.t("departments.emptyRoster")}</div> }
                >
                    <ul class="roster">
                        <For
                            each=move || vm.visible()
                            key=|person| person.key()
                            children=move |person| view! { <RosterRow person=person filter=vm.filter /> }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn RosterRow(person: DepartmentPerson, filter: RwSignal<String>) -> impl IntoView {
    let i18n = use_i18n();
    let name = person.full_name().to_string();
    let palette = member_palette(&name);
    let kind_key = person.kind_key();
    let is_staff = matches!(person, DepartmentPerson::Staff(_));
    let email = person.email().map(str::to_string);
    let phone = person.phone().map(str::to_string);
    let avatar = match &person {
        DepartmentPerson::Staff(p) => p.avatar_url.clone(),
        DepartmentPerson::Roster(_) => None,
    };

    view! {
        <li class="roster__row">
            {match avatar {
                Some(url) => view! { <img class="avatar" src=url alt="" /> }.into_any(),
                None => view! {
                    <span class="avatar" style=format!("background: {}", palette.avatar_background())>
                        {initials(&name)}
                    </span>
                }.into_any(),
            }}
            <div class="roster__info">
                <div class="roster__name">
                    {
                        let name = name.clone();
                        move || highlight_matches(&name, &filter.get())
                    }
                    <span class="badge" class:badge--staff=is_staff>{move || i18n.t(kind_key)}</span>
                </div>
                <div class="roster__contact">
                    {email.map(|e| view! { <span class="contact">{icon("mail")}{e}</span> })}
                    {phone.map(|p| view! { <span class="contact">{icon("phone")}{p}</span> })}
                </div>
            </div>
        </li>
    }
}
