use crate::domain::a002_department::ui::details::DepartmentDetails;
use crate::domain::a002_department::ui::form::DepartmentForm;
use crate::shared::activity_logger::log_activity;
use crate::shared::api_utils::{delete_rows, eq, get_rows, ApiError};
use crate::shared::config::app_config;
use crate::shared::confirm_dialog::ConfirmDialog;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::master_detail::MasterDetailLayout;
use crate::shared::palette::{department_palette, initials};
use crate::shared::route_selection::{find_selected, use_route_selection, use_sticky_selection};
use crate::system::auth::context::use_profile;
use contracts::domain::a002_department::aggregate::{
    total_people, Department, DepartmentRecord, DepartmentSummary,
};
use contracts::domain::a004_activity_log::aggregate::{ActionType, EntityType};
use contracts::domain::common::search::filter_items;
use contracts::domain::common::AggregateRoot;
use contracts::system::auth::{RowScope, Section};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const DEPARTMENT_SELECT: &str =
    "*,churches(name),members:members(count),profile_departments(count)";
/// Older databases have no `profile_departments`; staff counts are then 0.
const LEGACY_DEPARTMENT_SELECT: &str = "*,churches(name),members:members(count)";

#[derive(Clone, Debug, PartialEq)]
enum FormTarget {
    Create,
    Edit(Department),
}

#[component]
#[allow(non_snake_case)]
pub fn DepartmentsPage() -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let selection = use_route_selection(Section::Departments.path());
    let layout = &app_config().layout;

    let items = RwSignal::new(Vec::<DepartmentSummary>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());
    let form_target = RwSignal::new(None::<FormTarget>);
    let pending_delete = RwSignal::new(None::<DepartmentSummary>);
    let deleting = RwSignal::new(false);

    let fetch = move || {
        let Some(scope) = profile.with_untracked(|p| p.as_ref().map(RowScope::departments_for)) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = fetch_departments(scope).await;
            let _ = loading.try_set(false);
            match result {
                Ok(rows) => {
                    let _ = items.try_set(rows);
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    log::error!("failed to load departments: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let filtered = Memo::new(move |_| filter.with(|f| items.with(|list| filter_items(list, f))));
    let selected = Memo::new(move |_| {
        let id = selection.selected_id();
        items.with(|list| find_selected(list, id.as_deref(), DepartmentSummary::id_string))
    });
    let shown = use_sticky_selection(selected);
    let is_open = Signal::derive(move || selected.with(Option::is_some));

    let delete_department = move |d: DepartmentSummary| {
        let user_id = profile.with_untracked(|p| p.as_ref().map(|p| p.id));
        deleting.set(true);
        spawn_local(async move {
            let id = d.id_string();
            match delete_rows(Department::collection_name(), &[eq("id", &id)]).await {
                Ok(()) => {
                    let church = d.church_name.clone();
                    log_activity(
                        user_id,
                        ActionType::Delete,
                        EntityType::Department,
                        format!(
                            "Deleted department \"{}\" from {}",
                            d.department.name,
                            church.as_deref().unwrap_or("Unknown church")
                        ),
                        Some(id.clone()),
                        Some(serde_json::json!({ "name": d.department.name, "church": church })),
                    )
                    .await;
                    if selection.selected_id_untracked().as_deref() == Some(id.as_str()) {
                        selection.close();
                    }
                    fetch();
                }
                Err(e) => {
                    log::error!("failed to delete department {}: {}", id, e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = deleting.try_set(false);
            let _ = pending_delete.try_set(None);
        });
    };

    let title = Signal::derive(move || {
        shown
            .with(|d| d.as_ref().map(|d| d.department.name.clone()))
            .unwrap_or_else(|| i18n.t("common.details"))
    });

    fetch();

    view! {
        <div class="page page--departments">
            <MasterDetailLayout
                is_open=is_open
                on_close=Callback::new(move |_| selection.close())
                title=title
                placeholder=Signal::derive(move || i18n.t("departments.selectPrompt"))
                breakpoint=layout.breakpoint_px
                transition_ms=layout.transition_ms
                actions=move || view! {
                    <button
                        class="icon-btn"
                        title=move || i18n.t("common.edit")
                        on:click=move |_| {
                            if let Some(d) = shown.get_untracked() {
                                form_target.set(Some(FormTarget::Edit(d.department)));
                            }
                        }
                    >
                        {icon("edit")}
                    </button>
                    <button
                        class="icon-btn icon-btn--danger"
                        title=move || i18n.t("common.delete")
                        on:click=move |_| pending_delete.set(shown.get_untracked())
                    >
                        {icon("delete")}
                    </button>
                }
                detail=move || view! {
                    {move || shown.get().map(|d| view! { <DepartmentDetails department=d /> })}
                }
            >
                <div class="header">
                    <div class="header__content">
                        <h1 class="header__title">{move || i18n.t("departments.title")}</h1>
                        <span class="header__counter">
                            {move || i18n.t_with(
                                "departments.totalPeople",
                                &[("count", &items.with(|l| total_people(l)).to_string())],
                            )}
                        </span>
                    </div>
                    <div class="header__actions">
                        <SearchInput
                            value=filter
                            on_change=Callback::new(move |v: String| filter.set(v))
                            placeholder=Signal::derive(move || i18n.t("departments.search"))
                        />
                        <button class="icon-btn" title=move || i18n.t("common.refresh") on:click=move |_| fetch()>
                            {icon("refresh")}
                        </button>
                        <button class="btn btn--primary" on:click=move |_| form_target.set(Some(FormTarget::Create))>
                            {icon("plus")}
                            {move || i18n.t("departments.add")}
                        </button>
                    </div>
                </div>

                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

                <Show
                    when=move || !(loading.get() && items.with(Vec::is_empty))
                    fallback=move || view! { <div class="notice notice--muted">{i18n.t("common.loading")}</div> }
                >
                    <Show
                        when=move || !filtered.with(Vec::is_empty)
                        fallback=move || view! { <div class="empty-state">{i18n.t("departments.empty")}</div> }
                    >
                        <div class="card-grid">
                            {move || filtered.get().into_iter().map(|d| {
                                let id = d.id_string();
                                let id_for_click = id.clone();
                                let palette = department_palette(&d.department.name);
                                let badge = initials(&d.department.name);
                                let name = d.department.name.clone();
                                let church = d.church_name.clone().unwrap_or_default();
                                let (member_count, staff_count) = (d.member_count, d.staff_count.to_string());
                                view! {
                                    <div
                                        class="dept-card"
                                        class:dept-card--active=move || selection.selected_id().as_deref() == Some(id.as_str())
                                        style=palette.css_vars()
                                        on:click=move |_| selection.select(&id_for_click)
                                    >
                                        <div class="dept-card__badge">{badge}</div>
                                        <div class="dept-card__body">
                                            <div class="dept-card__name">
                                                {move || highlight_matches(&name, &filter.get())}
                                            </div>
                                            <div class="dept-card__church">{church}</div>
                                        </div>
                                        <div class="dept-card__counts">
                                            <span title=move || i18n.t("departments.members")>{icon("members")}{member_count}</span>
                                            <span class="dept-card__staff">{move || i18n.t_with(
                                                "departments.staffCount",
                                                &[("count", &staff_count)],
                                            )}</span>
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </Show>
                </Show>
            </MasterDetailLayout>

            {move || form_target.get().map(|target| {
                let department = match target {
                    FormTarget::Create => None,
                    FormTarget::Edit(d) => Some(d),
                };
                view! {
                    <DepartmentForm
                        department=department
                        on_saved=Callback::new(move |_| {
                            form_target.set(None);
                            fetch();
                        })
                        on_cancel=Callback::new(move |_| form_target.set(None))
                    />
                }
            })}

            {move || pending_delete.get().map(|d| {
                let name = d.department.name.clone();
                view! {
                    <ConfirmDialog
                        title=Signal::derive(move || i18n.t("departments.deleteTitle"))
                        message=Signal::derive(move || i18n.t_with("departments.deleteMessage", &[("name", &name)]))
                        busy=deleting
                        on_confirm=Callback::new(move |_| delete_department(d.clone()))
                        on_cancel=Callback::new(move |_| pending_delete.set(None))
                    />
                }
            })}
        </div>
    }
}

/// Query for the department list; `select` picks the current or legacy join.
fn department_query(select: &str, scope: RowScope) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", select.to_string())];
    query.extend(scope.filter());
    query.push(("order", "name".to_string()));
    query
}

async fn fetch_departments(scope: RowScope) -> Result<Vec<DepartmentSummary>, ApiError> {
    match get_rows::<DepartmentRecord>(Department::collection_name(), &department_query(DEPARTMENT_SELECT, scope)).await {
        Ok(rows) => Ok(rows.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::warn!(
                "department staff counts unavailable ({}), retrying without them: {}",
                e.code().unwrap_or("no code"),
                e
            );
            let rows: Vec<DepartmentRecord> =
                get_rows(Department::collection_name(), &department_query(LEGACY_DEPARTMENT_SELECT, scope)).await?;
            Ok(rows.into_iter().map(Into::into).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_church::aggregate::ChurchId;
    use contracts::domain::common::AggregateId;

    #[test]
    fn test_department_query_unscoped() {
        let q = department_query(DEPARTMENT_SELECT, RowScope::All);
        assert_eq!(
            q,
            vec![
                ("select", DEPARTMENT_SELECT.to_string()),
                ("order", "name".to_string()),
            ]
        );
    }

    #[test]
    fn test_department_query_scoped_to_church() {
        let church = ChurchId::from_string("5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a").unwrap();
        let q = department_query(LEGACY_DEPARTMENT_SELECT, RowScope::Church(church));
        assert_eq!(q[1], ("church_id", "eq.5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a".to_string()));
        assert!(!q[0].1.contains("profile_departments"));
    }
}
