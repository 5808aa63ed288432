use crate::domain::a003_member::ui::details::MemberDetails;
use crate::domain::a003_member::ui::form::{edit_path, ADD_PATH};
use crate::shared::activity_logger::log_activity;
use crate::shared::api_utils::{delete_rows, eq, get_rows, ApiError};
use crate::shared::config::app_config;
use crate::shared::confirm_dialog::ConfirmDialog;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::master_detail::MasterDetailLayout;
use crate::shared::palette::{initials, member_palette};
use crate::shared::route_selection::{find_selected, use_route_selection, use_sticky_selection};
use crate::system::auth::context::use_profile;
use contracts::domain::a003_member::aggregate::{Member, MemberRecord, MemberSummary};
use contracts::domain::a004_activity_log::aggregate::{ActionType, EntityType};
use contracts::domain::common::search::filter_items;
use contracts::domain::common::AggregateRoot;
use contracts::system::auth::{RowScope, Section};
use leptos::prelude::*;
use leptos_router::components::A;
use wasm_bindgen_futures::spawn_local;

const MEMBER_SELECT: &str = "*,departments(name),churches(name)";

#[component]
#[allow(non_snake_case)]
pub fn MembersPage() -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let selection = use_route_selection(Section::Members.path());
    let layout = &app_config().layout;
    let can_edit = Signal::derive(move || {
        profile.with(|p| p.as_ref().is_some_and(|p| p.role.can_edit_members()))
    });

    let items = RwSignal::new(Vec::<MemberSummary>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());
    let pending_delete = RwSignal::new(None::<MemberSummary>);
    let deleting = RwSignal::new(false);

    let fetch = move || {
        let Some(scope) = profile.with_untracked(|p| p.as_ref().map(RowScope::members_for)) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = fetch_members(scope).await;
            let _ = loading.try_set(false);
            match result {
                Ok(rows) => {
                    let _ = items.try_set(rows);
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    log::error!("failed to load members: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let filtered = Memo::new(move |_| filter.with(|f| items.with(|list| filter_items(list, f))));
    let selected = Memo::new(move |_| {
        let id = selection.selected_id();
        items.with(|list| find_selected(list, id.as_deref(), MemberSummary::id_string))
    });
    let shown = use_sticky_selection(selected);
    let is_open = Signal::derive(move || selected.with(Option::is_some));

    let delete_member = move |m: MemberSummary| {
        let user_id = profile.with_untracked(|p| p.as_ref().map(|p| p.id));
        deleting.set(true);
        spawn_local(async move {
            let id = m.id_string();
            match delete_rows(Member::collection_name(), &[eq("id", &id)]).await {
                Ok(()) => {
                    log_activity(
                        user_id,
                        ActionType::Delete,
                        EntityType::Member,
                        format!("Deleted member {}", m.member.full_name),
                        Some(id.clone()),
                        Some(m.audit_snapshot()),
                    )
                    .await;
                    if selection.selected_id_untracked().as_deref() == Some(id.as_str()) {
                        selection.close();
                    }
                    fetch();
                }
                Err(e) => {
                    log::error!("failed to delete member {}: {}", id, e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = deleting.try_set(false);
            let _ = pending_delete.try_set(None);
        });
    };

    let title = Signal::derive(move || {
        shown
            .with(|m| m.as_ref().map(|m| m.member.full_name.clone()))
            .unwrap_or_else(|| i18n.t("common.details"))
    });

    fetch();

    view! {
        <div class="page page--members">
            <MasterDetailLayout
                is_open=is_open
                on_close=Callback::new(move |_| selection.close())
                title=title
                placeholder=Signal::derive(move || i18n.t("members.selectPrompt"))
                breakpoint=layout.breakpoint_px
                transition_ms=layout.transition_ms
                actions=move || view! {
                    <Show when=move || can_edit.get()>
                        {move || shown.get().map(|m| view! {
                            <A href=edit_path(&m.id_string())>
                                <span class="icon-btn" title=move || i18n.t("common.edit")>{icon("edit")}</span>
                            </A>
                        })}
                        <button
                            class="icon-btn icon-btn--danger"
                            title=move || i18n.t("common.delete")
                            on:click=move |_| pending_delete.set(shown.get_untracked())
                        >
                            {icon("delete")}
                        </button>
                    </Show>
                }
                detail=move || view! {
                    {move || shown.get().map(|m| view! { <MemberDetails member=m /> })}
                }
            >
                <div class="header">
                    <div class="header__content">
                        <h1 class="header__title">{move || i18n.t("members.title")}</h1>
                        <span class="header__counter">
                            {move || i18n.t_with(
                                "members.count",
                                &[("count", &filtered.with(Vec::len).to_string())],
                            )}
                        </span>
                    </div>
                    <div class="header__actions">
                        <SearchInput
                            value=filter
                            on_change=Callback::new(move |v: String| filter.set(v))
                            placeholder=Signal::derive(move || i18n.t("members.search"))
                        />
                        <button class="icon-btn" title=move || i18n.t("common.refresh") on:click=move |_| fetch()>
                            {icon("refresh")}
                        </button>
                        <Show when=move || can_edit.get()>
                            <A href=ADD_PATH>
                                <span class="btn btn--primary">
                                    {icon("plus")}
                                    {move || i18n.t("members.add")}
                                </span>
                            </A>
                        </Show>
                    </div>
                </div>

                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

                <Show
                    when=move || !(loading.get() && items.with(Vec::is_empty))
                    fallback=move || view! { <div class="notice notice--muted">{i18n.t("common.loading")}</div> }
                >
                    <Show
                        when=move || !filtered.with(Vec::is_empty)
                        fallback=move || view! { <div class="empty-state">{i18n.t("members.empty")}</div> }
                    >
                        <ul class="member-list">
                            {move || filtered.get().into_iter().map(|m| {
                                let id = m.id_string();
                                let id_for_click = id.clone();
                                let name = m.member.full_name.clone();
                                let palette = member_palette(&name);
                                let badge = initials(&name);
                                let contact = m.member.phone.clone().or_else(|| m.member.email.clone()).unwrap_or_default();
                                let department = m.department_name.clone().unwrap_or_else(|| "-".to_string());
                                view! {
                                    <li
                                        class="member-row"
                                        class:member-row--active=move || selection.selected_id().as_deref() == Some(id.as_str())
                                        on:click=move |_| selection.select(&id_for_click)
                                    >
                                        <span class="avatar" style=format!("background: {}", palette.avatar_background())>{badge}</span>
                                        <div class="member-row__info">
                                            <div class="member-row__name">
                                                {move || highlight_matches(&name, &filter.get())}
                                            </div>
                                            <div class="member-row__contact">{contact}</div>
                                        </div>
                                        <span class="member-row__department" style=palette.css_vars()>{department}</span>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </Show>
                </Show>
            </MasterDetailLayout>

            {move || pending_delete.get().map(|m| {
                let name = m.member.full_name.clone();
                view! {
                    <ConfirmDialog
                        title=Signal::derive(move || i18n.t("members.deleteTitle"))
                        message=Signal::derive(move || i18n.t_with("members.deleteMessage", &[("name", &name)]))
                        busy=deleting
                        on_confirm=Callback::new(move |_| delete_member(m.clone()))
                        on_cancel=Callback::new(move |_| pending_delete.set(None))
                    />
                }
            })}
        </div>
    }
}

fn member_query(scope: RowScope) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", MEMBER_SELECT.to_string())];
    query.extend(scope.filter());
    query.push(("order", "full_name".to_string()));
    query
}

async fn fetch_members(scope: RowScope) -> Result<Vec<MemberSummary>, ApiError> {
    let rows: Vec<MemberRecord> = get_rows(Member::collection_name(), &member_query(scope)).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_department::aggregate::DepartmentId;
    use contracts::domain::common::AggregateId;

    #[test]
    fn test_member_query_orders_by_name() {
        let q = member_query(RowScope::All);
        assert_eq!(q.first().map(|p| p.0), Some("select"));
        assert_eq!(q.last(), Some(&("order", "full_name".to_string())));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_member_query_department_scope() {
        let dept = DepartmentId::from_string("0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60").unwrap();
        let q = member_query(RowScope::Department(dept));
        assert_eq!(
            q[1],
            ("department_id", "eq.0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60".to_string())
        );
    }
}
