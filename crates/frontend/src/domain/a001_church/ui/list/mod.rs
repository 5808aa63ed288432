use crate::domain::a001_church::ui::details::ChurchDetails;
use crate::domain::a001_church::ui::form::ChurchForm;
use crate::shared::activity_logger::log_activity;
use crate::shared::api_utils::{delete_rows, eq, get_rows, ApiError};
use crate::shared::config::app_config;
use crate::shared::confirm_dialog::ConfirmDialog;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::master_detail::MasterDetailLayout;
use crate::shared::route_selection::{find_selected, use_route_selection, use_sticky_selection};
use crate::system::auth::context::use_profile;
use contracts::domain::a001_church::aggregate::{Church, ChurchRecord, ChurchSummary};
use contracts::domain::a004_activity_log::aggregate::{ActionType, EntityType};
use contracts::domain::common::search::filter_items;
use contracts::domain::common::AggregateRoot;
use contracts::system::auth::Section;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const CHURCH_SELECT: &str = "*,members(count)";

#[derive(Clone, Debug, PartialEq)]
enum FormTarget {
    Create,
    Edit(Church),
}

/// Directory of all churches, for super admins
#[component]
#[allow(non_snake_case)]
pub fn ChurchesPage() -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let selection = use_route_selection(Section::Churches.path());
    let layout = &app_config().layout;

    let items = RwSignal::new(Vec::<ChurchSummary>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());
    let form_target = RwSignal::new(None::<FormTarget>);
    let pending_delete = RwSignal::new(None::<ChurchSummary>);
    let deleting = RwSignal::new(false);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            let result = fetch_churches().await;
            let _ = loading.try_set(false);
            match result {
                Ok(rows) => {
                    let _ = items.try_set(rows);
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    log::error!("failed to load churches: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let filtered = Memo::new(move |_| filter.with(|f| items.with(|list| filter_items(list, f))));
    let selected = Memo::new(move |_| {
        let id = selection.selected_id();
        items.with(|list| find_selected(list, id.as_deref(), ChurchSummary::id_string))
    });
    let shown = use_sticky_selection(selected);
    let is_open = Signal::derive(move || selected.with(Option::is_some));

    let delete_church = move |c: ChurchSummary| {
        let user_id = profile.with_untracked(|p| p.as_ref().map(|p| p.id));
        deleting.set(true);
        spawn_local(async move {
            let id = c.id_string();
            match delete_rows(Church::collection_name(), &[eq("id", &id)]).await {
                Ok(()) => {
                    log_activity(
                        user_id,
                        ActionType::Delete,
                        EntityType::Church,
                        format!("Deleted church \"{}\"", c.church.name),
                        Some(id.clone()),
                        Some(serde_json::json!({
                            "name": c.church.name,
                            "location": c.church.location,
                        })),
                    )
                    .await;
                    if selection.selected_id_untracked().as_deref() == Some(id.as_str()) {
                        selection.close();
                    }
                    fetch();
                }
                Err(e) => {
                    log::error!("failed to delete church {}: {}", id, e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = deleting.try_set(false);
            let _ = pending_delete.try_set(None);
        });
    };

    let title = Signal::derive(move || {
        shown
            .with(|c| c.as_ref().map(|c| c.church.name.clone()))
            .unwrap_or_else(|| i18n.t("common.details"))
    });

    fetch();

    view! {
        <div class="page page--churches">
            <MasterDetailLayout
                is_open=is_open
                on_close=Callback::new(move |_| selection.close())
                title=title
                placeholder=Signal::derive(move || i18n.t("churches.selectPrompt"))
                breakpoint=layout.breakpoint_px
                transition_ms=layout.transition_ms
                actions=move || view! {
                    <button
                        class="icon-btn"
                        title=move || i18n.t("common.edit")
                        on:click=move |_| {
                            if let Some(c) = shown.get_untracked() {
                                form_target.set(Some(FormTarget::Edit(c.church)));
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
                    {move || shown.get().map(|c| view! { <ChurchDetails church=c /> })}
                }
            >
                <div class="header">
                    <div class="header__content">
                        <h1 class="header__title">{move || i18n.t("churches.title")}</h1>
                        <span class="header__counter">
                            {move || i18n.t_with("churches.count", &[("count", &items.with(Vec::len).to_string())])}
                        </span>
                    </div>
                    <div class="header__actions">
                        <SearchInput
                            value=filter
                            on_change=Callback::new(move |v: String| filter.set(v))
                            placeholder=Signal::derive(move || i18n.t("churches.search"))
                        />
                        <button class="icon-btn" title=move || i18n.t("common.refresh") on:click=move |_| fetch()>
                            {icon("refresh")}
                        </button>
                        <button class="btn btn--primary" on:click=move |_| form_target.set(Some(FormTarget::Create))>
                            {icon("plus")}
                            {move || i18n.t("churches.add")}
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
                        fallback=move || view! { <div class="empty-state">{i18n.t("churches.empty")}</div> }
                    >
                        <div class="card-grid">
                            {move || filtered.get().into_iter().map(|c| {
                                let id = c.id_string();
                                let id_for_click = id.clone();
                                let name = c.church.name.clone();
                                let location = c.church.location.clone().filter(|l| !l.is_empty());
                                let member_count = c.member_count;
                                view! {
                                    <div
                                        class="church-card"
                                        class:church-card--active=move || selection.selected_id().as_deref() == Some(id.as_str())
                                        on:click=move |_| selection.select(&id_for_click)
                                    >
                                        <div class="church-card__badge">{icon("churches")}</div>
                                        <div class="church-card__body">
                                            <div class="church-card__name">
                                                {move || highlight_matches(&name, &filter.get())}
                                            </div>
                                            <div class="church-card__location">
                                                {match location {
                                                    Some(l) => view! { <span>{l}</span> }.into_any(),
                                                    None => view! { <span>{move || i18n.t("churches.noLocation")}</span> }.into_any(),
                                                }}
                                            </div>
                                        </div>
                                        <span class="church-card__count" title=move || i18n.t("churches.members")>
                                            {icon("members")}{member_count}
                                        </span>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </Show>
                </Show>
            </MasterDetailLayout>

            {move || form_target.get().map(|target| {
                let church = match target {
                    FormTarget::Create => None,
                    FormTarget::Edit(c) => Some(c),
                };
                view! {
                    <ChurchForm
                        church=church
                        on_saved=Callback::new(move |_| {
                            form_target.set(None);
                            fetch();
                        })
                        on_cancel=Callback::new(move |_| form_target.set(None))
                    />
                }
            })}

            {move || pending_delete.get().map(|c| {
                let name = c.church.name.clone();
                view! {
                    <ConfirmDialog
                        title=Signal::derive(move || i18n.t("churches.deleteTitle"))
                        message=Signal::derive(move || i18n.t_with("churches.deleteMessage", &[("name", &name)]))
                        busy=deleting
                        on_confirm=Callback::new(move |_| delete_church(c.clone()))
                        on_cancel=Callback::new(move |_| pending_delete.set(None))
                    />
                }
            })}
        </div>
    }
}

fn church_query() -> Vec<(&'static str, String)> {
    vec![("select", CHURCH_SELECT.to_string()), ("order", "name".to_string())]
}

async fn fetch_churches() -> Result<Vec<ChurchSummary>, ApiError> {
    let rows: Vec<ChurchRecord> = get_rows(Church::collection_name(), &church_query()).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_church_query_counts_members() {
        assert_eq!(
            church_query(),
            vec![
                ("select", "*,members(count)".to_string()),
                ("order", "name".to_string()),
            ]
        );
    }
}
