use crate::shared::api_utils::{get_rows, ApiError};
use crate::shared::date_utils::format_timestamp;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::palette::{initials, member_palette};
use crate::shared::time_ago::time_ago_from_now;
use crate::system::auth::context::use_profile;
use contracts::domain::a004_activity_log::aggregate::{ActionType, ActivityLog};
use contracts::domain::a004_activity_log::feed::{change_lines, ActivityLogRecord};
use contracts::domain::common::{AggregateRoot, Searchable};
use contracts::system::auth::CalendarType;
use leptos::prelude::*;
use std::collections::HashSet;
use wasm_bindgen_futures::spawn_local;

const FEED_SELECT: &str = "*,profiles:user_id(full_name,avatar_url,role)";
const FEED_LIMIT: usize = 100;

const FILTERABLE_ACTIONS: [ActionType; 6] = [
    ActionType::Create,
    ActionType::Update,
    ActionType::Delete,
    ActionType::Block,
    ActionType::Unblock,
    ActionType::RoleChange,
];

#[component]
#[allow(non_snake_case)]
pub fn ActivitiesPage() -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let calendar = Signal::derive(move || {
        profile.with(|p| p.as_ref().map(|p| p.calendar()).unwrap_or_default())
    });

    let items = RwSignal::new(Vec::<ActivityLogRecord>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(String::new());
    let action = RwSignal::new(None::<ActionType>);
    let expanded = RwSignal::new(HashSet::<String>::new());

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            let result = fetch_feed().await;
            let _ = loading.try_set(false);
            match result {
                Ok(rows) => {
                    let _ = items.try_set(rows);
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    log::error!("failed to load activity feed: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let visible = Memo::new(move |_| {
        let f = filter.get();
        action.with(|a| {
            items.with(|list| {
                list.iter()
                    .filter(|r| r.has_action(a.as_ref()) && r.matches_filter(&f))
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    });

    let toggle = move |id: String| {
        expanded.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
            }
        });
    };

    fetch();

    view! {
        <div class="page page--activities">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{move || i18n.t("activities.title")}</h1>
                    <span class="header__counter">
                        {move || i18n.t_with(
                            "activities.count",
                            &[("count", &visible.with(Vec::len).to_string())],
                        )}
                    </span>
                </div>
                <div class="header__actions">
                    <select
                        class="select"
                        on:change=move |ev| {
                            let v = event_target_value(&ev);
                            action.set((!v.is_empty()).then(|| ActionType::from(v)));
                        }
                    >
                        <option value="" selected=move || action.with(Option::is_none)>
                            {move || i18n.t("activities.allActions")}
                        </option>
                        {FILTERABLE_ACTIONS.iter().map(|a| {
                            let code = a.as_str().to_string();
                            let label = a.label();
                            let a = a.clone();
                            view! {
                                <option value=code selected=move || action.with(|cur| cur.as_ref() == Some(&a))>
                                    {label}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                    <SearchInput
                        value=filter
                        on_change=Callback::new(move |v: String| filter.set(v))
                        placeholder=Signal::derive(move || i18n.t("activities.search"))
                    />
                    <button class="icon-btn" title=move || i18n.t("common.refresh") on:click=move |_| fetch()>
                        {icon("refresh")}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show
                when=move || !(loading.get() && items.with(Vec::is_empty))
                fallback=move || view! { <div class="notice notice--muted">{i18n.t("common.loading")}</div> }
            >
                <Show
                    when=move || !visible.with(Vec::is_empty)
                    fallback=move || view! { <div class="empty-state">{i18n.t("activities.empty")}</div> }
                >
                    <ul class="activity-feed">
                        {move || visible.get().into_iter().map(|record| {
                            view! { <ActivityRow record=record calendar=calendar filter=filter expanded=expanded on_toggle=toggle /> }
                        }).collect_view()}
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn ActivityRow<F>(
    record: ActivityLogRecord,
    calendar: Signal<CalendarType>,
    filter: RwSignal<String>,
    expanded: RwSignal<HashSet<String>>,
    on_toggle: F,
) -> impl IntoView
where
    F: Fn(String) + Copy + Send + Sync + 'static,
{
    let i18n = use_i18n();
    let id = record.log.id.to_string();
    let id_for_check = id.clone();
    let is_expanded = Memo::new(move |_| expanded.with(|set| set.contains(&id_for_check)));

    let actor = record
        .actor_name()
        .map(str::to_string)
        .unwrap_or_else(|| i18n.t("activities.system"));
    let palette = member_palette(&actor);
    let badge = initials(&actor);
    let avatar = record.profiles.as_ref().and_then(|p| p.avatar_url.clone());
    let role_key = record
        .profiles
        .as_ref()
        .and_then(|p| p.role)
        .map(|r| r.label_key());

    let action = record.log.action_type.clone();
    let tone = format!("badge badge--{}", action.tone());
    let entity = record.log.entity_type.label();
    let details = record.log.details.clone().unwrap_or_default();
    let created_at = record.log.created_at;
    let lines = record.log.changes.as_ref().map(change_lines).unwrap_or_default();
    let has_changes = !lines.is_empty();
    let lines = StoredValue::new(lines);

    view! {
        <li class="activity-row">
            {match avatar {
                Some(url) => view! { <img class="avatar avatar--photo" src=url alt=actor.clone() /> }.into_any(),
                None => view! {
                    <span class="avatar" style=format!("background: {}", palette.avatar_background())>{badge}</span>
                }.into_any(),
            }}
            <div class="activity-row__body">
                <div class="activity-row__headline">
                    <span class="activity-row__actor">{actor}</span>
                    {role_key.map(|key| view! {
                        <span class="activity-row__role">{move || i18n.t(key)}</span>
                    })}
                    <span class=tone>{action.label()}</span>
                    <span class="activity-row__entity">{entity}</span>
                </div>
                <div class="activity-row__details">
                    {move || highlight_matches(&details, &filter.get())}
                </div>
                <div class="activity-row__meta">
                    <time title=move || format_timestamp(created_at, calendar.get())>
                        {time_ago_from_now(created_at)}
                    </time>
                    <Show when=move || has_changes>
                        <button
                            class="link-btn"
                            on:click={
                                let id = id.clone();
                                move |_| on_toggle(id.clone())
                            }
                        >
                            {move || if is_expanded.get() {
                                i18n.t("activities.hideChanges")
                            } else {
                                i18n.t("activities.showChanges")
                            }}
                        </button>
                    </Show>
                </div>
                <Show when=move || is_expanded.get()>
                    <dl class="activity-row__changes">
                        {lines.get_value().into_iter().map(|line| view! {
                            <dt>{line.field}</dt>
                            <dd>
                                {line.before.map(|b| view! {
                                    <span class="change--before">{b}</span>
                                    <span class="change__arrow">"→"</span>
                                })}
                                <span class="change--after">{line.after}</span>
                            </dd>
                        }).collect_view()}
                    </dl>
                </Show>
            </div>
        </li>
    }
}

fn feed_query() -> Vec<(&'static str, String)> {
    vec![
        ("select", FEED_SELECT.to_string()),
        ("order", "created_at.desc".to_string()),
        ("limit", FEED_LIMIT.to_string()),
    ]
}

async fn fetch_feed() -> Result<Vec<ActivityLogRecord>, ApiError> {
    get_rows(ActivityLog::collection_name(), &feed_query()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_query_newest_first_and_capped() {
        let q = feed_query();
        assert!(q.contains(&("order", "created_at.desc".to_string())));
        assert!(q.contains(&("limit", "100".to_string())));
    }

    #[test]
    fn test_filterable_actions_round_trip_through_select_values() {
        for a in FILTERABLE_ACTIONS.iter() {
            assert_eq!(&ActionType::from(a.as_str().to_string()), a);
        }
    }
}
