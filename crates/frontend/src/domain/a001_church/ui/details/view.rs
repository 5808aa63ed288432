use super::model;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use contracts::domain::a001_church::aggregate::{ChurchDepartment, ChurchSummary};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Detail pane of a church
#[component]
pub fn ChurchDetails(church: ChurchSummary) -> impl IntoView {
    let i18n = use_i18n();
    let departments = RwSignal::new(Vec::<ChurchDepartment>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let id = church.id_string();
    spawn_local(async move {
        let result = model::fetch_church_departments(&id).await;
        let _ = loading.try_set(false);
        match result {
            Ok(list) => {
                let _ = departments.try_set(list);
            }
            Err(e) => {
                log::error!("failed to load departments of church {}: {}", id, e);
                let _ = error.try_set(Some(e.to_string()));
            }
        }
    });

    let c = church.church;
    let location = c.location.clone().filter(|l| !l.is_empty());
    let map_link = c.map_link.clone().filter(|l| !l.is_empty());

    view! {
        <div class="church-details">
            <div class="church-details__hero">
                <span class="church-details__badge">{icon("churches")}</span>
                <div>
                    <h2 class="church-details__name">{c.name.clone()}</h2>
                    <div class="church-details__location">
                        {icon("map-pin")}
                        {match location {
                            Some(l) => view! { <span>{l}</span> }.into_any(),
                            None => view! { <span>{move || i18n.t("churches.noLocation")}</span> }.into_any(),
                        }}
                    </div>
                    {map_link.map(|href| view! {
                        <a class="church-details__map" href=href target="_blank" rel="noopener noreferrer">
                            {move || i18n.t("churches.openMap")}
                        </a>
                    })}
                </div>
            </div>

            <div class="stat-row">
                <div class="stat">
                    <span class="stat__value">{church.member_count}</span>
                    <span class="stat__label">{move || i18n.t("churches.members")}</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || departments.with(Vec::len)}</span>
                    <span class="stat__label">{move || i18n.t("churches.departments")}</span>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show
                when=move || !loading.get()
                fallback=move || view! { <div class="notice notice--muted">{i18n.t("common.loading")}</div> }
            >
                <ul class="church-details__departments">
                    {move || departments.get().into_iter().map(|d| {
                        let staff = d.staff_count.to_string();
                        view! {
                            <li class="church-details__department">
                                <span>{d.name}</span>
                                <span class="badge">{move || i18n.t_with("departments.staffCount", &[("count", &staff)])}</span>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            </Show>
        </div>
    }
}
