use super::view_model::ChurchFormViewModel;
use crate::shared::i18n::use_i18n;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_profile;
use contracts::domain::a001_church::aggregate::{Church, ChurchDto};
use leptos::prelude::*;

/// Create/edit dialog; `church` is `None` for a new one
#[component]
pub fn ChurchForm(church: Option<Church>, on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let user_id = profile.with_untracked(|p| p.as_ref().map(|p| p.id));
    let vm = ChurchFormViewModel::new(church);

    let title = Signal::derive(move || {
        if vm.is_edit_mode() {
            i18n.t("churches.editTitle")
        } else {
            i18n.t("churches.addTitle")
        }
    });

    let text_field = move |id: &'static str, label: &'static str, get: fn(&ChurchDto) -> String, set: fn(&mut ChurchDto, String)| {
        view! {
            <div class="form-group">
                <label for=id>{move || i18n.t(label)}</label>
                <input
                    type="text"
                    id=id
                    prop:value=move || vm.form.with(get)
                    on:input=move |ev| vm.form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <ModalFrame
            on_close=on_cancel
            title=title
            modal_class="modal--form"
            footer=move || view! {
                <button class="btn" on:click=move |_| on_cancel.run(())>
                    {move || i18n.t("common.cancel")}
                </button>
                <button
                    class="btn btn--primary"
                    disabled=move || !vm.can_submit()
                    on:click=move |_| vm.save_command(user_id, on_saved)
                >
                    {move || if vm.submitting.get() { i18n.t("common.saving") } else { i18n.t("common.save") }}
                </button>
            }
        >
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                {text_field("church-name", "churches.name", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field("church-location", "churches.location", |f| f.location.clone(), |f, v| f.location = v)}
                {text_field("church-map-link", "churches.mapLink", |f| f.map_link.clone(), |f, v| f.map_link = v)}
            </div>
        </ModalFrame>
    }
}
