use super::view_model::DepartmentFormViewModel;
use crate::shared::i18n::use_i18n;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_profile;
use contracts::domain::a002_department::aggregate::Department;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;

/// Create/edit dialog; `department` is `None` for a new one
#[component]
pub fn DepartmentForm(
    department: Option<Department>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let (default_church, user_id, picks_church) = profile.with_untracked(|p| match p {
        Some(p) => (p.church_id, Some(p.id), p.role.picks_church()),
        None => (None, None, false),
    });

    let vm = DepartmentFormViewModel::new(department, default_church);
    if picks_church {
        vm.load_churches();
    }

    let title = Signal::derive(move || {
        if vm.is_edit_mode() {
            i18n.t("departments.editTitle")
        } else {
            i18n.t("departments.addTitle")
        }
    });

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
                <div class="form-group">
                    <label for="department-name">{move || i18n.t("departments.name")}</label>
                    <input
                        type="text"
                        id="department-name"
                        prop:value=move || vm.form.with(|f| f.name.clone())
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        placeholder=move || i18n.t("departments.namePlaceholder")
                    />
                </div>

                <Show when=move || picks_church>
                    <div class="form-group">
                        <label for="department-church">{move || i18n.t("departments.church")}</label>
                        <select
                            id="department-church"
                            prop:value=move || vm.form.with(|f| f.church_id.clone())
                            on:change=move |ev| vm.form.update(|f| f.church_id = event_target_value(&ev))
                        >
                            <option value="">{move || i18n.t("departments.selectChurch")}</option>
                            <For
                                each=move || vm.churches.get()
                                key=|c| c.id
                                children=move |c| {
                                    view! { <option value=c.id.as_string()>{c.name}</option> }
                                }
                            />
                        </select>
                    </div>
                </Show>
            </div>
        </ModalFrame>
    }
}
