use super::view_model::MemberFormViewModel;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::route_selection::{detail_path, use_route_selection};
use crate::system::auth::context::use_profile;
use contracts::domain::a003_member::aggregate::ChildInfo;
use contracts::domain::a003_member::form::{non_empty, FieldKind, FormField, FormStep, MemberDraft, GENDER_OPTIONS};
use contracts::domain::common::AggregateId;
use contracts::system::auth::{RowScope, Section};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

pub const ADD_PATH: &str = "/members/add";

/// `/members/edit/<id>`
pub fn edit_path(id: &str) -> String {
    detail_path("/members/edit", id)
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Phone => "tel",
        FieldKind::Date => "date",
        FieldKind::Number => "number",
        _ => "text",
    }
}

/// Seven-step registration page; `/members/edit/:id` edits, `/members/add` registers.
#[component]
pub fn MemberFormPage() -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let params = use_params_map();
    let selection = use_route_selection(Section::Members.path());

    let edit_id = params.with_untracked(|p| p.get("id"));
    let (user_id, church_id, department_id, scope, can_edit) = profile.with_untracked(|p| match p {
        Some(p) => (
            Some(p.id),
            p.church_id.map(|c| c.as_string()),
            p.department_id.map(|d| d.as_string()),
            RowScope::departments_for(p),
            p.role.can_edit_members(),
        ),
        None => (None, None, None, RowScope::All, false),
    });

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let vm = MemberFormViewModel::new(edit_id.clone(), department_id, &today);
    if can_edit {
        vm.load(scope);
    }

    // Back to the member's detail when editing, to the list otherwise.
    let back_to = edit_id.clone();
    let leave = Callback::new(move |_: ()| match &back_to {
        Some(id) => selection.select(id),
        None => selection.close(),
    });

    let title = move || {
        if vm.is_edit_mode() {
            i18n.t("members.form.editTitle")
        } else {
            i18n.t("members.form.addTitle")
        }
    };
    let save = move || vm.save_command(user_id, church_id.clone(), leave);
    let save_top = save.clone();

    if !can_edit {
        return view! { <div class="notice notice--danger">{i18n.t("auth.accessDenied")}</div> }.into_any();
    }

    view! {
        <div class="page page--member-form">
            <div class="header">
                <div class="header__content">
                    <button class="icon-btn" title=move || i18n.t("common.back") on:click=move |_| leave.run(())>
                        {icon("arrow-left")}
                    </button>
                    <h1 class="header__title">{title}</h1>
                </div>
                <div class="header__actions">
                    <Show when=move || !vm.is_edit_mode()>
                        <button class="btn" on:click=move |_| vm.save_draft_command()>
                            {icon("save")}
                            {move || i18n.t("members.form.saveDraft")}
                        </button>
                    </Show>
                    <button
                        class="btn btn--primary"
                        disabled=move || !vm.can_submit()
                        on:click=move |_| save_top()
                    >
                        {move || if vm.submitting.get() { i18n.t("common.saving") } else { i18n.t("common.save") }}
                    </button>
                </div>
            </div>

            {move || vm.notice.get().map(|key| view! { <div class="notice notice--muted">{i18n.t(&key)}</div> })}
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show
                when=move || !vm.loading.get()
                fallback=move || view! { <div class="notice notice--muted">{i18n.t("common.loading")}</div> }
            >
                <ol class="stepper">
                    {FormStep::ALL.into_iter().map(|step| view! {
                        <li
                            class="stepper__step"
                            class:stepper__step--active=move || vm.step.get() == step
                            class:stepper__step--done={move || vm.step.get().index() > step.index()}
                            on:click=move |_| vm.go_to(step)
                        >
                            <span class="stepper__number">{step.index() + 1}</span>
                            <span class="stepper__title">{move || i18n.t(step.title_key())}</span>
                        </li>
                    }).collect_view()}
                </ol>

                <StepBody vm=vm />

                <div class="form-nav">
                    <button
                        class="btn"
                        disabled=move || vm.step.get().prev().is_none()
                        on:click=move |_| vm.back()
                    >
                        {move || i18n.t("common.back")}
                    </button>
                    {
                        let save = save.clone();
                        move || {
                            let save = save.clone();
                            if vm.step.get().is_last() {
                                view! {
                                    <button
                                        class="btn btn--primary"
                                        disabled=move || !vm.can_submit()
                                        on:click=move |_| save()
                                    >
                                        {move || i18n.t("common.save")}
                                    </button>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <button class="btn btn--primary" on:click=move |_| vm.next()>
                                        {move || i18n.t("common.next")}
                                    </button>
                                }
                                .into_any()
                            }
                        }
                    }
                </div>
            </Show>
        </div>
    }
    .into_any()
}

#[component]
fn StepBody(vm: MemberFormViewModel) -> impl IntoView {
    let i18n = use_i18n();
    let draft = vm.draft;
    // Re-rendered only when the set of fields changes, so inputs keep focus.
    let fields = Memo::new(move |_| {
        let step = vm.step.get();
        draft.with(|d| d.visible_fields(step))
    });

    view! {
        <section class="detail-section form-step">
            <h3 class="detail-section__title">{move || i18n.t(vm.step.get().title_key())}</h3>
            <div class="details-form">
                {move || fields.get().into_iter().map(|field| view! { <FieldInput field=field draft=draft /> }).collect_view()}

                <Show when=move || vm.step.get() == FormStep::Personal>
                    <div class="form-group">
                        <label for="member-department">{move || i18n.t("member.fields.department")}</label>
                        <select
                            id="member-department"
                            prop:value=move || draft.with(|d| d.get("department_id"))
                            on:change=move |ev| draft.update(|d| d.set("department_id", &event_target_value(&ev)))
                        >
                            <option value="">{move || i18n.t("members.form.noDepartment")}</option>
                            <For
                                each=move || vm.departments.get()
                                key=|d| d.id
                                children=move |d| view! { <option value=d.id.as_string()>{d.name}</option> }
                            />
                        </select>
                    </div>
                </Show>
            </div>

            <Show when=move || vm.step.get() == FormStep::Family>
                <ChildrenEditor draft=draft />
            </Show>
        </section>
    }
}

#[component]
fn FieldInput(field: FormField, draft: RwSignal<MemberDraft>) -> impl IntoView {
    let i18n = use_i18n();
    let column = field.column;
    let id = format!("member-{}", column.replace('_', "-"));
    let label_key = field.label_key();
    let value = move || draft.with(|d| d.get(column));
    let set = move |v: String| draft.update(|d| d.set(column, &v));

    let control = match field.kind {
        FieldKind::Choice(options) => view! {
            <select id=id.clone() prop:value=value on:change=move |ev| set(event_target_value(&ev))>
                <option value="">"-"</option>
                {options.iter().map(|o| view! { <option value=*o>{*o}</option> }).collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::LongText => view! {
            <textarea id=id.clone() rows="3" prop:value=value on:input=move |ev| set(event_target_value(&ev))></textarea>
        }
        .into_any(),
        kind => view! {
            <input
                type=input_type(kind)
                id=id.clone()
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-group">
            <label for=id>{move || i18n.t(&label_key)}</label>
            {control}
        </div>
    }
}

#[component]
fn ChildrenEditor(draft: RwSignal<MemberDraft>) -> impl IntoView {
    let i18n = use_i18n();
    let count = Memo::new(move |_| draft.with(|d| d.children.len()));

    view! {
        <div class="children-editor">
            <div class="children-editor__header">
                <h4>{move || i18n.t("member.children.title")}</h4>
                <button class="btn" on:click=move |_| draft.update(MemberDraft::add_child)>
                    {icon("plus")}
                    {move || i18n.t("member.children.add")}
                </button>
            </div>
            {move || (0..count.get()).map(|index| view! { <ChildRow index=index draft=draft /> }).collect_view()}
        </div>
    }
}

#[component]
fn ChildRow(index: usize, draft: RwSignal<MemberDraft>) -> impl IntoView {
    let i18n = use_i18n();
    let read = move |f: fn(&ChildInfo) -> Option<String>| {
        move || draft.with(|d| d.children.get(index).and_then(f).unwrap_or_default())
    };
    let name = read(|c| Some(c.name.clone()));
    let gender = read(|c| c.gender.clone());
    let age = read(|c| c.age.clone());
    let education = read(|c| c.education.clone());
    let faith = read(|c| c.faith.clone());

    let update = move |f: fn(&mut ChildInfo, String)| {
        move |ev: leptos::ev::Event| {
            let v = event_target_value(&ev);
            draft.update(|d| {
                if let Some(c) = d.children.get_mut(index) {
                    f(c, v);
                }
            });
        }
    };

    view! {
        <div class="children-editor__row">
            <input
                type="text"
                placeholder=move || i18n.t("member.children.name")
                prop:value=name
                on:input=update(|c, v| c.name = v)
            />
            <select prop:value=gender on:change=update(|c, v| c.gender = non_empty(&v))>
                <option value="">{move || i18n.t("member.children.gender")}</option>
                {GENDER_OPTIONS.iter().map(|o| view! { <option value=*o>{*o}</option> }).collect_view()}
            </select>
            <input
                type="text"
                placeholder=move || i18n.t("member.children.age")
                prop:value=age
                on:input=update(|c, v| c.age = non_empty(&v))
            />
            <input
                type="text"
                placeholder=move || i18n.t("member.children.education")
                prop:value=education
                on:input=update(|c, v| c.education = non_empty(&v))
            />
            <input
                type="text"
                placeholder=move || i18n.t("member.children.faith")
                prop:value=faith
                on:input=update(|c, v| c.faith = non_empty(&v))
            />
            <button
                class="icon-btn icon-btn--danger"
                title=move || i18n.t("common.delete")
                on:click=move |_| draft.update(|d| d.remove_child(index))
            >
                {icon("delete")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_paths() {
        assert_eq!(edit_path("42"), "/members/edit/42");
        assert_eq!(ADD_PATH, format!("{}/add", Section::Members.path()));
    }

    #[test]
    fn test_input_types() {
        assert_eq!(input_type(FieldKind::Date), "date");
        assert_eq!(input_type(FieldKind::Number), "number");
        assert_eq!(input_type(FieldKind::LongText), "text");
    }
}
