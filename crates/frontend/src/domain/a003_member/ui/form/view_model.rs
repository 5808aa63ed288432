use super::model;
use crate::shared::activity_logger::log_activity;
use crate::shared::api_utils::ApiError;
use contracts::domain::a002_department::aggregate::Department;
use contracts::domain::a003_member::aggregate::Member;
use contracts::domain::a003_member::form::{FormStep, MemberDraft};
use contracts::domain::a004_activity_log::aggregate::{ActionType, EntityType};
use contracts::domain::common::AggregateId;
use contracts::system::auth::{ProfileId, RowScope};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// State of the member registration form
#[derive(Clone, Copy)]
pub struct MemberFormViewModel {
    pub edit_id: StoredValue<Option<String>>,
    pub draft: RwSignal<MemberDraft>,
    /// Stored member being edited and its form image
    pub original: RwSignal<Option<(Member, MemberDraft)>>,
    pub step: RwSignal<FormStep>,
    pub departments: RwSignal<Vec<Department>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
}

impl MemberFormViewModel {
    /// `today` pre-fills the form date of a new registration
    pub fn new(edit_id: Option<String>, default_department: Option<String>, today: &str) -> Self {
        let loading = edit_id.is_some();
        Self {
            edit_id: StoredValue::new(edit_id),
            draft: RwSignal::new(MemberDraft::new(today, default_department)),
            original: RwSignal::new(None),
            step: RwSignal::new(FormStep::default()),
            departments: RwSignal::new(Vec::new()),
            loading: RwSignal::new(loading),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            submitting: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_id.with_value(Option::is_some)
    }

    /// Loads the departments and either the edited member or a saved draft.
    pub fn load(&self, scope: RowScope) {
        let vm = *self;
        spawn_local(async move {
            match model::fetch_departments(scope).await {
                Ok(list) => {
                    let _ = vm.departments.try_set(list);
                }
                Err(e) => log::error!("failed to load departments: {}", e),
            }
        });

        match self.edit_id.get_value() {
            Some(id) => spawn_local(async move {
                let result = model::fetch_member(&id).await;
                let _ = vm.loading.try_set(false);
                match result {
                    Ok(member) => {
                        let draft = MemberDraft::from_member(&member);
                        let _ = vm.draft.try_set(draft.clone());
                        let _ = vm.original.try_set(Some((member, draft)));
                    }
                    Err(e) => {
                        log::error!("failed to load member {}: {}", id, e);
                        let _ = vm.error.try_set(Some(e.to_string()));
                    }
                }
            }),
            None => {
                if let Some(draft) = model::load_draft() {
                    log::debug!("restored member draft");
                    self.draft.set(draft);
                    self.notice.set(Some("members.form.draftRestored".to_string()));
                }
            }
        }
    }

    /// New forms need a name; edits need a difference from the stored member.
    pub fn can_submit(&self) -> bool {
        if self.submitting.get() || self.loading.get() {
            return false;
        }
        match self.original.with(|o| o.as_ref().map(|(_, d)| d.clone())) {
            Some(original) => self.draft.with(|d| *d != original),
            None => !self.is_edit_mode() && self.draft.with(|d| !d.get("full_name").trim().is_empty()),
        }
    }

    pub fn go_to(&self, step: FormStep) {
        self.step.set(step);
    }

    pub fn next(&self) {
        if let Some(next) = self.step.get_untracked().next() {
            self.step.set(next);
        }
    }

    pub fn back(&self) {
        if let Some(prev) = self.step.get_untracked().prev() {
            self.step.set(prev);
        }
    }

    pub fn save_draft_command(&self) {
        let saved = self.draft.with_untracked(model::save_draft);
        self.notice.set(Some(
            if saved { "members.form.draftSaved" } else { "members.form.draftFailed" }.to_string(),
        ));
    }

    pub fn save_command(&self, user_id: Option<ProfileId>, church_id: Option<String>, on_saved: Callback<()>) {
        let current = self.draft.get_untracked();
        if let Err(e) = current.validate() {
            self.step.set(e.step);
            self.error.set(Some(e.message));
            return;
        }

        let original = self.original.get_untracked();
        let church_id = match (&original, church_id) {
            (Some((member, _)), _) => member.church_id.as_string(),
            (None, Some(c)) => c,
            (None, None) => {
                self.error.set(Some("Church is required".to_string()));
                return;
            }
        };

        let vm = *self;
        vm.error.set(None);
        vm.submitting.set(true);
        spawn_local(async move {
            let departments = vm.departments.get_untracked();
            let payload = current.payload(&church_id);
            let name = current.get("full_name").trim().to_string();
            let result: Result<(), ApiError> = match original {
                Some((member, before)) => {
                    let id = member.id.as_string();
                    match model::update_member(&id, &payload).await {
                        Ok(()) => {
                            let diff = current.changes(&before, |d| model::department_name(&departments, d));
                            if let Some(diff) = diff {
                                log_activity(
                                    user_id,
                                    ActionType::Update,
                                    EntityType::Member,
                                    format!("Updated member {} (Changed: {})", name, model::changed_fields(&diff)),
                                    Some(id),
                                    Some(diff),
                                )
                                .await;
                            }
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
                None => match model::create_member(&payload).await {
                    Ok(created) => {
                        log_activity(
                            user_id,
                            ActionType::Create,
                            EntityType::Member,
                            format!("Added new member {}", name),
                            Some(created.id.as_string()),
                            Some(model::created_changes(&current, &departments)),
                        )
                        .await;
                        model::clear_draft();
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
            };

            let _ = vm.submitting.try_set(false);
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => {
                    log::error!("failed to save member: {}", e);
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    }
}
