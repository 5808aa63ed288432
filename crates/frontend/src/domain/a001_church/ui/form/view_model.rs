use super::model;
use crate::shared::activity_logger::log_activity;
use crate::shared::api_utils::ApiError;
use contracts::domain::a001_church::aggregate::{Church, ChurchDto};
use contracts::domain::a004_activity_log::aggregate::{ActionType, EntityType};
use contracts::domain::common::AggregateId;
use contracts::system::auth::ProfileId;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// State of the create/edit church dialog
#[derive(Clone, Copy)]
pub struct ChurchFormViewModel {
    pub form: RwSignal<ChurchDto>,
    pub original: StoredValue<Option<Church>>,
    pub error: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
}

impl ChurchFormViewModel {
    pub fn new(original: Option<Church>) -> Self {
        let form = original.as_ref().map(ChurchDto::from_church).unwrap_or_default();
        Self {
            form: RwSignal::new(form),
            original: StoredValue::new(original),
            error: RwSignal::new(None),
            submitting: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.original.with_value(Option::is_some)
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting.get()
            && self
                .original
                .with_value(|o| self.form.with(|f| f.has_changes(o.as_ref())))
    }

    pub fn save_command(&self, user_id: Option<ProfileId>, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(msg) = current.validate() {
            self.error.set(Some(msg));
            return;
        }

        let vm = *self;
        vm.error.set(None);
        vm.submitting.set(true);
        spawn_local(async move {
            let result: Result<(), ApiError> = match vm.original.get_value() {
                Some(original) => {
                    let id = original.id.as_string();
                    match model::update_church(&id, &current).await {
                        Ok(()) => {
                            if let Some(diff) = model::updated_changes(&original, &current) {
                                log_activity(
                                    user_id,
                                    ActionType::Update,
                                    EntityType::Church,
                                    format!("Updated church {}", current.name.trim()),
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
                None => match model::create_church(&current).await {
                    Ok(created) => {
                        log_activity(
                            user_id,
                            ActionType::Create,
                            EntityType::Church,
                            model::created_details(&current),
                            Some(created.id.as_string()),
                            Some(current.to_row()),
                        )
                        .await;
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
            };

            let _ = vm.submitting.try_set(false);
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => {
                    log::error!("failed to save church: {}", e);
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    }
}
