use super::model;
use crate::shared::activity_logger::log_activity;
use crate::shared::api_utils::ApiError;
use contracts::domain::a001_church::aggregate::{Church, ChurchId};
use contracts::domain::a002_department::aggregate::{Department, DepartmentDto};
use contracts::domain::a004_activity_log::aggregate::{ActionType, EntityType};
use contracts::domain::common::AggregateId;
use contracts::system::auth::ProfileId;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// State of the create/edit department dialog
#[derive(Clone, Copy)]
pub struct DepartmentFormViewModel {
    pub form: RwSignal<DepartmentDto>,
    pub original: StoredValue<Option<Department>>,
    pub churches: RwSignal<Vec<Church>>,
    pub error: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
}

impl DepartmentFormViewModel {
    /// `default_church` pre-fills new departments for accounts bound to a church
    pub fn new(original: Option<Department>, default_church: Option<ChurchId>) -> Self {
        let form = match &original {
            Some(d) => DepartmentDto::from_department(d),
            None => DepartmentDto {
                church_id: default_church.map(|c| c.as_string()).unwrap_or_default(),
                ..Default::default()
            },
        };
        Self {
            form: RwSignal::new(form),
            original: StoredValue::new(original),
            churches: RwSignal::new(Vec::new()),
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

    pub fn load_churches(&self) {
        let churches = self.churches;
        let error = self.error;
        spawn_local(async move {
            match model::fetch_churches().await {
                Ok(list) => churches.set(list),
                Err(e) => {
                    log::error!("failed to load churches: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        });
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
            let churches = vm.churches.get_untracked();
            let original = vm.original.get_value();
            let result: Result<(), ApiError> = match original {
                Some(original) => {
                    let id = original.id.as_string();
                    match model::update_department(&id, &current).await {
                        Ok(()) => {
                            if let Some(diff) = model::updated_changes(&original, &current, &churches) {
                                log_activity(
                                    user_id,
                                    ActionType::Update,
                                    EntityType::Department,
                                    format!("Updated department {}", current.name.trim()),
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
                None => match model::create_department(&current).await {
                    Ok(created) => {
                        log_activity(
                            user_id,
                            ActionType::Create,
                            EntityType::Department,
                            format!("Added new department {}", current.name.trim()),
                            Some(created.id.as_string()),
                            Some(model::created_changes(&current, &churches)),
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
                    log::error!("failed to save department: {}", e);
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    }
}
