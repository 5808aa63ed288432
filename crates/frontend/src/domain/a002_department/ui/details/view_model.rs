use super::model;
use contracts::domain::a002_department::roster::DepartmentPerson;
use contracts::domain::common::search::filter_items;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy)]
pub struct DepartmentDetailsViewModel {
    pub roster: RwSignal<Vec<DepartmentPerson>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub filter: RwSignal<String>,
}

impl DepartmentDetailsViewModel {
    pub fn new() -> Self {
        Self {
            roster: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            filter: RwSignal::new(String::new()),
        }
    }

    pub fn load(&self, department_id: String) {
        let vm = *self;
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = model::fetch_roster(&department_id).await;
            // the pane may have been closed while the request was in flight
            let _ = vm.loading.try_set(false);
            match result {
                Ok(people) => {
                    let _ = vm.roster.try_set(people);
                }
                Err(e) => {
                    log::error!("failed to load roster of {}: {}", department_id, e);
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    }

    pub fn visible(&self) -> Vec<DepartmentPerson> {
        self.filter
            .with(|f| self.roster.with(|people| filter_items(people, f)))
    }

    pub fn staff_count(&self) -> usize {
        self.roster.with(|people| {
            people
                .iter()
                .filter(|p| matches!(p, DepartmentPerson::Staff(_)))
                .count()
        })
    }
}
