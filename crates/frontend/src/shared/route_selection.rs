//! URL-driven selection for master/detail pages.
//!
//! `/members/:id` means "member `id` is open". Selecting a row navigates to the
//! detail path and closing navigates back to the list path, so the browser's
//! back button closes the detail too.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::params::ParamsMap;
use leptos_router::NavigateOptions;

/// `/<base>/<id>`
pub fn detail_path(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), urlencoding::encode(id))
}

/// The item whose key equals `id`, if it is in the loaded collection.
pub fn find_selected<T, F>(items: &[T], id: Option<&str>, key: F) -> Option<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let id = id?;
    items.iter().find(|item| key(item) == id).cloned()
}

#[derive(Clone, Copy)]
pub struct RouteSelection {
    base: &'static str,
    params: Memo<ParamsMap>,
    navigate: StoredValue<Box<dyn Fn(&str)>, LocalStorage>,
}

impl RouteSelection {
    /// Value of the `:id` path parameter (reactive)
    pub fn selected_id(&self) -> Option<String> {
        self.params.with(|p| p.get("id"))
    }

    pub fn selected_id_untracked(&self) -> Option<String> {
        self.params.with_untracked(|p| p.get("id"))
    }

    pub fn select(&self, id: &str) {
        let path = detail_path(self.base, id);
        self.navigate.with_value(|navigate| navigate(&path));
    }

    pub fn close(&self) {
        let base = self.base;
        self.navigate.with_value(|navigate| navigate(base));
    }
}

pub fn use_route_selection(base: &'static str) -> RouteSelection {
    let navigate = use_navigate();
    let navigate: Box<dyn Fn(&str)> =
        Box::new(move |path: &str| navigate(path, NavigateOptions::default()));

    RouteSelection {
        base,
        params: use_params_map(),
        navigate: StoredValue::new_local(navigate),
    }
}

/// Keeps the last selected item after the selection is cleared, so the
/// detail pane still has content while it animates out.
pub fn use_sticky_selection<T>(selected: Memo<Option<T>>) -> ReadSignal<Option<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let (shown, set_shown) = signal(selected.get_untracked());
    Effect::new(move |_| {
        if let Some(item) = selected.get() {
            set_shown.set(Some(item));
        }
    });
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: &'static str,
        name: &'static str,
    }

    const ROWS: [Row; 2] = [
        Row { id: "a1", name: "Choir" },
        Row { id: "b2", name: "Youth" },
    ];

    #[test]
    fn test_detail_path() {
        assert_eq!(detail_path("/members", "abc"), "/members/abc");
        assert_eq!(detail_path("/members/", "abc"), "/members/abc");
        assert_eq!(detail_path("/departments", "a b"), "/departments/a%20b");
    }

    #[test]
    fn test_find_selected() {
        let key = |r: &Row| r.id.to_string();
        assert_eq!(find_selected(&ROWS, Some("b2"), key).map(|r| r.name), Some("Youth"));
        assert_eq!(find_selected(&ROWS, Some("zz"), key), None);
        assert_eq!(find_selected(&ROWS, None, key), None);
        assert_eq!(find_selected::<Row, _>(&[], Some("a1"), key), None);
    }
}
