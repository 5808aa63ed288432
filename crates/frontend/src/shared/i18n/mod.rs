//! Localisation: English and Amharic dictionaries, dotted key lookup and a
//! context object holding the active language.
//!
//! Language preference is persisted in localStorage and, when a profile
//! carries one, adopted from the signed-in user.

use leptos::prelude::*;
use once_cell::sync::Lazy;
use serde_json::Value;
use web_sys::window;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Language {
    #[default]
    En,
    Am,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Am => "am",
        }
    }

    /// Native name shown in the language picker
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Am => "አማርኛ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "am" => Some(Language::Am),
            _ => None,
        }
    }

    pub fn all() -> [Language; 2] {
        [Language::En, Language::Am]
    }
}

fn parse_dictionary(name: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("locale {} is not valid JSON: {}", name, e);
        Value::Null
    })
}

static EN: Lazy<Value> = Lazy::new(|| parse_dictionary("en", include_str!("locales/en.json")));
static AM: Lazy<Value> = Lazy::new(|| parse_dictionary("am", include_str!("locales/am.json")));

fn dictionary(language: Language) -> &'static Value {
    match language {
        Language::En => &EN,
        Language::Am => &AM,
    }
}

/// Walk a dotted path (`"nav.members"`) down a JSON object.
pub fn lookup<'a>(dict: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(dict, |node, key| node.get(key))
        .and_then(Value::as_str)
}

/// Replace every `{{key}}` placeholder with its value.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{}}}}}", key), value)
    })
}

/// Translate `path`; a missing key is logged and the path itself returned.
pub fn translate(language: Language, path: &str, params: &[(&str, &str)]) -> String {
    match lookup(dictionary(language), path) {
        Some(template) => interpolate(template, params),
        None => {
            log::warn!("translation key not found: {} ({})", path, language.code());
            path.to_string()
        }
    }
}

const LANGUAGE_STORAGE_KEY: &str = "church-language";

fn load_language_from_storage() -> Language {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(LANGUAGE_STORAGE_KEY).ok().flatten())
        .and_then(|code| Language::from_code(&code))
        .unwrap_or_default()
}

fn save_language_to_storage(language: Language) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(LANGUAGE_STORAGE_KEY, language.code());
    }
}

fn apply_document_lang(language: Language) {
    if let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("lang", language.code());
    }
}

#[derive(Clone, Copy)]
pub struct LanguageContext {
    pub language: RwSignal<Language>,
}

impl LanguageContext {
    /// Switch language and persist the choice.
    pub fn set_language(&self, language: Language) {
        self.language.set(language);
        save_language_to_storage(language);
        apply_document_lang(language);
    }

    /// Adopt the language stored on a profile, if it names a known one.
    pub fn adopt_profile_language(&self, code: Option<&str>) {
        if let Some(language) = code.and_then(Language::from_code) {
            if self.language.get_untracked() != language {
                self.set_language(language);
            }
        }
    }

    /// Reactive translation of `path`
    pub fn t(&self, path: &str) -> String {
        translate(self.language.get(), path, &[])
    }

    pub fn t_with(&self, path: &str, params: &[(&str, &str)]) -> String {
        translate(self.language.get(), path, params)
    }
}

#[component]
pub fn LanguageProvider(children: Children) -> impl IntoView {
    let initial = load_language_from_storage();
    apply_document_lang(initial);
    provide_context(LanguageContext {
        language: RwSignal::new(initial),
    });

    children()
}

pub fn use_i18n() -> LanguageContext {
    use_context::<LanguageContext>()
        .expect("LanguageContext not found. Wrap your app with LanguageProvider.")
}

/// Header control switching between the available languages
#[component]
pub fn LanguagePicker(
    /// Called after the language switched, e.g. to store it on the profile
    #[prop(optional)]
    on_change: Option<Callback<Language>>,
) -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <label class="language-picker" title=move || i18n.t("header.language")>
            {crate::shared::icons::icon("globe")}
            <select
                class="language-picker__select"
                prop:value=move || i18n.language.get().code()
                on:change=move |ev| {
                    if let Some(language) = Language::from_code(&event_target_value(&ev)) {
                        i18n.set_language(language);
                        if let Some(cb) = on_change {
                            cb.run(language);
                        }
                    }
                }
            >
                {Language::all().into_iter().map(|language| view! {
                    <option value=language.code()>{language.native_name()}</option>
                }).collect_view()}
            </select>
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_walks_nested_objects() {
        let dict = json!({ "nav": { "members": "Members" }, "flat": "x" });
        assert_eq!(lookup(&dict, "nav.members"), Some("Members"));
        assert_eq!(lookup(&dict, "flat"), Some("x"));
        assert_eq!(lookup(&dict, "nav.unknown"), None);
        // an object is not a translation
        assert_eq!(lookup(&dict, "nav"), None);
    }

    #[test]
    fn test_interpolate_replaces_placeholders() {
        assert_eq!(
            interpolate("Delete {{name}}? {{name}} will be gone", &[("name", "Choir")]),
            "Delete Choir? Choir will be gone"
        );
        assert_eq!(interpolate("{{count}} people", &[]), "{{count}} people");
    }

    #[test]
    fn test_missing_key_returns_path() {
        assert_eq!(translate(Language::En, "no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn test_both_dictionaries_cover_navigation() {
        for language in Language::all() {
            for key in ["nav.churches", "nav.members", "nav.departments", "nav.activities", "common.details", "common.next"] {
                assert!(
                    lookup(dictionary(language), key).is_some(),
                    "{} missing in {}",
                    key,
                    language.code()
                );
            }
        }
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("am"), Some(Language::Am));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::default().code(), "en");
    }
}
