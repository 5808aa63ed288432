/// List helpers shared by the master panes: search box and match highlighting
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Byte ranges of case-insensitive occurrences of `filter` in `text`.
///
/// Only returned when lower-casing keeps byte offsets stable; otherwise the
/// text is shown without highlighting.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.trim().to_lowercase();
    let haystack = text.to_lowercase();
    if needle.is_empty() || haystack.len() != text.len() {
        return Vec::new();
    }
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        ranges.push((start, end));
        from = end;
    }
    ranges
}

/// Highlight occurrences of `filter` inside `text`
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    for (start, end) in ranges {
        if start > last {
            parts.push(view! { <span>{text[last..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-hit">{text[start..end].to_string()}</mark> }.into_any());
        last = end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter (as applied by the parent)
    #[prop(into)]
    value: Signal<String>,
    /// Receives the debounced text
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: Option<Signal<String>>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(value.get_untracked());
    // Only the latest keystroke's timer may publish.
    let generation = StoredValue::new(0_u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let mine = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(mine) {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=move || !value.get().trim().is_empty()>
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                placeholder=move || placeholder.map(|p| p.get()).unwrap_or_default()
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter>
                    {crate::shared::icons::icon("close")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(match_ranges("Sunday School", "s"), vec![(0, 1), (7, 8)]);
        assert_eq!(match_ranges("Choir", "OIR"), vec![(2, 5)]);
    }

    #[test]
    fn test_match_ranges_blank_filter() {
        assert!(match_ranges("Choir", "  ").is_empty());
        assert!(match_ranges("Choir", "youth").is_empty());
    }
}
