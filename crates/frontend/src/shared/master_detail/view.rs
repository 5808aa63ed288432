use super::controller::MasterDetailController;
use super::layout_mode::{min_width_query, use_layout_mode, LayoutMode, DEFAULT_BREAKPOINT_PX};
use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::portal::Portal;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Enter/exit duration used when the caller does not pass one
pub const DEFAULT_TRANSITION_MS: u32 = 300;

/// A `ModalFrame` dialog is mounted somewhere in the document.
fn dialog_open() -> bool {
    matches!(document().query_selector(".modal-overlay"), Ok(Some(_)))
}

/// Responsive list + detail screen.
///
/// - Split mode (viewport `>= breakpoint`): list and detail side by side, the
///   detail pane has its own header with `title`, `actions` and a close button.
/// - Overlay mode: the detail is a full-screen layer portalled to `<body>` with
///   a back button; the list stays mounted underneath.
///
/// Escape counts as a close gesture in both modes unless a dialog is open.
///
/// Visibility is owned by the caller: `is_open` tells whether a detail is
/// selected and `on_close` is called once per close gesture. The component
/// never closes on its own.
///
/// ```rust,ignore
/// view! {
///     <MasterDetailLayout
///         is_open=Signal::derive(move || selected.get().is_some())
///         on_close=Callback::new(move |_| navigate_back())
///         title=Signal::derive(move || selected_name())
///         detail=move || view! { <MemberDetails member=selected /> }
///     >
///         <MemberTable />
///     </MasterDetailLayout>
/// }
/// ```
#[component]
pub fn MasterDetailLayout(
    /// True while the caller has a selected entity to show
    #[prop(into)]
    is_open: Signal<bool>,
    /// Called once per close gesture; the caller flips `is_open`
    on_close: Callback<()>,
    /// Detail content, rendered while the detail region is mounted
    #[prop(into)]
    detail: ViewFn,
    /// Detail header title (defaults to "Details")
    #[prop(optional, into)]
    title: Option<Signal<String>>,
    /// Extra header controls shown next to the title
    #[prop(optional, into)]
    actions: Option<ViewFn>,
    /// Text of the split-mode placeholder
    #[prop(optional, into)]
    placeholder: Option<Signal<String>>,
    /// Split-mode threshold in CSS pixels
    #[prop(optional)]
    breakpoint: Option<f64>,
    /// Enter/exit duration in milliseconds
    #[prop(optional)]
    transition_ms: Option<u32>,
    /// List content, mounted once for the lifetime of the layout
    children: Children,
) -> impl IntoView {
    let breakpoint = breakpoint.unwrap_or(DEFAULT_BREAKPOINT_PX);
    let transition_ms = transition_ms.unwrap_or(DEFAULT_TRANSITION_MS);
    let title = title.unwrap_or_else(|| Signal::derive(|| "Details".to_string()));
    let placeholder = placeholder
        .unwrap_or_else(|| Signal::derive(|| "Select an item to view details".to_string()));

    let mode = use_layout_mode(breakpoint);
    let controller = RwSignal::new(MasterDetailController::new(mode.get_untracked()));

    // Layout mode: hard cut, phase untouched.
    Effect::new(move |_| {
        let next = mode.get();
        controller.maybe_update(|c| c.set_mode(next));
    });

    // Caller visibility drives the phase machine; a timer stands in for the
    // end of the CSS animation.
    Effect::new(move |_| {
        let open = is_open.get();
        let Some(ticket) = controller.try_update(|c| c.set_open(open)).flatten() else {
            return;
        };
        log::debug!("master-detail: {}", ticket.phase().as_str());
        spawn_local(async move {
            TimeoutFuture::new(transition_ms).await;
            controller.try_update(|c| c.complete(ticket));
        });
    });

    let plan = Memo::new(move |_| controller.with(|c| c.layout()));
    let is_split = Memo::new(move |_| plan.get().mode == LayoutMode::Split);

    let on_dismiss = Callback::new(move |_: ()| {
        controller.with_untracked(|c| c.dismiss(|| on_close.run(())));
    });

    let key_handle = window_event_listener(ev::keydown, move |ev| {
        if controller.with_untracked(|c| c.dismisses_on_key(&ev.key(), dialog_open())) {
            ev.prevent_default();
            on_dismiss.run(());
        }
    });
    on_cleanup(move || key_handle.remove());

    let covered = move || !plan.get().list_interactive;
    let split_placeholder = move || is_split.get() && plan.get().placeholder;
    let split_pane = move || is_split.get() && plan.get().detail_present;
    let layer_on = move || !is_split.get() && plan.get().overlay_layer;
    let pane_detail = detail.clone();
    let pane_actions = actions.clone();

    // The list is mounted once; mode and phase only restyle it.
    view! {
        <div
            class="master-detail"
            data-mode=move || plan.get().mode.as_str()
            data-phase=move || plan.get().phase.as_str()
            data-breakpoint=min_width_query(breakpoint)
            style=format!("--md-duration: {}ms;", transition_ms)
        >
            <div class="master-detail__row">
                <div
                    class="master-detail__list"
                    class:master-detail__list--covered=covered
                    aria-hidden=move || covered().to_string()
                    style:width=move || format!("{}%", plan.get().list_width_pct)
                    style:padding-right=move || format!("{}%", plan.get().placeholder_pct)
                >
                    {children()}
                </div>
                <Show when=split_placeholder>
                    <div
                        class="master-detail__placeholder"
                        style:width=move || format!("{}%", plan.get().placeholder_pct)
                    >
                        <div class="master-detail__placeholder-icon"></div>
                        <p>{move || placeholder.get()}</p>
                    </div>
                </Show>
                <Show when=split_pane>
                    {
                        let detail = pane_detail.clone();
                        let actions = pane_actions.clone();
                        view! {
                            <section class=move || {
                                format!("master-detail__pane master-detail__pane--{}", plan.get().phase.as_str())
                            }>
                                <header class="master-detail__header">
                                    <h2 class="master-detail__title">{move || title.get()}</h2>
                                    <div class="master-detail__actions">
                                        {actions.as_ref().map(|a| a.run())}
                                        <button
                                            class="master-detail__close"
                                            aria-label="Close"
                                            on:click=move |_| on_dismiss.run(())
                                        >
                                            {icon("close")}
                                        </button>
                                    </div>
                                </header>
                                <div class="master-detail__body">{detail.run()}</div>
                            </section>
                        }
                    }
                </Show>
            </div>
            <Show when=layer_on>
                {
                    let detail = detail.clone();
                    let actions = actions.clone();
                    view! {
                        <Portal>
                            <div
                                class=move || {
                                    format!("master-detail__layer master-detail__layer--{}", plan.get().phase.as_str())
                                }
                                role="dialog"
                                aria-modal="true"
                            >
                                <header class="master-detail__layer-header">
                                    <button
                                        class="master-detail__back"
                                        aria-label="Back"
                                        on:click=move |_| on_dismiss.run(())
                                    >
                                        {icon("arrow-left")}
                                    </button>
                                    <h2 class="master-detail__title">{move || title.get()}</h2>
                                    {actions.as_ref().map(|a| a.run())}
                                </header>
                                <div class="master-detail__layer-body">{detail.run()}</div>
                            </div>
                        </Portal>
                    }
                }
            </Show>
        </div>
    }
}
