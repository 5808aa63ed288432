use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Dialog surface over a dimmed overlay.
///
/// Closes on Escape and on a click that both starts and ends on the overlay,
/// so selecting text inside the dialog and releasing outside keeps it open.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    /// Header text; no header is rendered when absent
    #[prop(optional, into)]
    title: Option<Signal<String>>,
    /// Extra class for the surface (`div.modal`)
    #[prop(optional, into)]
    modal_class: Option<String>,
    /// Footer row, typically the action buttons
    #[prop(optional, into)]
    footer: Option<ViewFn>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    // Defer to the next tick: the overlay may be removed during its own dispatch.
    let close_later = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let key_handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close_later();
        }
    });
    on_cleanup(move || key_handle.remove());

    let is_direct = |ev: &ev::MouseEvent| matches!((ev.target(), ev.current_target()), (Some(t), Some(ct)) if t == ct);

    let class = match modal_class {
        Some(extra) => format!("modal {extra}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct(&ev))
            on:click=move |ev| {
                let should_close = overlay_mouse_down.get_untracked() && is_direct(&ev);
                overlay_mouse_down.set(false);
                if should_close {
                    close_later();
                }
            }
        >
            <div class=class role="dialog" aria-modal="true" on:click=|ev| ev.stop_propagation()>
                {title.map(|text| view! {
                    <div class="modal__header">
                        <h3 class="modal__title">{move || text.get()}</h3>
                        <button class="icon-btn" on:click=move |_| on_close.run(())>
                            {crate::shared::icons::icon("close")}
                        </button>
                    </div>
                })}
                <div class="modal__body">{children()}</div>
                {footer.map(|footer| view! { <div class="modal__footer">{footer.run()}</div> })}
            </div>
        </div>
    }
}
