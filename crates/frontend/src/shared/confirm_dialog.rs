use crate::shared::i18n::use_i18n;
use crate::shared::modal_frame::ModalFrame;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmTone {
    #[default]
    Danger,
    Warning,
    Info,
}

impl ConfirmTone {
    fn class(&self) -> &'static str {
        match self {
            ConfirmTone::Danger => "btn btn--danger",
            ConfirmTone::Warning => "btn btn--warning",
            ConfirmTone::Info => "btn btn--primary",
        }
    }
}

/// Yes/no question shown before destructive actions
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] message: Signal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional)] tone: ConfirmTone,
    /// Disables both buttons while the action runs
    #[prop(optional, into)]
    busy: Option<Signal<bool>>,
) -> impl IntoView {
    let i18n = use_i18n();
    let busy = busy.unwrap_or_else(|| Signal::derive(|| false));

    view! {
        <ModalFrame
            on_close=on_cancel
            title=title
            modal_class="modal--confirm"
            footer=move || view! {
                <button class="btn" disabled=move || busy.get() on:click=move |_| on_cancel.run(())>
                    {move || i18n.t("common.cancel")}
                </button>
                <button class=tone.class() disabled=move || busy.get() on:click=move |_| on_confirm.run(())>
                    {move || i18n.t("common.confirm")}
                </button>
            }
        >
            <p class="confirm-dialog__message">{move || message.get()}</p>
        </ModalFrame>
    }
}
