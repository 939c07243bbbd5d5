use std::{future::Future, rc::Rc};

use futures::future::LocalBoxFuture;
use system_ui::{
    Button, ButtonVariant, FieldGroup, Heading, Modal, Text, TextField, TextRole, TextTone,
};

use super::{
    a11y::{active_html_element, focus_first_within, focus_html_element, handle_focus_trap_keydown},
    *,
};
use crate::dialog::{
    normalize_description, run_confirm, validate_name, ConfirmOutcome, DialogState, MountGuard,
    NAME_REQUIRED_MESSAGE,
};

/// Async action run when a [`ConfirmDialog`] is confirmed.
pub type ConfirmHandler = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<(), String>>>;

/// Async action run with the validated name and optional description of a [`CreateDialog`].
pub type CreateHandler =
    Rc<dyn Fn(String, Option<String>) -> LocalBoxFuture<'static, Result<(), String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogVariant {
    #[default]
    Default,
    Destructive,
}

/// Reactive wiring shared by every dialog: open-prop sync, focus handoff, dismissal and the
/// busy-gated confirm.
#[derive(Clone, Copy)]
struct DialogHandle {
    state: RwSignal<DialogState>,
    guard: StoredValue<MountGuard>,
    node_ref: NodeRef<html::Div>,
    on_open_change: Callback<bool>,
}

impl DialogHandle {
    fn new(open: Signal<bool>, on_open_change: Callback<bool>) -> Self {
        let state = create_rw_signal(DialogState::default());
        let guard = MountGuard::new();
        on_cleanup({
            let guard = guard.clone();
            move || guard.unmount()
        });
        let handle = Self {
            state,
            guard: store_value(guard),
            node_ref: create_node_ref::<html::Div>(),
            on_open_change,
        };

        create_effect(move |_| {
            let open = open.get();
            state.update(|state| {
                state.sync_open(open);
            });
        });

        let restore_focus = store_value(None::<web_sys::HtmlElement>);
        let is_open = create_memo(move |_| state.with(DialogState::is_open));
        create_effect(move |was_open: Option<bool>| {
            let now_open = is_open.get();
            match (was_open.unwrap_or(false), now_open) {
                (false, true) => {
                    restore_focus.set_value(active_html_element());
                    request_animation_frame(move || {
                        if let Some(container) = handle.node_ref.get_untracked() {
                            focus_first_within(&container);
                        }
                    });
                }
                (true, false) => {
                    if let Some(previous) = restore_focus.try_get_value().flatten() {
                        focus_html_element(&previous);
                    }
                    restore_focus.set_value(None);
                }
                _ => {}
            }
            now_open
        });

        handle
    }

    fn is_open(self) -> bool {
        self.state.with(DialogState::is_open)
    }

    fn busy(self) -> Signal<bool> {
        Signal::derive(move || self.state.with(DialogState::is_busy))
    }

    fn last_error(self) -> Option<String> {
        self.state.with(|state| state.last_error().map(str::to_string))
    }

    /// Cancel, Escape and backdrop clicks. Ignored while busy.
    fn dismiss(self) {
        if self.state.try_update(DialogState::request_dismiss) == Some(true) {
            self.on_open_change.call(false);
        }
    }

    fn reject(self, message: &str) {
        self.state.update(|state| {
            state.reject(message);
        });
    }

    fn confirm<F, Fut>(self, action: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = Result<(), String>> + 'static,
    {
        let Some(guard) = self.guard.try_get_value() else {
            return;
        };
        spawn_local(async move {
            let outcome = run_confirm(&self.state, &guard, action).await;
            if outcome == ConfirmOutcome::Closed && guard.is_mounted() {
                self.on_open_change.call(false);
            }
        });
    }

    fn on_keydown(self, ev: web_sys::KeyboardEvent) {
        match ev.key().as_str() {
            "Escape" => {
                ev.prevent_default();
                ev.stop_propagation();
                self.dismiss();
            }
            "Tab" => {
                if let Some(container) = self.node_ref.get_untracked() {
                    handle_focus_trap_keydown(&ev, &container);
                }
            }
            _ => {}
        }
    }
}

#[component]
/// Confirmation dialog with an async confirm action.
///
/// The dialog stays open and shows the error inline when the action fails; it closes through
/// `on_open_change(false)` when the action succeeds.
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    on_open_change: Callback<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(optional, into)] description: MaybeSignal<String>,
    #[prop(default = "Confirm".into(), into)] confirm_label: String,
    #[prop(default = "Working...".into(), into)] busy_label: String,
    #[prop(default = "Cancel".into(), into)] cancel_label: String,
    #[prop(optional)] variant: DialogVariant,
    #[prop(optional, into)] id: Option<String>,
    on_confirm: ConfirmHandler,
) -> impl IntoView {
    let dialog = DialogHandle::new(open, on_open_change);
    let busy = dialog.busy();
    let dialog_id = id.unwrap_or_else(|| "confirm-dialog".to_string());
    let on_confirm = store_value(on_confirm);
    let destructive = variant == DialogVariant::Destructive;
    let title = Signal::derive(move || title.get());
    let description = Signal::derive(move || description.get());

    let confirm = move || {
        let Some(handler) = on_confirm.try_get_value() else {
            return;
        };
        dialog.confirm(move || handler());
    };

    view! {
        <Show when=move || dialog.is_open() fallback=|| ()>
            {
                let title_id = format!("{dialog_id}-title");
                let description_id = format!("{dialog_id}-description");
                let confirm_label = confirm_label.clone();
                let busy_label = busy_label.clone();
                let cancel_label = cancel_label.clone();
                view! {
                    <Modal
                        id=dialog_id.clone()
                        alert=destructive
                        aria_labelledby=title_id.clone()
                        aria_describedby=description_id.clone()
                        busy=busy
                        node_ref=dialog.node_ref
                        on_backdrop_click=Callback::new(move |_| dialog.dismiss())
                        on_keydown=Callback::new(move |ev| dialog.on_keydown(ev))
                    >
                        <Heading id=title_id>{move || title.get()}</Heading>
                        <Text tone=TextTone::Secondary>
                            <span id=description_id>{move || description.get()}</span>
                        </Text>
                        {move || {
                            dialog
                                .last_error()
                                .map(|message| view! { <Text tone=TextTone::Danger aria_role="alert">{message}</Text> })
                        }}
                        <div class="dialog-actions">
                            <Button disabled=busy on_click=Callback::new(move |_| dialog.dismiss())>
                                {cancel_label.clone()}
                            </Button>
                            <Button
                                variant=if destructive { ButtonVariant::Danger } else { ButtonVariant::Primary }
                                disabled=busy
                                aria_busy=busy
                                on_click=Callback::new(move |_| confirm())
                            >
                                {move || if busy.get() { busy_label.clone() } else { confirm_label.clone() }}
                            </Button>
                        </div>
                    </Modal>
                }
            }
        </Show>
    }
}

#[component]
/// Dialog collecting a required name and an optional description before running `on_create`.
pub fn CreateDialog(
    #[prop(into)] open: Signal<bool>,
    on_open_change: Callback<bool>,
    #[prop(into)] title: String,
    #[prop(default = "Create".into(), into)] submit_label: String,
    #[prop(default = "Creating...".into(), into)] busy_label: String,
    #[prop(optional, into)] id: Option<String>,
    on_create: CreateHandler,
) -> impl IntoView {
    let dialog = DialogHandle::new(open, on_open_change);
    let busy = dialog.busy();
    let dialog_id = id.unwrap_or_else(|| "create-dialog".to_string());
    let on_create = store_value(on_create);
    let name = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());

    create_effect(move |was_open: Option<bool>| {
        let now_open = dialog.is_open();
        if now_open && was_open != Some(true) {
            name.set(String::new());
            description.set(String::new());
        }
        now_open
    });

    let submit = move || {
        if dialog.state.with_untracked(DialogState::is_busy) {
            return;
        }
        match validate_name(&name.get_untracked()) {
            Err(message) => dialog.reject(&message),
            Ok(valid_name) => {
                let Some(handler) = on_create.try_get_value() else {
                    return;
                };
                let details = normalize_description(&description.get_untracked());
                dialog.confirm(move || handler(valid_name, details));
            }
        }
    };
    let name_invalid = Signal::derive(move || {
        dialog.state.with(|state| state.last_error() == Some(NAME_REQUIRED_MESSAGE))
    });

    view! {
        <Show when=move || dialog.is_open() fallback=|| ()>
            {
                let title_id = format!("{dialog_id}-title");
                let name_id = format!("{dialog_id}-name");
                let submit_label = submit_label.clone();
                let busy_label = busy_label.clone();
                let title = title.clone();
                view! {
                    <Modal
                        id=dialog_id.clone()
                        aria_labelledby=title_id.clone()
                        busy=busy
                        node_ref=dialog.node_ref
                        on_backdrop_click=Callback::new(move |_| dialog.dismiss())
                        on_keydown=Callback::new(move |ev| dialog.on_keydown(ev))
                    >
                        <Heading id=title_id>{title.clone()}</Heading>
                        <FieldGroup title="Name">
                            <TextField
                                id=name_id
                                aria_label="Name"
                                value=name
                                disabled=busy
                                invalid=name_invalid
                                on_input=Callback::new(move |value| name.set(value))
                                on_keydown=Callback::new(move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        submit();
                                    }
                                })
                            />
                        </FieldGroup>
                        <FieldGroup title="Description" description="Optional">
                            <TextField
                                aria_label="Description"
                                value=description
                                disabled=busy
                                on_input=Callback::new(move |value| description.set(value))
                            />
                        </FieldGroup>
                        {move || {
                            dialog.last_error().map(|message| {
                                view! {
                                    <Text role=TextRole::Caption tone=TextTone::Danger aria_role="alert">
                                        {message}
                                    </Text>
                                }
                            })
                        }}
                        <div class="dialog-actions">
                            <Button disabled=busy on_click=Callback::new(move |_| dialog.dismiss())>
                                "Cancel"
                            </Button>
                            <Button
                                variant=ButtonVariant::Primary
                                disabled=busy
                                aria_busy=busy
                                on_click=Callback::new(move |_| submit())
                            >
                                {move || if busy.get() { busy_label.clone() } else { submit_label.clone() }}
                            </Button>
                        </div>
                    </Modal>
                }
            }
        </Show>
    }
}
