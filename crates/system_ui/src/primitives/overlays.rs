use super::*;

#[component]
/// Overlay surface for menus and popups.
pub fn MenuSurface(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] aria_labelledby: Option<String>,
    #[prop(optional, into)] style: Option<String>,
    #[prop(optional)] node_ref: NodeRef<html::Div>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-surface", layout_class)
            id=id
            role="menu"
            aria-label=aria_label
            aria-labelledby=aria_labelledby
            style=style
            node_ref=node_ref
            data-ui-primitive="true"
            data-ui-kind="menu-surface"
            on:keydown=move |ev| {
                if let Some(on_keydown) = on_keydown.as_ref() {
                    on_keydown.call(ev);
                }
            }
        >
            {children()}
        </div>
    }
}

#[component]
/// Menu item. Items are reached by roving focus, so they sit outside the tab order.
pub fn MenuItem(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] danger: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            layout_class=layout_class.unwrap_or("")
            id=id.unwrap_or_default()
            role="menuitem"
            tabindex=-1
            disabled=disabled
            selected=selected
            ui_slot="menu-item"
            variant=if danger { ButtonVariant::Danger } else { ButtonVariant::Quiet }
            on_click=Callback::new(move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            })
        >
            {children()}
        </Button>
    }
}

#[component]
/// Menu separator.
pub fn MenuSeparator(#[prop(optional)] layout_class: Option<&'static str>) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-separator", layout_class)
            role="separator"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="menu-separator"
        ></div>
    }
}

#[component]
/// Modal dialog layer: a backdrop plus a labelled dialog container.
///
/// Behavior (focus trap, busy gating, dismissal) belongs to the caller; the primitive only reports
/// backdrop clicks and key presses and exposes the container through `node_ref`.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] alert: bool,
    #[prop(optional, into)] aria_labelledby: Option<String>,
    #[prop(optional, into)] aria_describedby: Option<String>,
    #[prop(optional, into)] busy: MaybeSignal<bool>,
    #[prop(optional)] node_ref: NodeRef<html::Div>,
    #[prop(optional)] on_backdrop_click: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="ui-modal-layer" data-ui-primitive="true" data-ui-kind="modal-layer">
            <div
                class="ui-modal-backdrop"
                aria-hidden="true"
                on:click=move |ev| {
                    if let Some(on_backdrop_click) = on_backdrop_click.as_ref() {
                        on_backdrop_click.call(ev);
                    }
                }
            ></div>
            <div
                class=merge_layout_class("ui-modal", layout_class)
                id=id
                role=if alert { "alertdialog" } else { "dialog" }
                aria-modal="true"
                aria-labelledby=aria_labelledby
                aria-describedby=aria_describedby
                aria-busy=move || bool_token(busy.get())
                node_ref=node_ref
                data-ui-primitive="true"
                data-ui-kind="modal"
                data-ui-state=move || if busy.get() { "busy" } else { "idle" }
                on:keydown=move |ev| {
                    if let Some(on_keydown) = on_keydown.as_ref() {
                        on_keydown.call(ev);
                    }
                }
            >
                {children()}
            </div>
        </div>
    }
}
