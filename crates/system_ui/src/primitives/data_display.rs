use super::*;

#[component]
/// Generic panel primitive.
pub fn Panel(
    #[prop(default = LayoutPadding::Md)] padding: LayoutPadding,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <section
            class=merge_layout_class("ui-panel", layout_class)
            data-ui-primitive="true"
            data-ui-kind="panel"
            data-ui-slot=ui_slot
            data-ui-padding=padding.token()
            role=role
            aria-label=aria_label
        >
            {children()}
        </section>
    }
}

#[component]
/// Shared text primitive.
pub fn Text(
    #[prop(default = TextRole::Body)] role: TextRole,
    #[prop(default = TextTone::Primary)] tone: TextTone,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] aria_role: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-text", layout_class)
            role=aria_role
            data-ui-primitive="true"
            data-ui-kind="text"
            data-ui-slot=ui_slot
            data-ui-variant=role.token()
            data-ui-tone=tone.token()
        >
            {children()}
        </span>
    }
}

#[component]
/// Shared heading primitive.
pub fn Heading(
    #[prop(default = TextRole::Title)] role: TextRole,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <h2
            class=merge_layout_class("ui-heading", layout_class)
            id=id
            data-ui-primitive="true"
            data-ui-kind="heading"
            data-ui-variant=role.token()
        >
            {children()}
        </h2>
    }
}

#[component]
/// Compact count/status badge.
pub fn Badge(
    #[prop(default = TextTone::Accent)] tone: TextTone,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-badge", layout_class)
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="badge"
            data-ui-tone=tone.token()
        >
            {children()}
        </span>
    }
}

#[component]
/// Empty state content block.
pub fn EmptyState(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] icon: Option<IconName>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-empty-state", layout_class)
            data-ui-primitive="true"
            data-ui-kind="empty-state"
        >
            {icon.map(|icon| view! { <Icon icon size=IconSize::Lg /> })}
            {children()}
        </div>
    }
}

#[component]
/// Indeterminate progress indicator with an accessible label.
pub fn LoadingIndicator(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] label: String,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-loading", layout_class)
            role="status"
            aria-live="polite"
            data-ui-primitive="true"
            data-ui-kind="loading"
        >
            <span data-ui-slot="spinner" aria-hidden="true"></span>
            <span data-ui-slot="label">{label}</span>
        </div>
    }
}

#[component]
/// List container.
pub fn ListSurface(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <ul
            class=merge_layout_class("ui-list", layout_class)
            role="list"
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="list"
        >
            {children()}
        </ul>
    }
}

#[component]
/// One list row. `on_contextmenu` backs per-row context menus.
pub fn ListRow(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] on_contextmenu: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <li
            class=merge_layout_class("ui-list-row", layout_class)
            data-ui-primitive="true"
            data-ui-kind="list-row"
            data-ui-selected=move || bool_token(selected.get())
            on:contextmenu=move |ev| {
                if let Some(on_contextmenu) = on_contextmenu.as_ref() {
                    on_contextmenu.call(ev);
                }
            }
        >
            {children()}
        </li>
    }
}
