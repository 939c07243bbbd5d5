use super::{
    a11y::{focus_element_by_id, focus_first_menu_item, handle_menu_roving_keydown},
    *,
};
use crate::{
    features::FeatureDescriptor,
    menus::{window_menus, FeatureViewState, MenuCommand, MenuEntry},
};
use system_ui::{Button, ButtonSize, ButtonVariant, MenuBar, MenuItem, MenuSeparator, MenuSurface};

#[component]
/// `File` / `View` menu bar of one feature window.
pub(super) fn WindowMenuBar(
    descriptor: &'static FeatureDescriptor,
    controller: WindowController,
    view_state: RwSignal<FeatureViewState>,
) -> impl IntoView {
    let menu_id_prefix = format!("{}-menu", controller.window_id.dom_id());
    let controller = store_value(controller);
    let open_menu = create_rw_signal(None::<&'static str>);

    let run = move |command: MenuCommand| {
        open_menu.set(None);
        match command {
            MenuCommand::Close => controller.with_value(WindowController::close),
            command => view_state.update(|view| view.apply(command)),
        }
    };

    let outside_listener = window_event_listener(ev::mousedown, move |_| {
        if open_menu.get_untracked().is_some() {
            open_menu.set(None);
        }
    });
    on_cleanup(move || outside_listener.remove());

    view! {
        <MenuBar aria_label="Window menu">
            {window_menus(descriptor)
                .into_iter()
                .map(|menu| {
                    let key = menu.id;
                    let menu_dom_id = format!("{menu_id_prefix}-{key}");
                    let trigger_id = format!("{menu_dom_id}-trigger");
                    let is_open = move || open_menu.get() == Some(key);

                    let focus_target = menu_dom_id.clone();
                    create_effect(move |was_open: Option<bool>| {
                        let open = is_open();
                        if open && was_open != Some(true) {
                            let target = focus_target.clone();
                            request_animation_frame(move || {
                                let _ = focus_first_menu_item(&target);
                            });
                        }
                        open
                    });

                    let entries = menu.entries;
                    let surface_id = menu_dom_id.clone();
                    let labelledby = trigger_id.clone();
                    view! {
                        <div class="window-menu" on:mousedown=|ev| ev.stop_propagation()>
                            <Button
                                id=trigger_id
                                variant=ButtonVariant::Quiet
                                size=ButtonSize::Sm
                                aria_haspopup="menu"
                                aria_controls=menu_dom_id
                                aria_expanded=Signal::derive(is_open)
                                on_click=Callback::new(move |_| {
                                    open_menu.update(|open| {
                                        *open = if *open == Some(key) { None } else { Some(key) };
                                    });
                                })
                            >
                                {menu.label}
                            </Button>
                            <Show when=is_open fallback=|| ()>
                                {
                                    let surface_id = surface_id.clone();
                                    let labelledby = labelledby.clone();
                                    let keyboard_menu_id = surface_id.clone();
                                    let trigger_id = labelledby.clone();
                                    let entries = entries.clone();
                                    view! {
                                        <MenuSurface
                                            id=surface_id.clone()
                                            aria_labelledby=labelledby
                                            on_keydown=Callback::new(move |ev: web_sys::KeyboardEvent| {
                                                if handle_menu_roving_keydown(&ev, &keyboard_menu_id) {
                                                    return;
                                                }
                                                if ev.key() == "Escape" {
                                                    ev.prevent_default();
                                                    ev.stop_propagation();
                                                    open_menu.set(None);
                                                    let _ = focus_element_by_id(&trigger_id);
                                                }
                                            })
                                        >
                                            {entries
                                                .iter()
                                                .enumerate()
                                                .map(|(index, entry)| match *entry {
                                                    MenuEntry::Item { label, command } => view! {
                                                        <MenuItem
                                                            id=format!("{surface_id}-item-{index}")
                                                            selected=Signal::derive(move || {
                                                                view_state.with(|view| view.is_selected(command))
                                                            })
                                                            on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                                                                stop_mouse_event(&ev);
                                                                run(command);
                                                            })
                                                        >
                                                            {label}
                                                        </MenuItem>
                                                    }
                                                    .into_view(),
                                                    MenuEntry::Separator => view! { <MenuSeparator /> }.into_view(),
                                                })
                                                .collect_view()}
                                        </MenuSurface>
                                    }
                                }
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </MenuBar>
    }
}

#[derive(Clone)]
/// One entry of a [`ContextMenuPopup`].
pub(super) struct ContextMenuEntry {
    pub label: &'static str,
    pub danger: bool,
    pub action: Callback<()>,
}

impl ContextMenuEntry {
    pub fn new(label: &'static str, action: impl Fn() + 'static) -> Self {
        Self {
            label,
            danger: false,
            action: Callback::new(move |()| action()),
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

#[component]
/// Positioned context menu. Closes on Escape, outside press, or after an entry runs.
pub(super) fn ContextMenuPopup(
    #[prop(into)] id: String,
    #[prop(into)] aria_label: String,
    position: PopupPosition,
    entries: Vec<ContextMenuEntry>,
    on_close: Callback<()>,
) -> impl IntoView {
    let focus_target = id.clone();
    request_animation_frame(move || {
        let _ = focus_first_menu_item(&focus_target);
    });

    let outside_listener = window_event_listener(ev::mousedown, move |_| on_close.call(()));
    on_cleanup(move || outside_listener.remove());

    let keyboard_menu_id = id.clone();
    view! {
        <div class="context-menu-anchor" on:mousedown=|ev| ev.stop_propagation()>
            <MenuSurface
                id=id.clone()
                aria_label=aria_label
                style=format!("position:fixed;left:{}px;top:{}px;", position.x, position.y)
                on_keydown=Callback::new(move |ev: web_sys::KeyboardEvent| {
                    if handle_menu_roving_keydown(&ev, &keyboard_menu_id) {
                        return;
                    }
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        ev.stop_propagation();
                        on_close.call(());
                    }
                })
            >
                {entries
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        let action = entry.action;
                        view! {
                            <MenuItem
                                id=format!("{id}-item-{index}")
                                danger=entry.danger
                                on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                                    stop_mouse_event(&ev);
                                    on_close.call(());
                                    action.call(());
                                })
                            >
                                {entry.label}
                            </MenuItem>
                        }
                    })
                    .collect_view()}
            </MenuSurface>
        </div>
    }
}
