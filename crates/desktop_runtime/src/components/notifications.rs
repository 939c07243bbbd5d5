use super::{
    menus::{ContextMenuEntry, ContextMenuPopup},
    *,
};
use crate::notifications::{
    badge_label, badge_title, Notification, NotificationAction, NotificationLevel,
    NotificationState,
};
use system_ui::{
    Badge, Button, ButtonSize, EmptyState, Icon, IconName, IconSize, ListRow, ListSurface, Panel,
    TaskbarButton, Text, TextRole, TextTone, ToolBar,
};

const TRIGGER_ID: &str = "notification-trigger";
const TRIGGER_MENU_ID: &str = "notification-trigger-menu";

fn dispatch_notification(runtime: DesktopRuntimeContext, action: NotificationAction) {
    runtime
        .notifications
        .with_value(|store| store.dispatch(action));
}

/// Opens the notification center, raises it when it is behind, or closes it when it is on top.
fn toggle_notification_center(runtime: DesktopRuntimeContext) {
    let existing = runtime.state.with_untracked(|state| {
        state
            .window_of_kind(FeatureWindowKind::Notifications)
            .map(|win| (win.id.clone(), win.is_focused && !win.minimized))
    });
    match existing {
        None => runtime.open_feature(FeatureWindowKind::Notifications),
        Some((window_id, true)) => {
            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
        }
        Some((window_id, false)) => {
            runtime.dispatch_action(DesktopAction::RestoreWindow { window_id });
        }
    }
}

fn level_tone(level: NotificationLevel) -> TextTone {
    match level {
        NotificationLevel::Info | NotificationLevel::Success => TextTone::Accent,
        NotificationLevel::Warning | NotificationLevel::Error => TextTone::Danger,
    }
}

#[component]
/// Taskbar bell with the unread badge and a quick-actions context menu.
pub(super) fn NotificationTrigger() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let unread = create_memo(move |_| {
        runtime
            .notification_state
            .with(NotificationState::unread_count)
    });
    let menu = create_rw_signal(None::<PopupPosition>);

    let entries = move || {
        vec![
            ContextMenuEntry::new("Mark all as read", move || {
                runtime.notifications.with_value(|store| store.mark_all_as_read());
            }),
            ContextMenuEntry::new("Dismiss all", move || {
                runtime.notifications.with_value(|store| store.dismiss_all());
            }),
            ContextMenuEntry::new("Open notification center", move || {
                runtime.open_feature(FeatureWindowKind::Notifications);
            }),
        ]
    };

    view! {
        <TaskbarButton
            id=TRIGGER_ID
            ui_slot="notification-trigger"
            aria_label=Signal::derive(move || badge_title(unread.get()))
            title=Signal::derive(move || badge_title(unread.get()))
            aria_haspopup="menu"
            aria_expanded=Signal::derive(move || menu.with(Option::is_some))
            on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                stop_mouse_event(&ev);
                toggle_notification_center(runtime);
            })
            on_contextmenu=Callback::new(move |ev: web_sys::MouseEvent| {
                stop_mouse_event(&ev);
                menu.set(Some(clamp_popup_position(runtime, ev.client_x(), ev.client_y(), 240, 140)));
            })
        >
            <Icon icon=IconName::Bell size=IconSize::Sm />
            {move || badge_label(unread.get()).map(|label| view! { <Badge>{label}</Badge> })}
        </TaskbarButton>
        {move || {
            menu.get()
                .map(|position| {
                    view! {
                        <ContextMenuPopup
                            id=TRIGGER_MENU_ID
                            aria_label="Notification actions"
                            position
                            entries=entries()
                            on_close=Callback::new(move |()| menu.set(None))
                        />
                    }
                })
        }}
    }
}

#[component]
fn NotificationRow(notification: Notification) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Notification {
        id,
        title,
        message,
        level,
        read,
        ..
    } = notification;
    let mark_id = id.clone();

    view! {
        <ListRow layout_class="notification-row" selected=!read>
            <Text tone=level_tone(level) role=TextRole::Label>{title}</Text>
            <Text tone=TextTone::Secondary>{message}</Text>
            <ToolBar aria_label="Notification actions">
                <Show when=move || !read fallback=|| ()>
                    {
                        let mark_id = mark_id.clone();
                        view! {
                            <Button
                                size=ButtonSize::Sm
                                on_click=Callback::new(move |_| {
                                    dispatch_notification(runtime, NotificationAction::MarkAsRead(mark_id.clone()));
                                })
                            >
                                "Mark as read"
                            </Button>
                        }
                    }
                </Show>
                <Button
                    size=ButtonSize::Sm
                    leading_icon=IconName::Close
                    aria_label="Dismiss notification"
                    on_click=Callback::new(move |_| {
                        dispatch_notification(runtime, NotificationAction::Dismiss(id.clone()));
                    })
                >
                    "Dismiss"
                </Button>
            </ToolBar>
        </ListRow>
    }
}

#[component]
/// Notification center window content, newest first.
pub(super) fn NotificationCenter() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.notification_state;
    let is_empty = move || state.with(|state| state.items.is_empty());

    view! {
        <Panel layout_class="notification-center" role="region" aria_label="Notifications">
            <ToolBar aria_label="Notification center actions">
                <Button
                    size=ButtonSize::Sm
                    disabled=Signal::derive(move || state.with(|state| state.unread_count() == 0))
                    on_click=Callback::new(move |_| dispatch_notification(runtime, NotificationAction::MarkAllAsRead))
                >
                    "Mark all as read"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    leading_icon=IconName::Trash
                    disabled=Signal::derive(is_empty)
                    on_click=Callback::new(move |_| dispatch_notification(runtime, NotificationAction::DismissAll))
                >
                    "Dismiss all"
                </Button>
            </ToolBar>
            <Show
                when=move || !is_empty()
                fallback=|| {
                    view! {
                        <EmptyState icon=IconName::Bell>
                            <Text tone=TextTone::Secondary>"No notifications"</Text>
                        </EmptyState>
                    }
                }
            >
                <ListSurface aria_label="Notifications">
                    <For
                        each=move || state.with(|state| state.newest_first().cloned().collect::<Vec<_>>())
                        key=|notification| (notification.id.clone(), notification.read)
                        let:notification
                    >
                        <NotificationRow notification />
                    </For>
                </ListSurface>
            </Show>
        </Panel>
    }
}
