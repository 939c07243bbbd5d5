use super::{notifications::NotificationTrigger, *};
use crate::{features::launcher_features, model::WindowRecord};
use system_ui::{Icon, IconName, IconSize, Taskbar, TaskbarButton, Text, TextRole, TextTone};

fn taskbar_window_button_dom_id(window_id: &WindowInstanceId) -> String {
    format!("taskbar-window-button-{}", window_id.as_str())
}

fn taskbar_window_aria_label(win: &WindowRecord) -> String {
    let status = if win.minimized {
        "minimized"
    } else if win.is_focused {
        "active"
    } else {
        "open"
    };
    format!("{} ({status})", win.title)
}

fn database_status_label(status: &platform_host::DatabaseStatus) -> &'static str {
    if status.is_loading {
        "Database loading"
    } else if status.is_unlocked {
        "Database unlocked"
    } else {
        "Database locked"
    }
}

fn account_status_label(status: &platform_host::AuthStatus) -> String {
    match (&status.user_email, status.is_authenticated) {
        (_, false) if status.is_loading => "Checking session".to_string(),
        (Some(email), true) => format!("Sign out {email}"),
        (None, true) => "Sign out".to_string(),
        (_, false) => "Signed out".to_string(),
    }
}

#[component]
fn AccountStatusButton() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let status = runtime.auth_status;
    let pending = create_rw_signal(false);

    let logout = move || {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        spawn_local(async move {
            if let Err(err) = runtime.logout().await {
                logging::warn!("sign out failed: {err}");
            }
            pending.try_set(false);
        });
    };

    view! {
        <TaskbarButton
            ui_slot="account-status"
            aria_label=Signal::derive(move || status.with(account_status_label))
            title=Signal::derive(move || status.with(account_status_label))
            selected=Signal::derive(move || status.with(|status| status.is_authenticated))
            on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                stop_mouse_event(&ev);
                if status.with_untracked(|status| status.is_authenticated) {
                    logout();
                }
            })
        >
            <Icon icon=IconName::User size=IconSize::Sm />
        </TaskbarButton>
    }
}

#[component]
fn DatabaseStatusButton() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let status = runtime.database_status;
    let pending = create_rw_signal(false);

    let lock = move || {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        spawn_local(async move {
            if let Err(err) = runtime.lock_database().await {
                logging::warn!("database lock failed: {err}");
            }
            pending.try_set(false);
        });
    };

    view! {
        <TaskbarButton
            ui_slot="database-status"
            aria_label=Signal::derive(move || status.with(database_status_label).to_string())
            title=Signal::derive(move || {
                status.with(|status| match &status.current_instance_id {
                    Some(instance) => format!("{} ({instance})", database_status_label(status)),
                    None => database_status_label(status).to_string(),
                })
            })
            selected=Signal::derive(move || status.with(|status| status.is_unlocked))
            on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                stop_mouse_event(&ev);
                if status.with_untracked(|status| status.is_unlocked) {
                    lock();
                }
            })
        >
            <Icon icon=IconName::Lock size=IconSize::Sm />
        </TaskbarButton>
    }
}

#[component]
/// Desktop taskbar: feature launchers, one button per open window, and status controls.
pub(super) fn DesktopTaskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <Taskbar aria_label="Taskbar">
            <div class="taskbar-launchers" role="group" aria-label="Launch">
                {launcher_features()
                    .map(|descriptor| {
                        let kind = descriptor.kind;
                        view! {
                            <TaskbarButton
                                ui_slot="launcher"
                                id=format!("taskbar-launch-{}", kind.token())
                                aria_label=format!("Open {}", descriptor.title)
                                title=descriptor.title.clone()
                                on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                                    stop_mouse_event(&ev);
                                    runtime.open_feature(kind);
                                })
                            >
                                <Text role=TextRole::Label>{descriptor.title.clone()}</Text>
                            </TaskbarButton>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="taskbar-windows" role="group" aria-label="Open windows">
                <For
                    each=move || state.with(|state| state.windows.clone())
                    key=|win| (win.id.clone(), win.title.clone(), win.is_focused, win.minimized)
                    let:win
                >
                    {
                        let window_id = win.id.clone();
                        view! {
                            <TaskbarButton
                                id=taskbar_window_button_dom_id(&win.id)
                                aria_label=taskbar_window_aria_label(&win)
                                title=win.title.clone()
                                selected=win.is_focused && !win.minimized
                                on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                                    stop_mouse_event(&ev);
                                    runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow {
                                        window_id: window_id.clone(),
                                    });
                                })
                            >
                                <Text
                                    role=TextRole::Label
                                    tone=if win.minimized { TextTone::Secondary } else { TextTone::Primary }
                                >
                                    {win.title.clone()}
                                </Text>
                            </TaskbarButton>
                        }
                    }
                </For>
            </div>
            <div class="taskbar-tray" role="group" aria-label="Status">
                <DatabaseStatusButton />
                <AccountStatusButton />
                <NotificationTrigger />
            </div>
        </Taskbar>
    }
}

#[cfg(test)]
mod tests {
    use desktop_window_contract::{FeatureWindowKind, WindowDimensions, WindowRect};
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(minimized: bool, is_focused: bool) -> WindowRecord {
        WindowRecord {
            id: WindowInstanceId::new("contacts-1"),
            kind: FeatureWindowKind::Contacts,
            title: "Contacts".to_string(),
            z_index: 1,
            is_focused,
            minimized,
            dimensions: WindowDimensions::from_rect(WindowRect {
                x: 0,
                y: 0,
                width: 400,
                height: 300,
            }),
        }
    }

    #[test]
    fn account_button_offers_sign_out_only_when_signed_in() {
        let signed_in = platform_host::AuthStatus {
            is_loading: false,
            is_authenticated: true,
            user_email: Some("ada@example.com".to_string()),
        };
        assert_eq!(account_status_label(&signed_in), "Sign out ada@example.com");
        assert_eq!(
            account_status_label(&platform_host::AuthStatus::default()),
            "Signed out"
        );
        assert_eq!(
            account_status_label(&platform_host::AuthStatus {
                is_loading: true,
                ..Default::default()
            }),
            "Checking session"
        );
    }

    #[test]
    fn window_buttons_describe_their_state() {
        assert_eq!(taskbar_window_aria_label(&record(false, true)), "Contacts (active)");
        assert_eq!(taskbar_window_aria_label(&record(true, false)), "Contacts (minimized)");
        assert_eq!(taskbar_window_aria_label(&record(false, false)), "Contacts (open)");
        assert_eq!(
            taskbar_window_button_dom_id(&WindowInstanceId::new("contacts-1")),
            "taskbar-window-button-contacts-1"
        );
    }
}
