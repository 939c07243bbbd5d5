//! Desktop shell UI composition and interaction surfaces.

pub(crate) mod a11y;
mod admin;
mod camera;
mod dialog;
mod feature_window;
mod menus;
mod notifications;
mod settings_panel;
mod taskbar;
mod window;

use desktop_window_contract::{FeatureWindowKind, WindowController, WindowInstanceId};
use leptos::*;
use system_ui::{DesktopRoot, DesktopWindowLayer};

pub use self::{
    dialog::{ConfirmDialog, ConfirmHandler, CreateDialog, CreateHandler, DialogVariant},
    feature_window::{use_feature_window, FeatureWindow, FeatureWindowContext},
    window::FloatingWindow,
};
use self::{
    admin::{GroupsList, OrganizationsList, SessionsList},
    camera::CameraCapture,
    feature_window::FeaturePlaceholder,
    notifications::NotificationCenter,
    settings_panel::SettingsPanel,
    taskbar::DesktopTaskbar,
};
pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
use crate::{features::feature_descriptor, reducer::DesktopAction, settings::SettingKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PopupPosition {
    x: i32,
    y: i32,
}

/// Keeps a popup of `popup_w`×`popup_h` inside the desktop area.
fn clamp_popup_position(
    runtime: DesktopRuntimeContext,
    x: i32,
    y: i32,
    popup_w: i32,
    popup_h: i32,
) -> PopupPosition {
    let viewport = runtime.state.with_untracked(|state| state.viewport);
    let max_x = (viewport.width - popup_w - 6).max(6);
    let max_y = (viewport.height + crate::model::TASKBAR_HEIGHT_PX - popup_h - 6).max(6);
    PopupPosition {
        x: x.clamp(6, max_x),
        y: y.clamp(6, max_y),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
/// Renders the desktop root, every open window and the taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let setting = move |key: SettingKey| Signal::derive(move || runtime.setting(key));

    view! {
        <DesktopRoot
            id="desktop-shell-root"
            theme=setting(SettingKey::Theme)
            window_opacity=setting(SettingKey::WindowOpacity)
            tooltips=setting(SettingKey::Tooltips)
            desktop_pattern=setting(SettingKey::DesktopPattern)
            desktop_icon_background=setting(SettingKey::DesktopIconBackground)
            border_radius=setting(SettingKey::BorderRadius)
        >
            <DesktopWindowLayer>
                <For
                    each=move || state.with(|state| {
                        state.windows.iter().map(|win| win.id.clone()).collect::<Vec<_>>()
                    })
                    key=|window_id| window_id.clone()
                    let:window_id
                >
                    <ManagedWindow window_id />
                </For>
            </DesktopWindowLayer>
            <DesktopTaskbar />
        </DesktopRoot>
    }
}

#[component]
fn ManagedWindow(window_id: WindowInstanceId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let Some(record) = state.with_untracked(|state| state.window(&window_id).cloned()) else {
        return ().into_view();
    };
    let descriptor = feature_descriptor(record.kind);

    let lookup = window_id.clone();
    let z_index = Signal::derive(move || {
        state.with(|state| state.window(&lookup).map_or(0, |win| win.z_index))
    });
    let lookup = window_id.clone();
    let focused = Signal::derive(move || {
        state.with(|state| state.window(&lookup).is_some_and(|win| win.is_focused))
    });
    let lookup = window_id.clone();
    let minimized = Signal::derive(move || {
        state.with(|state| state.window(&lookup).is_some_and(|win| win.minimized))
    });
    let viewport = Signal::derive(move || state.with(|state| state.viewport));

    let dispatch_for = |make: fn(WindowInstanceId) -> DesktopAction| {
        let window_id = window_id.clone();
        Callback::new(move |()| runtime.dispatch_action(make(window_id.clone())))
    };
    let report_id = window_id.clone();
    let controller = WindowController::new(
        window_id.clone(),
        dispatch_for(|window_id| DesktopAction::CloseWindow { window_id }),
        dispatch_for(|window_id| DesktopAction::MinimizeWindow { window_id }),
        dispatch_for(|window_id| DesktopAction::FocusWindow { window_id }),
    )
    .with_dimensions_change(Callback::new(move |dimensions| {
        runtime.dispatch_action(DesktopAction::SetDimensions {
            window_id: report_id.clone(),
            dimensions,
        });
    }));

    view! {
        <FloatingWindow
            controller=controller.clone()
            title=record.title.clone()
            constraints=descriptor.constraints
            initial_dimensions=record.dimensions
            viewport
            z_index
            focused
            minimized
        >
            <FeatureWindow kind=record.kind controller=controller.clone()>
                <FeatureContent kind=record.kind />
            </FeatureWindow>
        </FloatingWindow>
    }
    .into_view()
}

#[component]
fn FeatureContent(kind: FeatureWindowKind) -> impl IntoView {
    match kind {
        FeatureWindowKind::AdminOrganizations => view! { <OrganizationsList /> }.into_view(),
        FeatureWindowKind::AdminGroups => view! { <GroupsList /> }.into_view(),
        FeatureWindowKind::AdminSessions => view! { <SessionsList /> }.into_view(),
        FeatureWindowKind::Camera => view! { <CameraCapture /> }.into_view(),
        FeatureWindowKind::Settings => view! { <SettingsPanel /> }.into_view(),
        FeatureWindowKind::Notifications => view! { <NotificationCenter /> }.into_view(),
        _ => view! { <FeaturePlaceholder /> }.into_view(),
    }
}
