use super::*;
use crate::{
    floating::FloatingWindowState,
    model::{LayoutMode, PointerPosition, ResizeCorner, Viewport, WindowConstraints},
};
use desktop_window_contract::{WindowController, WindowDimensions};
use system_ui::{
    IconName, ResizeHandle, WindowBody, WindowControlButton, WindowControls, WindowFrame,
    WindowTitle, WindowTitleBar,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary button for mice, primary contact for touch and pen.
fn accepts_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn resize_corner_slot(corner: ResizeCorner) -> &'static str {
    match corner {
        ResizeCorner::NorthWest => "north-west",
        ResizeCorner::NorthEast => "north-east",
        ResizeCorner::SouthWest => "south-west",
        ResizeCorner::SouthEast => "south-east",
    }
}

#[component]
/// Draggable, corner-resizable window that docks as a bottom sheet on narrow viewports.
///
/// Geometry lives in a per-window [`FloatingWindowState`]; committed geometry is reported through
/// [`WindowController::report_dimensions`].
pub fn FloatingWindow(
    controller: WindowController,
    #[prop(into)] title: String,
    constraints: WindowConstraints,
    initial_dimensions: WindowDimensions,
    #[prop(into)] viewport: Signal<Viewport>,
    #[prop(into)] z_index: Signal<u32>,
    #[prop(into)] focused: Signal<bool>,
    #[prop(into)] minimized: Signal<bool>,
    children: Children,
) -> impl IntoView {
    let dom_id = controller.window_id.dom_id();
    let title_id = format!("{dom_id}-title");
    let geometry = create_rw_signal(FloatingWindowState::new(
        constraints,
        viewport.get_untracked(),
        initial_dimensions,
    ));
    let controller = store_value(controller);

    let report = move |committed: Option<WindowDimensions>| {
        if let Some(dimensions) = committed {
            controller.with_value(|controller| controller.report_dimensions(dimensions));
        }
    };

    create_effect(move |_| {
        let viewport = viewport.get();
        let mut next = geometry.get_untracked();
        next.set_viewport(viewport);
        if next != geometry.get_untracked() {
            geometry.set(next);
        }
    });

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if !geometry.with_untracked(FloatingWindowState::is_interacting) {
            return;
        }
        let mut next = geometry.get_untracked();
        if next.update_pointer(pointer_from_pointer_event(&ev)) {
            geometry.set(next);
        }
    });
    on_cleanup(move || move_listener.remove());

    let finish_gesture = move || {
        let mut next = geometry.get_untracked();
        if !next.is_interacting() {
            return;
        }
        let committed = next.end_gesture();
        geometry.set(next);
        report(committed);
    };
    let up_listener = window_event_listener(ev::pointerup, move |_| finish_gesture());
    on_cleanup(move || up_listener.remove());
    let cancel_listener = window_event_listener(ev::pointercancel, move |_| finish_gesture());
    on_cleanup(move || cancel_listener.remove());

    let toggle_maximize = move || {
        let mut next = geometry.get_untracked();
        let committed = next.toggle_maximize();
        geometry.set(next);
        report(committed);
    };

    let focus = Callback::new(move |_: web_sys::PointerEvent| {
        if !focused.get_untracked() {
            controller.with_value(WindowController::focus);
        }
    });
    let begin_move = Callback::new(move |ev: web_sys::PointerEvent| {
        if !accepts_pointer(&ev) {
            return;
        }
        let mut next = geometry.get_untracked();
        if !next.begin_move(pointer_from_pointer_event(&ev)) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        geometry.set(next);
    });
    let begin_dock_resize = move |ev: web_sys::PointerEvent| {
        if !accepts_pointer(&ev) {
            return;
        }
        let mut next = geometry.get_untracked();
        if !next.begin_dock_resize(pointer_from_pointer_event(&ev)) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        geometry.set(next);
    };
    let titlebar_double_click = Callback::new(move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        toggle_maximize();
    });

    let style = Signal::derive(move || {
        let rect = geometry.with(FloatingWindowState::rendered_rect);
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            z_index.get()
        )
    });
    let layout_mode = Signal::derive(move || geometry.with(|state| state.layout_mode().token()));
    let maximized = Signal::derive(move || geometry.with(FloatingWindowState::is_maximized));
    let docked = move || geometry.with(|state| state.layout_mode() == LayoutMode::Docked);

    view! {
        <WindowFrame
            id=dom_id
            style=style
            aria_label=title.clone()
            layout_mode=layout_mode
            focused=focused
            minimized=minimized
            maximized=maximized
            on_pointerdown=focus
        >
            <Show when=docked fallback=|| ()>
                <div
                    class="floating-window-grabber"
                    role="separator"
                    aria-orientation="horizontal"
                    aria-label="Resize sheet"
                    on:pointerdown=begin_dock_resize
                ></div>
            </Show>
            <WindowTitleBar on_pointerdown=begin_move on_dblclick=titlebar_double_click>
                <WindowTitle id=title_id>{title}</WindowTitle>
                <WindowControls>
                    <WindowControlButton
                        icon=IconName::Minimize
                        aria_label="Minimize window"
                        on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                            stop_mouse_event(&ev);
                            controller.with_value(WindowController::minimize);
                        })
                    />
                    <Show when=move || !docked() fallback=|| ()>
                        {move || {
                            let is_maximized = maximized.get();
                            view! {
                                <WindowControlButton
                                    icon=if is_maximized { IconName::Restore } else { IconName::Maximize }
                                    aria_label=if is_maximized {
                                        "Restore window"
                                    } else {
                                        "Maximize window"
                                    }
                                    on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                                        stop_mouse_event(&ev);
                                        toggle_maximize();
                                    })
                                />
                            }
                        }}
                    </Show>
                    <WindowControlButton
                        icon=IconName::Close
                        aria_label="Close window"
                        on_click=Callback::new(move |ev: web_sys::MouseEvent| {
                            stop_mouse_event(&ev);
                            controller.with_value(WindowController::close);
                        })
                    />
                </WindowControls>
            </WindowTitleBar>
            <WindowBody>{children()}</WindowBody>
            <Show
                when=move || geometry.with(FloatingWindowState::can_resize_corners)
                fallback=|| ()
            >
                {ResizeCorner::ALL
                    .into_iter()
                    .map(|corner| {
                        let on_pointerdown = Callback::new(move |ev: web_sys::PointerEvent| {
                            if !accepts_pointer(&ev) {
                                return;
                            }
                            let mut next = geometry.get_untracked();
                            if !next.begin_resize(corner, pointer_from_pointer_event(&ev)) {
                                return;
                            }
                            try_set_pointer_capture(&ev);
                            ev.prevent_default();
                            ev.stop_propagation();
                            geometry.set(next);
                        });
                        view! {
                            <ResizeHandle edge=resize_corner_slot(corner) on_pointerdown=on_pointerdown />
                        }
                    })
                    .collect_view()}
            </Show>
        </WindowFrame>
    }
}
