//! Reducer actions, side-effect intents, and transition logic for the window manager.

use desktop_window_contract::{FeatureWindowKind, WindowDimensions, WindowInstanceId};
use thiserror::Error;

use crate::{
    features::feature_descriptor,
    floating::default_placement,
    model::{DesktopState, Viewport, WindowRecord},
    window_manager::{focus_window_internal, next_window_id, normalize_window_stack},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a feature window, or focus the existing one for single-instance kinds.
    OpenWindow {
        /// Feature to open.
        kind: FeatureWindowKind,
        /// Geometry to open with instead of the cascaded catalog default.
        initial_dimensions: Option<WindowDimensions>,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowInstanceId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowInstanceId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowInstanceId,
    },
    /// Restore a minimized window and focus it.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowInstanceId,
    },
    /// Taskbar button behavior: minimize when focused, otherwise restore and focus.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowInstanceId,
    },
    /// Record geometry committed by a floating window.
    SetDimensions {
        /// Window that reported.
        window_id: WindowInstanceId,
        /// Committed geometry.
        dimensions: WindowDimensions,
    },
    /// The desktop viewport was resized.
    ViewportChanged {
        /// New viewport.
        viewport: Viewport,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Remember the geometry for the next window of `kind`.
    DimensionsChanged {
        /// Feature kind of the window that changed.
        kind: FeatureWindowKind,
        /// New geometry.
        dimensions: WindowDimensions,
    },
    /// Move keyboard focus into the window's content.
    FocusWindowContent(WindowInstanceId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window `{0}` not found")]
    WindowNotFound(WindowInstanceId),
}

fn find_window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowInstanceId,
) -> Result<&'a mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

fn focus(state: &mut DesktopState, window_id: &WindowInstanceId) -> Result<(), ReducerError> {
    if focus_window_internal(state, window_id) {
        Ok(())
    } else {
        Err(ReducerError::WindowNotFound(window_id.clone()))
    }
}

/// Applies a [`DesktopAction`] to the window-manager state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not
/// present. The state is left untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow {
            kind,
            initial_dimensions,
        } => {
            let descriptor = feature_descriptor(kind);
            if descriptor.single_instance {
                if let Some(existing) = state.window_of_kind(kind).map(|w| w.id.clone()) {
                    focus(state, &existing)?;
                    effects.push(RuntimeEffect::FocusWindowContent(existing));
                    return Ok(effects);
                }
            }

            let dimensions = initial_dimensions.unwrap_or_else(|| {
                default_placement(&descriptor.constraints, state.viewport, state.windows.len())
            });
            let window_id = next_window_id(state, kind);
            state.windows.push(WindowRecord {
                id: window_id.clone(),
                kind,
                title: descriptor.title.clone(),
                z_index: 0,
                is_focused: false,
                minimized: false,
                dimensions,
            });
            focus(state, &window_id)?;
            effects.push(RuntimeEffect::FocusWindowContent(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() == before_len {
                return Err(ReducerError::WindowNotFound(window_id));
            }
            normalize_window_stack(state);
            if let Some(next) = state.focused_window_id() {
                effects.push(RuntimeEffect::FocusWindowContent(next));
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            focus(state, &window_id)?;
            effects.push(RuntimeEffect::FocusWindowContent(window_id));
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_window_mut(state, &window_id)?;
            window.minimized = true;
            window.is_focused = false;
            normalize_window_stack(state);
        }
        DesktopAction::RestoreWindow { window_id } => {
            find_window_mut(state, &window_id)?.minimized = false;
            focus(state, &window_id)?;
            effects.push(RuntimeEffect::FocusWindowContent(window_id));
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let focused = state.focused_window_id().as_ref() == Some(&window_id);
            let minimized = find_window_mut(state, &window_id)?.minimized;
            let next = if minimized {
                DesktopAction::RestoreWindow { window_id }
            } else if focused {
                DesktopAction::MinimizeWindow { window_id }
            } else {
                DesktopAction::FocusWindow { window_id }
            };
            effects.extend(reduce_desktop(state, next)?);
        }
        DesktopAction::SetDimensions {
            window_id,
            dimensions,
        } => {
            let window = find_window_mut(state, &window_id)?;
            if window.dimensions != dimensions {
                window.dimensions = dimensions;
                effects.push(RuntimeEffect::DimensionsChanged {
                    kind: window.kind,
                    dimensions,
                });
            }
        }
        DesktopAction::ViewportChanged { viewport } => {
            state.viewport = viewport;
        }
    }
    Ok(effects)
}
