//! Shared window-manager transition helpers used by the desktop reducer.

use desktop_window_contract::{FeatureWindowKind, WindowInstanceId};

use crate::model::DesktopState;

/// Focuses and raises `window_id`, ensuring it is the top/focused non-minimized window.
///
/// Returns `false` when the window does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: &WindowInstanceId) -> bool {
    let Some(index) = state.windows.iter().position(|w| &w.id == window_id) else {
        return false;
    };

    let already_focused_top = index + 1 == state.windows.len()
        && state
            .windows
            .get(index)
            .map(|w| w.is_focused && !w.minimized)
            .unwrap_or(false);
    if already_focused_top {
        return true;
    }

    for window in &mut state.windows {
        window.is_focused = false;
    }
    let mut window = state.windows.remove(index);
    window.is_focused = true;
    window.minimized = false;
    state.windows.push(window);
    normalize_window_stack(state);
    true
}

/// Normalizes z-index ordering and focus invariants for all managed windows.
///
/// After this runs `z_index == position + 1`, minimized windows are unfocused, and exactly one
/// window is focused whenever any window is visible: the topmost visible one if none claimed focus.
pub fn normalize_window_stack(state: &mut DesktopState) {
    let mut has_focused = false;
    for (idx, window) in state.windows.iter_mut().enumerate() {
        window.z_index = (idx + 1) as u32;
        if window.minimized {
            window.is_focused = false;
        }
        if window.is_focused {
            if has_focused {
                window.is_focused = false;
            } else {
                has_focused = true;
            }
        }
    }

    if !has_focused {
        if let Some(last_non_minimized) = state.windows.iter_mut().rev().find(|w| !w.minimized) {
            last_non_minimized.is_focused = true;
        }
    }
}

/// Allocates the next `<kind>-<n>` window id.
pub fn next_window_id(state: &mut DesktopState, kind: FeatureWindowKind) -> WindowInstanceId {
    state.next_window_seq += 1;
    WindowInstanceId::new(format!("{}-{}", kind.token(), state.next_window_seq))
}

#[cfg(test)]
mod tests {
    use desktop_window_contract::{WindowDimensions, WindowRect};

    use super::*;
    use crate::model::WindowRecord;

    fn record(id: &str, focused: bool, minimized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowInstanceId::new(id),
            kind: FeatureWindowKind::Help,
            title: id.to_string(),
            z_index: 0,
            is_focused: focused,
            minimized,
            dimensions: WindowDimensions::from_rect(WindowRect {
                x: 0,
                y: 0,
                width: 100,
                height: 100,
            }),
        }
    }

    #[test]
    fn normalize_keeps_single_focus_and_skips_minimized() {
        let mut state = DesktopState {
            windows: vec![
                record("a", true, false),
                record("b", true, false),
                record("c", false, true),
            ],
            ..DesktopState::default()
        };
        normalize_window_stack(&mut state);
        let focused: Vec<_> = state.windows.iter().filter(|w| w.is_focused).collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].id.as_str(), "a");
        assert_eq!(
            state.windows.iter().map(|w| w.z_index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        state.windows[0].is_focused = false;
        normalize_window_stack(&mut state);
        assert_eq!(state.focused_window_id().map(|id| id.to_string()), Some("b".to_string()));
    }

    #[test]
    fn focusing_raises_and_unminimizes() {
        let mut state = DesktopState {
            windows: vec![record("a", false, true), record("b", true, false)],
            ..DesktopState::default()
        };
        assert!(focus_window_internal(&mut state, &WindowInstanceId::new("a")));
        assert_eq!(state.windows[1].id.as_str(), "a");
        assert!(!state.windows[1].minimized);
        assert_eq!(state.windows[1].z_index, 2);
        assert!(!state.windows[0].is_focused);
        assert!(!focus_window_internal(&mut state, &WindowInstanceId::new("zzz")));
    }
}
