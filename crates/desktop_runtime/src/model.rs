//! Desktop state records shared by the reducer, the floating-window geometry and the UI.

use desktop_window_contract::{FeatureWindowKind, WindowDimensions, WindowInstanceId, WindowRect};
use serde::{Deserialize, Serialize};

/// Viewport width below which floating windows dock as bottom sheets.
pub const MOBILE_BREAKPOINT_PX: i32 = 768;
/// Height reserved for the taskbar at the bottom of the desktop.
pub const TASKBAR_HEIGHT_PX: i32 = 44;
/// Offset applied per open window when cascading new windows.
pub const CASCADE_STEP_PX: i32 = 24;
/// Number of cascade steps before positions wrap around.
pub const CASCADE_SLOTS: i32 = 8;

/// Desktop area available to windows, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Layout mode windows use inside this viewport.
    pub const fn layout_mode(self) -> LayoutMode {
        if self.width < MOBILE_BREAKPOINT_PX {
            LayoutMode::Docked
        } else {
            LayoutMode::Positioned
        }
    }

    /// Full viewport rectangle anchored at the origin.
    pub const fn rect(self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800 - TASKBAR_HEIGHT_PX)
    }
}

/// How a floating window is laid out for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Free geometry; draggable and resizable from the corners.
    Positioned,
    /// Full-width bottom sheet; only the height is adjustable.
    Docked,
}

impl LayoutMode {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Positioned => "positioned",
            Self::Docked => "docked",
        }
    }
}

/// Corner handle used to resize a positioned window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeCorner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl ResizeCorner {
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Dragging this corner moves the left edge.
    pub const fn moves_west_edge(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    /// Dragging this corner moves the top edge.
    pub const fn moves_north_edge(self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
            Self::SouthWest => "sw",
            Self::SouthEast => "se",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Geometry limits declared by a feature window kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConstraints {
    pub default_width: i32,
    pub default_height: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Maximum width as a percentage of the viewport width.
    pub max_width_percent: u8,
    /// Maximum height as a percentage of the viewport height.
    pub max_height_percent: u8,
}

impl WindowConstraints {
    /// Largest width allowed inside `viewport`; never below `min_width`.
    pub fn max_width(&self, viewport: Viewport) -> i32 {
        (viewport.width * i32::from(self.max_width_percent) / 100).max(self.min_width)
    }

    /// Largest height allowed inside `viewport`; never below `min_height`.
    pub fn max_height(&self, viewport: Viewport) -> i32 {
        (viewport.height * i32::from(self.max_height_percent) / 100).max(self.min_height)
    }

    pub fn clamp_width(&self, width: i32, viewport: Viewport) -> i32 {
        width.clamp(self.min_width, self.max_width(viewport))
    }

    pub fn clamp_height(&self, height: i32, viewport: Viewport) -> i32 {
        height.clamp(self.min_height, self.max_height(viewport))
    }
}

impl Default for WindowConstraints {
    fn default() -> Self {
        Self {
            default_width: 640,
            default_height: 480,
            min_width: 320,
            min_height: 240,
            max_width_percent: 90,
            max_height_percent: 90,
        }
    }
}

/// One managed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowInstanceId,
    pub kind: FeatureWindowKind,
    pub title: String,
    pub z_index: u32,
    pub is_focused: bool,
    pub minimized: bool,
    /// Last committed geometry reported by the window.
    pub dimensions: WindowDimensions,
}

/// Window-manager state owned by the desktop reducer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesktopState {
    /// Open windows in stacking order, bottom first.
    pub windows: Vec<WindowRecord>,
    pub viewport: Viewport,
    /// Per-kind counter used to build window ids.
    pub next_window_seq: u64,
}

impl DesktopState {
    pub fn focused_window_id(&self) -> Option<WindowInstanceId> {
        self.windows
            .iter()
            .find(|window| window.is_focused && !window.minimized)
            .map(|window| window.id.clone())
    }

    pub fn window(&self, window_id: &WindowInstanceId) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| &window.id == window_id)
    }

    /// Most recently stacked window of `kind`, if any is open.
    pub fn window_of_kind(&self, kind: FeatureWindowKind) -> Option<&WindowRecord> {
        self.windows.iter().rev().find(|window| window.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_selects_layout_mode() {
        assert_eq!(Viewport::new(767, 900).layout_mode(), LayoutMode::Docked);
        assert_eq!(
            Viewport::new(MOBILE_BREAKPOINT_PX, 900).layout_mode(),
            LayoutMode::Positioned
        );
    }

    #[test]
    fn max_bounds_never_drop_below_minimums() {
        let constraints = WindowConstraints {
            min_width: 400,
            min_height: 300,
            max_width_percent: 50,
            max_height_percent: 50,
            ..WindowConstraints::default()
        };
        let tiny = Viewport::new(320, 480);
        assert_eq!(constraints.max_width(tiny), 400);
        assert_eq!(constraints.max_height(tiny), 300);
        assert_eq!(constraints.clamp_width(10_000, Viewport::new(1200, 800)), 600);
    }
}
