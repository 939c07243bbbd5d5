//! Headless geometry state for one floating window.
//!
//! The Leptos window component feeds pointer events into [`FloatingWindowState`] and renders
//! [`FloatingWindowState::rendered_rect`]. Only committed geometry leaves this module, through the
//! value returned from [`FloatingWindowState::end_gesture`] and
//! [`FloatingWindowState::toggle_maximize`], which the component reports via its controller.

use desktop_window_contract::{WindowDimensions, WindowRect};

use crate::model::{
    LayoutMode, PointerPosition, ResizeCorner, Viewport, WindowConstraints, CASCADE_SLOTS,
    CASCADE_STEP_PX,
};

const CASCADE_ORIGIN_X: i32 = 40;
const CASCADE_ORIGIN_Y: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Moving {
        pointer_start: PointerPosition,
        rect_start: WindowRect,
    },
    Resizing {
        corner: ResizeCorner,
        pointer_start: PointerPosition,
        rect_start: WindowRect,
    },
    DockResizing {
        pointer_start: PointerPosition,
        height_start: i32,
    },
}

/// Initial geometry for a new window, cascaded by `slot`.
pub fn default_placement(
    constraints: &WindowConstraints,
    viewport: Viewport,
    slot: usize,
) -> WindowDimensions {
    let offset = (slot as i32 % CASCADE_SLOTS) * CASCADE_STEP_PX;
    WindowDimensions::from_rect(WindowRect {
        x: CASCADE_ORIGIN_X + offset,
        y: CASCADE_ORIGIN_Y + offset,
        width: constraints.clamp_width(constraints.default_width, viewport),
        height: constraints.clamp_height(constraints.default_height, viewport),
    })
}

/// Resizes `start` by dragging `corner` by `(dx, dy)`.
///
/// The corner opposite `corner` stays fixed. Width and height are clamped to the constraint
/// bounds for `viewport` before the moved edges are placed.
pub fn resize_from_corner(
    start: WindowRect,
    corner: ResizeCorner,
    dx: i32,
    dy: i32,
    constraints: &WindowConstraints,
    viewport: Viewport,
) -> WindowRect {
    let raw_width = if corner.moves_west_edge() {
        start.width - dx
    } else {
        start.width + dx
    };
    let raw_height = if corner.moves_north_edge() {
        start.height - dy
    } else {
        start.height + dy
    };
    let width = constraints.clamp_width(raw_width, viewport);
    let height = constraints.clamp_height(raw_height, viewport);

    WindowRect {
        x: if corner.moves_west_edge() {
            start.x + start.width - width
        } else {
            start.x
        },
        y: if corner.moves_north_edge() {
            start.y + start.height - height
        } else {
            start.y
        },
        width,
        height,
    }
}

/// Fits stored or reported geometry into `viewport`.
///
/// Size is clamped to the constraint bounds and the window is moved back inside the viewport. A
/// maximized window without a remembered rectangle, or a remembered rectangle on a window that is
/// not maximized, is repaired before fitting.
pub fn fit_to_viewport(
    dimensions: WindowDimensions,
    constraints: &WindowConstraints,
    viewport: Viewport,
) -> WindowDimensions {
    match (dimensions.is_maximized, dimensions.pre_maximize_dimensions) {
        (true, Some(remembered)) => {
            let remembered = fit_rect(remembered, constraints, viewport);
            WindowDimensions::from_rect(remembered).maximized_into(viewport.rect())
        }
        _ => WindowDimensions::from_rect(fit_rect(dimensions.rect(), constraints, viewport)),
    }
}

fn fit_rect(rect: WindowRect, constraints: &WindowConstraints, viewport: Viewport) -> WindowRect {
    let width = constraints.clamp_width(rect.width, viewport);
    let height = constraints.clamp_height(rect.height, viewport);
    WindowRect {
        x: rect.x.clamp(0, (viewport.width - width).max(0)),
        y: rect.y.clamp(0, (viewport.height - height).max(0)),
        width,
        height,
    }
}

/// Geometry and gesture state of one floating window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingWindowState {
    dimensions: WindowDimensions,
    committed: WindowDimensions,
    constraints: WindowConstraints,
    viewport: Viewport,
    docked_height: i32,
    gesture: Gesture,
}

impl FloatingWindowState {
    pub fn new(
        constraints: WindowConstraints,
        viewport: Viewport,
        initial: WindowDimensions,
    ) -> Self {
        let dimensions = fit_to_viewport(initial, &constraints, viewport);
        let docked_height = constraints.clamp_height(constraints.default_height, viewport);
        Self {
            dimensions,
            committed: dimensions,
            constraints,
            viewport,
            docked_height,
            gesture: Gesture::Idle,
        }
    }

    /// Positioned geometry, kept intact while docked.
    pub fn dimensions(&self) -> WindowDimensions {
        self.dimensions
    }

    pub fn constraints(&self) -> &WindowConstraints {
        &self.constraints
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.viewport.layout_mode()
    }

    pub fn is_maximized(&self) -> bool {
        self.dimensions.is_maximized
    }

    pub fn is_interacting(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn docked_height(&self) -> i32 {
        self.docked_height
    }

    /// Whether corner handles should be offered.
    pub fn can_resize_corners(&self) -> bool {
        self.layout_mode() == LayoutMode::Positioned && !self.dimensions.is_maximized
    }

    /// Rectangle to render for the current layout mode.
    pub fn rendered_rect(&self) -> WindowRect {
        match self.layout_mode() {
            LayoutMode::Docked => WindowRect {
                x: 0,
                y: self.viewport.height - self.docked_height,
                width: self.viewport.width,
                height: self.docked_height,
            },
            LayoutMode::Positioned => self.dimensions.rect(),
        }
    }

    /// Applies a new viewport. Returns `true` when the layout mode changed.
    ///
    /// Crossing the breakpoint cancels any gesture. Positioned geometry is never rewritten by a
    /// mode change, so leaving docked mode restores it.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let previous_mode = self.layout_mode();
        self.viewport = viewport;
        let mode_changed = previous_mode != self.layout_mode();
        if mode_changed {
            self.gesture = Gesture::Idle;
        }
        if self.dimensions.is_maximized {
            self.dimensions = self.dimensions.maximized_into(viewport.rect());
        }
        self.docked_height = self.constraints.clamp_height(self.docked_height, viewport);
        mode_changed
    }

    /// Starts a title-bar drag. Ignored while docked or maximized.
    pub fn begin_move(&mut self, pointer: PointerPosition) -> bool {
        if !self.can_resize_corners() {
            return false;
        }
        self.gesture = Gesture::Moving {
            pointer_start: pointer,
            rect_start: self.dimensions.rect(),
        };
        true
    }

    /// Starts a corner resize. Ignored while docked or maximized.
    pub fn begin_resize(&mut self, corner: ResizeCorner, pointer: PointerPosition) -> bool {
        if !self.can_resize_corners() {
            return false;
        }
        self.gesture = Gesture::Resizing {
            corner,
            pointer_start: pointer,
            rect_start: self.dimensions.rect(),
        };
        true
    }

    /// Starts a bottom-sheet height drag. Only valid while docked.
    pub fn begin_dock_resize(&mut self, pointer: PointerPosition) -> bool {
        if self.layout_mode() != LayoutMode::Docked {
            return false;
        }
        self.gesture = Gesture::DockResizing {
            pointer_start: pointer,
            height_start: self.docked_height,
        };
        true
    }

    /// Feeds a pointer move into the active gesture. Returns `true` when geometry changed.
    pub fn update_pointer(&mut self, pointer: PointerPosition) -> bool {
        let before = (self.dimensions, self.docked_height);
        match self.gesture {
            Gesture::Idle => return false,
            Gesture::Moving {
                pointer_start,
                rect_start,
            } => {
                self.dimensions.x = rect_start.x + pointer.x - pointer_start.x;
                // Keep the title bar reachable.
                self.dimensions.y = (rect_start.y + pointer.y - pointer_start.y).max(0);
            }
            Gesture::Resizing {
                corner,
                pointer_start,
                rect_start,
            } => {
                let rect = resize_from_corner(
                    rect_start,
                    corner,
                    pointer.x - pointer_start.x,
                    pointer.y - pointer_start.y,
                    &self.constraints,
                    self.viewport,
                );
                self.dimensions = WindowDimensions::from_rect(rect);
            }
            Gesture::DockResizing {
                pointer_start,
                height_start,
            } => {
                self.docked_height = self
                    .constraints
                    .clamp_height(height_start - (pointer.y - pointer_start.y), self.viewport);
            }
        }
        before != (self.dimensions, self.docked_height)
    }

    /// Ends the active gesture (pointer-up or pointer-cancel).
    ///
    /// Returns the new positioned geometry when it differs from the last committed value.
    pub fn end_gesture(&mut self) -> Option<WindowDimensions> {
        if self.gesture == Gesture::Idle {
            return None;
        }
        self.gesture = Gesture::Idle;
        self.commit()
    }

    /// Maximizes or restores the window. Returns the committed geometry; `None` while docked.
    pub fn toggle_maximize(&mut self) -> Option<WindowDimensions> {
        if self.layout_mode() == LayoutMode::Docked {
            return None;
        }
        self.gesture = Gesture::Idle;
        self.dimensions = if self.dimensions.is_maximized {
            self.dimensions.restored()
        } else {
            self.dimensions.maximized_into(self.viewport.rect())
        };
        self.commit()
    }

    fn commit(&mut self) -> Option<WindowDimensions> {
        if self.dimensions == self.committed {
            return None;
        }
        self.committed = self.dimensions;
        Some(self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn constraints() -> WindowConstraints {
        WindowConstraints {
            default_width: 600,
            default_height: 400,
            min_width: 300,
            min_height: 200,
            max_width_percent: 80,
            max_height_percent: 75,
        }
    }

    fn desktop() -> Viewport {
        Viewport::new(1000, 800)
    }

    fn window_at(x: i32, y: i32) -> FloatingWindowState {
        FloatingWindowState::new(
            constraints(),
            desktop(),
            WindowDimensions::from_rect(WindowRect {
                x,
                y,
                width: 600,
                height: 400,
            }),
        )
    }

    fn pointer(x: i32, y: i32) -> PointerPosition {
        PointerPosition { x, y }
    }

    #[test]
    fn corner_resize_stays_within_bounds_for_every_corner() {
        let start = WindowRect {
            x: 100,
            y: 100,
            width: 600,
            height: 400,
        };
        let limits = constraints();
        for corner in ResizeCorner::ALL {
            for (dx, dy) in [(-5000, -5000), (5000, 5000), (-5000, 5000), (5000, -5000), (7, -3)] {
                let rect = resize_from_corner(start, corner, dx, dy, &limits, desktop());
                assert!(rect.width >= 300, "{corner:?} width {}", rect.width);
                assert!(rect.height >= 200, "{corner:?} height {}", rect.height);
                assert!(rect.width <= 800, "{corner:?} width {}", rect.width);
                assert!(rect.height <= 600, "{corner:?} height {}", rect.height);
            }
        }
    }

    #[test]
    fn resize_keeps_the_opposite_corner_anchored() {
        let start = WindowRect {
            x: 100,
            y: 100,
            width: 600,
            height: 400,
        };
        let rect = resize_from_corner(start, ResizeCorner::NorthWest, 500, 500, &constraints(), desktop());
        assert_eq!(
            rect,
            WindowRect {
                x: 400,
                y: 300,
                width: 300,
                height: 200,
            }
        );
        assert_eq!(rect.x + rect.width, start.x + start.width);
        assert_eq!(rect.y + rect.height, start.y + start.height);

        let rect = resize_from_corner(start, ResizeCorner::SouthEast, 40, 20, &constraints(), desktop());
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (100, 100, 640, 420));
    }

    #[test]
    fn drag_moves_and_reports_once_on_release() {
        let mut window = window_at(50, 60);
        assert!(window.begin_move(pointer(10, 10)));
        assert!(window.update_pointer(pointer(40, 30)));
        assert_eq!(window.rendered_rect().x, 80);
        assert_eq!(window.rendered_rect().y, 80);

        let reported = window.end_gesture().expect("moved");
        assert_eq!((reported.x, reported.y), (80, 80));
        assert_eq!(window.end_gesture(), None);
        assert!(!window.is_interacting());
    }

    #[test]
    fn click_without_movement_reports_nothing() {
        let mut window = window_at(50, 60);
        window.begin_resize(ResizeCorner::SouthEast, pointer(0, 0));
        assert_eq!(window.end_gesture(), None);
    }

    #[test]
    fn maximize_restore_round_trip_is_verbatim() {
        let mut window = window_at(50, 60);
        let original = window.dimensions();

        let maximized = window.toggle_maximize().expect("maximized");
        assert!(maximized.is_maximized);
        assert_eq!(maximized.rect(), desktop().rect());
        assert_eq!(maximized.pre_maximize_dimensions, Some(original.rect()));
        assert!(!window.begin_move(pointer(0, 0)));

        let restored = window.toggle_maximize().expect("restored");
        assert_eq!(restored, original);
        assert_eq!(restored.pre_maximize_dimensions, None);
    }

    #[test]
    fn docking_collapses_to_bottom_sheet_and_restores_positioned_geometry() {
        let mut window = window_at(120, 90);
        let positioned = window.dimensions();
        window.begin_move(pointer(0, 0));

        assert!(window.set_viewport(Viewport::new(400, 700)));
        assert!(!window.is_interacting());
        assert_eq!(window.layout_mode(), LayoutMode::Docked);
        let sheet = window.rendered_rect();
        assert_eq!(sheet.x, 0);
        assert_eq!(sheet.width, 400);
        assert_eq!(sheet.y + sheet.height, 700);
        assert!(!window.begin_resize(ResizeCorner::SouthEast, pointer(0, 0)));
        assert_eq!(window.toggle_maximize(), None);

        assert!(!window.set_viewport(Viewport::new(500, 700)));
        assert!(window.set_viewport(desktop()));
        assert_eq!(window.dimensions(), positioned);
        assert_eq!(window.rendered_rect(), positioned.rect());
    }

    #[test]
    fn docked_height_drag_is_clamped() {
        let mut window = window_at(0, 0);
        window.set_viewport(Viewport::new(400, 800));
        assert!(window.begin_dock_resize(pointer(0, 500)));
        window.update_pointer(pointer(0, -1000));
        assert_eq!(window.docked_height(), 600);
        window.update_pointer(pointer(0, 2000));
        assert_eq!(window.docked_height(), 200);
        assert_eq!(window.end_gesture(), None);
    }

    #[test]
    fn viewport_shrink_refits_maximized_window() {
        let mut window = window_at(10, 10);
        window.toggle_maximize();
        window.set_viewport(Viewport::new(900, 700));
        assert_eq!(window.rendered_rect(), Viewport::new(900, 700).rect());
        assert_eq!(
            window.dimensions().pre_maximize_dimensions.map(|rect| rect.x),
            Some(10)
        );
    }

    #[test]
    fn geometry_from_a_larger_screen_is_pulled_back_inside() {
        let saved = WindowDimensions::from_rect(WindowRect {
            x: 1700,
            y: 1100,
            width: 1400,
            height: 900,
        });
        let fitted = fit_to_viewport(saved, &constraints(), desktop());
        assert_eq!(
            fitted.rect(),
            WindowRect {
                x: 200,
                y: 200,
                width: 800,
                height: 600,
            }
        );

        let negative = WindowDimensions::from_rect(WindowRect {
            x: -300,
            y: -50,
            width: 600,
            height: 400,
        });
        assert_eq!(fit_to_viewport(negative, &constraints(), desktop()).rect().x, 0);
    }

    #[test]
    fn inconsistent_maximize_state_is_repaired() {
        let mut lost_rect = desktop_maximized();
        lost_rect.pre_maximize_dimensions = None;
        let fitted = fit_to_viewport(lost_rect, &constraints(), desktop());
        assert!(!fitted.is_maximized);
        assert_eq!(fitted.pre_maximize_dimensions, None);

        let mut stray_rect = WindowDimensions::from_rect(WindowRect {
            x: 10,
            y: 10,
            width: 600,
            height: 400,
        });
        stray_rect.pre_maximize_dimensions = Some(desktop().rect());
        assert_eq!(
            fit_to_viewport(stray_rect, &constraints(), desktop()).pre_maximize_dimensions,
            None
        );

        let mut offscreen = desktop_maximized();
        offscreen.pre_maximize_dimensions = Some(WindowRect {
            x: 5000,
            y: 5000,
            width: 600,
            height: 400,
        });
        let fitted = fit_to_viewport(offscreen, &constraints(), Viewport::new(900, 700));
        assert!(fitted.is_maximized);
        assert_eq!(fitted.rect(), Viewport::new(900, 700).rect());
        assert_eq!(
            fitted.pre_maximize_dimensions,
            Some(WindowRect {
                x: 300,
                y: 300,
                width: 600,
                height: 400,
            })
        );
    }

    fn desktop_maximized() -> WindowDimensions {
        WindowDimensions::from_rect(WindowRect {
            x: 10,
            y: 10,
            width: 600,
            height: 400,
        })
        .maximized_into(desktop().rect())
    }

    #[test]
    fn default_placement_cascades_and_clamps() {
        let first = default_placement(&constraints(), desktop(), 0);
        let second = default_placement(&constraints(), desktop(), 1);
        assert_eq!(second.x - first.x, CASCADE_STEP_PX);
        assert_eq!(default_placement(&constraints(), desktop(), 8).x, first.x);

        let small = default_placement(&constraints(), Viewport::new(500, 300), 0);
        assert_eq!(small.width, 400);
        assert_eq!(small.height, 225);
    }
}
