//! Shared UI primitive library for the desktop shell.
//!
//! The crate owns reusable Leptos primitives, a small inline icon set, and the stable
//! `data-ui-*` DOM contract consumed by the shell CSS. Feature windows compose these primitives
//! instead of emitting ad hoc control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Badge, Button, ButtonSize, ButtonVariant, DesktopRoot, DesktopWindowLayer, EmptyState,
    FieldGroup, Heading, LayoutGap, LayoutPadding, ListRow, ListSurface, LoadingIndicator,
    MenuBar, MenuItem, MenuSeparator, MenuSurface, Modal, Panel, ResizeHandle, SelectField,
    Switch, Taskbar, TaskbarButton, Text, TextField, TextRole, TextTone, ToggleRow, ToolBar,
    WindowBody, WindowControlButton, WindowControls, WindowFrame, WindowTitle, WindowTitleBar,
};

/// Convenience imports for crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Badge, Button, ButtonSize, ButtonVariant, DesktopRoot, DesktopWindowLayer, EmptyState,
        FieldGroup, Heading, Icon, IconName, IconSize, LayoutGap, LayoutPadding, ListRow,
        ListSurface, LoadingIndicator, MenuBar, MenuItem, MenuSeparator, MenuSurface, Modal,
        Panel, ResizeHandle, SelectField, Switch, Taskbar, TaskbarButton, Text, TextField,
        TextRole, TextTone, ToggleRow, ToolBar, WindowBody, WindowControlButton, WindowControls,
        WindowFrame, WindowTitle, WindowTitleBar,
    };
}
