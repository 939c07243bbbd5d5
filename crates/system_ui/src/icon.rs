//! Inline SVG icon set.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Icons used by the shell chrome and dialogs.
pub enum IconName {
    /// Close window or dismiss.
    Close,
    /// Minimize window.
    Minimize,
    /// Maximize window.
    Maximize,
    /// Restore a maximized window.
    Restore,
    /// Locked database.
    Lock,
    /// Signed-out account.
    User,
    /// Notifications.
    Bell,
    /// Reload content.
    Refresh,
    /// Delete.
    Trash,
    /// Create.
    Plus,
    /// Camera capture.
    Camera,
    /// Warning or inline error.
    Warning,
    /// Generic window.
    Window,
}

impl IconName {
    /// Stable token used for `data-icon`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Restore => "restore",
            Self::Lock => "lock",
            Self::User => "user",
            Self::Bell => "bell",
            Self::Refresh => "refresh",
            Self::Trash => "trash",
            Self::Plus => "plus",
            Self::Camera => "camera",
            Self::Warning => "warning",
            Self::Window => "window",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Close => "M6 6l12 12M18 6L6 18",
            Self::Minimize => "M5 18h14",
            Self::Maximize => "M5 5h14v14H5z",
            Self::Restore => "M8 8h11v11H8zM5 16V5h11",
            Self::Lock => "M7 11V8a5 5 0 0110 0v3M5 11h14v10H5z",
            Self::User => "M12 12a4 4 0 100-8 4 4 0 000 8zM4 21a8 8 0 0116 0",
            Self::Bell => "M6 16V11a6 6 0 0112 0v5l2 2H4zM10 20a2 2 0 004 0",
            Self::Refresh => "M20 12a8 8 0 11-2.3-5.6M20 4v5h-5",
            Self::Trash => "M4 7h16M9 7V4h6v3M6 7l1 13h10l1-13",
            Self::Plus => "M12 5v14M5 12h14",
            Self::Camera => "M4 8h4l2-3h4l2 3h4v11H4zM12 17a3.5 3.5 0 100-7 3.5 3.5 0 000 7z",
            Self::Warning => "M12 3l10 18H2zM12 10v5M12 18v.5",
            Self::Window => "M4 5h16v14H4zM4 9h16",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Icon sizing tokens.
pub enum IconSize {
    /// 14px.
    Sm,
    /// 18px.
    #[default]
    Md,
    /// 32px.
    Lg,
}

impl IconSize {
    const fn pixels(self) -> u32 {
        match self {
            Self::Sm => 14,
            Self::Md => 18,
            Self::Lg => 32,
        }
    }
}

#[component]
/// Decorative icon; hidden from assistive technology.
pub fn Icon(icon: IconName, #[prop(default = IconSize::Md)] size: IconSize) -> impl IntoView {
    let px = size.pixels();
    view! {
        <svg
            class="ui-icon"
            width=px
            height=px
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            data-icon=icon.token()
        >
            <path d=icon.path()></path>
        </svg>
    }
}
