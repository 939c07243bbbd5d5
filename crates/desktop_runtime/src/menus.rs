//! Window menu bar model: which menus a feature window shows and what each item does.

use crate::features::FeatureDescriptor;

/// How list-like feature content is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Table,
}

impl ViewMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Table => "Table",
        }
    }
}

/// Sort key for list-like feature content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Name,
    Date,
}

impl SortOrder {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Date => "Date",
        }
    }
}

/// Command issued by a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Close,
    Refresh,
    SetViewMode(ViewMode),
    SetSortOrder(SortOrder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        command: MenuCommand,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDefinition {
    /// Stable id fragment used for DOM ids.
    pub id: &'static str,
    pub label: &'static str,
    pub entries: Vec<MenuEntry>,
}

impl MenuDefinition {
    /// Commands in display order, skipping separators.
    pub fn commands(&self) -> impl Iterator<Item = (&'static str, MenuCommand)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item { label, command } => Some((*label, *command)),
            MenuEntry::Separator => None,
        })
    }
}

/// Builds the `File` and `View` menus for a feature window.
pub fn window_menus(descriptor: &FeatureDescriptor) -> Vec<MenuDefinition> {
    let file = MenuDefinition {
        id: "file",
        label: "File",
        entries: vec![MenuEntry::Item {
            label: "Close",
            command: MenuCommand::Close,
        }],
    };

    let mut view_entries = vec![MenuEntry::Item {
        label: "Refresh",
        command: MenuCommand::Refresh,
    }];
    if descriptor.supports_view_modes {
        view_entries.push(MenuEntry::Separator);
        view_entries.push(MenuEntry::Item {
            label: "List",
            command: MenuCommand::SetViewMode(ViewMode::List),
        });
        view_entries.push(MenuEntry::Item {
            label: "Table",
            command: MenuCommand::SetViewMode(ViewMode::Table),
        });
    }
    if descriptor.supports_sorting {
        view_entries.push(MenuEntry::Separator);
        view_entries.push(MenuEntry::Item {
            label: "Sort: Name",
            command: MenuCommand::SetSortOrder(SortOrder::Name),
        });
        view_entries.push(MenuEntry::Item {
            label: "Sort: Date",
            command: MenuCommand::SetSortOrder(SortOrder::Date),
        });
    }

    vec![
        file,
        MenuDefinition {
            id: "view",
            label: "View",
            entries: view_entries,
        },
    ]
}

/// Per-window view state driven by the `View` menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureViewState {
    /// Bumped by `View → Refresh`; content reloads when it changes.
    pub refresh_token: u64,
    pub view_mode: ViewMode,
    pub sort_order: SortOrder,
}

impl FeatureViewState {
    /// Applies a view command. `Close` is handled by the window controller and leaves this
    /// state untouched.
    pub fn apply(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::Close => {}
            MenuCommand::Refresh => self.refresh_token = self.refresh_token.wrapping_add(1),
            MenuCommand::SetViewMode(mode) => self.view_mode = mode,
            MenuCommand::SetSortOrder(order) => self.sort_order = order,
        }
    }

    /// Whether `command` describes the current state, for checked menu items.
    pub fn is_selected(&self, command: MenuCommand) -> bool {
        match command {
            MenuCommand::SetViewMode(mode) => self.view_mode == mode,
            MenuCommand::SetSortOrder(order) => self.sort_order == order,
            MenuCommand::Close | MenuCommand::Refresh => false,
        }
    }
}

/// Next focused index for a roving-focus menu after `key`, or `None` if the key is not a
/// navigation key.
pub fn roving_index(current: Option<usize>, len: usize, key: &str) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0) as isize;
    let next = match key {
        "ArrowDown" => current + 1,
        "ArrowUp" => current - 1,
        "Home" => 0,
        "End" => len as isize - 1,
        _ => return None,
    };
    Some(next.rem_euclid(len as isize) as usize)
}

#[cfg(test)]
mod tests {
    use desktop_window_contract::FeatureWindowKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::features::feature_descriptor;

    fn labels(menu: &MenuDefinition) -> Vec<&'static str> {
        menu.commands().map(|(label, _)| label).collect()
    }

    #[test]
    fn menus_follow_catalog_flags() {
        let mut descriptor = feature_descriptor(FeatureWindowKind::Help).clone();
        descriptor.supports_view_modes = false;
        descriptor.supports_sorting = false;
        let menus = window_menus(&descriptor);
        assert_eq!(labels(&menus[0]), vec!["Close"]);
        assert_eq!(labels(&menus[1]), vec!["Refresh"]);

        descriptor.supports_view_modes = true;
        descriptor.supports_sorting = true;
        let menus = window_menus(&descriptor);
        assert_eq!(
            labels(&menus[1]),
            vec!["Refresh", "List", "Table", "Sort: Name", "Sort: Date"]
        );
        assert_eq!(
            menus[1]
                .entries
                .iter()
                .filter(|entry| **entry == MenuEntry::Separator)
                .count(),
            2
        );
    }

    #[test]
    fn view_commands_update_state() {
        let mut state = FeatureViewState::default();
        state.apply(MenuCommand::Refresh);
        state.apply(MenuCommand::Refresh);
        state.apply(MenuCommand::SetViewMode(ViewMode::Table));
        state.apply(MenuCommand::SetSortOrder(SortOrder::Date));
        state.apply(MenuCommand::Close);

        assert_eq!(
            state,
            FeatureViewState {
                refresh_token: 2,
                view_mode: ViewMode::Table,
                sort_order: SortOrder::Date,
            }
        );
        assert!(state.is_selected(MenuCommand::SetViewMode(ViewMode::Table)));
        assert!(!state.is_selected(MenuCommand::SetSortOrder(SortOrder::Name)));
    }

    #[test]
    fn roving_focus_wraps() {
        assert_eq!(roving_index(Some(2), 3, "ArrowDown"), Some(0));
        assert_eq!(roving_index(Some(0), 3, "ArrowUp"), Some(2));
        assert_eq!(roving_index(Some(1), 3, "Home"), Some(0));
        assert_eq!(roving_index(None, 3, "End"), Some(2));
        assert_eq!(roving_index(Some(1), 3, "Enter"), None);
        assert_eq!(roving_index(None, 0, "ArrowDown"), None);
    }
}
