//! Notification center store: an ordered list with read flags, a reducer, and badge formatting.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::subscription::{ListenerSet, Subscription};

/// Largest count the badge shows literally.
pub const BADGE_MAX_LITERAL: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub level: NotificationLevel,
    pub created_at_ms: u64,
    #[serde(default)]
    pub read: bool,
}

/// Notifications in arrival order, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationState {
    pub items: Vec<Notification>,
}

impl NotificationState {
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().rev()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    /// Adds a notification, replacing any existing one with the same id in place.
    Ingest(Notification),
    MarkAsRead(String),
    MarkAllAsRead,
    Dismiss(String),
    DismissAll,
}

/// Applies `action`. Returns `true` when the state changed.
pub fn reduce_notifications(state: &mut NotificationState, action: NotificationAction) -> bool {
    match action {
        NotificationAction::Ingest(notification) => {
            match state
                .items
                .iter()
                .position(|item| item.id == notification.id)
            {
                Some(index) if state.items[index] == notification => false,
                Some(index) => {
                    state.items[index] = notification;
                    true
                }
                None => {
                    state.items.push(notification);
                    true
                }
            }
        }
        NotificationAction::MarkAsRead(id) => match state.items.iter_mut().find(|i| i.id == id) {
            Some(item) if !item.read => {
                item.read = true;
                true
            }
            _ => false,
        },
        NotificationAction::MarkAllAsRead => {
            let mut changed = false;
            for item in state.items.iter_mut().filter(|item| !item.read) {
                item.read = true;
                changed = true;
            }
            changed
        }
        NotificationAction::Dismiss(id) => {
            let before = state.items.len();
            state.items.retain(|item| item.id != id);
            state.items.len() != before
        }
        NotificationAction::DismissAll => {
            let changed = !state.items.is_empty();
            state.items.clear();
            changed
        }
    }
}

/// Notification store for one application root. Clones share state.
///
/// Every [`NotificationStore::dispatch`] notifies each subscriber exactly once, synchronously,
/// before returning, whether or not the action changed anything.
#[derive(Clone, Default)]
pub struct NotificationStore {
    state: Rc<RefCell<NotificationState>>,
    listeners: ListenerSet<NotificationState>,
}

impl NotificationStore {
    pub fn state(&self) -> NotificationState {
        self.state.borrow().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.state.borrow().unread_count()
    }

    pub fn dispatch(&self, action: NotificationAction) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            reduce_notifications(&mut state, action);
            state.clone()
        };
        self.listeners.notify(&snapshot);
    }

    pub fn mark_all_as_read(&self) {
        self.dispatch(NotificationAction::MarkAllAsRead);
    }

    pub fn dismiss_all(&self) {
        self.dispatch(NotificationAction::DismissAll);
    }

    pub fn subscribe(&self, listener: impl Fn(&NotificationState) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

impl std::fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStore")
            .field("state", &self.state.borrow())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Badge text for `unread` notifications; `None` hides the badge.
pub fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=BADGE_MAX_LITERAL => Some(unread.to_string()),
        _ => Some(format!("{BADGE_MAX_LITERAL}+")),
    }
}

/// Accessible title for the trigger button.
pub fn badge_title(unread: usize) -> String {
    if unread == 1 {
        "1 unread notification".to_string()
    } else {
        format!("{unread} unread notifications")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn note(id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Title {id}"),
            message: String::new(),
            level: NotificationLevel::Info,
            created_at_ms: 0,
            read: false,
        }
    }

    fn store_with(ids: &[&str]) -> NotificationStore {
        let store = NotificationStore::default();
        for id in ids {
            store.dispatch(NotificationAction::Ingest(note(id)));
        }
        store
    }

    #[test]
    fn badge_display_caps_at_ninety_nine() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(1).as_deref(), Some("1"));
        assert_eq!(badge_label(99).as_deref(), Some("99"));
        assert_eq!(badge_label(100).as_deref(), Some("99+"));
        assert_eq!(badge_title(1), "1 unread notification");
        assert_eq!(badge_title(7), "7 unread notifications");
    }

    #[test]
    fn each_operation_notifies_each_subscriber_exactly_once() {
        let store = store_with(&["a", "b"]);
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let first_counter = Rc::clone(&first);
        let second_counter = Rc::clone(&second);
        let _first = store.subscribe(move |_| first_counter.set(first_counter.get() + 1));
        let _second = store.subscribe(move |_| second_counter.set(second_counter.get() + 1));

        store.mark_all_as_read();
        assert_eq!((first.get(), second.get()), (1, 1));
        store.dismiss_all();
        assert_eq!((first.get(), second.get()), (2, 2));
        store.dismiss_all();
        assert_eq!((first.get(), second.get()), (3, 3));
    }

    #[test]
    fn unsubscribed_listeners_are_not_called() {
        let store = NotificationStore::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_| counter.set(counter.get() + 1));
        subscription.unsubscribe();
        store.dispatch(NotificationAction::Ingest(note("a")));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn listeners_see_state_after_mutation() {
        let store = store_with(&["a", "b", "c"]);
        let seen = Rc::new(Cell::new(usize::MAX));
        let sink = Rc::clone(&seen);
        let _subscription = store.subscribe(move |state| sink.set(state.unread_count()));

        store.dispatch(NotificationAction::MarkAsRead("b".to_string()));
        assert_eq!(seen.get(), 2);
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn reducer_handles_reads_and_dismissals() {
        let mut state = NotificationState::default();
        assert!(reduce_notifications(&mut state, NotificationAction::Ingest(note("a"))));
        assert!(reduce_notifications(&mut state, NotificationAction::Ingest(note("b"))));
        assert!(!reduce_notifications(&mut state, NotificationAction::Ingest(note("b"))));

        assert!(reduce_notifications(
            &mut state,
            NotificationAction::MarkAsRead("a".to_string())
        ));
        assert!(!reduce_notifications(
            &mut state,
            NotificationAction::MarkAsRead("a".to_string())
        ));
        assert_eq!(state.unread_count(), 1);
        assert_eq!(
            state.newest_first().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );

        assert!(reduce_notifications(
            &mut state,
            NotificationAction::Dismiss("b".to_string())
        ));
        assert!(!reduce_notifications(
            &mut state,
            NotificationAction::Dismiss("b".to_string())
        ));
        assert!(!reduce_notifications(&mut state, NotificationAction::MarkAllAsRead));
        assert!(reduce_notifications(&mut state, NotificationAction::DismissAll));
        assert!(state.items.is_empty());
    }
}
