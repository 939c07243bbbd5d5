//! Dialog state machine shared by the confirm, delete and create dialogs.
//!
//! ```text
//! Closed --open--> Idle --confirm--> Busy --Ok--> Closed
//!                   ^                  |
//!                   +------Err---------+
//! ```
//!
//! While `Busy`, confirm, cancel, backdrop and Escape are all ignored. Every closed→open
//! transition clears the busy phase and the last error. A [`MountGuard`] stops a confirm that
//! finishes after the dialog unmounted from touching any state.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use leptos::logging;

/// Message shown when a create dialog is submitted without a name.
pub const NAME_REQUIRED_MESSAGE: &str = "Name is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Idle,
    Busy,
}

/// What [`DialogState::sync_open`] did with the `open` prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTransition {
    Opened,
    Closed,
    Unchanged,
}

/// Proof that a confirm started; stale tickets are ignored when the confirm finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The action succeeded; the dialog closed and the owner should be told.
    Closed,
    /// The action failed; the dialog is idle again with `last_error` set.
    StayedOpen,
    /// The dialog was not idle, so the action never ran, or its result was stale.
    Ignored,
    /// The dialog unmounted while the action was in flight.
    Unmounted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogState {
    phase: DialogPhase,
    last_error: Option<String>,
    generation: u64,
}

impl DialogState {
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Closed
    }

    pub fn is_busy(&self) -> bool {
        self.phase == DialogPhase::Busy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Follows the owner's `open` prop.
    pub fn sync_open(&mut self, open: bool) -> OpenTransition {
        match (open, self.phase) {
            (true, DialogPhase::Closed) => {
                self.phase = DialogPhase::Idle;
                self.last_error = None;
                self.generation += 1;
                OpenTransition::Opened
            }
            (false, DialogPhase::Idle | DialogPhase::Busy) => {
                self.phase = DialogPhase::Closed;
                self.generation += 1;
                OpenTransition::Closed
            }
            _ => OpenTransition::Unchanged,
        }
    }

    /// Enters `Busy`. Returns `None` unless the dialog is idle.
    pub fn begin_confirm(&mut self) -> Option<ConfirmTicket> {
        if self.phase != DialogPhase::Idle {
            return None;
        }
        self.phase = DialogPhase::Busy;
        self.last_error = None;
        self.generation += 1;
        Some(ConfirmTicket(self.generation))
    }

    /// Applies the result of the confirm started with `ticket`.
    pub fn finish_confirm(
        &mut self,
        ticket: ConfirmTicket,
        result: Result<(), String>,
    ) -> ConfirmOutcome {
        if self.phase != DialogPhase::Busy || ticket.0 != self.generation {
            return ConfirmOutcome::Ignored;
        }
        match result {
            Ok(()) => {
                self.phase = DialogPhase::Closed;
                ConfirmOutcome::Closed
            }
            Err(message) => {
                self.phase = DialogPhase::Idle;
                self.last_error = Some(message);
                ConfirmOutcome::StayedOpen
            }
        }
    }

    /// Cancel, backdrop click or Escape. Returns `true` when the dialog closed.
    pub fn request_dismiss(&mut self) -> bool {
        if self.phase != DialogPhase::Idle {
            return false;
        }
        self.phase = DialogPhase::Closed;
        self.generation += 1;
        true
    }

    /// Shows a validation error without starting a confirm. Ignored unless idle.
    pub fn reject(&mut self, message: impl Into<String>) -> bool {
        if self.phase != DialogPhase::Idle {
            return false;
        }
        self.last_error = Some(message.into());
        true
    }
}

/// Cleared when the owning component unmounts. Clones share the flag.
#[derive(Debug, Clone)]
pub struct MountGuard(Rc<Cell<bool>>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared access to a [`DialogState`] owned elsewhere.
///
/// Returns `None` once the underlying storage is gone.
pub trait DialogStateHandle {
    fn with_dialog<R>(&self, f: impl FnOnce(&mut DialogState) -> R) -> Option<R>;
}

impl DialogStateHandle for Rc<RefCell<DialogState>> {
    fn with_dialog<R>(&self, f: impl FnOnce(&mut DialogState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl DialogStateHandle for leptos::RwSignal<DialogState> {
    fn with_dialog<R>(&self, f: impl FnOnce(&mut DialogState) -> R) -> Option<R> {
        leptos::SignalUpdate::try_update(self, f)
    }
}

/// Runs `on_confirm` through the busy gate.
///
/// `on_confirm` is only invoked when the dialog is idle. Failures are logged and kept as the
/// dialog's `last_error`. Nothing is written back once `guard` reports an unmount.
pub async fn run_confirm<H, F, Fut>(handle: &H, guard: &MountGuard, on_confirm: F) -> ConfirmOutcome
where
    H: DialogStateHandle,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    if !guard.is_mounted() {
        return ConfirmOutcome::Unmounted;
    }
    let Some(ticket) = handle.with_dialog(DialogState::begin_confirm).flatten() else {
        return ConfirmOutcome::Ignored;
    };

    let result = on_confirm().await;
    if let Err(err) = &result {
        logging::error!("dialog action failed: {err}");
    }
    if !guard.is_mounted() {
        return ConfirmOutcome::Unmounted;
    }
    handle
        .with_dialog(|state| state.finish_confirm(ticket, result))
        .unwrap_or(ConfirmOutcome::Unmounted)
}

/// Index to move focus to when Tab (or Shift+Tab with `backwards`) is pressed inside a dialog
/// with `count` focusable elements.
///
/// Returns `None` when the browser's default move already stays inside the dialog.
pub fn focus_trap_target(current: Option<usize>, count: usize, backwards: bool) -> Option<usize> {
    let last = count.checked_sub(1)?;
    match (current, backwards) {
        (None, false) => Some(0),
        (None, true) => Some(last),
        (Some(0), true) => Some(last),
        (Some(index), false) if index >= last => Some(0),
        _ => None,
    }
}

/// Trims a create-dialog name, rejecting empty input.
pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        Err(NAME_REQUIRED_MESSAGE.to_string())
    } else {
        Ok(name.to_string())
    }
}

/// Trims an optional description; blank input becomes `None`.
pub fn normalize_description(raw: &str) -> Option<String> {
    let description = raw.trim();
    (!description.is_empty()).then(|| description.to_string())
}

#[cfg(test)]
mod tests {
    use futures::{
        channel::oneshot,
        executor::{block_on, LocalPool},
        future::ready,
        task::LocalSpawnExt,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn open_dialog() -> Rc<RefCell<DialogState>> {
        let state = Rc::new(RefCell::new(DialogState::default()));
        assert_eq!(state.borrow_mut().sync_open(true), OpenTransition::Opened);
        state
    }

    struct InFlight {
        pool: LocalPool,
        outcome: Rc<Cell<Option<ConfirmOutcome>>>,
        calls: Rc<Cell<u32>>,
        release: oneshot::Sender<Result<(), String>>,
    }

    fn start_confirm(state: &Rc<RefCell<DialogState>>, guard: &MountGuard) -> InFlight {
        let pool = LocalPool::new();
        let outcome = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));
        let (release, receiver) = oneshot::channel::<Result<(), String>>();

        let state = Rc::clone(state);
        let guard = guard.clone();
        let sink = Rc::clone(&outcome);
        let counter = Rc::clone(&calls);
        pool.spawner()
            .spawn_local(async move {
                let result = run_confirm(&state, &guard, move || {
                    counter.set(counter.get() + 1);
                    async move {
                        receiver
                            .await
                            .unwrap_or_else(|_| Err("cancelled".to_string()))
                    }
                })
                .await;
                sink.set(Some(result));
            })
            .expect("spawn");

        let mut in_flight = InFlight {
            pool,
            outcome,
            calls,
            release,
        };
        in_flight.pool.run_until_stalled();
        in_flight
    }

    #[test]
    fn busy_dialog_ignores_repeat_confirm_cancel_backdrop_and_escape() {
        let state = open_dialog();
        let guard = MountGuard::new();
        let mut in_flight = start_confirm(&state, &guard);
        assert!(state.borrow().is_busy());
        assert_eq!(in_flight.calls.get(), 1);

        let second_calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&second_calls);
        let second = block_on(run_confirm(&state, &guard, move || {
            counter.set(counter.get() + 1);
            ready(Ok(()))
        }));
        assert_eq!(second, ConfirmOutcome::Ignored);
        assert_eq!(second_calls.get(), 0);

        let before = state.borrow().clone();
        assert!(!state.borrow_mut().request_dismiss());
        assert!(!state.borrow_mut().request_dismiss());
        assert!(!state.borrow_mut().reject("nope"));
        assert_eq!(*state.borrow(), before);

        in_flight.release.send(Ok(())).expect("release");
        in_flight.pool.run_until_stalled();
        assert_eq!(in_flight.outcome.get(), Some(ConfirmOutcome::Closed));
        assert_eq!(state.borrow().phase(), DialogPhase::Closed);
        assert_eq!(in_flight.calls.get(), 1);
    }

    #[test]
    fn reopening_after_success_shows_idle_state() {
        let state = open_dialog();
        let outcome = block_on(run_confirm(&state, &MountGuard::new(), || ready(Ok(()))));
        assert_eq!(outcome, ConfirmOutcome::Closed);

        assert_eq!(state.borrow_mut().sync_open(false), OpenTransition::Unchanged);
        assert_eq!(state.borrow_mut().sync_open(true), OpenTransition::Opened);
        let reopened = state.borrow();
        assert_eq!(reopened.phase(), DialogPhase::Idle);
        assert!(!reopened.is_busy());
        assert_eq!(reopened.last_error(), None);
    }

    #[test]
    fn failure_keeps_dialog_open_with_error_until_reopened() {
        let state = open_dialog();
        let outcome = block_on(run_confirm(&state, &MountGuard::new(), || {
            ready(Err("server said no".to_string()))
        }));
        assert_eq!(outcome, ConfirmOutcome::StayedOpen);
        assert_eq!(state.borrow().phase(), DialogPhase::Idle);
        assert_eq!(state.borrow().last_error(), Some("server said no"));

        assert!(state.borrow_mut().request_dismiss());
        state.borrow_mut().sync_open(true);
        assert_eq!(state.borrow().last_error(), None);
    }

    #[test]
    fn unmount_during_confirm_skips_state_updates() {
        let state = open_dialog();
        let guard = MountGuard::new();
        let mut in_flight = start_confirm(&state, &guard);
        let busy_snapshot = state.borrow().clone();

        guard.unmount();
        in_flight.release.send(Err("late failure".to_string())).expect("release");
        in_flight.pool.run_until_stalled();

        assert_eq!(in_flight.outcome.get(), Some(ConfirmOutcome::Unmounted));
        assert_eq!(*state.borrow(), busy_snapshot);
    }

    #[test]
    fn owner_closing_mid_flight_discards_the_stale_result() {
        let state = open_dialog();
        let guard = MountGuard::new();
        let mut in_flight = start_confirm(&state, &guard);

        assert_eq!(state.borrow_mut().sync_open(false), OpenTransition::Closed);
        assert_eq!(state.borrow_mut().sync_open(true), OpenTransition::Opened);
        in_flight.release.send(Err("stale".to_string())).expect("release");
        in_flight.pool.run_until_stalled();

        assert_eq!(in_flight.outcome.get(), Some(ConfirmOutcome::Ignored));
        assert_eq!(state.borrow().phase(), DialogPhase::Idle);
        assert_eq!(state.borrow().last_error(), None);
    }

    #[test]
    fn focus_trap_wraps_at_both_ends() {
        assert_eq!(focus_trap_target(Some(2), 3, false), Some(0));
        assert_eq!(focus_trap_target(Some(0), 3, true), Some(2));
        assert_eq!(focus_trap_target(Some(1), 3, false), None);
        assert_eq!(focus_trap_target(Some(1), 3, true), None);
        assert_eq!(focus_trap_target(None, 3, false), Some(0));
        assert_eq!(focus_trap_target(None, 3, true), Some(2));
        assert_eq!(focus_trap_target(Some(0), 1, false), Some(0));
        assert_eq!(focus_trap_target(None, 0, false), None);
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(validate_name("  Acme  "), Ok("Acme".to_string()));
        assert_eq!(validate_name("   "), Err(NAME_REQUIRED_MESSAGE.to_string()));
        assert_eq!(normalize_description("  "), None);
        assert_eq!(normalize_description(" Team "), Some("Team".to_string()));
    }
}
