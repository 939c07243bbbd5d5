//! Encrypted database handle contract and the in-memory development database.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use crate::storage::settings_mirror::{SettingsMirror, SettingsMirrorFuture};

/// Object-safe boxed future used by [`DatabaseService`].
pub type DatabaseFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Snapshot of the database handle state consumed by feature gating.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseStatus {
    /// The database is still opening.
    pub is_loading: bool,
    /// The database is unlocked and readable.
    pub is_unlocked: bool,
    /// Identifier of the selected database instance.
    pub current_instance_id: Option<String>,
}

/// Encrypted local database handle.
pub trait DatabaseService {
    /// Returns the current status snapshot.
    fn status(&self) -> DatabaseStatus;

    /// Unlocks the current instance.
    fn unlock<'a>(&'a self, password: &'a str) -> DatabaseFuture<'a, Result<(), String>>;

    /// Locks the database, dropping any decrypted state.
    fn lock<'a>(&'a self) -> DatabaseFuture<'a, Result<(), String>>;

    /// Selects another instance. The database locks as part of the switch.
    fn switch_instance<'a>(&'a self, instance_id: &'a str) -> DatabaseFuture<'a, Result<(), String>>;

    /// Deletes an instance and its data.
    fn delete_instance<'a>(&'a self, instance_id: &'a str) -> DatabaseFuture<'a, Result<(), String>>;
}

#[derive(Debug, Default)]
struct MemoryDatabaseState {
    is_loading: bool,
    unlocked: bool,
    current_instance_id: Option<String>,
    password: Option<String>,
    instances: HashMap<String, HashMap<String, String>>,
}

/// In-memory database used for development builds and tests.
///
/// Clones share state. Without a configured password, any non-empty password unlocks. Settings
/// saved through [`SettingsMirror`] are kept per instance and are unreachable while locked.
#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    inner: Rc<RefCell<MemoryDatabaseState>>,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new("default")
    }
}

impl MemoryDatabase {
    /// Creates a locked database with one instance selected.
    pub fn new(instance_id: &str) -> Self {
        let mut instances = HashMap::new();
        instances.insert(instance_id.to_string(), HashMap::new());
        Self {
            inner: Rc::new(RefCell::new(MemoryDatabaseState {
                current_instance_id: Some(instance_id.to_string()),
                instances,
                ..MemoryDatabaseState::default()
            })),
        }
    }

    /// Requires `password` for subsequent unlocks.
    pub fn with_password(self, password: &str) -> Self {
        self.inner.borrow_mut().password = Some(password.to_string());
        self
    }

    /// Marks the database as still opening.
    pub fn set_loading(&self, is_loading: bool) {
        self.inner.borrow_mut().is_loading = is_loading;
    }

    /// Seeds a mirrored setting on the current instance regardless of lock state.
    pub fn seed_setting(&self, key: &str, value: &str) {
        let mut state = self.inner.borrow_mut();
        let Some(instance) = state.current_instance_id.clone() else {
            return;
        };
        state
            .instances
            .entry(instance)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Reads a mirrored setting on the current instance regardless of lock state.
    pub fn mirrored_setting(&self, key: &str) -> Option<String> {
        let state = self.inner.borrow();
        let instance = state.current_instance_id.as_ref()?;
        state.instances.get(instance)?.get(key).cloned()
    }

    fn unlocked_instance(&self) -> Result<String, String> {
        let state = self.inner.borrow();
        if !state.unlocked {
            return Err("database is locked".to_string());
        }
        state
            .current_instance_id
            .clone()
            .ok_or_else(|| "no database instance selected".to_string())
    }
}

impl DatabaseService for MemoryDatabase {
    fn status(&self) -> DatabaseStatus {
        let state = self.inner.borrow();
        DatabaseStatus {
            is_loading: state.is_loading,
            is_unlocked: state.unlocked,
            current_instance_id: state.current_instance_id.clone(),
        }
    }

    fn unlock<'a>(&'a self, password: &'a str) -> DatabaseFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if state.current_instance_id.is_none() {
                return Err("no database instance selected".to_string());
            }
            let accepted = match state.password.as_deref() {
                Some(expected) => expected == password,
                None => !password.is_empty(),
            };
            if !accepted {
                return Err("incorrect password".to_string());
            }
            state.unlocked = true;
            Ok(())
        })
    }

    fn lock<'a>(&'a self) -> DatabaseFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().unlocked = false;
            Ok(())
        })
    }

    fn switch_instance<'a>(&'a self, instance_id: &'a str) -> DatabaseFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.instances.entry(instance_id.to_string()).or_default();
            state.current_instance_id = Some(instance_id.to_string());
            state.unlocked = false;
            Ok(())
        })
    }

    fn delete_instance<'a>(&'a self, instance_id: &'a str) -> DatabaseFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if state.instances.remove(instance_id).is_none() {
                return Err(format!("unknown database instance `{instance_id}`"));
            }
            if state.current_instance_id.as_deref() == Some(instance_id) {
                state.current_instance_id = None;
                state.unlocked = false;
            }
            Ok(())
        })
    }
}

impl SettingsMirror for MemoryDatabase {
    fn load_all<'a>(&'a self) -> SettingsMirrorFuture<'a, Result<HashMap<String, String>, String>> {
        Box::pin(async move {
            let instance = self.unlocked_instance()?;
            Ok(self
                .inner
                .borrow()
                .instances
                .get(&instance)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn save<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> SettingsMirrorFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let instance = self.unlocked_instance()?;
            self.inner
                .borrow_mut()
                .instances
                .entry(instance)
                .or_default()
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn unlock_checks_configured_password() {
        let db = MemoryDatabase::new("personal").with_password("hunter2");
        assert!(block_on(db.unlock("wrong")).is_err());
        assert!(!db.status().is_unlocked);

        block_on(db.unlock("hunter2")).expect("unlock");
        assert_eq!(
            db.status(),
            DatabaseStatus {
                is_loading: false,
                is_unlocked: true,
                current_instance_id: Some("personal".to_string()),
            }
        );
    }

    #[test]
    fn mirror_is_unreachable_while_locked() {
        let db = MemoryDatabase::default();
        assert!(block_on(db.save("theme", "dark")).is_err());
        assert!(block_on(db.load_all()).is_err());

        block_on(db.unlock("pw")).expect("unlock");
        block_on(db.save("theme", "dark")).expect("save");
        let all = block_on(db.load_all()).expect("load");
        assert_eq!(all.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn switching_instances_locks_and_isolates_settings() {
        let db = MemoryDatabase::default();
        db.seed_setting("language", "es");
        block_on(db.unlock("pw")).expect("unlock");

        block_on(db.switch_instance("work")).expect("switch");
        assert!(!db.status().is_unlocked);
        assert_eq!(db.mirrored_setting("language"), None);

        block_on(db.delete_instance("work")).expect("delete");
        assert_eq!(db.status().current_instance_id, None);
        assert!(block_on(db.delete_instance("work")).is_err());
    }
}
