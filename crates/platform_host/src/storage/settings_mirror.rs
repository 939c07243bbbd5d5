//! Settings mirror contract: the copy of user settings kept inside the encrypted database.

use std::{collections::HashMap, future::Future, pin::Pin};

/// Object-safe boxed future used by [`SettingsMirror`].
pub type SettingsMirrorFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Encrypted, database-backed copy of the settings map.
///
/// The mirror is the authority for cross-device and restore scenarios; it is only reachable
/// while the database is unlocked.
pub trait SettingsMirror {
    /// Loads every mirrored setting.
    fn load_all<'a>(&'a self) -> SettingsMirrorFuture<'a, Result<HashMap<String, String>, String>>;

    /// Saves one setting.
    fn save<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> SettingsMirrorFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Mirror that stores nothing.
pub struct NoopSettingsMirror;

impl SettingsMirror for NoopSettingsMirror {
    fn load_all<'a>(&'a self) -> SettingsMirrorFuture<'a, Result<HashMap<String, String>, String>> {
        Box::pin(async { Ok(HashMap::new()) })
    }

    fn save<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a str,
    ) -> SettingsMirrorFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}
