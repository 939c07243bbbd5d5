//! Settings storage contracts: fast synchronous local storage and the encrypted database mirror.

pub mod local_settings;
pub mod settings_mirror;
