//! Typed host-service contracts shared by the desktop runtime and the browser adapters.
//!
//! This crate is the boundary between the shell and the systems it consumes but does not own:
//! local settings storage, the encrypted database (and its settings mirror), authentication, the
//! HTTP API and the virtual filesystem. Every contract ships with an in-memory adapter so the
//! runtime can be exercised on the host target; browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod auth;
pub mod database;
pub mod host;
pub mod storage;
pub mod time;
pub mod vfs;

pub use api::{
    AdminApi, ApiError, ApiFuture, AuthSessionsApi, CreateGroupRequest,
    CreateOrganizationRequest, Group, GroupsListResponse, MemoryApi, Organization,
    OrganizationsListResponse, SessionsListResponse, UserSession,
};
pub use auth::{AuthFuture, AuthService, AuthStatus, MemoryAuthService};
pub use database::{DatabaseFuture, DatabaseService, DatabaseStatus, MemoryDatabase};
pub use host::{HostServices, HostStrategy};
pub use storage::local_settings::{
    LocalSettingsStore, MemoryLocalSettingsStore, NoopLocalSettingsStore,
};
pub use storage::settings_mirror::{NoopSettingsMirror, SettingsMirror, SettingsMirrorFuture};
pub use time::unix_time_ms_now;
pub use vfs::{MemoryVfs, NoopVfs, VfsFuture, VfsService};
