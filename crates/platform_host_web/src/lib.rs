//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Settings go to `localStorage`; admin, sessions and auth calls go through `fetch` against the
//! same-origin `/v1` API. On non-wasm targets the adapters degrade to misses and network errors
//! so the crate still builds and tests on the host.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the service bundle factory.
pub mod adapters;
pub mod api;
mod bridge;
pub mod storage;

pub use adapters::{build_host_services, host_strategy_name, selected_host_strategy};
pub use api::{api_error_from_response, WebApiClient, WebAuthService};
pub use storage::local_settings::WebLocalSettingsStore;
