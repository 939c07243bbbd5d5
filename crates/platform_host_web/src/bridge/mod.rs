//! `fetch` transport, split by target so the crate builds and tests on the host.

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

/// Raw HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one same-origin request with credentials. `Err` means no response was received.
pub async fn fetch_text(method: &str, path: &str, json_body: Option<&str>) -> Result<RawResponse, String> {
    imp::fetch_text(method, path, json_body).await
}
