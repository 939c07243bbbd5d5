//! Camera capture uploads routed through the virtual filesystem.

use leptos::logging;
use platform_host::VfsService;

const CAPTURE_DIRECTORY: &str = "/photos";

/// VFS path for a capture taken at `captured_at_ms`.
pub fn capture_path(captured_at_ms: u64) -> String {
    format!("{CAPTURE_DIRECTORY}/capture-{captured_at_ms}.png")
}

/// Stores a captured photo and returns its path.
///
/// Upload failures are logged and reported as `None`; they never propagate to the window.
pub async fn save_captured_photo(
    vfs: &dyn VfsService,
    bytes: &[u8],
    captured_at_ms: u64,
) -> Option<String> {
    let path = capture_path(captured_at_ms);
    match vfs.write_file(&path, bytes).await {
        Ok(stored) => Some(stored),
        Err(err) => {
            logging::error!("camera capture upload to `{path}` failed: {err}");
            None
        }
    }
}
