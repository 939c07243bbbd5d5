use super::RawResponse;

pub async fn fetch_text(method: &str, path: &str, _json_body: Option<&str>) -> Result<RawResponse, String> {
    Err(format!(
        "{method} {path}: fetch is only available when compiled for wasm32"
    ))
}
