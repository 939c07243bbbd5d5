use std::rc::Rc;

use platform_host::unix_time_ms_now;
use system_ui::{Button, ButtonVariant, EmptyState, IconName, Panel, Text, TextTone};

use super::*;
use crate::{capture::save_captured_photo, notifications::NotificationLevel};

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("{err:?}"))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[component]
/// Camera window content: captures a photo through the device picker and stores it in the VFS.
pub(super) fn CameraCapture() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let input_ref = create_node_ref::<html::Input>();
    let saving = create_rw_signal(false);
    let last_saved = create_rw_signal(None::<String>);
    let failed = create_rw_signal(false);

    let on_change = move |_: web_sys::Event| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        saving.set(true);
        failed.set(false);
        let vfs = runtime.host.with_value(|host| Rc::clone(&host.vfs));
        spawn_local(async move {
            let stored = match read_file_bytes(&file).await {
                Ok(bytes) => save_captured_photo(vfs.as_ref(), &bytes, unix_time_ms_now()).await,
                Err(err) => {
                    logging::error!("camera capture read failed: {err}");
                    None
                }
            };
            saving.try_set(false);
            failed.try_set(stored.is_none());
            if let Some(path) = stored.as_deref() {
                runtime.push_notification(
                    "Photo saved",
                    format!("Saved to {path}"),
                    NotificationLevel::Success,
                );
            }
            if stored.is_some() {
                last_saved.try_set(stored);
            }
        });
    };

    view! {
        <Panel layout_class="camera-capture" role="region" aria_label="Camera">
            <input
                type="file"
                accept="image/*"
                capture="environment"
                class="camera-capture-input"
                hidden=true
                node_ref=input_ref
                on:change=on_change
            />
            <EmptyState icon=IconName::Camera>
                <Button
                    variant=ButtonVariant::Primary
                    leading_icon=IconName::Camera
                    disabled=saving
                    aria_busy=saving
                    on_click=Callback::new(move |_| {
                        if let Some(input) = input_ref.get_untracked() {
                            input.click();
                        }
                    })
                >
                    {move || if saving.get() { "Saving..." } else { "Take photo" }}
                </Button>
                {move || {
                    last_saved
                        .get()
                        .map(|path| view! { <Text tone=TextTone::Secondary>{format!("Last photo: {path}")}</Text> })
                }}
                <Show when=move || failed.get() fallback=|| ()>
                    <Text tone=TextTone::Danger aria_role="alert">"The photo could not be saved."</Text>
                </Show>
            </EmptyState>
        </Panel>
    }
}
