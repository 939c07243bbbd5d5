//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{
    components::a11y::focus_window_content, persistence::save_window_dimensions,
    reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext,
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::DimensionsChanged { kind, dimensions } => {
            let saved = runtime.host.with_value(|host| {
                save_window_dimensions(host.local_settings.as_ref(), kind, &dimensions)
            });
            if let Err(err) = saved {
                logging::warn!("window geometry persist failed for {}: {err}", kind.token());
            }
        }
        RuntimeEffect::FocusWindowContent(window_id) => {
            // The window may mount in this same tick.
            request_animation_frame(move || {
                focus_window_content(&window_id.dom_id());
            });
        }
    }
}
