use super::*;
use system_ui::{FieldGroup, Panel, SelectField, Switch, Text, TextRole, TextTone, ToggleRow};

/// Value a toggle writes when switched off: the key's other allowed value.
fn toggle_off_value(key: SettingKey, on: &'static str) -> &'static str {
    key.allowed_values()
        .iter()
        .copied()
        .find(|value| *value != on)
        .unwrap_or_else(|| key.default_value())
}

fn option_label(value: &str) -> String {
    value
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
fn SettingControl(setting: SettingKey) -> impl IntoView {
    let key = setting;
    let runtime = use_desktop_runtime();
    let value = Signal::derive(move || runtime.setting(key));
    let control_id = format!("setting-{}", key.storage_key());

    match key.toggle_on_value() {
        Some(on) => view! {
            <ToggleRow title=key.label()>
                <Switch
                    id=control_id
                    aria_label=key.label()
                    checked=Signal::derive(move || value.get() == on)
                    on_toggle=Callback::new(move |checked: bool| {
                        let next = if checked { on } else { toggle_off_value(key, on) };
                        runtime.set_setting(key, next);
                    })
                />
            </ToggleRow>
        }
        .into_view(),
        None => view! {
            <ToggleRow title=key.label()>
                <SelectField
                    id=control_id
                    aria_label=key.label()
                    options=key
                        .allowed_values()
                        .iter()
                        .map(|value| (value.to_string(), option_label(value)))
                        .collect()
                    value=value
                    on_change=Callback::new(move |next: String| runtime.set_setting(key, &next))
                />
            </ToggleRow>
        }
        .into_view(),
    }
}

#[component]
/// Settings window content: one control per setting key.
pub(super) fn SettingsPanel() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let sync_note = move || {
        let _ = runtime.settings_revision.get();
        let synced = runtime.settings.with_value(|settings| settings.is_synced());
        if synced {
            "Synced with the encrypted database."
        } else {
            "Stored on this device. Unlock the database to sync."
        }
    };

    view! {
        <Panel layout_class="settings-panel" role="region" aria_label="Settings">
            <FieldGroup title="Appearance">
                {SettingKey::ALL
                    .into_iter()
                    .map(|key| view! { <SettingControl setting=key /> })
                    .collect_view()}
            </FieldGroup>
            <Text role=TextRole::Caption tone=TextTone::Secondary>{sync_note}</Text>
        </Panel>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn toggles_switch_to_the_other_allowed_value() {
        assert_eq!(toggle_off_value(SettingKey::Tooltips, "enabled"), "disabled");
        assert_eq!(toggle_off_value(SettingKey::WindowOpacity, "translucent"), "opaque");
        assert_eq!(toggle_off_value(SettingKey::BorderRadius, "rounded"), "square");
    }

    #[test]
    fn option_labels_are_title_cased() {
        assert_eq!(option_label("tokyo-night"), "Tokyo Night");
        assert_eq!(option_label("en"), "En");
    }
}
