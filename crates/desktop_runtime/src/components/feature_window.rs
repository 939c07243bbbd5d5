use super::{menus::WindowMenuBar, *};
use crate::{
    features::{resolve_feature_gate, FeatureGate},
    menus::FeatureViewState,
};
use system_ui::{
    Button, ButtonVariant, EmptyState, FieldGroup, Heading, IconName, LoadingIndicator, Panel,
    Text, TextField, TextTone,
};

#[derive(Debug, Clone)]
/// Context injected into feature content by [`FeatureWindow`].
pub struct FeatureWindowContext {
    pub kind: FeatureWindowKind,
    /// Lifecycle controller of the hosting window, forwarded unchanged.
    pub controller: WindowController,
    /// View menu state (refresh token, view mode, sort order).
    pub view_state: RwSignal<FeatureViewState>,
}

/// Returns the [`FeatureWindowContext`] of the enclosing feature window.
///
/// # Panics
///
/// Panics if called outside [`FeatureWindow`].
pub fn use_feature_window() -> FeatureWindowContext {
    use_context::<FeatureWindowContext>().expect("FeatureWindowContext not provided")
}

#[component]
/// Generic feature wrapper: renders the window menus, then a loading indicator, an unlock or
/// login prompt, or the feature content depending on the kind's declared capabilities.
pub fn FeatureWindow(
    kind: FeatureWindowKind,
    controller: WindowController,
    children: ChildrenFn,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let descriptor = feature_descriptor(kind);
    let gate = create_memo(move |_| {
        let database = runtime.database_status.get();
        let auth = runtime.auth_status.get();
        resolve_feature_gate(descriptor.capabilities, &database, &auth)
    });
    let view_state = create_rw_signal(FeatureViewState::default());
    provide_context(FeatureWindowContext {
        kind,
        controller: controller.clone(),
        view_state,
    });

    view! {
        <div
            class="feature-window"
            data-feature=kind.token()
            data-gate=move || gate.get().token()
        >
            <WindowMenuBar descriptor controller view_state />
            {move || match gate.get() {
                FeatureGate::Loading => {
                    view! { <LoadingIndicator label=format!("Loading {}...", descriptor.title) /> }
                        .into_view()
                }
                FeatureGate::UnlockRequired => {
                    view! { <UnlockPrompt feature_title=descriptor.title.clone() /> }.into_view()
                }
                FeatureGate::LoginRequired => {
                    view! { <LoginPrompt feature_title=descriptor.title.clone() /> }.into_view()
                }
                FeatureGate::Ready => children().into_view(),
            }}
        </div>
    }
}

fn submit_on_enter(submit: impl Fn() + 'static) -> Callback<web_sys::KeyboardEvent> {
    Callback::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            submit();
        }
    })
}

#[component]
fn UnlockPrompt(#[prop(into)] feature_title: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let submit = move || {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        error.set(None);
        let value = password.get_untracked();
        spawn_local(async move {
            let result = runtime.unlock_database(value).await;
            // The prompt unmounts once the gate opens.
            pending.try_set(false);
            match result {
                Ok(()) => {
                    password.try_set(String::new());
                }
                Err(err) => {
                    logging::warn!("database unlock failed: {err}");
                    error.try_set(Some(err));
                }
            }
        });
    };

    view! {
        <Panel layout_class="feature-gate" role="region" aria_label="Database locked">
            <EmptyState icon=IconName::Lock>
                <Heading>{format!("{feature_title} is locked")}</Heading>
                <Text tone=TextTone::Secondary>"Unlock the database to continue."</Text>
            </EmptyState>
            <FieldGroup title="Database password">
                <TextField
                    input_type="password"
                    autocomplete="current-password"
                    aria_label="Database password"
                    value=password
                    disabled=pending
                    invalid=Signal::derive(move || error.with(Option::is_some))
                    on_input=Callback::new(move |value| password.set(value))
                    on_keydown=submit_on_enter(submit)
                />
            </FieldGroup>
            {move || {
                error
                    .get()
                    .map(|message| view! { <Text tone=TextTone::Danger aria_role="alert">{message}</Text> })
            }}
            <Button
                variant=ButtonVariant::Primary
                disabled=pending
                aria_busy=pending
                leading_icon=IconName::Lock
                on_click=Callback::new(move |_| submit())
            >
                {move || if pending.get() { "Unlocking..." } else { "Unlock" }}
            </Button>
        </Panel>
    }
}

#[component]
fn LoginPrompt(#[prop(into)] feature_title: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let submit = move || {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        error.set(None);
        let (email_value, password_value) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            let result = runtime.login(email_value, password_value).await;
            pending.try_set(false);
            match result {
                Ok(()) => {
                    password.try_set(String::new());
                }
                Err(err) => {
                    logging::warn!("sign-in failed: {err}");
                    error.try_set(Some(err));
                }
            }
        });
    };

    view! {
        <Panel layout_class="feature-gate" role="region" aria_label="Sign-in required">
            <EmptyState icon=IconName::User>
                <Heading>{format!("Sign in to use {feature_title}")}</Heading>
                <Text tone=TextTone::Secondary>"This feature needs an account session."</Text>
            </EmptyState>
            <FieldGroup title="Email">
                <TextField
                    input_type="email"
                    autocomplete="username"
                    aria_label="Email"
                    value=email
                    disabled=pending
                    on_input=Callback::new(move |value| email.set(value))
                    on_keydown=submit_on_enter(submit)
                />
            </FieldGroup>
            <FieldGroup title="Password">
                <TextField
                    input_type="password"
                    autocomplete="current-password"
                    aria_label="Password"
                    value=password
                    disabled=pending
                    invalid=Signal::derive(move || error.with(Option::is_some))
                    on_input=Callback::new(move |value| password.set(value))
                    on_keydown=submit_on_enter(submit)
                />
            </FieldGroup>
            {move || {
                error
                    .get()
                    .map(|message| view! { <Text tone=TextTone::Danger aria_role="alert">{message}</Text> })
            }}
            <Button
                variant=ButtonVariant::Primary
                disabled=pending
                aria_busy=pending
                leading_icon=IconName::User
                on_click=Callback::new(move |_| submit())
            >
                {move || if pending.get() { "Signing in..." } else { "Sign in" }}
            </Button>
        </Panel>
    }
}

#[component]
/// Stand-in content for feature packages that ship outside this workspace.
pub(super) fn FeaturePlaceholder() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window = use_feature_window();
    let descriptor = feature_descriptor(window.kind);
    let instance = move || {
        runtime
            .database_status
            .with(|status| status.current_instance_id.clone())
            .unwrap_or_else(|| "none".to_string())
    };

    view! {
        <Panel layout_class="feature-placeholder" role="region" aria_label=descriptor.title.clone()>
            <EmptyState icon=IconName::Window>
                <Heading>{descriptor.title.clone()}</Heading>
                <Text tone=TextTone::Secondary>
                    {move || format!("Database instance: {}", instance())}
                </Text>
                <Text role=system_ui::TextRole::Caption tone=TextTone::Secondary>
                    {move || {
                        window.view_state.with(|view| {
                            format!(
                                "View: {} / Sort: {}",
                                view.view_mode.label(),
                                view.sort_order.label(),
                            )
                        })
                    }}
                </Text>
            </EmptyState>
        </Panel>
    }
}
