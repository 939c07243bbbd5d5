use desktop_runtime::{use_desktop_runtime, DesktopProvider, DesktopShell};
use desktop_window_contract::FeatureWindowKind;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host_web::build_host_services;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Workspace" />
        <Meta name="description" content="Desktop-style workspace for personal data." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/open/:kind" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

/// Feature named by `?open=<kind>` or `/open/<kind>`, if any.
fn requested_feature(query: Option<String>, path: Option<String>) -> Option<FeatureWindowKind> {
    query
        .or(path)
        .and_then(|token| FeatureWindowKind::from_token(token.trim()))
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider host_services=build_host_services()>
            <DeepLinkLauncher />
            <DesktopShell />
        </DesktopProvider>
    }
}

#[component]
fn DeepLinkLauncher() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = use_query_map();
    let params = use_params_map();

    create_effect(move |_| {
        let requested = requested_feature(
            query.with(|map| map.get("open").cloned()),
            params.with(|map| map.get("kind").cloned()),
        );
        if let Some(kind) = requested {
            logging::log!("opening {} from deep link", kind.token());
            runtime.open_feature(kind);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_links_resolve_feature_tokens() {
        assert_eq!(
            requested_feature(Some("settings".to_string()), None),
            Some(FeatureWindowKind::Settings)
        );
        assert_eq!(
            requested_feature(None, Some("admin-groups".to_string())),
            Some(FeatureWindowKind::AdminGroups)
        );
        assert_eq!(requested_feature(Some("nope".to_string()), None), None);
        assert_eq!(requested_feature(None, None), None);
    }
}
