//! Feature window catalog and capability gating.
//!
//! The catalog is declared in `feature_windows.toml`, validated by `build.rs`, and embedded as
//! JSON. Every [`FeatureWindowKind`] has exactly one [`FeatureDescriptor`].

use std::sync::OnceLock;

use desktop_window_contract::{FeatureCapabilities, FeatureWindowKind};
use platform_host::{AuthStatus, DatabaseStatus};
use serde::Deserialize;
use thiserror::Error;

use crate::model::WindowConstraints;

include!(concat!(env!("OUT_DIR"), "/feature_catalog_generated.rs"));

/// Catalog entry for one feature window kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureDescriptor {
    pub kind: FeatureWindowKind,
    pub title: String,
    pub capabilities: FeatureCapabilities,
    /// Opening again focuses the existing window.
    pub single_instance: bool,
    pub show_in_launcher: bool,
    /// Offers `View → List / Table`.
    pub supports_view_modes: bool,
    /// Offers `View → Sort by`.
    pub supports_sorting: bool,
    pub constraints: WindowConstraints,
}

#[derive(Debug, Error)]
/// Errors raised while decoding the embedded catalog.
pub enum CatalogError {
    /// The embedded JSON did not decode.
    #[error("feature catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A window kind has no catalog entry.
    #[error("feature catalog has no entry for `{0}`")]
    MissingKind(&'static str),
}

fn parse_catalog(raw: &str) -> Result<Vec<FeatureDescriptor>, CatalogError> {
    let mut descriptors: Vec<FeatureDescriptor> = serde_json::from_str(raw)?;
    for kind in FeatureWindowKind::ALL {
        if !descriptors.iter().any(|descriptor| descriptor.kind == kind) {
            return Err(CatalogError::MissingKind(kind.token()));
        }
    }
    descriptors.sort_by_key(|descriptor| {
        FeatureWindowKind::ALL
            .iter()
            .position(|kind| *kind == descriptor.kind)
    });
    Ok(descriptors)
}

/// Returns the catalog in launcher order.
pub fn feature_catalog() -> &'static [FeatureDescriptor] {
    static CATALOG: OnceLock<Vec<FeatureDescriptor>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        parse_catalog(FEATURE_CATALOG_JSON).expect("build-validated feature catalog parses")
    })
}

/// Returns the descriptor for `kind`.
pub fn feature_descriptor(kind: FeatureWindowKind) -> &'static FeatureDescriptor {
    feature_catalog()
        .iter()
        .find(|descriptor| descriptor.kind == kind)
        .expect("feature descriptor exists")
}

/// Descriptors shown in the taskbar launcher.
pub fn launcher_features() -> impl Iterator<Item = &'static FeatureDescriptor> {
    feature_catalog()
        .iter()
        .filter(|descriptor| descriptor.show_in_launcher)
}

/// What a feature window renders in place of (or as) its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureGate {
    /// A required service is still starting.
    Loading,
    /// The encrypted database must be unlocked first.
    UnlockRequired,
    /// The user must sign in first.
    LoginRequired,
    /// Preconditions are met; render the feature.
    Ready,
}

impl FeatureGate {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::UnlockRequired => "unlock-required",
            Self::LoginRequired => "login-required",
            Self::Ready => "ready",
        }
    }
}

/// Resolves the gate for a feature with `capabilities`.
///
/// Precedence is fixed: loading, then unlock, then login.
pub fn resolve_feature_gate(
    capabilities: FeatureCapabilities,
    database: &DatabaseStatus,
    auth: &AuthStatus,
) -> FeatureGate {
    let database_loading = capabilities.needs_database && database.is_loading;
    let auth_loading = capabilities.needs_auth && auth.is_loading;
    if database_loading || auth_loading {
        FeatureGate::Loading
    } else if capabilities.needs_database && !database.is_unlocked {
        FeatureGate::UnlockRequired
    } else if capabilities.needs_auth && !auth.is_authenticated {
        FeatureGate::LoginRequired
    } else {
        FeatureGate::Ready
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn database(is_loading: bool, is_unlocked: bool) -> DatabaseStatus {
        DatabaseStatus {
            is_loading,
            is_unlocked,
            current_instance_id: Some("default".to_string()),
        }
    }

    fn auth(is_loading: bool, is_authenticated: bool) -> AuthStatus {
        AuthStatus {
            is_loading,
            is_authenticated,
            user_email: None,
        }
    }

    #[test]
    fn catalog_covers_every_kind_in_launcher_order() {
        let kinds: Vec<_> = feature_catalog().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, FeatureWindowKind::ALL.to_vec());
        assert!(launcher_features().all(|d| d.kind != FeatureWindowKind::Notifications));
    }

    #[test]
    fn catalog_declares_capabilities_as_data() {
        let caps = |kind| feature_descriptor(kind).capabilities;
        assert_eq!(caps(FeatureWindowKind::Email), FeatureCapabilities::DATABASE_AND_AUTH);
        assert_eq!(
            caps(FeatureWindowKind::AdminOrganizations),
            FeatureCapabilities::DATABASE_AND_AUTH
        );
        assert_eq!(caps(FeatureWindowKind::Backup), FeatureCapabilities::DATABASE);
        assert_eq!(caps(FeatureWindowKind::Sync), FeatureCapabilities::DATABASE);
        assert_eq!(caps(FeatureWindowKind::Camera), FeatureCapabilities::NONE);
        assert_eq!(caps(FeatureWindowKind::Audio), FeatureCapabilities::NONE);
    }

    #[test]
    fn catalog_constraints_are_consistent() {
        for descriptor in feature_catalog() {
            let limits = descriptor.constraints;
            assert!(limits.min_width <= limits.default_width, "{:?}", descriptor.kind);
            assert!(limits.min_height <= limits.default_height, "{:?}", descriptor.kind);
            assert!((1..=100).contains(&limits.max_width_percent));
        }
    }

    #[test]
    fn email_gate_follows_fixed_precedence() {
        let email = feature_descriptor(FeatureWindowKind::Email).capabilities;

        assert_eq!(
            resolve_feature_gate(email, &database(true, false), &auth(false, false)),
            FeatureGate::Loading
        );
        assert_eq!(
            resolve_feature_gate(email, &database(false, false), &auth(false, false)),
            FeatureGate::UnlockRequired
        );
        assert_eq!(
            resolve_feature_gate(email, &database(false, true), &auth(false, false)),
            FeatureGate::LoginRequired
        );
        assert_eq!(
            resolve_feature_gate(email, &database(false, true), &auth(false, true)),
            FeatureGate::Ready
        );
        assert_eq!(
            resolve_feature_gate(email, &database(false, false), &auth(true, false)),
            FeatureGate::Loading
        );
    }

    #[test]
    fn features_without_requirements_ignore_service_state() {
        assert_eq!(
            resolve_feature_gate(
                FeatureCapabilities::NONE,
                &database(true, false),
                &auth(true, false)
            ),
            FeatureGate::Ready
        );
        assert_eq!(
            resolve_feature_gate(
                FeatureCapabilities::DATABASE,
                &database(false, true),
                &auth(true, false)
            ),
            FeatureGate::Ready
        );
    }

    #[test]
    fn malformed_catalog_is_reported() {
        assert!(matches!(parse_catalog("{"), Err(CatalogError::Malformed(_))));
        assert!(matches!(
            parse_catalog("[]"),
            Err(CatalogError::MissingKind("contacts"))
        ));
    }
}
