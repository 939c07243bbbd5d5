//! Typed HTTP API contracts for the admin and auth-session endpoints.

mod memory;
mod types;

use std::{fmt, future::Future, pin::Pin};

pub use memory::MemoryApi;
pub use types::{
    CreateGroupRequest, CreateOrganizationRequest, Group, GroupsListResponse, Organization,
    OrganizationsListResponse, SessionsListResponse, UserSession,
};

/// Object-safe boxed future used by the API traits.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + 'a>>;

/// Admin organizations endpoint base path.
pub const ORGANIZATIONS_PATH: &str = "/v1/admin/organizations";
/// Admin groups endpoint base path.
pub const GROUPS_PATH: &str = "/v1/admin/groups";
/// Auth sessions endpoint base path.
pub const SESSIONS_PATH: &str = "/v1/auth/sessions";

/// HTTP status the server uses for duplicate names.
pub const HTTP_CONFLICT: u16 = 409;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Failure of one API call.
pub enum ApiError {
    /// The server answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the status text.
        message: String,
    },
    /// The request never produced a response.
    Network(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Whether this error reports a name conflict.
    ///
    /// Some deployments surface conflicts only through the message text, so both the status and
    /// the message are checked.
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Http { status, message } => {
                *status == HTTP_CONFLICT
                    || message.to_ascii_lowercase().contains("already exists")
            }
            Self::Network(_) | Self::Decode(_) => false,
        }
    }

    /// Message to show the user, with conflicts replaced by `conflict_message`.
    pub fn user_message(&self, conflict_message: &str) -> String {
        if self.is_conflict() {
            conflict_message.to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, message } if message.is_empty() => {
                write!(f, "request failed with status {status}")
            }
            Self::Http { message, .. } => f.write_str(message),
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Decode(message) => write!(f, "unexpected response: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Admin endpoints for organizations and groups.
pub trait AdminApi {
    /// Lists organizations.
    fn list_organizations(&self) -> ApiFuture<'_, OrganizationsListResponse>;

    /// Creates an organization.
    fn create_organization<'a>(
        &'a self,
        request: &'a CreateOrganizationRequest,
    ) -> ApiFuture<'a, Organization>;

    /// Deletes an organization.
    fn delete_organization<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;

    /// Lists groups.
    fn list_groups(&self) -> ApiFuture<'_, GroupsListResponse>;

    /// Creates a group.
    fn create_group<'a>(&'a self, request: &'a CreateGroupRequest) -> ApiFuture<'a, Group>;

    /// Deletes a group.
    fn delete_group<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;
}

/// Endpoints for the signed-in user's own sessions.
pub trait AuthSessionsApi {
    /// Lists sessions.
    fn list_sessions(&self) -> ApiFuture<'_, SessionsListResponse>;

    /// Revokes a session.
    fn delete_session<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_are_detected_by_status_or_message() {
        let by_status = ApiError::Http {
            status: 409,
            message: "Conflict".to_string(),
        };
        let by_message = ApiError::Http {
            status: 400,
            message: "Organization already exists".to_string(),
        };
        let other = ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        };

        assert!(by_status.is_conflict());
        assert!(by_message.is_conflict());
        assert!(!other.is_conflict());
        assert!(!ApiError::Http {
            status: 404,
            message: "organization org-4091 not found".to_string(),
        }
        .is_conflict());
        assert!(!ApiError::Network("offline".to_string()).is_conflict());
    }

    #[test]
    fn user_message_remaps_conflicts_only() {
        let conflict = ApiError::Http {
            status: 409,
            message: String::new(),
        };
        assert_eq!(
            conflict.user_message("A group with this name already exists"),
            "A group with this name already exists"
        );

        let empty = ApiError::Http {
            status: 503,
            message: String::new(),
        };
        assert_eq!(empty.user_message("unused"), "request failed with status 503");
        assert_eq!(empty.status(), Some(503));
    }
}
