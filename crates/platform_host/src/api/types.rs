//! Request and response payloads for the admin and auth endpoints.

use serde::{Deserialize, Serialize};

/// Organization record returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Server id.
    pub id: String,
    /// Display name, unique per deployment.
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: String,
}

/// Group record returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Server id.
    pub id: String,
    /// Display name, unique per deployment.
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of members.
    #[serde(default)]
    pub member_count: u32,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

/// One authenticated session of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Server id.
    pub id: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
    /// Last activity timestamp (ISO 8601).
    #[serde(default)]
    pub last_active_at: String,
    /// Client IP address, when known.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Client user agent, when known.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Whether this is the session making the request.
    #[serde(default)]
    pub is_current: bool,
}

/// `GET /v1/admin/organizations` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationsListResponse {
    /// Organizations in server order.
    pub organizations: Vec<Organization>,
}

/// `GET /v1/admin/groups` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsListResponse {
    /// Groups in server order.
    pub groups: Vec<Group>,
}

/// `GET /v1/auth/sessions` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionsListResponse {
    /// Sessions in server order.
    pub sessions: Vec<UserSession>,
}

/// `POST /v1/admin/organizations` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `POST /v1/admin/groups` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
