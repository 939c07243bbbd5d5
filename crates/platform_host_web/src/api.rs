//! `fetch`-backed clients for the admin, sessions and auth endpoints.

use std::{cell::RefCell, rc::Rc};

use platform_host::{
    api::{GROUPS_PATH, ORGANIZATIONS_PATH, SESSIONS_PATH},
    AdminApi, ApiError, ApiFuture, AuthFuture, AuthService, AuthSessionsApi, AuthStatus,
    CreateGroupRequest, CreateOrganizationRequest, Group, GroupsListResponse, Organization,
    OrganizationsListResponse, SessionsListResponse,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::bridge::{self, RawResponse};

const LOGIN_PATH: &str = "/v1/auth/login";
const LOGOUT_PATH: &str = "/v1/auth/logout";

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a non-success response to an [`ApiError::Http`], preferring the JSON `error` or
/// `message` field and falling back to the raw body text.
pub fn api_error_from_response(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .unwrap_or_else(|| body.trim().to_string());
    ApiError::Http { status, message }
}

/// Decodes a success body, treating an empty body as JSON `null`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn check(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(api_error_from_response(response.status, &response.body))
    }
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<RawResponse, ApiError> {
    let response = bridge::fetch_text(method, path, body.as_deref())
        .await
        .map_err(ApiError::Network)?;
    check(response)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send("GET", path, None).await?;
    decode_body(&response.body)
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let raw = serde_json::to_string(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    let response = send("POST", path, Some(raw)).await?;
    decode_body(&response.body)
}

async fn delete(path: String) -> Result<(), ApiError> {
    send("DELETE", &path, None).await.map(|_| ())
}

#[derive(Debug, Clone, Copy, Default)]
/// Same-origin API client using the browser `fetch` API with credentials included.
pub struct WebApiClient;

impl AdminApi for WebApiClient {
    fn list_organizations(&self) -> ApiFuture<'_, OrganizationsListResponse> {
        Box::pin(get_json(ORGANIZATIONS_PATH))
    }

    fn create_organization<'a>(
        &'a self,
        request: &'a CreateOrganizationRequest,
    ) -> ApiFuture<'a, Organization> {
        Box::pin(post_json(ORGANIZATIONS_PATH, request))
    }

    fn delete_organization<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(delete(format!("{ORGANIZATIONS_PATH}/{id}")))
    }

    fn list_groups(&self) -> ApiFuture<'_, GroupsListResponse> {
        Box::pin(get_json(GROUPS_PATH))
    }

    fn create_group<'a>(&'a self, request: &'a CreateGroupRequest) -> ApiFuture<'a, Group> {
        Box::pin(post_json(GROUPS_PATH, request))
    }

    fn delete_group<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(delete(format!("{GROUPS_PATH}/{id}")))
    }
}

impl AuthSessionsApi for WebApiClient {
    fn list_sessions(&self) -> ApiFuture<'_, SessionsListResponse> {
        Box::pin(get_json(SESSIONS_PATH))
    }

    fn delete_session<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(delete(format!("{SESSIONS_PATH}/{id}")))
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    email: Option<String>,
}

/// Cookie-session auth service talking to `/v1/auth/*`.
///
/// Status is tracked locally from the last login/logout outcome.
#[derive(Debug, Clone, Default)]
pub struct WebAuthService {
    status: Rc<RefCell<AuthStatus>>,
}

impl AuthService for WebAuthService {
    fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let email = email.trim();
            self.status.borrow_mut().is_loading = true;
            let result: Result<Option<LoginResponse>, ApiError> =
                post_json(LOGIN_PATH, &LoginRequest { email, password }).await;
            let mut status = self.status.borrow_mut();
            status.is_loading = false;
            match result {
                Ok(response) => {
                    status.is_authenticated = true;
                    status.user_email = Some(
                        response
                            .and_then(|body| body.email)
                            .unwrap_or_else(|| email.to_string()),
                    );
                    Ok(())
                }
                Err(err) => Err(err.to_string()),
            }
        })
    }

    fn logout<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let result = send("POST", LOGOUT_PATH, None).await;
            *self.status.borrow_mut() = AuthStatus::default();
            result.map(|_| ()).map_err(|err| err.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn error_body_prefers_json_error_field() {
        assert_eq!(
            api_error_from_response(409, r#"{"error":"Organization already exists"}"#),
            ApiError::Http {
                status: 409,
                message: "Organization already exists".to_string(),
            }
        );
        assert_eq!(
            api_error_from_response(502, " Bad Gateway \n"),
            ApiError::Http {
                status: 502,
                message: "Bad Gateway".to_string(),
            }
        );
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let decoded: OrganizationsListResponse =
            decode_body(r#"{"organizations":[{"id":"org-1","name":"Acme","description":"Team"}]}"#)
                .expect("decode");
        assert_eq!(decoded.organizations[0].description.as_deref(), Some("Team"));

        let err = decode_body::<OrganizationsListResponse>("[]").expect_err("mismatch");
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(decode_body::<Option<LoginResponse>>("").map(|r| r.is_none()), Ok(true));
    }

    #[test]
    fn host_target_requests_fail_as_network_errors() {
        let err = block_on(WebApiClient.list_groups()).expect_err("no fetch off wasm");
        assert!(matches!(err, ApiError::Network(_)));

        let auth = WebAuthService::default();
        assert!(block_on(auth.login("a@b.c", "pw")).is_err());
        assert!(!auth.status().is_authenticated);
        assert!(!auth.status().is_loading);
    }
}
