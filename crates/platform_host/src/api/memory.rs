use std::{cell::RefCell, rc::Rc};

use super::{
    AdminApi, ApiError, ApiFuture, AuthSessionsApi, CreateGroupRequest,
    CreateOrganizationRequest, Group, GroupsListResponse, Organization,
    OrganizationsListResponse, SessionsListResponse, UserSession, HTTP_CONFLICT,
};
use crate::time::unix_time_ms_now;

#[derive(Debug, Default)]
struct MemoryApiState {
    organizations: Vec<Organization>,
    groups: Vec<Group>,
    sessions: Vec<UserSession>,
    next_id: u64,
    fail_next: Option<ApiError>,
    calls: Vec<String>,
}

impl MemoryApiState {
    fn take_failure(&mut self, call: String) -> Result<(), ApiError> {
        self.calls.push(call);
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory admin and sessions API. Clones share state.
///
/// Every call is recorded as `"<verb> <path>"` so tests can assert exactly what was requested.
#[derive(Debug, Clone, Default)]
pub struct MemoryApi {
    inner: Rc<RefCell<MemoryApiState>>,
}

impl MemoryApi {
    /// Seeds organizations, keeping ids as given.
    pub fn with_organizations(self, organizations: Vec<Organization>) -> Self {
        {
            let mut state = self.inner.borrow_mut();
            state.next_id += organizations.len() as u64;
            state.organizations = organizations;
        }
        self
    }

    /// Seeds groups, keeping ids as given.
    pub fn with_groups(self, groups: Vec<Group>) -> Self {
        {
            let mut state = self.inner.borrow_mut();
            state.next_id += groups.len() as u64;
            state.groups = groups;
        }
        self
    }

    /// Seeds sessions.
    pub fn with_sessions(self, sessions: Vec<UserSession>) -> Self {
        self.inner.borrow_mut().sessions = sessions;
        self
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.inner.borrow_mut().fail_next = Some(error);
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<String> {
        self.inner.borrow().calls.clone()
    }

    /// Current organizations.
    pub fn organizations(&self) -> Vec<Organization> {
        self.inner.borrow().organizations.clone()
    }

    /// Current groups.
    pub fn groups(&self) -> Vec<Group> {
        self.inner.borrow().groups.clone()
    }
}

fn conflict(entity: &str) -> ApiError {
    ApiError::Http {
        status: HTTP_CONFLICT,
        message: format!("{entity} name already taken"),
    }
}

fn not_found(entity: &str, id: &str) -> ApiError {
    ApiError::Http {
        status: 404,
        message: format!("{entity} `{id}` not found"),
    }
}

fn timestamp() -> String {
    unix_time_ms_now().to_string()
}

impl AdminApi for MemoryApi {
    fn list_organizations(&self) -> ApiFuture<'_, OrganizationsListResponse> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure("GET /v1/admin/organizations".to_string())?;
            Ok(OrganizationsListResponse {
                organizations: state.organizations.clone(),
            })
        })
    }

    fn create_organization<'a>(
        &'a self,
        request: &'a CreateOrganizationRequest,
    ) -> ApiFuture<'a, Organization> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure("POST /v1/admin/organizations".to_string())?;
            if state
                .organizations
                .iter()
                .any(|org| org.name.eq_ignore_ascii_case(&request.name))
            {
                return Err(conflict("organization"));
            }
            let now = timestamp();
            let organization = Organization {
                id: state.allocate_id("org"),
                name: request.name.clone(),
                description: request.description.clone(),
                created_at: now.clone(),
                updated_at: now,
            };
            state.organizations.push(organization.clone());
            Ok(organization)
        })
    }

    fn delete_organization<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure(format!("DELETE /v1/admin/organizations/{id}"))?;
            let before = state.organizations.len();
            state.organizations.retain(|org| org.id != id);
            if state.organizations.len() == before {
                return Err(not_found("organization", id));
            }
            Ok(())
        })
    }

    fn list_groups(&self) -> ApiFuture<'_, GroupsListResponse> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure("GET /v1/admin/groups".to_string())?;
            Ok(GroupsListResponse {
                groups: state.groups.clone(),
            })
        })
    }

    fn create_group<'a>(&'a self, request: &'a CreateGroupRequest) -> ApiFuture<'a, Group> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure("POST /v1/admin/groups".to_string())?;
            if state
                .groups
                .iter()
                .any(|group| group.name.eq_ignore_ascii_case(&request.name))
            {
                return Err(conflict("group"));
            }
            let group = Group {
                id: state.allocate_id("group"),
                name: request.name.clone(),
                description: request.description.clone(),
                member_count: 0,
                created_at: timestamp(),
            };
            state.groups.push(group.clone());
            Ok(group)
        })
    }

    fn delete_group<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure(format!("DELETE /v1/admin/groups/{id}"))?;
            let before = state.groups.len();
            state.groups.retain(|group| group.id != id);
            if state.groups.len() == before {
                return Err(not_found("group", id));
            }
            Ok(())
        })
    }
}

impl AuthSessionsApi for MemoryApi {
    fn list_sessions(&self) -> ApiFuture<'_, SessionsListResponse> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure("GET /v1/auth/sessions".to_string())?;
            Ok(SessionsListResponse {
                sessions: state.sessions.clone(),
            })
        })
    }

    fn delete_session<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            state.take_failure(format!("DELETE /v1/auth/sessions/{id}"))?;
            let before = state.sessions.len();
            state.sessions.retain(|session| session.id != id);
            if state.sessions.len() == before {
                return Err(not_found("session", id));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn org(id: &str, name: &str) -> Organization {
        Organization {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn duplicate_organization_names_conflict() {
        let api = MemoryApi::default().with_organizations(vec![org("org-1", "Acme")]);
        let request = CreateOrganizationRequest {
            name: "acme".to_string(),
            description: None,
        };
        let err = block_on(api.create_organization(&request)).expect_err("conflict");
        assert_eq!(err.status(), Some(409));
        assert!(err.is_conflict());
    }

    #[test]
    fn created_ids_do_not_collide_with_seeded_ones() {
        let api = MemoryApi::default().with_organizations(vec![org("org-1", "Acme")]);
        let created = block_on(api.create_organization(&CreateOrganizationRequest {
            name: "Beta".to_string(),
            description: Some("Second".to_string()),
        }))
        .expect("create");
        assert_eq!(created.id, "org-2");
        assert_eq!(api.organizations().len(), 2);
    }

    #[test]
    fn calls_are_recorded_and_failures_are_one_shot() {
        let api = MemoryApi::default().with_organizations(vec![org("org-1", "Acme")]);
        api.fail_next(ApiError::Network("offline".to_string()));
        assert!(block_on(api.list_organizations()).is_err());
        block_on(api.delete_organization("org-1")).expect("delete");
        assert!(block_on(api.delete_organization("org-1")).is_err());

        assert_eq!(
            api.calls(),
            vec![
                "GET /v1/admin/organizations".to_string(),
                "DELETE /v1/admin/organizations/org-1".to_string(),
                "DELETE /v1/admin/organizations/org-1".to_string(),
            ]
        );
    }
}
