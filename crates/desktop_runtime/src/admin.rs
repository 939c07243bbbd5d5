//! Load/create/delete flows behind the admin organization, group and session lists.

use platform_host::{
    AdminApi, ApiError, AuthSessionsApi, CreateGroupRequest, CreateOrganizationRequest, Group,
    Organization, UserSession,
};

use crate::menus::SortOrder;

pub const ORGANIZATION_CONFLICT_MESSAGE: &str = "An organization with this name already exists";
pub const GROUP_CONFLICT_MESSAGE: &str = "A group with this name already exists";
pub const CURRENT_SESSION_MESSAGE: &str = "The current session cannot be revoked";

/// Record shown as one row of an admin list.
pub trait AdminRecord {
    fn record_id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn secondary_text(&self) -> Option<&str>;
    /// RFC 3339 creation timestamp.
    fn created_at(&self) -> &str;
}

impl AdminRecord for Organization {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl AdminRecord for Group {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl AdminRecord for UserSession {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        self.user_agent.as_deref().unwrap_or("Unknown device")
    }

    fn secondary_text(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Load state of an admin list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState<T> {
    #[default]
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> ListState<T> {
    fn from_result(result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) => Self::Loaded(items),
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    /// Loaded items; empty while loading or after a failure.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    /// Appends a created record. Ignored unless the list is loaded.
    pub fn push(&mut self, item: T) {
        if let Self::Loaded(items) = self {
            items.push(item);
        }
    }
}

impl<T: AdminRecord> ListState<T> {
    /// Drops the record with `id`. Returns `true` when a row was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Self::Loaded(items) = self else {
            return false;
        };
        let before = items.len();
        items.retain(|item| item.record_id() != id);
        items.len() != before
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items().iter().find(|item| item.record_id() == id)
    }
}

/// Hands out load tickets so only the newest load writes the list.
#[derive(Debug, Default)]
pub struct LoadGeneration {
    current: u64,
}

impl LoadGeneration {
    /// Starts a load and returns its ticket. Older tickets become stale.
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current == ticket
    }

    /// Stores `next` in `list` when `ticket` is still the newest load. Returns `false` for stale
    /// results, which are dropped.
    pub fn finish<T>(&self, ticket: u64, list: &mut ListState<T>, next: ListState<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        *list = next;
        true
    }
}

/// Rows in display order: case-insensitive by name, or newest first by creation time.
pub fn sorted_rows<T: AdminRecord + Clone>(items: &[T], order: SortOrder) -> Vec<T> {
    let mut rows = items.to_vec();
    match order {
        SortOrder::Name => {
            rows.sort_by_key(|row| row.display_name().to_lowercase());
        }
        SortOrder::Date => {
            rows.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        }
    }
    rows
}

pub async fn fetch_organizations(api: &dyn AdminApi) -> ListState<Organization> {
    ListState::from_result(
        api.list_organizations()
            .await
            .map(|response| response.organizations),
    )
}

/// Creates an organization from an already validated name.
pub async fn create_organization(
    api: &dyn AdminApi,
    name: String,
    description: Option<String>,
) -> Result<Organization, String> {
    let request = CreateOrganizationRequest { name, description };
    api.create_organization(&request)
        .await
        .map_err(|err| err.user_message(ORGANIZATION_CONFLICT_MESSAGE))
}

pub async fn delete_organization(api: &dyn AdminApi, id: &str) -> Result<(), String> {
    api.delete_organization(id).await.map_err(|err| err.to_string())
}

pub async fn fetch_groups(api: &dyn AdminApi) -> ListState<Group> {
    ListState::from_result(api.list_groups().await.map(|response| response.groups))
}

/// Creates a group from an already validated name.
pub async fn create_group(
    api: &dyn AdminApi,
    name: String,
    description: Option<String>,
) -> Result<Group, String> {
    let request = CreateGroupRequest { name, description };
    api.create_group(&request)
        .await
        .map_err(|err| err.user_message(GROUP_CONFLICT_MESSAGE))
}

pub async fn delete_group(api: &dyn AdminApi, id: &str) -> Result<(), String> {
    api.delete_group(id).await.map_err(|err| err.to_string())
}

pub async fn fetch_sessions(api: &dyn AuthSessionsApi) -> ListState<UserSession> {
    ListState::from_result(api.list_sessions().await.map(|response| response.sessions))
}

/// Revokes `session`. The session making the request is refused without calling the API.
pub async fn revoke_session(
    api: &dyn AuthSessionsApi,
    session: &UserSession,
) -> Result<(), String> {
    if session.is_current {
        return Err(CURRENT_SESSION_MESSAGE.to_string());
    }
    api.delete_session(&session.id)
        .await
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::executor::block_on;
    use platform_host::MemoryApi;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dialog::{run_confirm, validate_name, ConfirmOutcome, DialogState, MountGuard};

    fn org(id: &str, name: &str, description: Option<&str>) -> Organization {
        Organization {
            id: id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn group(id: &str, name: &str) -> Group {
        Group {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            member_count: 3,
            created_at: String::new(),
        }
    }

    fn session(id: &str, is_current: bool) -> UserSession {
        UserSession {
            id: id.to_string(),
            created_at: String::new(),
            last_active_at: String::new(),
            ip_address: None,
            user_agent: Some("Firefox".to_string()),
            is_current,
        }
    }

    fn names<T: AdminRecord>(state: &ListState<T>) -> Vec<String> {
        state
            .items()
            .iter()
            .map(|item| item.display_name().to_string())
            .collect()
    }

    #[test]
    fn deleting_an_organization_through_the_confirm_dialog_removes_its_row() {
        let api = MemoryApi::default().with_organizations(vec![
            org("org-1", "Acme", Some("Team")),
            org("org-2", "Beta", None),
        ]);
        let list = Rc::new(RefCell::new(block_on(fetch_organizations(&api))));
        assert_eq!(names(&list.borrow()), vec!["Acme", "Beta"]);
        assert_eq!(
            list.borrow().find("org-1").and_then(AdminRecord::secondary_text),
            Some("Team")
        );

        let dialog = Rc::new(RefCell::new(DialogState::default()));
        dialog.borrow_mut().sync_open(true);
        let outcome = block_on(run_confirm(&dialog, &MountGuard::new(), || {
            let api = api.clone();
            let list = Rc::clone(&list);
            async move {
                delete_organization(&api, "org-1").await?;
                list.borrow_mut().remove("org-1");
                Ok::<(), String>(())
            }
        }));

        assert_eq!(outcome, ConfirmOutcome::Closed);
        assert!(api
            .calls()
            .contains(&"DELETE /v1/admin/organizations/org-1".to_string()));
        assert_eq!(names(&list.borrow()), vec!["Beta"]);
        assert_eq!(api.organizations().len(), 1);
    }

    #[test]
    fn failed_delete_keeps_the_row_and_the_dialog_open() {
        let api = MemoryApi::default().with_organizations(vec![org("org-1", "Acme", None)]);
        let list = Rc::new(RefCell::new(block_on(fetch_organizations(&api))));
        api.fail_next(ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        });

        let dialog = Rc::new(RefCell::new(DialogState::default()));
        dialog.borrow_mut().sync_open(true);
        let outcome = block_on(run_confirm(&dialog, &MountGuard::new(), || {
            let api = api.clone();
            let list = Rc::clone(&list);
            async move {
                delete_organization(&api, "org-1").await?;
                list.borrow_mut().remove("org-1");
                Ok::<(), String>(())
            }
        }));

        assert_eq!(outcome, ConfirmOutcome::StayedOpen);
        assert_eq!(dialog.borrow().last_error(), Some("boom"));
        assert_eq!(names(&list.borrow()), vec!["Acme"]);
    }

    #[test]
    fn duplicate_names_map_to_friendly_conflict_messages() {
        let api = MemoryApi::default()
            .with_organizations(vec![org("org-1", "Acme", None)])
            .with_groups(vec![group("group-1", "Ops")]);

        let err = block_on(create_organization(&api, "Acme".to_string(), None))
            .expect_err("conflict");
        assert_eq!(err, ORGANIZATION_CONFLICT_MESSAGE);
        let err = block_on(create_group(&api, "ops".to_string(), None)).expect_err("conflict");
        assert_eq!(err, GROUP_CONFLICT_MESSAGE);

        api.fail_next(ApiError::Network("offline".to_string()));
        let err = block_on(create_group(&api, "Infra".to_string(), None)).expect_err("network");
        assert_eq!(err, "network error: offline");
    }

    #[test]
    fn created_records_are_appended_to_a_loaded_list() {
        let api = MemoryApi::default().with_groups(vec![group("group-1", "Ops")]);
        let mut list = block_on(fetch_groups(&api));
        let name = validate_name("  Infra ").expect("valid");
        let created = block_on(create_group(&api, name, Some("Servers".to_string())))
            .expect("created");
        list.push(created);

        assert_eq!(names(&list), vec!["Ops", "Infra"]);
        assert_eq!(api.calls().last().map(String::as_str), Some("POST /v1/admin/groups"));
    }

    #[test]
    fn list_failures_surface_the_message() {
        let api = MemoryApi::default();
        api.fail_next(ApiError::Http {
            status: 503,
            message: String::new(),
        });
        let state = block_on(fetch_groups(&api));
        assert_eq!(
            state,
            ListState::Failed("request failed with status 503".to_string())
        );
        assert!(state.items().is_empty());

        let mut loading = ListState::<Group>::Loading;
        loading.push(group("group-9", "Late"));
        assert!(!loading.remove("group-9"));
        assert_eq!(loading, ListState::Loading);
    }

    #[test]
    fn the_current_session_cannot_be_revoked() {
        let api = MemoryApi::default()
            .with_sessions(vec![session("s-1", true), session("s-2", false)]);
        let mut list = block_on(fetch_sessions(&api));
        let current = list.find("s-1").cloned().expect("current session");
        let other = list.find("s-2").cloned().expect("other session");

        let err = block_on(revoke_session(&api, &current)).expect_err("refused");
        assert_eq!(err, CURRENT_SESSION_MESSAGE);
        assert!(!api.calls().contains(&"DELETE /v1/auth/sessions/s-1".to_string()));

        block_on(revoke_session(&api, &other)).expect("revoked");
        assert!(list.remove("s-2"));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn a_slow_earlier_load_cannot_overwrite_a_newer_one() {
        let api = MemoryApi::default().with_groups(vec![group("group-1", "Ops")]);
        let mut generation = LoadGeneration::default();
        let mut list = ListState::<Group>::Loading;

        let first = generation.begin();
        let stale = block_on(fetch_groups(&api));
        block_on(create_group(&api, "Infra".to_string(), None)).expect("created");
        let second = generation.begin();
        let fresh = block_on(fetch_groups(&api));

        assert!(generation.finish(second, &mut list, fresh));
        assert!(!generation.finish(first, &mut list, stale));
        assert_eq!(names(&list), vec!["Ops", "Infra"]);
        assert!(generation.is_current(second));
    }

    #[test]
    fn rows_sort_by_name_or_newest_first() {
        let mut beta = org("org-2", "beta", None);
        beta.created_at = "2024-03-01T00:00:00Z".to_string();
        let mut acme = org("org-1", "Acme", None);
        acme.created_at = "2024-01-01T00:00:00Z".to_string();
        let mut zeta = org("org-3", "Zeta", None);
        zeta.created_at = "2024-02-01T00:00:00Z".to_string();
        let items = vec![beta, acme, zeta];

        let by_name: Vec<_> = sorted_rows(&items, SortOrder::Name)
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(by_name, vec!["org-1", "org-2", "org-3"]);

        let by_date: Vec<_> = sorted_rows(&items, SortOrder::Date)
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(by_date, vec!["org-2", "org-3", "org-1"]);
    }
}
