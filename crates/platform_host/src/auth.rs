//! Authentication contract and in-memory adapter.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`AuthService`].
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Snapshot of the server session state consumed by feature gating.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthStatus {
    /// The session check is still in flight.
    pub is_loading: bool,
    /// A server session is active.
    pub is_authenticated: bool,
    /// Signed-in account, when authenticated.
    pub user_email: Option<String>,
}

/// Server authentication service.
pub trait AuthService {
    /// Returns the current status snapshot.
    fn status(&self) -> AuthStatus;

    /// Signs in with email and password.
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, Result<(), String>>;

    /// Ends the current session.
    fn logout<'a>(&'a self) -> AuthFuture<'a, Result<(), String>>;
}

#[derive(Debug, Default)]
struct MemoryAuthState {
    status: AuthStatus,
    accounts: Vec<(String, String)>,
}

/// In-memory auth service. Clones share state.
///
/// With no registered accounts every well-formed email with a non-empty password signs in.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthService {
    inner: Rc<RefCell<MemoryAuthState>>,
}

impl MemoryAuthService {
    /// Registers an account; once any account exists only registered credentials sign in.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.inner
            .borrow_mut()
            .accounts
            .push((email.to_string(), password.to_string()));
        self
    }

    /// Starts already signed in as `email`.
    pub fn signed_in(self, email: &str) -> Self {
        {
            let mut state = self.inner.borrow_mut();
            state.status.is_authenticated = true;
            state.status.user_email = Some(email.to_string());
        }
        self
    }

    /// Marks the session check as in flight.
    pub fn set_loading(&self, is_loading: bool) {
        self.inner.borrow_mut().status.is_loading = is_loading;
    }
}

impl AuthService for MemoryAuthService {
    fn status(&self) -> AuthStatus {
        self.inner.borrow().status.clone()
    }

    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let email = email.trim();
            if !email.contains('@') || password.is_empty() {
                return Err("email and password are required".to_string());
            }
            let mut state = self.inner.borrow_mut();
            if !state.accounts.is_empty()
                && !state
                    .accounts
                    .iter()
                    .any(|(known, secret)| known == email && secret == password)
            {
                return Err("invalid email or password".to_string());
            }
            state.status = AuthStatus {
                is_loading: false,
                is_authenticated: true,
                user_email: Some(email.to_string()),
            };
            Ok(())
        })
    }

    fn logout<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().status = AuthStatus::default();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn registered_accounts_gate_login() {
        let auth = MemoryAuthService::default().with_account("ada@example.com", "secret");
        assert!(block_on(auth.login("ada@example.com", "nope")).is_err());
        assert!(!auth.status().is_authenticated);

        block_on(auth.login(" ada@example.com ", "secret")).expect("login");
        let status = auth.status();
        assert!(status.is_authenticated);
        assert_eq!(status.user_email.as_deref(), Some("ada@example.com"));

        block_on(auth.logout()).expect("logout");
        assert_eq!(auth.status(), AuthStatus::default());
    }

    #[test]
    fn malformed_credentials_are_rejected() {
        let auth = MemoryAuthService::default();
        assert!(block_on(auth.login("not-an-email", "pw")).is_err());
        assert!(block_on(auth.login("a@b.c", "")).is_err());
    }
}
