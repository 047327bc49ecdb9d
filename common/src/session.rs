//! Explicit session context.
//!
//! The bearer token and the accountant's "current company" marker live in a
//! [`Session`] owned by a [`SessionManager`]. The manager mirrors every
//! change into a [`SessionStore`] (localStorage in the browser) so a reload
//! restores the session, and it is the only place that writes those keys:
//! login calls [`SessionManager::begin`], logout and any rejected credential
//! call [`SessionManager::end`]. Failed API calls are routed through
//! [`SessionManager::on_api_error`], which holds the 401 policy.

use std::cell::RefCell;

use crate::api::ApiError;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the company selected in the accountant space.
pub const COMPANY_KEY: &str = "current_company_id";
/// Header forwarding the selected company to the API.
pub const COMPANY_HEADER: &str = "X-Company-Id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub company_id: Option<i64>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Persistent key-value storage backing a session.
pub trait SessionStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub struct SessionManager<S: SessionStore> {
    store: S,
    session: RefCell<Session>,
}

impl<S: SessionStore> SessionManager<S> {
    /// Rebuilds the session from whatever the store holds. Blank tokens and
    /// malformed company ids are treated as absent.
    pub fn restore(store: S) -> Self {
        let token = store.read(TOKEN_KEY).filter(|t| !t.trim().is_empty());
        let company_id = store.read(COMPANY_KEY).and_then(|raw| raw.trim().parse().ok());
        Self {
            store,
            session: RefCell::new(Session { token, company_id }),
        }
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Starts a session after a successful login. Any company marker left
    /// by a previous user is dropped.
    pub fn begin(&self, token: &str) {
        self.store.write(TOKEN_KEY, token);
        self.store.remove(COMPANY_KEY);
        *self.session.borrow_mut() = Session {
            token: Some(token.to_string()),
            company_id: None,
        };
    }

    /// Ends the session and wipes its persisted state.
    pub fn end(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(COMPANY_KEY);
        *self.session.borrow_mut() = Session::default();
    }

    /// Applies a failed call to the session: an `Unauthorized` answer ends
    /// it. Returns `true` when the session was ended.
    pub fn on_api_error(&self, err: &ApiError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }
        self.end();
        true
    }

    pub fn switch_company(&self, company_id: i64) {
        self.store.write(COMPANY_KEY, &company_id.to_string());
        self.session.borrow_mut().company_id = Some(company_id);
    }

    /// Headers attached to an authenticated request.
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        let session = self.session.borrow();
        let mut headers = Vec::with_capacity(2);
        if let Some(token) = &session.token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        if let Some(company_id) = session.company_id {
            headers.push((COMPANY_HEADER, company_id.to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::check_status;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

    impl MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
    }

    impl SessionStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            self.get(key)
        }

        fn write(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    #[test]
    fn restores_persisted_session() {
        let store = MemoryStore::default();
        store.write(TOKEN_KEY, "abc");
        store.write(COMPANY_KEY, "12");

        let manager = SessionManager::restore(store);
        assert_eq!(
            manager.session(),
            Session {
                token: Some("abc".into()),
                company_id: Some(12)
            }
        );
    }

    #[test]
    fn ignores_blank_token_and_bad_company_id() {
        let store = MemoryStore::default();
        store.write(TOKEN_KEY, "  ");
        store.write(COMPANY_KEY, "twelve");

        let manager = SessionManager::restore(store);
        assert!(!manager.is_authenticated());
        assert_eq!(manager.session().company_id, None);
    }

    #[test]
    fn begin_persists_token_and_clears_stale_company() {
        let store = MemoryStore::default();
        store.write(COMPANY_KEY, "3");
        let manager = SessionManager::restore(store.clone());

        manager.begin("fresh");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh"));
        assert_eq!(store.get(COMPANY_KEY), None);
        assert_eq!(manager.auth_headers(), vec![("Authorization", "Bearer fresh".to_string())]);
    }

    #[test]
    fn end_wipes_memory_and_storage() {
        let store = MemoryStore::default();
        let manager = SessionManager::restore(store.clone());
        manager.begin("t");
        manager.switch_company(8);

        manager.end();
        assert_eq!(manager.session(), Session::default());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(COMPANY_KEY), None);
        assert!(manager.auth_headers().is_empty());
    }

    #[test]
    fn switched_company_is_forwarded() {
        let store = MemoryStore::default();
        let manager = SessionManager::restore(store.clone());
        manager.begin("t");
        manager.switch_company(8);

        assert_eq!(store.get(COMPANY_KEY).as_deref(), Some("8"));
        assert_eq!(
            manager.auth_headers(),
            vec![
                ("Authorization", "Bearer t".to_string()),
                (COMPANY_HEADER, "8".to_string())
            ]
        );
    }

    #[test]
    fn rejected_token_ends_the_session() {
        let store = MemoryStore::default();
        let manager = SessionManager::restore(store.clone());
        manager.begin("expired");
        manager.switch_company(4);

        let err = check_status(401, r#"{"detail":"Could not validate credentials"}"#, true).unwrap_err();
        assert!(manager.on_api_error(&err));
        assert!(!manager.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(COMPANY_KEY), None);
    }

    #[test]
    fn other_failures_keep_the_session() {
        let store = MemoryStore::default();
        let manager = SessionManager::restore(store.clone());
        manager.begin("t");

        let server = check_status(500, r#"{"detail":"boom"}"#, true).unwrap_err();
        let login = check_status(401, r#"{"detail":"Incorrect email or password"}"#, false).unwrap_err();
        assert!(!manager.on_api_error(&server));
        assert!(!manager.on_api_error(&login));
        assert!(manager.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t"));
    }
}
