//! Browser persistence for the session: `window.localStorage`.

use common::session::{SessionManager, SessionStore};
use web_sys::Storage;

pub type BrowserSession = SessionManager<LocalStore>;

/// localStorage-backed [`SessionStore`]. When storage is unavailable
/// (private browsing, disabled cookies) the session simply lives in memory
/// for the lifetime of the page.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            gloo_console::warn!("localStorage unavailable; session will not survive a reload");
        }
        Self { storage }
    }
}

impl SessionStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            storage.set_item(key, value).ok();
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            storage.remove_item(key).ok();
        }
    }
}
