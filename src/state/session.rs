//! Session Context
//!
//! Holds the credential token the API hands out at login. The token lives
//! in browser local storage so a reload keeps the session; everything that
//! needs it goes through [`Session`] instead of touching storage directly.

use std::rc::Rc;

use leptos::*;

/// Local storage key for the credential token
const TOKEN_KEY: &str = "sentinel_token";

/// Where the token is kept. Browser local storage in production, a plain
/// cell under test.
pub trait TokenStore {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

/// Handle to the current session's token
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
}

impl Session {
    /// Session backed by browser local storage
    pub fn browser() -> Self {
        Self {
            store: Rc::new(BrowserStore),
        }
    }

    /// Session backed by an in-memory cell, for tests
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            store: Rc::new(MemoryStore::default()),
        }
    }

    /// Current token, if a login is active
    pub fn read(&self) -> Option<String> {
        self.store.read()
    }

    /// Store the token handed out at login
    pub fn write(&self, token: &str) {
        self.store.write(token);
    }

    /// Drop the token (sign-out or credential rejection)
    pub fn clear(&self) {
        self.store.clear();
    }
}

/// Provide the session to the component tree
pub fn provide_session() {
    provide_context(Session::browser());
}

/// Token storage in browser local storage
struct BrowserStore;

impl TokenStore for BrowserStore {
    fn read(&self) -> Option<String> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok().flatten()?;
        storage.get_item(TOKEN_KEY).ok().flatten()
    }

    fn write(&self, token: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
        }
    }

    fn clear(&self) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// In-memory token store for native tests
#[cfg(test)]
#[derive(Default)]
struct MemoryStore(std::cell::RefCell<Option<String>>);

#[cfg(test)]
impl TokenStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    fn write(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let session = Session::in_memory();
        assert_eq!(session.read(), None);

        session.write("abc123");
        assert_eq!(session.read(), Some("abc123".to_string()));

        session.clear();
        assert_eq!(session.read(), None);
    }

    #[test]
    fn test_write_overwrites() {
        let session = Session::in_memory();
        session.write("first");
        session.write("second");
        assert_eq!(session.read(), Some("second".to_string()));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let session = Session::in_memory();
        session.clear();
        session.write("abc123");
        session.clear();
        session.clear();
        assert_eq!(session.read(), None);
    }
}
