//! # Session State Handle
//!
//! Shared handle the driver threads go through to reach the session.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. The driver and the async preview-delivery task may both touch it
//! 2. Only one operation may run at a time - every state-machine
//!    transition is a single atomic step under the lock
//!
//! ## Why Not RwLock?
//! Session operations are quick, and most of them mutate state. A RwLock
//! would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use orderdesk_core::Catalog;

use crate::session::Session;

/// Shared, thread-safe handle to the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Creates a fresh session over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(Session::new(catalog))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = state.with_session(|s| s.view());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.submit_for_review().map(|_| ()))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}
