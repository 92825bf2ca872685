//! Session state: one writer (the authentication collaborator), many readers.
//!
//! The session is an explicit context object handed down to whoever needs it.
//! Readers hold a cloneable [`SessionHandle`]; the single [`SessionWriter`] is
//! owned by the authenticator and is the only way to change the session.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::User;

/// Snapshot of the authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Session {
    /// Process start: the identity check has not resolved yet.
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    /// Identity check (or login/logout) resolved.
    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.user.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session writer was dropped")]
    WriterClosed,
}

/// Create a session starting in the loading state.
pub fn session_channel() -> (SessionWriter, SessionHandle) {
    let (tx, rx) = watch::channel(Session::loading());
    (SessionWriter { tx }, SessionHandle { rx })
}

/// The only mutator of the session. Not `Clone`.
#[derive(Debug)]
pub struct SessionWriter {
    tx: watch::Sender<Session>,
}

impl SessionWriter {
    /// Resolve the startup identity check.
    pub fn resolve(&self, user: Option<User>) {
        self.publish("identity_check", Session::resolved(user));
    }

    /// Successful login.
    pub fn login(&self, user: User) {
        self.publish("login", Session::resolved(Some(user)));
    }

    /// Token refresh returned a (possibly updated) user.
    pub fn refresh(&self, user: User) {
        self.publish("refresh", Session::resolved(Some(user)));
    }

    pub fn logout(&self) {
        self.publish("logout", Session::resolved(None));
    }

    /// The server rejected the session token.
    pub fn expire(&self) {
        self.publish("expired", Session::resolved(None));
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.tx.subscribe(),
        }
    }

    fn publish(&self, cause: &'static str, next: Session) {
        let previous = self.tx.send_replace(next);
        let current = self.tx.borrow();
        tracing::info!(
            cause,
            was_loading = previous.is_loading,
            was_authenticated = previous.user.is_some(),
            authenticated = current.user.is_some(),
            role = current.user.as_ref().map(|u| u.rol.as_str()),
            "session updated"
        );
    }
}

/// Read-only view of the session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Session>,
}

impl SessionHandle {
    /// Current snapshot. Side-effect free.
    pub fn get_session(&self) -> Session {
        self.rx.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.rx.borrow().user.clone()
    }

    /// Wait for the next session change and return the new snapshot.
    pub async fn changed(&mut self) -> Result<Session, SessionError> {
        self.rx
            .changed()
            .await
            .map_err(|_| SessionError::WriterClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
