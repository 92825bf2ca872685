use thiserror::Error;

use spjt_auth::AuthzError;
use spjt_client::ClientError;

use crate::actions::GatedAction;
use crate::navigation::{RootKind, Screen};
use crate::notice::Notice;

/// Failure of a user-initiated action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The gate said no; the collaborator was never called.
    #[error("{action} denied: {source}")]
    PermissionDenied {
        action: GatedAction,
        source: AuthzError,
    },

    /// Local validation failed; the field errors live on the form.
    #[error("{0} field(s) failed validation")]
    Validation(usize),

    /// The action does not apply to the current state (e.g. signing twice).
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("{message}: {source}")]
    Collaborator {
        message: String,
        source: ClientError,
    },
}

impl ActionError {
    pub fn collaborator(message: impl Into<String>, source: ClientError) -> Self {
        ActionError::Collaborator {
            message: message.into(),
            source,
        }
    }

    /// Whether the server rejected the session while performing the action.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            ActionError::Collaborator {
                source: ClientError::Unauthorized,
                ..
            }
        )
    }

    /// Modal notice for this failure. Validation errors are shown inline
    /// instead.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            ActionError::PermissionDenied { action, .. } => {
                Some(Notice::denied(action.denial_message()))
            }
            ActionError::Validation(_) => None,
            ActionError::Rejected(message) => Some(Notice::error(message.clone())),
            ActionError::Collaborator {
                source: ClientError::Unauthorized,
                ..
            } => Some(Notice::session_expired()),
            ActionError::Collaborator { message, .. } => Some(Notice::error(message.clone())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("screen {screen} is not reachable while the {root:?} graph is mounted")]
    Unreachable { screen: Screen, root: RootKind },
}
