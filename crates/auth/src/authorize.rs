use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{Capability, CapabilityTable, SessionHandle, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("unrecognized role '{0}'")]
    UnrecognizedRole(String),

    #[error("forbidden: role '{role}' lacks capability '{capability}'")]
    Forbidden { role: String, capability: String },
}

/// Authorize the given user (or absence of one) for a capability.
///
/// - No IO
/// - No panics
/// - Deny unless the table explicitly grants it
pub fn authorize(
    user: Option<&User>,
    required: &Capability,
    table: &CapabilityTable,
) -> Result<(), AuthzError> {
    let user = user.ok_or(AuthzError::NotAuthenticated)?;

    if !user.rol.is_recognized() {
        return Err(AuthzError::UnrecognizedRole(user.rol.as_str().to_string()));
    }

    if table.allows(&user.rol, required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role: user.rol.as_str().to_string(),
            capability: required.as_str().to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Why a capability check was allowed or denied. Logged on every denial.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub capability: String,
    pub granted: bool,
    pub reason: String,
    pub role: Option<String>,
    pub effective_capabilities: Vec<String>,
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NotAuthenticated,
    UnrecognizedRole,
    MissingCapability,
}

pub fn explain_authorization(
    user: Option<&User>,
    required: &Capability,
    table: &CapabilityTable,
) -> AuthorizationExplanation {
    let role = user.map(|u| u.rol.clone());
    let effective_capabilities: Vec<String> = role
        .as_ref()
        .map(|r| table.granted(r).iter().map(|c| c.as_str().to_string()).collect())
        .unwrap_or_default();

    let (granted, reason, denial) = match authorize(user, required, table) {
        Ok(()) if effective_capabilities.iter().any(|c| c == "*") => (
            true,
            "role holds the wildcard capability '*'".to_string(),
            None,
        ),
        Ok(()) => (
            true,
            format!("role explicitly grants '{}'", required),
            None,
        ),
        Err(AuthzError::NotAuthenticated) => (
            false,
            "no user is logged in".to_string(),
            Some(DenialKind::NotAuthenticated),
        ),
        Err(AuthzError::UnrecognizedRole(raw)) => (
            false,
            format!("role '{raw}' is not part of the role enumeration"),
            Some(DenialKind::UnrecognizedRole),
        ),
        Err(AuthzError::Forbidden { role, capability }) => (
            false,
            format!(
                "role '{role}' does not grant '{capability}'. Current capabilities: {effective_capabilities:?}"
            ),
            Some(DenialKind::MissingCapability),
        ),
    };

    AuthorizationExplanation {
        capability: required.as_str().to_string(),
        granted,
        reason,
        role: role.map(|r| r.as_str().to_string()),
        effective_capabilities,
        denial,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gate bound to the live session
// ─────────────────────────────────────────────────────────────────────────────

/// Permission gate evaluated against the currently logged-in user.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    session: SessionHandle,
    table: Arc<CapabilityTable>,
}

impl PermissionGate {
    pub fn new(session: SessionHandle, table: Arc<CapabilityTable>) -> Self {
        Self { session, table }
    }

    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    /// `true` only when the current user's role explicitly grants `capability`.
    pub fn has_permission(&self, capability: &str) -> bool {
        self.check(&Capability::from(capability)).is_ok()
    }

    /// Like [`has_permission`](Self::has_permission) but keeps the reason and
    /// logs denials.
    pub fn check(&self, capability: &Capability) -> Result<(), AuthzError> {
        let user = self.session.current_user();
        let outcome = authorize(user.as_ref(), capability, &self.table);

        if outcome.is_err() {
            let explanation = explain_authorization(user.as_ref(), capability, &self.table);
            tracing::warn!(
                capability = %capability,
                role = explanation.role.as_deref(),
                reason = %explanation.reason,
                "permission denied"
            );
        }

        outcome
    }
}
