//! Authenticated user and user-administration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spjt_core::{Entity, UsuarioId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// Account status as managed from the administration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EstadoUsuario {
    #[default]
    Activo,
    Inactivo,
}

impl EstadoUsuario {
    pub fn toggled(self) -> Self {
        match self {
            EstadoUsuario::Activo => EstadoUsuario::Inactivo,
            EstadoUsuario::Inactivo => EstadoUsuario::Activo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EstadoUsuario::Activo => "Activo",
            EstadoUsuario::Inactivo => "Inactivo",
        }
    }
}

/// A SPJT user, as returned by the identity check and the user listing.
///
/// The logged-in user is immutable for the lifetime of a session; only a fresh
/// login (or a refresh) replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UsuarioId,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
    #[serde(default)]
    pub institucion: String,
    #[serde(default)]
    pub estado: EstadoUsuario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimo_acceso: Option<DateTime<Utc>>,
}

impl Entity for User {
    type Id = UsuarioId;

    fn id(&self) -> &UsuarioId {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// Role filter chip of the administration list ("todos" or a single role).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RolFilter {
    #[default]
    Todos,
    Solo(Role),
}

impl RolFilter {
    pub fn as_query(&self) -> Option<&str> {
        match self {
            RolFilter::Todos => None,
            RolFilter::Solo(role) => Some(role.as_str()),
        }
    }
}

/// Search + role filter applied to the user listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsuarioFilter {
    pub search: String,
    pub rol: RolFilter,
    pub page: Option<u32>,
}

impl UsuarioFilter {
    /// Case-insensitive match on name or email, plus the role filter.
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || user.nombre.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle);

        let matches_role = match &self.rol {
            RolFilter::Todos => true,
            RolFilter::Solo(role) => &user.rol == role,
        };

        matches_search && matches_role
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.rol != RolFilter::Todos
    }

    /// Query parameters understood by `GET /usuarios`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.search.trim().is_empty() {
            query.push(("search", self.search.trim().to_string()));
        }
        if let Some(rol) = self.rol.as_query() {
            query.push(("rol", rol.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Payload for `POST /usuarios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoUsuario {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub rol: Role,
    pub institucion: String,
}

/// Partial payload for `PUT /usuarios/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsuarioUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institucion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoUsuario>,
    /// New password; omitted unless the administrator typed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
