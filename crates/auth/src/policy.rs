//! Static role → capability table.
//!
//! The table is built once (built-in defaults or a JSON configuration file)
//! and shared read-only for the whole process; there is no mutation API.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use crate::{Capability, Role};

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("capability table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("capability table names an unknown role '{0}'")]
    UnknownRole(String),

    #[error("role '{0}' grants an empty capability")]
    EmptyCapability(String),
}

/// Per-role granted capability sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityTable {
    grants: HashMap<Role, HashSet<Capability>>,
}

impl CapabilityTable {
    /// Built-in grants used when no configuration file is supplied.
    pub fn builtin() -> Self {
        let mut grants = HashMap::new();

        grants.insert(Role::Admin, HashSet::from([Capability::WILDCARD]));
        grants.insert(
            Role::Secretario,
            HashSet::from([
                Capability::EXPEDIENTES_READ,
                Capability::EXPEDIENTES_WRITE,
                Capability::DOCUMENTOS_READ,
                Capability::DOCUMENTOS_WRITE,
                Capability::USUARIOS_READ,
                Capability::USUARIOS_WRITE,
                Capability::AUDITORIA_READ,
            ]),
        );
        grants.insert(
            Role::Juez,
            HashSet::from([
                Capability::EXPEDIENTES_READ,
                Capability::DOCUMENTOS_READ,
                Capability::DOCUMENTOS_SIGN,
            ]),
        );
        grants.insert(
            Role::Operador,
            HashSet::from([
                Capability::EXPEDIENTES_READ,
                Capability::DOCUMENTOS_READ,
                Capability::DOCUMENTOS_WRITE,
            ]),
        );

        Self { grants }
    }

    /// Parse a table of the form `{ "admin": ["*"], "juez": ["documentos.sign"] }`.
    ///
    /// Roles missing from the document get no capabilities at all.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut grants = HashMap::new();

        for (role_name, capabilities) in raw {
            let role = Role::parse(&role_name.trim().to_ascii_lowercase());
            if !role.is_recognized() {
                return Err(PolicyError::UnknownRole(role_name));
            }

            let mut set = HashSet::new();
            for cap in capabilities {
                let cap = cap.trim();
                if cap.is_empty() {
                    return Err(PolicyError::EmptyCapability(role_name));
                }
                set.insert(Capability::from(cap));
            }
            grants.insert(role, set);
        }

        Ok(Self { grants })
    }

    /// Whether `role` is explicitly granted `capability`. Deny is the default.
    pub fn allows(&self, role: &Role, capability: &Capability) -> bool {
        if !role.is_recognized() {
            return false;
        }

        self.grants
            .get(role)
            .is_some_and(|set| set.contains(&Capability::WILDCARD) || set.contains(capability))
    }

    /// Capabilities granted to `role`, sorted for display.
    pub fn granted(&self, role: &Role) -> Vec<Capability> {
        let mut caps: Vec<Capability> = self
            .grants
            .get(role)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        caps.sort();
        caps
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::builtin()
    }
}
