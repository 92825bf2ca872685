use serde::{Deserialize, Serialize};

/// Role of a SPJT user.
///
/// The enumeration is closed; any other value received from the server is kept
/// as [`Role::Unrecognized`] so it can be displayed, but it is never granted a
/// capability nor the administrative tabs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Juez,
    Secretario,
    Operador,
    Unrecognized(String),
}

impl Role {
    /// Every recognized role, in display order.
    pub fn known() -> [Role; 4] {
        [Role::Admin, Role::Juez, Role::Secretario, Role::Operador]
    }

    /// Exact match on the wire names. Case or whitespace variants stay
    /// unrecognized.
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "juez" => Role::Juez,
            "secretario" => Role::Secretario,
            "operador" => Role::Operador,
            _ => Role::Unrecognized(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Juez => "juez",
            Role::Secretario => "secretario",
            Role::Operador => "operador",
            Role::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }

    /// Roles that see the user administration and audit tabs.
    pub fn is_administrative(&self) -> bool {
        matches!(self, Role::Admin | Role::Secretario)
    }

    /// Label shown in the user administration list.
    pub fn display_name(&self) -> &str {
        match self {
            Role::Admin => "Administrador",
            Role::Juez => "Juez",
            Role::Secretario => "Secretario",
            Role::Operador => "Operador",
            Role::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
