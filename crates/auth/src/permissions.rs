use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability identifier.
///
/// Capabilities are opaque strings of the form `resource.action`
/// (e.g. "expedientes.write"). The wildcard `"*"` may appear in a role's
/// grant set to mean "every capability".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    pub const WILDCARD: Capability = Capability(Cow::Borrowed("*"));

    pub const EXPEDIENTES_READ: Capability = Capability(Cow::Borrowed("expedientes.read"));
    pub const EXPEDIENTES_WRITE: Capability = Capability(Cow::Borrowed("expedientes.write"));
    pub const DOCUMENTOS_READ: Capability = Capability(Cow::Borrowed("documentos.read"));
    pub const DOCUMENTOS_WRITE: Capability = Capability(Cow::Borrowed("documentos.write"));
    pub const DOCUMENTOS_SIGN: Capability = Capability(Cow::Borrowed("documentos.sign"));
    pub const USUARIOS_READ: Capability = Capability(Cow::Borrowed("usuarios.read"));
    pub const USUARIOS_WRITE: Capability = Capability(Cow::Borrowed("usuarios.write"));
    pub const AUDITORIA_READ: Capability = Capability(Cow::Borrowed("auditoria.read"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }

    /// The resource half of `resource.action` (the whole string if there is no dot).
    pub fn resource(&self) -> &str {
        self.as_str().split('.').next().unwrap_or_default()
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}
