use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Denied,
    Error,
}

/// User-visible modal notice (title + body). Copy is Spanish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Éxito".to_string(),
            message: message.into(),
        }
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Denied,
            title: "Acceso Denegado".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn session_expired() -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Sesión expirada".to_string(),
            message: "Su sesión ha expirado. Inicie sesión nuevamente.".to_string(),
        }
    }
}
