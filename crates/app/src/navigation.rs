//! Navigation graph selection.
//!
//! Everything here is a pure function of a [`Session`] snapshot: the same
//! session always yields the same graph, and nothing is cached between calls.

use serde::Serialize;

use spjt_auth::{Session, User};

/// Every screen the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    /// Pseudo-screen shown while the identity check is pending.
    Loading,

    // Unauthenticated flow.
    Login,
    RecuperarPassword,
    CrearUsuario,

    // Tabs.
    Home,
    Expedientes,
    Documentos,
    Usuarios,
    Auditoria,

    // Stack screens on top of the tabs.
    ExpedienteDetail,
    NuevoExpediente,
    SubirDocumento,
    FirmarDocumento,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Loading => "Loading",
            Screen::Login => "Login",
            Screen::RecuperarPassword => "RecuperarPassword",
            Screen::CrearUsuario => "CrearUsuario",
            Screen::Home => "Home",
            Screen::Expedientes => "Expedientes",
            Screen::Documentos => "Documentos",
            Screen::Usuarios => "Usuarios",
            Screen::Auditoria => "Auditoria",
            Screen::ExpedienteDetail => "ExpedienteDetail",
            Screen::NuevoExpediente => "NuevoExpediente",
            Screen::SubirDocumento => "SubirDocumento",
            Screen::FirmarDocumento => "FirmarDocumento",
        }
    }
}

impl core::fmt::Display for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the bottom tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabSpec {
    pub screen: Screen,
    pub title: &'static str,
    pub icon: &'static str,
}

const BASE_TABS: [TabSpec; 3] = [
    TabSpec {
        screen: Screen::Home,
        title: "Inicio",
        icon: "home",
    },
    TabSpec {
        screen: Screen::Expedientes,
        title: "Expedientes",
        icon: "folder",
    },
    TabSpec {
        screen: Screen::Documentos,
        title: "Documentos",
        icon: "document",
    },
];

const ADMIN_TABS: [TabSpec; 2] = [
    TabSpec {
        screen: Screen::Usuarios,
        title: "Usuarios",
        icon: "people",
    },
    TabSpec {
        screen: Screen::Auditoria,
        title: "Auditoría",
        icon: "analytics",
    },
];

const AUTH_SCREENS: [Screen; 3] = [Screen::Login, Screen::RecuperarPassword, Screen::CrearUsuario];

const MAIN_STACK: [Screen; 4] = [
    Screen::ExpedienteDetail,
    Screen::NuevoExpediente,
    Screen::SubirDocumento,
    Screen::FirmarDocumento,
];

/// Which subgraph is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    Loading,
    Auth,
    Main,
}

/// A change of mounted subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RootTransition {
    pub from: RootKind,
    pub to: RootKind,
}

/// Unauthenticated stack: Login, password recovery, account request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthGraph {
    pub screens: Vec<Screen>,
}

/// Authenticated graph: drawer → tabs, plus the detail/creation stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainGraph {
    pub tabs: Vec<TabSpec>,
    pub stack: Vec<Screen>,
}

/// The graph currently valid for a session. Exactly one subgraph at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "root", rename_all = "lowercase")]
pub enum NavigationGraph {
    Loading,
    Auth(AuthGraph),
    Main(MainGraph),
}

impl NavigationGraph {
    pub fn kind(&self) -> RootKind {
        match self {
            NavigationGraph::Loading => RootKind::Loading,
            NavigationGraph::Auth(_) => RootKind::Auth,
            NavigationGraph::Main(_) => RootKind::Main,
        }
    }

    /// Screen shown when this graph is first mounted.
    pub fn entry(&self) -> Screen {
        match self {
            NavigationGraph::Loading => Screen::Loading,
            NavigationGraph::Auth(_) => Screen::Login,
            NavigationGraph::Main(_) => Screen::Home,
        }
    }

    /// Navigator names from the root down to the entry screen.
    pub fn entry_path(&self) -> Vec<&'static str> {
        match self {
            NavigationGraph::Loading => vec!["Loading"],
            NavigationGraph::Auth(_) => vec!["Auth", "Login"],
            NavigationGraph::Main(_) => vec!["Main", "MainTabs", "Home"],
        }
    }

    pub fn tabs(&self) -> &[TabSpec] {
        match self {
            NavigationGraph::Main(main) => &main.tabs,
            _ => &[],
        }
    }

    pub fn is_tab(&self, screen: Screen) -> bool {
        self.tabs().iter().any(|t| t.screen == screen)
    }

    /// Whether `screen` exists in this graph at all.
    pub fn contains(&self, screen: Screen) -> bool {
        match self {
            NavigationGraph::Loading => screen == Screen::Loading,
            NavigationGraph::Auth(auth) => auth.screens.contains(&screen),
            NavigationGraph::Main(main) => {
                main.tabs.iter().any(|t| t.screen == screen) || main.stack.contains(&screen)
            }
        }
    }
}

/// Pick the mounted graph for a session snapshot.
pub fn select_root_graph(session: &Session) -> NavigationGraph {
    if session.is_loading {
        return NavigationGraph::Loading;
    }

    match &session.user {
        None => NavigationGraph::Auth(AuthGraph {
            screens: AUTH_SCREENS.to_vec(),
        }),
        Some(user) => NavigationGraph::Main(MainGraph {
            tabs: build_authenticated_tabs(user),
            stack: MAIN_STACK.to_vec(),
        }),
    }
}

/// Home, Expedientes, Documentos; then Usuarios and Auditoria for
/// administrative roles. Unrecognized roles only get the base tabs.
pub fn build_authenticated_tabs(user: &User) -> Vec<TabSpec> {
    let mut tabs = BASE_TABS.to_vec();
    if user.rol.is_administrative() {
        tabs.extend(ADMIN_TABS);
    }
    tabs
}
