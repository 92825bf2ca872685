//! `spjt-app`: application core of the SPJT client.
//!
//! The session decides which navigation graph is mounted; the permission gate
//! decides which mutating actions may reach the REST collaborators.

pub mod actions;
pub mod authenticator;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod notice;
pub mod screens;

#[cfg(test)]
pub(crate) mod test_support;

pub use actions::GatedAction;
pub use authenticator::Authenticator;
pub use config::{AppConfig, ConfigError};
pub use context::AppContext;
pub use controller::NavigationController;
pub use error::{ActionError, NavigationError};
pub use navigation::{
    NavigationGraph, RootKind, RootTransition, Screen, TabSpec, build_authenticated_tabs,
    select_root_graph,
};
pub use notice::{Notice, NoticeKind};
