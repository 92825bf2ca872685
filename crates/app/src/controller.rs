//! Session-driven navigation state.

use tracing::{debug, info};

use spjt_auth::{SessionError, SessionHandle};

use crate::error::NavigationError;
use crate::navigation::{NavigationGraph, RootTransition, Screen, select_root_graph};

/// Mounted graph plus the screen stack within it.
///
/// The graph is re-derived from the session on every [`sync`](Self::sync);
/// when the root changes the previous stack is discarded.
#[derive(Debug)]
pub struct NavigationController {
    session: SessionHandle,
    graph: NavigationGraph,
    stack: Vec<Screen>,
}

impl NavigationController {
    pub fn new(session: SessionHandle) -> Self {
        let graph = select_root_graph(&session.get_session());
        let stack = vec![graph.entry()];
        Self {
            session,
            graph,
            stack,
        }
    }

    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(self.graph.entry())
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Re-evaluate the graph for the latest session snapshot.
    pub fn sync(&mut self) -> Option<RootTransition> {
        let next = select_root_graph(&self.session.get_session());
        let from = self.graph.kind();
        let to = next.kind();
        self.graph = next;

        if from != to {
            self.stack = vec![self.graph.entry()];
            info!(from = ?from, to = ?to, entry = %self.graph.entry(), "root graph changed");
            return Some(RootTransition { from, to });
        }

        // Same root, possibly a different role: drop what is no longer there.
        let graph = &self.graph;
        self.stack.retain(|s| graph.contains(*s));
        if self.stack.is_empty() {
            self.stack.push(self.graph.entry());
        }
        None
    }

    /// Move to `target` if the currently valid graph contains it.
    ///
    /// Tabs replace the stack; stack screens are pushed on top.
    pub fn navigate(&mut self, target: Screen) -> Result<(), NavigationError> {
        self.sync();

        if !self.graph.contains(target) {
            debug!(screen = %target, root = ?self.graph.kind(), "navigation rejected");
            return Err(NavigationError::Unreachable {
                screen: target,
                root: self.graph.kind(),
            });
        }

        if self.graph.is_tab(target) || self.graph.entry() == target {
            self.stack = vec![target];
        } else if self.current() != target {
            self.stack.push(target);
        }
        debug!(screen = %target, depth = self.stack.len(), "navigated");
        Ok(())
    }

    /// Pop the top screen. The root screen is never popped.
    pub fn back(&mut self) -> Screen {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }

    /// Wait for the next session change and re-evaluate.
    pub async fn next_change(&mut self) -> Result<Option<RootTransition>, SessionError> {
        self.session.changed().await?;
        Ok(self.sync())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RootKind;
    use crate::test_support::{FakeAuth, Harness, PASSWORD, user};
    use spjt_auth::Role;
    use spjt_client::{ClientError, Credentials};

    fn credentials() -> Credentials {
        Credentials {
            email: "juez@spjt.com".into(),
            password: PASSWORD.into(),
        }
    }

    #[tokio::test]
    async fn startup_without_token_goes_loading_then_login() {
        let h = Harness::new(FakeAuth::default());
        let mut nav = NavigationController::new(h.ctx.session.clone());
        assert_eq!(nav.graph().kind(), RootKind::Loading);
        assert_eq!(nav.current(), Screen::Loading);

        h.ctx.auth.bootstrap().await;
        let transition = nav.sync();

        assert_eq!(
            transition,
            Some(RootTransition {
                from: RootKind::Loading,
                to: RootKind::Auth
            })
        );
        assert_eq!(nav.current(), Screen::Login);
        assert!(nav.navigate(Screen::Home).is_err());
    }

    #[tokio::test]
    async fn startup_with_valid_token_lands_on_home() {
        let h = Harness::new(FakeAuth::with_token(Ok(user(Role::Juez))));
        let mut nav = NavigationController::new(h.ctx.session.clone());

        h.ctx.auth.bootstrap().await;
        nav.sync();

        assert_eq!(nav.graph().kind(), RootKind::Main);
        assert_eq!(nav.current(), Screen::Home);
        assert!(!nav.graph().contains(Screen::Usuarios));
    }

    #[tokio::test]
    async fn login_switches_to_main_and_logout_back_to_auth() {
        let h = Harness::new(FakeAuth::logging_in_as(Role::Secretario));
        let mut nav = NavigationController::new(h.ctx.session.clone());
        h.ctx.auth.bootstrap().await;
        nav.sync();
        nav.navigate(Screen::RecuperarPassword).unwrap();

        h.ctx.auth.login(&credentials()).await.unwrap();
        assert_eq!(nav.sync().map(|t| t.to), Some(RootKind::Main));
        assert_eq!(nav.stack(), &[Screen::Home]);

        nav.navigate(Screen::Usuarios).unwrap();
        h.ctx.auth.logout().await;
        nav.sync();
        assert_eq!(nav.stack(), &[Screen::Login]);
    }

    #[tokio::test]
    async fn expiry_mid_session_discards_the_main_stack() {
        let h = Harness::logged_in(Role::Juez).await;
        let mut nav = NavigationController::new(h.ctx.session.clone());
        nav.navigate(Screen::Documentos).unwrap();
        nav.navigate(Screen::FirmarDocumento).unwrap();

        let _ = h.ctx.failure("Error al firmar el documento", ClientError::Unauthorized);
        let transition = nav.sync();

        assert_eq!(transition.map(|t| (t.from, t.to)), Some((RootKind::Main, RootKind::Auth)));
        assert_eq!(nav.current(), Screen::Login);
    }

    #[tokio::test]
    async fn stack_screens_push_and_pop() {
        let h = Harness::logged_in(Role::Admin).await;
        let mut nav = NavigationController::new(h.ctx.session.clone());

        nav.navigate(Screen::Expedientes).unwrap();
        nav.navigate(Screen::ExpedienteDetail).unwrap();
        nav.navigate(Screen::SubirDocumento).unwrap();
        assert_eq!(nav.back(), Screen::ExpedienteDetail);
        assert_eq!(nav.back(), Screen::Expedientes);
        assert_eq!(nav.back(), Screen::Expedientes);
    }

    #[tokio::test]
    async fn non_admin_cannot_reach_admin_tabs() {
        let h = Harness::logged_in(Role::Operador).await;
        let mut nav = NavigationController::new(h.ctx.session.clone());

        let err = nav.navigate(Screen::Usuarios).unwrap_err();
        assert_eq!(
            err,
            NavigationError::Unreachable {
                screen: Screen::Usuarios,
                root: RootKind::Main
            }
        );
        assert_eq!(nav.current(), Screen::Home);
    }

    #[tokio::test]
    async fn next_change_follows_the_session() {
        let h = Harness::new(FakeAuth::default());
        let mut nav = NavigationController::new(h.ctx.session.clone());

        let auth = h.ctx.auth.clone();
        let task = tokio::spawn(async move { auth.bootstrap().await });

        let transition = nav.next_change().await.unwrap();
        task.await.unwrap();
        assert_eq!(transition.map(|t| t.to), Some(RootKind::Auth));
    }

    #[tokio::test]
    async fn sync_is_idempotent() {
        let h = Harness::logged_in(Role::Admin).await;
        let mut nav = NavigationController::new(h.ctx.session.clone());
        nav.navigate(Screen::Usuarios).unwrap();

        assert_eq!(nav.sync(), None);
        assert_eq!(nav.sync(), None);
        assert_eq!(nav.current(), Screen::Usuarios);
    }
}
