//! Login, logout and navigation.

use std::sync::Arc;
use std::time::Duration;

use campusdesk_core::Result;
use campusdesk_core::session::{
    NavItem, Role, SessionController, SessionRepository, SessionState, View,
};
use tokio::sync::RwLock;
use tracing::warn;

/// Use case around [`SessionController`] that persists the login.
///
/// Login is simulated: any role is accepted after `login_delay`.
pub struct SessionUseCase {
    controller: RwLock<SessionController>,
    repository: Arc<dyn SessionRepository>,
    login_delay: Duration,
}

impl SessionUseCase {
    /// Restores the previous session from storage.
    ///
    /// An unreadable store starts logged out.
    pub async fn restore(repository: Arc<dyn SessionRepository>, login_delay: Duration) -> Self {
        let controller = match repository.load().await {
            Ok(persisted) => SessionController::restore(persisted),
            Err(err) => {
                warn!(error = %err, "Failed to restore session, starting logged out");
                SessionController::new()
            }
        };
        Self {
            controller: RwLock::new(controller),
            repository,
            login_delay,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.controller.read().await.state()
    }

    pub async fn login(&self, role: Role) -> SessionState {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let state = {
            let mut controller = self.controller.write().await;
            controller.login(role);
            controller.state()
        };
        if let Err(err) = self.repository.save_login(role).await {
            warn!(error = %err, "Failed to persist login");
        }
        state
    }

    /// Ends the session. Issues and chat history are left untouched.
    pub async fn logout(&self) {
        self.controller.write().await.logout();
        if let Err(err) = self.repository.clear().await {
            warn!(error = %err, "Failed to clear persisted session");
        }
    }

    pub async fn nav_items(&self) -> &'static [NavItem] {
        self.controller.read().await.nav_items()
    }

    /// Fails with `Forbidden` unless the session may open `view`.
    pub async fn ensure_reachable(&self, view: View) -> Result<()> {
        self.controller.read().await.ensure_reachable(view)
    }

    pub async fn navigate(&self, view: View) -> Result<SessionState> {
        let mut controller = self.controller.write().await;
        controller.navigate(view)?;
        Ok(controller.state())
    }
}
