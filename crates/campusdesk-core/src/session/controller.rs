use tracing::info;

use super::model::{NavItem, PersistedSession, Role, SessionState, View, nav_items};
use crate::error::{CampusError, Result};

/// Whether `view` can be opened by `role`.
///
/// Sidebar entries are reachable, and so is the issue form: it is linked from
/// the student dashboard and carries its own identity for staff reporters.
pub fn is_reachable(role: Role, view: View) -> bool {
    view == View::NewIssue || nav_items(role).iter().any(|item| item.view == view)
}

/// Tracks authentication, role and the active view.
///
/// The controller is pure state; persisting it is the caller's job (see
/// [`super::SessionRepository`]).
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    state: SessionState,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the controller from persisted values. A missing role falls
    /// back to `Student`.
    pub fn restore(persisted: PersistedSession) -> Self {
        Self {
            state: SessionState {
                authenticated: persisted.authenticated,
                role: persisted.role.unwrap_or_default(),
                active_view: View::Dashboard,
            },
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    pub fn role(&self) -> Role {
        self.state.role
    }

    pub fn active_view(&self) -> View {
        self.state.active_view
    }

    /// Marks the session authenticated as `role` and returns to the dashboard.
    /// No credential is checked.
    pub fn login(&mut self, role: Role) {
        self.state = SessionState {
            authenticated: true,
            role,
            active_view: View::Dashboard,
        };
        info!(role = %role, "Session logged in");
    }

    /// Clears authentication. The role is kept in memory so the login screen
    /// can preselect it.
    pub fn logout(&mut self) {
        self.state.authenticated = false;
        info!(role = %self.state.role, "Session logged out");
    }

    /// Sidebar entries for the current role, empty when logged out.
    pub fn nav_items(&self) -> &'static [NavItem] {
        if self.state.authenticated {
            nav_items(self.state.role)
        } else {
            &[]
        }
    }

    /// Requires an authenticated session that may reach `view`.
    pub fn ensure_reachable(&self, view: View) -> Result<()> {
        if !self.state.authenticated {
            return Err(CampusError::forbidden("not logged in"));
        }
        if !is_reachable(self.state.role, view) {
            return Err(CampusError::forbidden(format!(
                "view '{view}' is not available to role {}",
                self.state.role
            )));
        }
        Ok(())
    }

    /// Switches the active view after checking reachability.
    pub fn navigate(&mut self, view: View) -> Result<()> {
        self.ensure_reachable(view)?;
        self.state.active_view = view;
        Ok(())
    }
}
