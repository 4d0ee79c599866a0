//! Session domain module.
//!
//! Authentication flag, role and view gating for the dashboard.

mod controller;
mod model;
pub mod repository;

pub use controller::{SessionController, is_reachable};
pub use model::{NavItem, PersistedSession, Role, SessionState, View, nav_items};
pub use repository::SessionRepository;
