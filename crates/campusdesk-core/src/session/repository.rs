//! Session state repository trait.

use async_trait::async_trait;

use super::model::{PersistedSession, Role};
use crate::error::Result;

/// Load/save boundary for the authentication flag and role.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn load(&self) -> Result<PersistedSession>;

    /// Records a successful login for `role`.
    async fn save_login(&self, role: Role) -> Result<()>;

    /// Forgets the authentication flag and the role.
    async fn clear(&self) -> Result<()>;
}
