//! Session state service implementation.
//!
//! Persists the authentication flag and role under `campus_auth` /
//! `campus_role` so a login survives restarts.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use campusdesk_core::session::{PersistedSession, Role, SessionRepository};
use campusdesk_core::store::{AUTH_KEY, KeyValueStore, ROLE_KEY};
use campusdesk_core::{CampusError, Result};
use tracing::warn;

/// Session persistence over a [`KeyValueStore`], with a read cache.
///
/// # Example
///
/// ```ignore
/// let service = SessionStateService::new(store);
/// service.save_login(Role::Admin).await?;
/// assert!(service.load().await?.authenticated);
/// ```
#[derive(Clone)]
pub struct SessionStateService {
    /// Cached session loaded from the store.
    state: Arc<RwLock<Option<PersistedSession>>>,
    store: Arc<dyn KeyValueStore>,
}

impl SessionStateService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            store,
        }
    }

    fn cached(&self) -> Result<Option<PersistedSession>> {
        let read_lock = self
            .state
            .read()
            .map_err(|_| CampusError::internal("session cache poisoned"))?;
        Ok(*read_lock)
    }

    fn cache(&self, session: PersistedSession) -> Result<()> {
        let mut write_lock = self
            .state
            .write()
            .map_err(|_| CampusError::internal("session cache poisoned"))?;
        *write_lock = Some(session);
        Ok(())
    }

    fn load_from_store(&self) -> Result<PersistedSession> {
        let authenticated = self.store.get(AUTH_KEY)?.as_deref() == Some("true");
        let role = match self.store.get(ROLE_KEY)? {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    warn!(value = %raw, "Ignoring unknown stored role");
                    None
                }
            },
            None => None,
        };
        Ok(PersistedSession {
            authenticated,
            role,
        })
    }
}

#[async_trait]
impl SessionRepository for SessionStateService {
    async fn load(&self) -> Result<PersistedSession> {
        if let Some(cached) = self.cached()? {
            return Ok(cached);
        }
        let loaded = self.load_from_store()?;
        self.cache(loaded)?;
        Ok(loaded)
    }

    async fn save_login(&self, role: Role) -> Result<()> {
        self.store.set(AUTH_KEY, "true")?;
        self.store.set(ROLE_KEY, &role.to_string())?;
        self.cache(PersistedSession {
            authenticated: true,
            role: Some(role),
        })
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(AUTH_KEY)?;
        self.store.remove(ROLE_KEY)?;
        self.cache(PersistedSession::default())
    }
}
