use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use repository_locator_sdk::{Credentials, RemoteError, RemoteHandle, RemoteRepository, SessionInfo};
use tracing::debug;

const DEFAULT_WORKSPACE: &str = "default";

/// Remote repository served from memory.
///
/// Anonymous logins are always accepted; credentialed logins must match one
/// of the configured users.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteRepository {
    descriptors: BTreeMap<String, String>,
    users: BTreeMap<String, String>,
}

impl InMemoryRemoteRepository {
    #[must_use]
    pub fn new(descriptors: BTreeMap<String, String>) -> Self {
        Self {
            descriptors,
            users: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_users(mut self, users: BTreeMap<String, String>) -> Self {
        self.users = users;
        self
    }

    /// Handle in the shape the built-in client adapter expects.
    #[must_use]
    pub fn into_handle(self) -> RemoteHandle {
        let repository: Arc<dyn RemoteRepository> = Arc::new(self);
        RemoteHandle::repository(repository)
    }
}

#[async_trait]
impl RemoteRepository for InMemoryRemoteRepository {
    async fn descriptor_keys(&self) -> Result<Vec<String>, RemoteError> {
        Ok(self.descriptors.keys().cloned().collect())
    }

    async fn descriptor(&self, key: &str) -> Result<Option<String>, RemoteError> {
        Ok(self.descriptors.get(key).cloned())
    }

    async fn login(
        &self,
        credentials: Option<Credentials>,
        workspace: Option<String>,
    ) -> Result<SessionInfo, RemoteError> {
        let workspace = workspace.unwrap_or_else(|| DEFAULT_WORKSPACE.to_owned());
        let user_id = match credentials {
            None => None,
            Some(c) if self.users.get(&c.user_id) == Some(&c.password) => Some(c.user_id),
            Some(c) => {
                debug!(user_id = %c.user_id, "Login rejected");
                return Err(RemoteError::Rejected(format!(
                    "invalid credentials for user `{}`",
                    c.user_id
                )));
            }
        };
        Ok(SessionInfo { user_id, workspace })
    }
}
