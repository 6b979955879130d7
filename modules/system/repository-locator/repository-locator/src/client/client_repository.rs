use std::sync::Arc;

use async_trait::async_trait;
use repository_locator_sdk::{
    Credentials, RemoteRepository, Repository, RepositoryError, SessionInfo,
};
use tracing::{instrument, trace};

/// Local proxy forwarding to a [`RemoteRepository`].
///
/// Transport failures surface as [`RepositoryError::Remote`].
pub struct ClientRepository {
    remote: Arc<dyn RemoteRepository>,
}

impl ClientRepository {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteRepository>) -> Self {
        Self { remote }
    }
}

impl std::fmt::Debug for ClientRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRepository").finish_non_exhaustive()
    }
}

#[async_trait]
impl Repository for ClientRepository {
    async fn descriptor_keys(&self) -> Result<Vec<String>, RepositoryError> {
        trace!("Forwarding descriptor_keys");
        Ok(self.remote.descriptor_keys().await?)
    }

    async fn descriptor(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        trace!(key, "Forwarding descriptor");
        Ok(self.remote.descriptor(key).await?)
    }

    #[instrument(skip(self, credentials))]
    async fn login(
        &self,
        credentials: Option<Credentials>,
        workspace: Option<String>,
    ) -> Result<SessionInfo, RepositoryError> {
        Ok(self.remote.login(credentials, workspace).await?)
    }
}
