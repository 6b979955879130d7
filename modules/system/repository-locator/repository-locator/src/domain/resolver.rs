use std::sync::Arc;

use repository_locator_sdk::{BootstrapError, DirectoryConnector, DirectoryEnvironment, RemoteHandle};
use tracing::{debug, instrument, warn};

/// Looks remote handles up through a [`DirectoryConnector`].
///
/// Each call builds a fresh directory context from the given environment;
/// nothing is kept between calls.
#[derive(Clone)]
pub struct DirectoryResolver {
    connector: Arc<dyn DirectoryConnector>,
}

impl DirectoryResolver {
    #[must_use]
    pub fn new(connector: Arc<dyn DirectoryConnector>) -> Self {
        Self { connector }
    }

    /// Connect with `environment` and look up `location`.
    ///
    /// # Errors
    /// Returns `BootstrapError::Connection` with kind `DirectoryUnavailable`
    /// if the context cannot be built or the lookup fails; the naming error is
    /// kept as the source.
    #[instrument(skip(self, environment), fields(env_keys = environment.len()))]
    pub async fn resolve(
        &self,
        environment: &DirectoryEnvironment,
        location: &str,
    ) -> Result<RemoteHandle, BootstrapError> {
        let context = self.connector.connect(environment).map_err(|e| {
            warn!(error = %e, "Failed to build directory context");
            BootstrapError::directory_unavailable(location, e)
        })?;

        let handle = context.lookup(location).await.map_err(|e| {
            warn!(error = %e, "Directory lookup failed");
            BootstrapError::directory_unavailable(location, e)
        })?;

        debug!(handle = handle.type_name(), "Remote handle located");
        Ok(handle)
    }
}

impl std::fmt::Debug for DirectoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryResolver").finish_non_exhaustive()
    }
}
