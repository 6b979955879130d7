use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use repository_locator_sdk::{
    DirectoryConnector, DirectoryContext, DirectoryEnvironment, NamingError, RemoteHandle,
};
use tracing::{debug, warn};

use crate::config::StaticDirectoryConfig;
use crate::directory::StaticDirectory;
use crate::error::StaticDirectoryError;

/// Registry name of the static directory connector.
pub const CONNECTOR_NAME: &str = "static_directory_plugin::StaticDirectoryConnector";

/// Environment key carrying the client principal.
pub const PRINCIPAL_KEY: &str = "directory.principal";

/// Environment key carrying the client secret.
pub const CREDENTIALS_KEY: &str = "directory.credentials";

/// Environment key simulating an unreachable directory when `false`.
pub const AVAILABLE_KEY: &str = "directory.available";

/// [`DirectoryConnector`] over a shared [`StaticDirectory`].
///
/// Every environment passed to [`connect`](DirectoryConnector::connect) is
/// recorded, including rejected ones.
pub struct StaticDirectoryConnector {
    directory: Arc<StaticDirectory>,
    principal: Option<String>,
    credentials: Option<String>,
    environments: Mutex<Vec<DirectoryEnvironment>>,
}

impl StaticDirectoryConnector {
    /// Connector accepting anonymous connections.
    #[must_use]
    pub fn new(directory: Arc<StaticDirectory>) -> Self {
        Self {
            directory,
            principal: None,
            credentials: None,
            environments: Mutex::new(Vec::new()),
        }
    }

    /// Require clients to present `principal` and `credentials`.
    #[must_use]
    pub fn with_credentials(
        mut self,
        principal: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Self {
        self.principal = Some(principal.into());
        self.credentials = Some(credentials.into());
        self
    }

    /// Build the directory and connector described by `config`.
    ///
    /// # Errors
    /// Returns `StaticDirectoryError` if the bindings cannot be created.
    pub fn from_config(config: &StaticDirectoryConfig) -> Result<Self, StaticDirectoryError> {
        let mut connector = Self::new(config.build_directory()?);
        connector.principal.clone_from(&config.principal);
        connector.credentials.clone_from(&config.credentials);
        Ok(connector)
    }

    #[must_use]
    pub fn directory(&self) -> &Arc<StaticDirectory> {
        &self.directory
    }

    /// Environments received so far, in call order.
    #[must_use]
    pub fn environments(&self) -> Vec<DirectoryEnvironment> {
        self.environments.lock().clone()
    }

    fn check_available(environment: &DirectoryEnvironment) -> Result<(), NamingError> {
        match environment.get(AVAILABLE_KEY) {
            Some(v) if v.eq_ignore_ascii_case("false") => Err(NamingError::ServiceUnavailable(
                "directory marked unavailable".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    fn authenticate(&self, environment: &DirectoryEnvironment) -> Result<(), NamingError> {
        let (Some(principal), Some(credentials)) = (&self.principal, &self.credentials) else {
            return Ok(());
        };
        if environment.get(PRINCIPAL_KEY) != Some(principal.as_str()) {
            return Err(NamingError::AuthenticationFailed(format!(
                "unknown principal for `{PRINCIPAL_KEY}`"
            )));
        }
        if environment.get(CREDENTIALS_KEY) != Some(credentials.as_str()) {
            return Err(NamingError::AuthenticationFailed(format!(
                "invalid `{CREDENTIALS_KEY}` for principal `{principal}`"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for StaticDirectoryConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticDirectoryConnector")
            .field("bindings", &self.directory.names())
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}

impl DirectoryConnector for StaticDirectoryConnector {
    fn connect(
        &self,
        environment: &DirectoryEnvironment,
    ) -> Result<Arc<dyn DirectoryContext>, NamingError> {
        self.environments.lock().push(environment.clone());

        Self::check_available(environment)
            .and_then(|()| self.authenticate(environment))
            .inspect_err(|e| warn!(error = %e, "Rejected directory connection"))?;

        debug!(env_keys = environment.len(), "Directory context created");
        Ok(Arc::new(StaticDirectoryContext {
            directory: Arc::clone(&self.directory),
        }))
    }
}

struct StaticDirectoryContext {
    directory: Arc<StaticDirectory>,
}

#[async_trait]
impl DirectoryContext for StaticDirectoryContext {
    async fn lookup(&self, name: &str) -> Result<RemoteHandle, NamingError> {
        self.directory.lookup(name)
    }
}
