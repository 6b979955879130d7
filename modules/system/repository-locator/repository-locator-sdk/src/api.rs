//! Capability traits of the repository locator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AdapterError, NamingError, RemoteError, RepositoryError};
use crate::models::{Credentials, DirectoryEnvironment, RemoteHandle, SessionInfo};

/// Repository published by a remote process.
///
/// Every method crosses a process boundary and may fail with a transport-level
/// [`RemoteError`].
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Keys of all descriptors the repository exposes.
    ///
    /// # Errors
    /// Returns `RemoteError` if the remote call fails.
    async fn descriptor_keys(&self) -> Result<Vec<String>, RemoteError>;

    /// Value of a single descriptor, `None` if the key is unknown.
    ///
    /// # Errors
    /// Returns `RemoteError` if the remote call fails.
    async fn descriptor(&self, key: &str) -> Result<Option<String>, RemoteError>;

    /// Open a session on `workspace` (the default workspace when `None`).
    ///
    /// # Errors
    /// Returns `RemoteError` if the remote call fails or the login is rejected.
    async fn login(
        &self,
        credentials: Option<Credentials>,
        workspace: Option<String>,
    ) -> Result<SessionInfo, RemoteError>;
}

/// Local-facing repository returned by bootstrap.
///
/// Callers use this trait without knowing whether the repository lives in the
/// same process or behind a remote transport.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Keys of all repository descriptors.
    ///
    /// # Errors
    /// Returns `RepositoryError` if the underlying repository fails.
    async fn descriptor_keys(&self) -> Result<Vec<String>, RepositoryError>;

    /// Value of a single descriptor, `None` if the key is unknown.
    ///
    /// # Errors
    /// Returns `RepositoryError` if the underlying repository fails.
    async fn descriptor(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Open a session on `workspace` (the default workspace when `None`).
    ///
    /// # Errors
    /// Returns `RepositoryError` if the login fails.
    async fn login(
        &self,
        credentials: Option<Credentials>,
        workspace: Option<String>,
    ) -> Result<SessionInfo, RepositoryError>;
}

/// Converts a remote handle into a local [`Repository`] proxy.
///
/// Implementations are registered by name and constructed without arguments.
pub trait LocalAdapterFactory: Send + Sync {
    /// Wrap the located remote handle.
    ///
    /// # Errors
    /// Returns `AdapterError` if the handle does not have the shape this
    /// factory expects.
    fn wrap(&self, handle: &RemoteHandle) -> Result<Arc<dyn Repository>, AdapterError>;
}

/// Builds directory contexts from a [`DirectoryEnvironment`].
pub trait DirectoryConnector: Send + Sync {
    /// Connect to the naming service described by `environment`.
    ///
    /// # Errors
    /// Returns `NamingError` if the environment is rejected or the service
    /// cannot be reached.
    fn connect(
        &self,
        environment: &DirectoryEnvironment,
    ) -> Result<Arc<dyn DirectoryContext>, NamingError>;
}

/// A connected naming service.
#[async_trait]
pub trait DirectoryContext: Send + Sync {
    /// Look up the object bound under `name`.
    ///
    /// # Errors
    /// Returns `NamingError` if the name is malformed, not bound, or the
    /// service fails.
    async fn lookup(&self, name: &str) -> Result<RemoteHandle, NamingError>;
}
