//! Repository Locator SDK
//!
//! Contract layer shared by the repository locator, its adapter factories and
//! its directory plugins.
//!
//! ## Capabilities
//!
//! - [`RemoteRepository`] - the repository as exposed by a remote process
//! - [`Repository`] - the local-facing repository handed to callers
//! - [`LocalAdapterFactory`] - turns a [`RemoteHandle`] into a [`Repository`]
//! - [`DirectoryConnector`] / [`DirectoryContext`] - the naming service used to
//!   locate the remote handle
//!
//! ## Errors
//!
//! Bootstrap failures are reported as [`BootstrapError`], which is either a
//! configuration problem (the adapter factory could not be prepared) or a
//! connection problem (the remote handle could not be resolved). The original
//! cause is always kept as the error source.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod models;

pub use api::{DirectoryConnector, DirectoryContext, LocalAdapterFactory, RemoteRepository, Repository};
pub use error::{
    AdapterError, BootstrapError, ComponentError, ConfigurationErrorKind, ConnectionErrorKind,
    NamingError, RemoteError, RepositoryError,
};
pub use models::{
    ADAPTER_FACTORY_CLASS_KEY, Credentials, DirectoryEnvironment, LOCATION_KEY,
    REMOTE_REPOSITORY_TYPE_NAME, REPOSITORY_ATTRIBUTE_KEY, REPOSITORY_TYPE_NAME, RESERVED_KEYS,
    RemoteHandle, SessionInfo, is_reserved_key,
};
