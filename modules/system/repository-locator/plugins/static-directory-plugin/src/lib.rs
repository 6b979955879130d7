//! Static Directory Plugin
//!
//! An in-process naming service for the repository locator. Bindings are
//! declared up front (usually from configuration) and served to the locator
//! through [`StaticDirectoryConnector`].
//!
//! Recognised environment keys:
//! - `directory.principal` / `directory.credentials`: checked against the
//!   credentials the directory was configured with
//! - `directory.available`: `false` makes every connect attempt fail with
//!   `ServiceUnavailable`
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod connector;
pub mod directory;
pub mod error;
pub mod repository;

pub use config::{BindingConfig, StaticDirectoryConfig};
pub use connector::{
    AVAILABLE_KEY, CONNECTOR_NAME, CREDENTIALS_KEY, PRINCIPAL_KEY, StaticDirectoryConnector,
};
pub use directory::StaticDirectory;
pub use error::StaticDirectoryError;
pub use repository::InMemoryRemoteRepository;
