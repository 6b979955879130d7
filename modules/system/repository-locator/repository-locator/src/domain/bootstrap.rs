use std::sync::Arc;

use repository_locator_sdk::{
    BootstrapError, DirectoryConnector, LocalAdapterFactory, Repository,
};
use tracing::{debug, info, instrument, warn};

use super::resolver::DirectoryResolver;
use crate::config::{LocatorConfig, ParameterSource};
use crate::registry::ComponentRegistry;

/// Turns init parameters into a local [`Repository`] proxy.
///
/// The adapter factory is instantiated before the directory lookup; the first
/// failure in that order is the one reported.
#[derive(Debug, Clone)]
pub struct RepositoryBootstrapper {
    registry: Arc<ComponentRegistry>,
    resolver: DirectoryResolver,
}

impl RepositoryBootstrapper {
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>, connector: Arc<dyn DirectoryConnector>) -> Self {
        Self {
            registry,
            resolver: DirectoryResolver::new(connector),
        }
    }

    /// Partition `params` and bootstrap the repository they describe.
    ///
    /// # Errors
    /// See [`RepositoryBootstrapper::bootstrap_with`].
    pub async fn bootstrap<P>(&self, params: &P) -> Result<Arc<dyn Repository>, BootstrapError>
    where
        P: ParameterSource + Sync + ?Sized,
    {
        let config = LocatorConfig::partition(params);
        self.bootstrap_with(&config).await
    }

    /// Bootstrap from an already partitioned configuration.
    ///
    /// # Errors
    /// - `BootstrapError::Configuration` if the adapter factory cannot be
    ///   prepared
    /// - `BootstrapError::Connection` if the remote handle cannot be located
    ///   or the factory cannot adapt it
    #[instrument(
        skip(self, config),
        fields(location = %config.location, factory = %config.factory_class_name)
    )]
    pub async fn bootstrap_with(
        &self,
        config: &LocatorConfig,
    ) -> Result<Arc<dyn Repository>, BootstrapError> {
        let factory = self.instantiate_factory(&config.factory_class_name)?;

        let handle = self
            .resolver
            .resolve(&config.environment, &config.location)
            .await?;

        let repository = factory.wrap(&handle).map_err(|e| {
            warn!(error = %e, "Adapter factory rejected the remote handle");
            BootstrapError::incompatible_handle(&config.location, e)
        })?;

        info!("Remote repository bootstrapped");
        Ok(repository)
    }

    /// Construct the adapter factory registered under `name`.
    ///
    /// # Errors
    /// Returns `BootstrapError::Configuration` naming `name` if the factory is
    /// unknown, its constructor fails, or it is not an adapter factory.
    pub fn instantiate_factory(
        &self,
        name: &str,
    ) -> Result<Arc<dyn LocalAdapterFactory>, BootstrapError> {
        let factory = self
            .registry
            .instantiate_adapter_factory(name)
            .map_err(|e| {
                let err = BootstrapError::configuration(name, e);
                warn!(kind = err.kind_label(), error = %err, "Adapter factory could not be prepared");
                err
            })?;
        debug!(factory = name, "Adapter factory instantiated");
        Ok(factory)
    }
}
