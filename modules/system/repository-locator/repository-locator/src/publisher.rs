//! Publishes bootstrapped repositories as named context attributes.
//!
//! The host owns a [`RepositoryContext`]; [`RepositoryPublisher::init`] stores
//! the repository under the name given by the `RepositoryAttribute` parameter
//! and [`RepositoryPublisher::destroy`] removes it again on shutdown.

use std::sync::Arc;

use dashmap::DashMap;
use repository_locator_sdk::{BootstrapError, REPOSITORY_TYPE_NAME, Repository};
use tracing::info;

use crate::config::{LocatorConfig, ParameterSource};
use crate::domain::bootstrap::RepositoryBootstrapper;

/// Attribute name used when `RepositoryAttribute` is not configured: the
/// repository capability's type name.
pub const DEFAULT_REPOSITORY_ATTRIBUTE: &str = REPOSITORY_TYPE_NAME;

/// Concurrent attribute store shared with the host.
#[derive(Default)]
pub struct RepositoryContext {
    attributes: DashMap<String, Arc<dyn Repository>>,
}

impl RepositoryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `repository` under `name`, returning the previous value.
    pub fn set_attribute(
        &self,
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
    ) -> Option<Arc<dyn Repository>> {
        self.attributes.insert(name.into(), repository)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Arc<dyn Repository>> {
        self.attributes.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove_attribute(&self, name: &str) -> Option<Arc<dyn Repository>> {
        self.attributes.remove(name).map(|(_, repository)| repository)
    }

    /// Attribute names, sorted.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attributes.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for RepositoryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryContext")
            .field("attributes", &self.attribute_names())
            .finish()
    }
}

/// Bootstraps a repository and publishes it in a [`RepositoryContext`].
#[derive(Debug, Clone)]
pub struct RepositoryPublisher {
    bootstrapper: RepositoryBootstrapper,
}

impl RepositoryPublisher {
    #[must_use]
    pub const fn new(bootstrapper: RepositoryBootstrapper) -> Self {
        Self { bootstrapper }
    }

    /// Bootstrap from `params` and publish the result; returns the attribute
    /// name it was stored under.
    ///
    /// Nothing is published if bootstrap fails.
    ///
    /// # Errors
    /// Propagates the `BootstrapError` unchanged.
    pub async fn init<P>(
        &self,
        params: &P,
        context: &RepositoryContext,
    ) -> Result<String, BootstrapError>
    where
        P: ParameterSource + Sync + ?Sized,
    {
        let config = LocatorConfig::partition(params);
        let name = attribute_name(&config);
        let repository = self.bootstrapper.bootstrap_with(&config).await?;

        if context.set_attribute(name.clone(), repository).is_some() {
            info!(attribute = %name, "Replaced previously published repository");
        } else {
            info!(attribute = %name, "Published repository");
        }
        Ok(name)
    }

    /// Remove the repository published for `params`.
    pub fn destroy<P>(&self, params: &P, context: &RepositoryContext) -> Option<Arc<dyn Repository>>
    where
        P: ParameterSource + ?Sized,
    {
        let name = attribute_name(&LocatorConfig::partition(params));
        let removed = context.remove_attribute(&name);
        if removed.is_some() {
            info!(attribute = %name, "Unpublished repository");
        }
        removed
    }
}

fn attribute_name(config: &LocatorConfig) -> String {
    config
        .repository_attribute
        .clone()
        .unwrap_or_else(|| DEFAULT_REPOSITORY_ATTRIBUTE.to_owned())
}
