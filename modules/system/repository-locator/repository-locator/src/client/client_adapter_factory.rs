use std::sync::Arc;

use repository_locator_sdk::{
    AdapterError, LocalAdapterFactory, RemoteHandle, RemoteRepository, Repository,
};
use tracing::debug;

use super::ClientRepository;
use crate::registry::Component;

/// Default adapter factory, registered as
/// [`DEFAULT_ADAPTER_FACTORY`](crate::config::DEFAULT_ADAPTER_FACTORY).
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientAdapterFactory;

impl ClientAdapterFactory {
    /// Zero-argument constructor used by the component registry.
    ///
    /// # Errors
    /// Never fails; the signature matches registry constructors.
    #[allow(clippy::unnecessary_wraps)]
    pub fn component() -> anyhow::Result<Component> {
        Ok(Component::AdapterFactory(Arc::new(Self)))
    }
}

impl LocalAdapterFactory for ClientAdapterFactory {
    fn wrap(&self, handle: &RemoteHandle) -> Result<Arc<dyn Repository>, AdapterError> {
        let remote = handle
            .downcast_ref::<Arc<dyn RemoteRepository>>()
            .cloned()
            .ok_or_else(|| AdapterError::UnexpectedHandle {
                expected: std::any::type_name::<Arc<dyn RemoteRepository>>(),
                actual: handle.type_name(),
            })?;

        debug!(handle = handle.type_name(), "Wrapping remote repository in client adapter");
        Ok(Arc::new(ClientRepository::new(remote)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn rejects_foreign_handle() {
        let handle = RemoteHandle::new("not a repository".to_owned());
        match ClientAdapterFactory.wrap(&handle) {
            Err(AdapterError::UnexpectedHandle { actual, .. }) => {
                assert!(actual.contains("String"));
            }
            Ok(_) => panic!("a string handle must not be adapted"),
        }
    }
}
