//! Name-indexed component registry.
//!
//! Components (adapter factories, directory connectors) are registered under a
//! string name together with a zero-argument constructor. Registrations come
//! from two places:
//! - compile time, via `inventory::submit!` of a [`ComponentRegistration`]
//! - run time, via [`ComponentRegistryBuilder::register`]
//!
//! Instantiating a component checks that it provides the requested capability;
//! the check is expressed with [`ComponentTag`]s.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use repository_locator_sdk::{ComponentError, DirectoryConnector, LocalAdapterFactory};
use tracing::debug;

use crate::client::ClientAdapterFactory;
use crate::config::DEFAULT_ADAPTER_FACTORY;

// ============================================================================
// Components
// ============================================================================

/// A constructed component.
#[derive(Clone)]
pub enum Component {
    AdapterFactory(Arc<dyn LocalAdapterFactory>),
    DirectoryConnector(Arc<dyn DirectoryConnector>),
}

impl Component {
    /// Capability label of this component.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AdapterFactory(_) => AdapterFactoryCap::LABEL,
            Self::DirectoryConnector(_) => DirectoryConnectorCap::LABEL,
        }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdapterFactory(_) => write!(f, "AdapterFactory(<impl LocalAdapterFactory>)"),
            Self::DirectoryConnector(_) => {
                write!(f, "DirectoryConnector(<impl DirectoryConnector>)")
            }
        }
    }
}

/// Trait for capability tags that allow type-safe querying.
pub trait ComponentTag {
    type Out: ?Sized + 'static;
    const LABEL: &'static str;
    fn try_get(component: &Component) -> Option<&Arc<Self::Out>>;
}

/// Tag for querying `LocalAdapterFactory`.
pub struct AdapterFactoryCap;
impl ComponentTag for AdapterFactoryCap {
    type Out = dyn LocalAdapterFactory;
    const LABEL: &'static str = "adapter_factory";
    fn try_get(component: &Component) -> Option<&Arc<Self::Out>> {
        match component {
            Component::AdapterFactory(v) => Some(v),
            Component::DirectoryConnector(_) => None,
        }
    }
}

/// Tag for querying `DirectoryConnector`.
pub struct DirectoryConnectorCap;
impl ComponentTag for DirectoryConnectorCap {
    type Out = dyn DirectoryConnector;
    const LABEL: &'static str = "directory_connector";
    fn try_get(component: &Component) -> Option<&Arc<Self::Out>> {
        match component {
            Component::DirectoryConnector(v) => Some(v),
            Component::AdapterFactory(_) => None,
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Compile-time registration entry, collected with `inventory`.
///
/// ```ignore
/// inventory::submit! {
///     ComponentRegistration { name: "acme::AuditingFactory", constructor: AuditingFactory::component }
/// }
/// ```
pub struct ComponentRegistration {
    pub name: &'static str,
    pub constructor: fn() -> anyhow::Result<Component>,
}

inventory::collect!(ComponentRegistration);

type ComponentConstructor = Arc<dyn Fn() -> anyhow::Result<Component> + Send + Sync>;

/// Builder for [`ComponentRegistry`].
#[derive(Default)]
pub struct ComponentRegistryBuilder {
    constructors: HashMap<String, ComponentConstructor>,
}

impl ComponentRegistryBuilder {
    /// Add the built-in client adapter factory and every `inventory` registration.
    ///
    /// Runtime registrations made before or after this call take precedence
    /// over compile-time ones with the same name.
    #[must_use]
    pub fn with_builtins(mut self) -> Self {
        let builtin: ComponentConstructor = Arc::new(ClientAdapterFactory::component);
        self.constructors
            .entry(DEFAULT_ADAPTER_FACTORY.to_owned())
            .or_insert(builtin);

        for reg in inventory::iter::<ComponentRegistration> {
            debug!(name = reg.name, "Collected compile-time component registration");
            let constructor: ComponentConstructor = Arc::new(reg.constructor);
            self.constructors
                .entry(reg.name.to_owned())
                .or_insert(constructor);
        }
        self
    }

    /// Register a constructor under `name`, replacing any previous one.
    #[must_use]
    pub fn register<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> anyhow::Result<Component> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Register an already constructed component; every instantiation returns
    /// a clone of it.
    #[must_use]
    pub fn register_instance(self, name: impl Into<String>, component: Component) -> Self {
        self.register(name, move || Ok(component.clone()))
    }

    #[must_use]
    pub fn build(self) -> ComponentRegistry {
        ComponentRegistry {
            constructors: self.constructors,
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable name → constructor table. Safe for concurrent use.
pub struct ComponentRegistry {
    constructors: HashMap<String, ComponentConstructor>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl ComponentRegistry {
    #[must_use]
    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::default()
    }

    /// Registry holding only the built-in and compile-time registrations.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::builder().with_builtins().build()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run the constructor registered under `name`.
    ///
    /// # Errors
    /// Returns `ComponentError::NotRegistered` for unknown names, and
    /// `Constructor` / `Panicked` if the constructor fails.
    pub fn construct(&self, name: &str) -> Result<Component, ComponentError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or(ComponentError::NotRegistered)?;

        match catch_unwind(AssertUnwindSafe(|| constructor())) {
            Ok(Ok(component)) => Ok(component),
            Ok(Err(e)) => Err(ComponentError::Constructor(e.into())),
            Err(payload) => Err(ComponentError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Construct `name` and query it for the capability `T`.
    ///
    /// # Errors
    /// Returns `ComponentError` if construction fails or the component lacks
    /// the capability.
    pub fn instantiate<T: ComponentTag>(&self, name: &str) -> Result<Arc<T::Out>, ComponentError> {
        let component = self.construct(name)?;
        T::try_get(&component)
            .cloned()
            .ok_or(ComponentError::CapabilityMismatch {
                expected: T::LABEL,
                actual: component.label(),
            })
    }

    /// Construct the adapter factory registered under `name`.
    ///
    /// # Errors
    /// See [`ComponentRegistry::instantiate`].
    pub fn instantiate_adapter_factory(
        &self,
        name: &str,
    ) -> Result<Arc<dyn LocalAdapterFactory>, ComponentError> {
        self.instantiate::<AdapterFactoryCap>(name)
    }

    /// Construct the directory connector registered under `name`.
    ///
    /// # Errors
    /// See [`ComponentRegistry::instantiate`].
    pub fn instantiate_connector(
        &self,
        name: &str,
    ) -> Result<Arc<dyn DirectoryConnector>, ComponentError> {
        self.instantiate::<DirectoryConnectorCap>(name)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
