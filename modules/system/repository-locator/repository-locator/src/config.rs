//! Init parameter partitioning.
//!
//! The host hands the locator an open-ended set of named string parameters.
//! Three names are reserved (see [`RESERVED_KEYS`]); everything else is passed
//! verbatim to the naming service as its environment.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use repository_locator_sdk::{
    ADAPTER_FACTORY_CLASS_KEY, DirectoryEnvironment, LOCATION_KEY, REMOTE_REPOSITORY_TYPE_NAME,
    REPOSITORY_ATTRIBUTE_KEY,
};
use serde::{Deserialize, Serialize};

pub use repository_locator_sdk::RESERVED_KEYS;

/// Registry name of the built-in adapter factory.
pub const DEFAULT_ADAPTER_FACTORY: &str = "repository_locator::ClientAdapterFactory";

const DEFAULT_HOST_LOCATOR: &str = "//localhost/";

/// Default directory location of the remote repository.
///
/// Derived from [`REMOTE_REPOSITORY_TYPE_NAME`] with namespace separators
/// turned into path separators.
#[must_use]
pub fn default_location() -> String {
    format!(
        "{DEFAULT_HOST_LOCATOR}{}",
        REMOTE_REPOSITORY_TYPE_NAME.replace("::", "/")
    )
}

/// Read access to named init parameters.
pub trait ParameterSource {
    /// Names of all parameters.
    fn parameter_names(&self) -> Vec<String>;

    /// Value of the parameter `name`.
    fn parameter(&self, name: &str) -> Option<String>;
}

impl<S: BuildHasher> ParameterSource for HashMap<String, String, S> {
    fn parameter_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn parameter_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Owned, serializable set of init parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitParameters(BTreeMap<String, String>);

impl InitParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InitParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl ParameterSource for InitParameters {
    fn parameter_names(&self) -> Vec<String> {
        self.0.parameter_names()
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.0.parameter(name)
    }
}

/// Init parameters split into the three groups the bootstrapper consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Directory location of the remote repository.
    pub location: String,
    /// Registry name of the adapter factory.
    pub factory_class_name: String,
    /// Context attribute name; carried as-is, consumed by the publisher.
    pub repository_attribute: Option<String>,
    /// Everything that is not a reserved key.
    pub environment: DirectoryEnvironment,
}

impl LocatorConfig {
    /// Partition `params`, applying defaults for absent reserved keys.
    pub fn partition<P: ParameterSource + ?Sized>(params: &P) -> Self {
        let mut location = None;
        let mut factory_class_name = None;
        let mut repository_attribute = None;
        let mut environment = DirectoryEnvironment::new();

        for name in params.parameter_names() {
            let Some(value) = params.parameter(&name) else {
                continue;
            };
            match name.as_str() {
                LOCATION_KEY => location = Some(value),
                ADAPTER_FACTORY_CLASS_KEY => factory_class_name = Some(value),
                REPOSITORY_ATTRIBUTE_KEY => repository_attribute = Some(value),
                _ => {
                    _ = environment.insert(name, value);
                }
            }
        }

        Self {
            location: location.unwrap_or_else(default_location),
            factory_class_name: factory_class_name
                .unwrap_or_else(|| DEFAULT_ADAPTER_FACTORY.to_owned()),
            repository_attribute,
            environment,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_location_uses_path_separators() {
        assert_eq!(
            default_location(),
            "//localhost/repository_locator_sdk/RemoteRepository"
        );
    }

    #[test]
    fn empty_parameters_yield_defaults() {
        let cfg = LocatorConfig::partition(&InitParameters::new());
        assert_eq!(cfg.location, default_location());
        assert_eq!(cfg.factory_class_name, DEFAULT_ADAPTER_FACTORY);
        assert_eq!(cfg.repository_attribute, None);
        assert!(cfg.environment.is_empty());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let params = InitParameters::new().with("location", "svc/lower");
        let cfg = LocatorConfig::partition(&params);
        assert_eq!(cfg.location, default_location());
        assert_eq!(cfg.environment.get("location"), Some("svc/lower"));
    }
}
