use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::directory::StaticDirectory;
use crate::error::StaticDirectoryError;
use crate::repository::InMemoryRemoteRepository;

/// Configuration for the static directory.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticDirectoryConfig {
    /// Principal a client must present in `directory.principal`.
    /// When unset, the directory accepts anonymous connections.
    #[serde(default)]
    pub principal: Option<String>,

    /// Secret a client must present in `directory.credentials`.
    #[serde(default)]
    pub credentials: Option<String>,

    /// Repositories bound at startup.
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl fmt::Debug for StaticDirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticDirectoryConfig")
            .field("principal", &self.principal)
            .field("credentials", &self.credentials.as_ref().map(|_| "[REDACTED]"))
            .field("bindings", &self.bindings)
            .finish()
    }
}

/// A repository bound under a directory name.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    pub name: String,

    #[serde(default)]
    pub descriptors: BTreeMap<String, String>,

    /// User id → password accepted by `login`.
    #[serde(default)]
    pub users: BTreeMap<String, String>,
}

impl fmt::Debug for BindingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingConfig")
            .field("name", &self.name)
            .field("descriptors", &self.descriptors)
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StaticDirectoryConfig {
    /// Build a directory with every configured binding.
    ///
    /// # Errors
    /// Returns `StaticDirectoryError` if a binding name is malformed or used
    /// twice.
    pub fn build_directory(&self) -> Result<Arc<StaticDirectory>, StaticDirectoryError> {
        let directory = StaticDirectory::new();
        for binding in &self.bindings {
            let repository = InMemoryRemoteRepository::new(binding.descriptors.clone())
                .with_users(binding.users.clone());
            directory.bind(&binding.name, repository.into_handle())?;
        }
        Ok(Arc::new(directory))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let cfg = StaticDirectoryConfig {
            principal: Some("admin".to_owned()),
            credentials: Some("hunter2".to_owned()),
            bindings: vec![BindingConfig {
                name: "svc/Remote".to_owned(),
                descriptors: BTreeMap::new(),
                users: [("alice".to_owned(), "s3cret".to_owned())].into_iter().collect(),
            }],
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("admin"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let binding = BindingConfig {
            name: "svc/Remote".to_owned(),
            ..BindingConfig::default()
        };
        let cfg = StaticDirectoryConfig {
            bindings: vec![binding.clone(), binding],
            ..StaticDirectoryConfig::default()
        };
        let err = cfg.build_directory().unwrap_err();
        assert!(err.is_already_bound());
    }
}
