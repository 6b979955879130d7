use std::collections::HashMap;

use parking_lot::RwLock;
use repository_locator_sdk::{NamingError, RemoteHandle};
use tracing::debug;

use crate::error::StaticDirectoryError;

/// Thread-safe table of name → remote handle bindings.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    bindings: RwLock<HashMap<String, RemoteHandle>>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` under `name`.
    ///
    /// # Errors
    /// - `StaticDirectoryError::Naming` if `name` is malformed
    /// - `StaticDirectoryError::AlreadyBound` if something is bound under `name`
    pub fn bind(&self, name: &str, handle: RemoteHandle) -> Result<(), StaticDirectoryError> {
        validate_name(name)?;
        let mut bindings = self.bindings.write();
        if bindings.contains_key(name) {
            return Err(StaticDirectoryError::AlreadyBound(name.to_owned()));
        }
        debug!(name, handle = handle.type_name(), "Bound remote handle");
        bindings.insert(name.to_owned(), handle);
        Ok(())
    }

    /// Bind `handle` under `name`, replacing any existing binding.
    ///
    /// # Errors
    /// Returns `NamingError::MalformedName` if `name` is malformed.
    pub fn rebind(&self, name: &str, handle: RemoteHandle) -> Result<Option<RemoteHandle>, NamingError> {
        validate_name(name)?;
        debug!(name, handle = handle.type_name(), "Rebound remote handle");
        Ok(self.bindings.write().insert(name.to_owned(), handle))
    }

    /// Remove the binding under `name`. Unbinding an unbound name is a no-op.
    ///
    /// # Errors
    /// Returns `NamingError::MalformedName` if `name` is malformed.
    pub fn unbind(&self, name: &str) -> Result<Option<RemoteHandle>, NamingError> {
        validate_name(name)?;
        Ok(self.bindings.write().remove(name))
    }

    /// # Errors
    /// - `NamingError::MalformedName` if `name` is malformed
    /// - `NamingError::NameNotBound` if nothing is bound under `name`
    pub fn lookup(&self, name: &str) -> Result<RemoteHandle, NamingError> {
        validate_name(name)?;
        self.bindings
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| NamingError::NameNotBound(name.to_owned()))
    }

    /// Bound names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), NamingError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else {
        return Ok(());
    };
    Err(NamingError::MalformedName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    })
}
