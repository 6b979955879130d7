//! Models shared between the locator, adapter factories and directory plugins.

use std::any::Any;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

use crate::api::RemoteRepository;

/// Parameter naming the context attribute the repository is published under.
pub const REPOSITORY_ATTRIBUTE_KEY: &str = "RepositoryAttribute";

/// Parameter naming the adapter factory to instantiate.
pub const ADAPTER_FACTORY_CLASS_KEY: &str = "AdapterFactoryClass";

/// Parameter overriding the directory location of the remote repository.
pub const LOCATION_KEY: &str = "Location";

/// Parameters that never reach the directory environment.
pub const RESERVED_KEYS: [&str; 3] = [
    REPOSITORY_ATTRIBUTE_KEY,
    ADAPTER_FACTORY_CLASS_KEY,
    LOCATION_KEY,
];

/// Fully-qualified name of the remote repository capability.
///
/// The default directory location is derived from it.
pub const REMOTE_REPOSITORY_TYPE_NAME: &str = "repository_locator_sdk::RemoteRepository";

/// Fully-qualified name of the local repository capability.
///
/// The default context attribute is derived from it.
pub const REPOSITORY_TYPE_NAME: &str = "repository_locator_sdk::Repository";

/// Returns `true` if `name` is one of [`RESERVED_KEYS`].
#[must_use]
pub fn is_reserved_key(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Connection parameters handed to a [`DirectoryConnector`](crate::DirectoryConnector).
///
/// Never contains a reserved key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEnvironment {
    entries: BTreeMap<String, String>,
}

impl DirectoryEnvironment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry.
    ///
    /// Returns `false` and leaves the environment untouched if `name` is a
    /// reserved key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if is_reserved_key(&name) {
            return false;
        }
        self.entries.insert(name, value.into());
        true
    }

    /// Value of the entry `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns `true` if an entry named `name` exists.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entry names ordered by name.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DirectoryEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (name, value) in iter {
            _ = env.insert(name, value);
        }
        env
    }
}

impl IntoIterator for DirectoryEnvironment {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Opaque object returned by a directory lookup.
///
/// The locator never inspects it; adapter factories downcast it to the shape
/// they expect.
#[derive(Clone)]
pub struct RemoteHandle {
    object: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl RemoteHandle {
    /// Wrap an arbitrary object.
    pub fn new<T: Any + Send + Sync>(object: T) -> Self {
        Self {
            object: Arc::new(object),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap a remote repository in the shape the built-in adapter expects.
    #[must_use]
    pub fn repository(repository: Arc<dyn RemoteRepository>) -> Self {
        Self::new(repository)
    }

    /// Borrow the wrapped object as `T`, if that is what it is.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Type name of the wrapped object, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// User credentials presented on login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User identifier.
    pub user_id: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Create credentials for `user_id`.
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Session opened by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Authenticated user, `None` for anonymous sessions.
    pub user_id: Option<String>,
    /// Workspace the session is bound to.
    pub workspace: String,
}
