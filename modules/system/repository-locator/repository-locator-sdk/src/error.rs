//! Error types for the repository locator.

use std::fmt;

/// Boxed error used to carry an underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a naming service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    /// The name does not follow the directory's syntax.
    #[error("malformed name `{name}`: {reason}")]
    MalformedName {
        /// The offending name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The directory rejected the supplied principal or credentials.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The directory could not be reached.
    #[error("directory service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Nothing is bound under the name.
    #[error("name not bound: {0}")]
    NameNotBound(String),

    /// Any other naming failure.
    #[error("naming error: {0}")]
    Other(String),
}

/// Transport-level failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The call could not be delivered or its reply was lost.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote side refused the call.
    #[error("remote call rejected: {0}")]
    Rejected(String),
}

/// Failure reported by a local [`Repository`](crate::Repository) proxy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The forwarded remote call failed.
    #[error("remote operation failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Failure of [`LocalAdapterFactory::wrap`](crate::LocalAdapterFactory::wrap).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// The remote handle is not of the type the factory adapts.
    #[error("unexpected remote handle: expected `{expected}`, got `{actual}`")]
    UnexpectedHandle {
        /// Type the factory adapts.
        expected: &'static str,
        /// Type found in the handle.
        actual: &'static str,
    },
}

/// Failure to obtain a component from the component registry.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// No component is registered under the requested name.
    #[error("no component is registered under this name")]
    NotRegistered,

    /// The component constructor returned an error.
    #[error("component constructor failed")]
    Constructor(#[source] BoxError),

    /// The component constructor panicked.
    #[error("component constructor panicked: {0}")]
    Panicked(String),

    /// The component does not provide the requested capability.
    #[error("component provides the `{actual}` capability, expected `{expected}`")]
    CapabilityMismatch {
        /// Requested capability.
        expected: &'static str,
        /// Capability the component actually provides.
        actual: &'static str,
    },
}

impl ComponentError {
    /// The configuration error kind this failure is reported as.
    #[must_use]
    pub const fn configuration_kind(&self) -> ConfigurationErrorKind {
        match self {
            Self::NotRegistered => ConfigurationErrorKind::TypeNotFound,
            Self::Constructor(_) | Self::Panicked(_) => ConfigurationErrorKind::InstantiationFailed,
            Self::CapabilityMismatch { .. } => ConfigurationErrorKind::CapabilityMismatch,
        }
    }
}

/// Why the adapter factory could not be prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationErrorKind {
    /// The factory name is not registered.
    TypeNotFound,
    /// The factory constructor failed.
    InstantiationFailed,
    /// The registered component is not an adapter factory.
    CapabilityMismatch,
}

impl ConfigurationErrorKind {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeNotFound => "type_not_found",
            Self::InstantiationFailed => "instantiation_failed",
            Self::CapabilityMismatch => "capability_mismatch",
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::TypeNotFound => "local adapter factory class not found",
            Self::InstantiationFailed => "failed to instantiate the adapter factory",
            Self::CapabilityMismatch => "invalid local adapter factory class",
        }
    }
}

impl fmt::Display for ConfigurationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Why the remote handle could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionErrorKind {
    /// The directory could not be built, reached, or had nothing at the location.
    DirectoryUnavailable,
    /// The located object is not something the adapter factory can wrap.
    IncompatibleHandle,
}

impl ConnectionErrorKind {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectoryUnavailable => "directory_unavailable",
            Self::IncompatibleHandle => "incompatible_handle",
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::DirectoryUnavailable => {
                "remote handle not found: invalid or unreachable directory"
            }
            Self::IncompatibleHandle => "remote handle cannot be adapted",
        }
    }
}

impl fmt::Display for ConnectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Error returned by repository bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The adapter factory could not be prepared.
    #[error("adapter factory could not be prepared: {kind}: {class_name}")]
    Configuration {
        /// What went wrong.
        kind: ConfigurationErrorKind,
        /// The configured factory name.
        class_name: String,
        /// Registry failure.
        #[source]
        source: ComponentError,
    },

    /// The remote handle could not be resolved.
    #[error("{kind} (location `{location}`): {source}")]
    Connection {
        /// What went wrong.
        kind: ConnectionErrorKind,
        /// The directory location that was looked up.
        location: String,
        /// Naming or adapter failure.
        #[source]
        source: BoxError,
    },
}

impl BootstrapError {
    /// Build a configuration error; the kind is derived from `source`.
    pub fn configuration(class_name: impl Into<String>, source: ComponentError) -> Self {
        Self::Configuration {
            kind: source.configuration_kind(),
            class_name: class_name.into(),
            source,
        }
    }

    /// Build a `DirectoryUnavailable` connection error.
    pub fn directory_unavailable(location: impl Into<String>, source: NamingError) -> Self {
        Self::Connection {
            kind: ConnectionErrorKind::DirectoryUnavailable,
            location: location.into(),
            source: Box::new(source),
        }
    }

    /// Build an `IncompatibleHandle` connection error.
    pub fn incompatible_handle(location: impl Into<String>, source: AdapterError) -> Self {
        Self::Connection {
            kind: ConnectionErrorKind::IncompatibleHandle,
            location: location.into(),
            source: Box::new(source),
        }
    }

    /// Check if the adapter factory could not be prepared.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if the remote handle could not be resolved.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Configuration error kind, if this is a configuration error.
    #[must_use]
    pub const fn configuration_kind(&self) -> Option<ConfigurationErrorKind> {
        match self {
            Self::Configuration { kind, .. } => Some(*kind),
            Self::Connection { .. } => None,
        }
    }

    /// Connection error kind, if this is a connection error.
    #[must_use]
    pub const fn connection_kind(&self) -> Option<ConnectionErrorKind> {
        match self {
            Self::Connection { kind, .. } => Some(*kind),
            Self::Configuration { .. } => None,
        }
    }

    /// Stable label of the error kind.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Configuration { kind, .. } => kind.as_str(),
            Self::Connection { kind, .. } => kind.as_str(),
        }
    }

    /// The naming error behind a `DirectoryUnavailable` failure.
    #[must_use]
    pub fn naming_error(&self) -> Option<&NamingError> {
        match self {
            Self::Connection { source, .. } => source.downcast_ref::<NamingError>(),
            Self::Configuration { .. } => None,
        }
    }
}
