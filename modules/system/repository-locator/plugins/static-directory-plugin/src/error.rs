use repository_locator_sdk::NamingError;

/// Errors raised while populating a [`StaticDirectory`](crate::StaticDirectory).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaticDirectoryError {
    #[error("name already bound: {0}")]
    AlreadyBound(String),

    #[error(transparent)]
    Naming(#[from] NamingError),
}

impl StaticDirectoryError {
    #[must_use]
    pub const fn is_already_bound(&self) -> bool {
        matches!(self, Self::AlreadyBound(_))
    }
}
