//! Tests for shared models

use std::sync::Arc;

use async_trait::async_trait;
use repository_locator_sdk::{
    ADAPTER_FACTORY_CLASS_KEY, Credentials, DirectoryEnvironment, LOCATION_KEY,
    REPOSITORY_ATTRIBUTE_KEY, RemoteError, RemoteHandle, RemoteRepository, SessionInfo,
    is_reserved_key,
};

struct NullRepository;

#[async_trait]
impl RemoteRepository for NullRepository {
    async fn descriptor_keys(&self) -> Result<Vec<String>, RemoteError> {
        Ok(vec![])
    }

    async fn descriptor(&self, _key: &str) -> Result<Option<String>, RemoteError> {
        Ok(None)
    }

    async fn login(
        &self,
        _credentials: Option<Credentials>,
        _workspace: Option<String>,
    ) -> Result<SessionInfo, RemoteError> {
        Err(RemoteError::Rejected("read-only".to_owned()))
    }
}

#[test]
fn test_reserved_keys() {
    assert!(is_reserved_key(REPOSITORY_ATTRIBUTE_KEY));
    assert!(is_reserved_key(ADAPTER_FACTORY_CLASS_KEY));
    assert!(is_reserved_key(LOCATION_KEY));
    assert!(!is_reserved_key("location"));
    assert!(!is_reserved_key("env.timeout"));
}

#[test]
fn test_environment_rejects_reserved_keys() {
    let mut env = DirectoryEnvironment::new();
    assert!(env.insert("env.timeout", "30"));
    assert!(!env.insert(LOCATION_KEY, "svc/Remote"));
    assert!(!env.insert(ADAPTER_FACTORY_CLASS_KEY, "DefaultFactory"));

    assert_eq!(env.len(), 1);
    assert_eq!(env.get("env.timeout"), Some("30"));
    assert!(!env.contains_key(LOCATION_KEY));
}

#[test]
fn test_environment_from_iter_filters_reserved_keys() {
    let env: DirectoryEnvironment = [
        ("b", "2"),
        (REPOSITORY_ATTRIBUTE_KEY, "repo"),
        ("a", "1"),
    ]
    .into_iter()
    .collect();

    assert_eq!(env.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_remote_handle_downcast() {
    let repo: Arc<dyn RemoteRepository> = Arc::new(NullRepository);
    let handle = RemoteHandle::repository(repo);

    assert!(handle.downcast_ref::<Arc<dyn RemoteRepository>>().is_some());
    assert!(handle.downcast_ref::<String>().is_none());
    assert!(handle.type_name().contains("RemoteRepository"));
}

#[test]
fn test_remote_handle_debug_shows_type() {
    let handle = RemoteHandle::new(42_u32);
    let debug = format!("{handle:?}");
    assert!(debug.contains("u32"));
}

#[test]
fn test_credentials_debug_redacts_password() {
    let creds = Credentials::new("admin", "s3cret");
    let debug = format!("{creds:?}");
    assert!(debug.contains("admin"));
    assert!(!debug.contains("s3cret"));
}
