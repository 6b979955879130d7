#![allow(dead_code)]

//! Test doubles shared by the integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use repository_locator_sdk::{
    Credentials, DirectoryConnector, DirectoryContext, DirectoryEnvironment, NamingError,
    RemoteError, RemoteHandle, RemoteRepository, SessionInfo,
};

/// Remote repository answering from a fixed descriptor table.
pub struct StubRemoteRepository {
    descriptors: BTreeMap<String, String>,
    offline: bool,
}

impl StubRemoteRepository {
    pub fn new(descriptors: &[(&str, &str)]) -> Self {
        Self {
            descriptors: descriptors
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            offline: false,
        }
    }

    pub fn offline() -> Self {
        Self {
            descriptors: BTreeMap::new(),
            offline: true,
        }
    }

    pub fn handle(self) -> RemoteHandle {
        let repo: Arc<dyn RemoteRepository> = Arc::new(self);
        RemoteHandle::repository(repo)
    }

    fn check_online(&self) -> Result<(), RemoteError> {
        if self.offline {
            return Err(RemoteError::Transport("connection refused".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteRepository for StubRemoteRepository {
    async fn descriptor_keys(&self) -> Result<Vec<String>, RemoteError> {
        self.check_online()?;
        Ok(self.descriptors.keys().cloned().collect())
    }

    async fn descriptor(&self, key: &str) -> Result<Option<String>, RemoteError> {
        self.check_online()?;
        Ok(self.descriptors.get(key).cloned())
    }

    async fn login(
        &self,
        credentials: Option<Credentials>,
        workspace: Option<String>,
    ) -> Result<SessionInfo, RemoteError> {
        self.check_online()?;
        Ok(SessionInfo {
            user_id: credentials.map(|c| c.user_id),
            workspace: workspace.unwrap_or_else(|| "default".to_owned()),
        })
    }
}

/// Connector that records every environment it is given and serves lookups
/// from a fixed binding table.
#[derive(Default)]
pub struct RecordingConnector {
    bindings: HashMap<String, RemoteHandle>,
    connect_error: Option<NamingError>,
    environments: Mutex<Vec<DirectoryEnvironment>>,
    contexts_built: AtomicUsize,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, name: &str, handle: RemoteHandle) -> Self {
        self.bindings.insert(name.to_owned(), handle);
        self
    }

    pub fn failing_connect(mut self, error: NamingError) -> Self {
        self.connect_error = Some(error);
        self
    }

    pub fn environments(&self) -> Vec<DirectoryEnvironment> {
        self.environments.lock().clone()
    }

    pub fn contexts_built(&self) -> usize {
        self.contexts_built.load(Ordering::SeqCst)
    }
}

struct RecordingContext {
    bindings: HashMap<String, RemoteHandle>,
}

#[async_trait]
impl DirectoryContext for RecordingContext {
    async fn lookup(&self, name: &str) -> Result<RemoteHandle, NamingError> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| NamingError::NameNotBound(name.to_owned()))
    }
}

impl DirectoryConnector for RecordingConnector {
    fn connect(
        &self,
        environment: &DirectoryEnvironment,
    ) -> Result<Arc<dyn DirectoryContext>, NamingError> {
        self.environments.lock().push(environment.clone());
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        self.contexts_built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(RecordingContext {
            bindings: self.bindings.clone(),
        }))
    }
}
