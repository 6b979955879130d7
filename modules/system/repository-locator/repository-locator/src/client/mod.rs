//! Built-in client adapter.
//!
//! Wraps a handle holding `Arc<dyn RemoteRepository>` into a local
//! [`Repository`](repository_locator_sdk::Repository) that forwards every call.

mod client_adapter_factory;
mod client_repository;

pub use client_adapter_factory::ClientAdapterFactory;
pub use client_repository::ClientRepository;
