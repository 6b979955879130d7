//! Repository Locator
//!
//! Locates a remote repository through a pluggable naming service and wraps it
//! in a locally constructed adapter, so callers only ever see the local
//! [`Repository`](repository_locator_sdk::Repository) capability.
//!
//! Bootstrap runs in three steps:
//! 1. [`LocatorConfig::partition`] splits the init parameters into the
//!    location, the adapter factory name and the directory environment.
//! 2. [`ComponentRegistry`] constructs the named adapter factory.
//! 3. [`DirectoryResolver`] looks the location up and the factory wraps the
//!    resulting handle.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod config;
pub mod domain;
pub mod publisher;
pub mod registry;

pub use client::{ClientAdapterFactory, ClientRepository};
pub use config::{
    DEFAULT_ADAPTER_FACTORY, InitParameters, LocatorConfig, ParameterSource, default_location,
};
pub use domain::bootstrap::RepositoryBootstrapper;
pub use domain::resolver::DirectoryResolver;
pub use publisher::{DEFAULT_REPOSITORY_ATTRIBUTE, RepositoryContext, RepositoryPublisher};
pub use registry::{
    AdapterFactoryCap, Component, ComponentRegistration, ComponentRegistry,
    ComponentRegistryBuilder, ComponentTag, DirectoryConnectorCap,
};
