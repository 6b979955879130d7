//! Remote handle resolution and adapter bootstrap.

pub mod bootstrap;
pub mod resolver;
