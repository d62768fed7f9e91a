//! Configuration utilities for the component registry.

use lazy_static::lazy_static;
use semver::Version;

/// Count of components every new storage has room for.
pub const DEFAULT_STORAGE_CAPACITY: usize = 100;

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static! {
    pub static ref ENGINE_VERSION: Version = ENGINE_VERSION_STR
        .parse()
        .expect("package version must follow semver");
}

/// This struct represents configuration of the [`Universe`](crate::Universe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    name: String,
    storage_capacity: usize,
}

impl Config {
    /// Creates new configuration with given name and initial storage capacity.
    pub const fn new(name: String, storage_capacity: usize) -> Self {
        Self {
            name,
            storage_capacity,
        }
    }

    /// Replaces initial capacity of storages created by the universe.
    pub fn with_storage_capacity(mut self, storage_capacity: usize) -> Self {
        self.storage_capacity = storage_capacity;
        self
    }

    /// Name of the universe, used in log messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Count of components every new storage has room for.
    pub fn storage_capacity(&self) -> usize {
        self.storage_capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("universe".to_string(), DEFAULT_STORAGE_CAPACITY)
    }
}
