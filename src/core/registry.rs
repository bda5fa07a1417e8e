//! Static service registry
//!
//! Read-only at request time; built once from configuration at startup.

use crate::config::ServiceDescriptor;
use std::collections::HashMap;

/// Table of backend services, keyed by name
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceDescriptor>,
}

impl ServiceRegistry {
    /// Build the registry from configured descriptors
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        let services = services
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Self { services }
    }

    /// Look up a service by name
    pub fn get(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.get(name)
    }

    /// Iterate over all registered services
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.values()
    }

    /// Sorted service names, for stable introspection output
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
