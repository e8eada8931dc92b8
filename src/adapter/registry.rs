//! Ordered adapter registry.

use std::sync::Arc;

use super::{Adapter, Facet, FacetAdapter};
use crate::capability::MacroSource;

/// Fixed-order collection of adapters.
///
/// Built once at start-up and shared read-only afterwards; lookups never mutate
/// it. Registration order is precedence order and is never re-sorted.
#[derive(Clone, Default)]
pub struct AccessorRegistry {
    adapters: Vec<Arc<dyn Adapter>>,
}

impl AccessorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in adapter in [`Facet::DEFAULT_ORDER`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for facet in Facet::DEFAULT_ORDER {
            registry.register(FacetAdapter::new(facet));
        }
        registry
    }

    /// Append an adapter at the lowest precedence.
    pub fn register(&mut self, adapter: impl Adapter + 'static) -> &mut Self {
        self.adapters.push(Arc::new(adapter));
        self
    }

    /// Append an already shared adapter at the lowest precedence.
    pub fn register_shared(&mut self, adapter: Arc<dyn Adapter>) -> &mut Self {
        self.adapters.push(adapter);
        self
    }

    /// Every adapter supporting `source`, in registry order.
    ///
    /// A missing source yields an empty list.
    pub fn get_matching(&self, source: Option<&dyn MacroSource>) -> Vec<&dyn Adapter> {
        let Some(source) = source else {
            return Vec::new();
        };
        self.adapters
            .iter()
            .map(|adapter| adapter.as_ref())
            .filter(|adapter| adapter.supports(source))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Adapter> {
        self.adapters.iter().map(|adapter| adapter.as_ref())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AccessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|adapter| adapter.name())).finish()
    }
}
