//! Ordered macro sources attached to one message.

use std::sync::Arc;

use super::MacroStringMap;
use crate::adapter::AccessorRegistry;
use crate::capability::MacroSource;
use crate::core::{ErrorPolicy, MacroError};
use crate::extract::FieldExtractor;
use crate::key::{Macro, MacroKey, ValidKey};

/// The (base key, object) pairs a caller attaches before substitution.
///
/// Order matters only for the resulting map's iteration order; every source has
/// its own base key, so sources never compete for the same entries.
#[derive(Clone, Default)]
pub struct MacroContext {
    sources: Vec<(ValidKey<Macro>, Arc<dyn MacroSource>)>,
    policy: ErrorPolicy,
}

impl MacroContext {
    /// An empty context reporting invalid keys through `policy`.
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            sources: Vec::new(),
            policy,
        }
    }

    /// Attach `source` under `key`.
    ///
    /// Re-using a base key replaces the earlier source in place. An invalid key is
    /// an error under [`ErrorPolicy::Strict`] and is skipped otherwise.
    pub fn set_macro(
        &mut self,
        key: impl Into<MacroKey>,
        source: Arc<dyn MacroSource>,
    ) -> Result<&mut Self, MacroError> {
        let Some(key) = key.into().require(self.policy)? else {
            return Ok(self);
        };

        match self.sources.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = source,
            None => self.sources.push((key, source)),
        }
        Ok(self)
    }

    /// The source attached under `key`.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn MacroSource>> {
        self.sources.iter().find(|(existing, _)| existing.as_str() == key).map(|(_, source)| source)
    }

    /// Attached base keys, in attachment order.
    pub fn keys(&self) -> impl Iterator<Item = &ValidKey<Macro>> {
        self.sources.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Extract every attached source into a fresh map.
    pub fn build(&self, registry: &AccessorRegistry, extractor: &FieldExtractor) -> MacroStringMap {
        let mut map = MacroStringMap::new();
        self.build_into(&mut map, registry, extractor);
        map
    }

    /// Extract every attached source into `map`, after whatever it already holds.
    pub fn build_into(
        &self,
        map: &mut MacroStringMap,
        registry: &AccessorRegistry,
        extractor: &FieldExtractor,
    ) {
        for (key, source) in &self.sources {
            extractor.extract_source_into(map, key, source.as_ref(), registry);
        }
    }
}

impl std::fmt::Debug for MacroContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroContext")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}
