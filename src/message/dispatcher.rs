//! Message dispatch: lookup, filtering, substitution, delivery and cooldown.

use std::sync::Arc;

use super::{FinalMessageRecord, MessageProvider, MessageSink};
use crate::adapter::AccessorRegistry;
use crate::cache::{CooldownKey, CooldownMap};
use crate::capability::MacroSource;
use crate::constants::RECIPIENT_BASE_KEY;
use crate::core::{ErrorPolicy, MacroError};
use crate::extract::{FieldExtractor, MacroStringMap};
use crate::key::{Macro, MacroKey, RecordKey, ValidKey};
use crate::templating::{MacroContext, substitute};

/// What happened to one send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was delivered.
    Sent(FinalMessageRecord),
    /// No record exists for the key.
    NotFound,
    /// The record is disabled.
    Disabled,
    /// The recipient is in a world where messages are turned off.
    WorldDisabled,
    /// The same message was delivered to the recipient within its repeat delay.
    Cooling,
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// The delivered message, if any.
    pub fn sent(&self) -> Option<&FinalMessageRecord> {
        match self {
            Self::Sent(message) => Some(message),
            _ => None,
        }
    }
}

/// Builds and delivers messages for recipients.
///
/// The dispatcher owns no mutable state of its own; the shared [`CooldownMap`]
/// is the only thing that changes between sends.
pub struct MessageDispatcher {
    provider: Arc<dyn MessageProvider>,
    registry: Arc<AccessorRegistry>,
    extractor: FieldExtractor,
    cooldowns: Arc<CooldownMap>,
    policy: ErrorPolicy,
    enabled_worlds: Vec<String>,
}

impl MessageDispatcher {
    pub fn new(
        provider: Arc<dyn MessageProvider>,
        registry: Arc<AccessorRegistry>,
        extractor: FieldExtractor,
        cooldowns: Arc<CooldownMap>,
    ) -> Self {
        Self {
            provider,
            registry,
            extractor,
            cooldowns,
            policy: ErrorPolicy::default(),
            enabled_worlds: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restrict delivery to recipients located in one of `worlds`. An empty list
    /// allows every world.
    pub fn with_enabled_worlds(mut self, worlds: Vec<String>) -> Self {
        self.enabled_worlds = worlds;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn cooldowns(&self) -> &Arc<CooldownMap> {
        &self.cooldowns
    }

    /// Build the macro map for `recipient`: the recipient under `RECIPIENT`
    /// first, then every source in `macros`.
    pub fn macros_for(&self, recipient: &dyn MacroSource, macros: &MacroContext) -> MacroStringMap {
        let mut map = MacroStringMap::new();
        if let Some(base) = recipient_key() {
            self.extractor.extract_source_into(&mut map, &base, recipient, &self.registry);
        }
        macros.build_into(&mut map, &self.registry, &self.extractor);
        map
    }

    /// Send the message stored under `key` to `recipient`.
    ///
    /// Absence (unknown or disabled record, disabled world, active cooldown) is
    /// reported through [`SendOutcome`]. An invalid key or a recipient without an
    /// identity goes through the error policy; a failing sink is always an error
    /// and leaves no cooldown behind.
    pub fn send(
        &self,
        recipient: &dyn MacroSource,
        key: impl Into<RecordKey>,
        macros: &MacroContext,
        sink: &dyn MessageSink,
    ) -> Result<SendOutcome, MacroError> {
        let Some(key) = key.into().require(self.policy)? else {
            return Ok(SendOutcome::NotFound);
        };

        let Some(record) = self.provider.get(&key) else {
            tracing::debug!("No message record for {key}");
            return Ok(SendOutcome::NotFound);
        };
        if !record.enabled {
            tracing::debug!("Message {key} is disabled");
            return Ok(SendOutcome::Disabled);
        }
        if !self.world_enabled(recipient) {
            tracing::debug!("Message {key} suppressed: recipient world is not enabled");
            return Ok(SendOutcome::WorldDisabled);
        }

        let identity = match recipient.as_identifiable() {
            Some(identifiable) => Some(identifiable.uuid()),
            None => self.policy.handle(
                MacroError::MissingIdentity {
                    context: format!("sending {key}"),
                },
                None,
            )?,
        };

        if let Some(id) = identity {
            if !self.cooldowns.not_cooling(&CooldownKey::new(id, key.clone())) {
                tracing::debug!("Message {key} is cooling down for {id}");
                return Ok(SendOutcome::Cooling);
            }
        }

        let map = self.macros_for(recipient, macros);
        let message = substitute(&record.body, &map);
        let title = record.title.as_deref().map(|title| substitute(title, &map));
        let subtitle = record.subtitle.as_deref().map(|subtitle| substitute(subtitle, &map));
        let built = FinalMessageRecord::new(key, record, message, title, subtitle);

        // claimed before delivery: of several concurrent sends only one wins
        let claim = match identity {
            Some(id) => match self.cooldowns.claim(id, &built) {
                Some(claim) => Some(claim),
                None => {
                    tracing::debug!("Message {} was claimed concurrently for {id}", built.key());
                    return Ok(SendOutcome::Cooling);
                }
            },
            None => None,
        };

        if let Err(error) = sink.deliver(recipient, &built) {
            if let Some(claim) = claim {
                self.cooldowns.release(claim);
            }
            return Err(error);
        }
        tracing::debug!("Delivered {}", built.key());

        Ok(SendOutcome::Sent(built))
    }

    /// Send the same message to each recipient in turn.
    pub fn broadcast<'a>(
        &self,
        recipients: impl IntoIterator<Item = &'a dyn MacroSource>,
        key: impl Into<RecordKey>,
        macros: &MacroContext,
        sink: &dyn MessageSink,
    ) -> Result<Vec<SendOutcome>, MacroError> {
        let key = key.into();
        recipients
            .into_iter()
            .map(|recipient| self.send(recipient, key.clone(), macros, sink))
            .collect()
    }

    fn world_enabled(&self, recipient: &dyn MacroSource) -> bool {
        if self.enabled_worlds.is_empty() {
            return true;
        }
        let Some(locatable) = recipient.as_locatable() else {
            return true;
        };
        match locatable.location().world {
            Some(world) => self.enabled_worlds.iter().any(|enabled| *enabled == world),
            None => true,
        }
    }
}

fn recipient_key() -> Option<ValidKey<Macro>> {
    MacroKey::parse(RECIPIENT_BASE_KEY).into_valid().ok()
}

impl std::fmt::Debug for MessageDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDispatcher")
            .field("registry", &self.registry)
            .field("extractor", &self.extractor)
            .field("cooldowns", &self.cooldowns)
            .field("policy", &self.policy)
            .field("enabled_worlds", &self.enabled_worlds)
            .finish_non_exhaustive()
    }
}
