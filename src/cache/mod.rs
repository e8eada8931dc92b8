//! Cooldown tracking for repeated messages
//!
//! A message record with a non-zero repeat delay must not be delivered to the same
//! recipient again until the delay has passed. The [`CooldownMap`] stores, per
//! (recipient, message) pair, the instant at which the pair stops cooling down.
//!
//! # State Machine
//!
//! Each pair is either absent or cooling:
//!
//! ```text
//! absent --put_expiration--> cooling --(expiration <= now)--> absent
//! ```
//!
//! There is no intermediate state. An entry whose expiration is at or before the
//! current instant counts as absent everywhere: [`CooldownMap::not_cooling`] drops
//! it lazily and [`CooldownMap::remove_expired`] sweeps it out.
//!
//! # Concurrency
//!
//! The map is shared between every dispatch and the background sweeper. It is
//! backed by a [`DashMap`]; the "first cooldown wins" insert goes through the
//! entry API so that two near-simultaneous sends to the same recipient cannot both
//! believe they were first. The dispatcher goes one step further and
//! [`claims`](CooldownMap::claim) the cooldown before delivering, releasing it
//! again if delivery fails.
//!
//! # Persistence
//!
//! Entries live in memory only.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::Clock;
use crate::key::{Record, ValidKey};
use crate::message::FinalMessageRecord;

/// Identifies one message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    /// Stable identity of the recipient.
    pub recipient: Uuid,
    /// Key of the message record.
    pub message: ValidKey<Record>,
}

impl CooldownKey {
    pub fn new(recipient: Uuid, message: ValidKey<Record>) -> Self {
        Self {
            recipient,
            message,
        }
    }
}

/// A cooldown started by [`CooldownMap::claim`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownClaim {
    key: CooldownKey,
    /// `None` for messages without a repeat delay.
    expiration: Option<DateTime<Utc>>,
}

impl CooldownClaim {
    pub fn key(&self) -> &CooldownKey {
        &self.key
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }
}

/// Concurrent map from [`CooldownKey`] to the instant its cooldown ends.
pub struct CooldownMap {
    entries: DashMap<CooldownKey, DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl CooldownMap {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Start the cooldown of `record` for `recipient`.
    ///
    /// Inserts `now + repeat_delay` if the delay is non-zero and no entry exists
    /// for the pair yet; an existing entry is never overwritten, even a stale one
    /// that has not been swept. Returns `true` if an entry was inserted.
    pub fn put_expiration(&self, recipient: Uuid, record: &FinalMessageRecord) -> bool {
        let delay = record.repeat_delay();
        if delay.is_zero() {
            return false;
        }

        let key = CooldownKey::new(recipient, record.key().clone());
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                tracing::trace!(
                    "Cooldown for {} / {} already set until {}",
                    entry.key().recipient,
                    entry.key().message,
                    entry.get()
                );
                false
            }
            Entry::Vacant(entry) => {
                let expiration = expiration_after(self.clock.now(), delay);
                tracing::debug!(
                    "Cooling {} for {} until {expiration}",
                    entry.key().message,
                    entry.key().recipient
                );
                entry.insert(expiration);
                true
            }
        }
    }

    /// Atomically start the cooldown of `record` for `recipient` unless one is live.
    ///
    /// Check and insert happen under one entry lock, and a stale entry is replaced
    /// in the same operation. Returns `None` while the pair is cooling. A zero
    /// repeat delay always succeeds without storing anything.
    pub fn claim(&self, recipient: Uuid, record: &FinalMessageRecord) -> Option<CooldownClaim> {
        let key = CooldownKey::new(recipient, record.key().clone());
        let delay = record.repeat_delay();
        if delay.is_zero() {
            return Some(CooldownClaim {
                key,
                expiration: None,
            });
        }

        let now = self.clock.now();
        let expiration = expiration_after(now, delay);
        match self.entries.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() > now {
                    return None;
                }
                entry.insert(expiration);
            }
            Entry::Vacant(entry) => {
                entry.insert(expiration);
            }
        }
        tracing::debug!("Cooling {} for {} until {expiration}", key.message, key.recipient);
        Some(CooldownClaim {
            key,
            expiration: Some(expiration),
        })
    }

    /// Give back a claim whose delivery did not happen.
    ///
    /// The entry is removed only if it still holds the claimed expiration.
    pub fn release(&self, claim: CooldownClaim) {
        let Some(claimed) = claim.expiration else {
            return;
        };
        if self.entries.remove_if(&claim.key, |_, expiration| *expiration == claimed).is_some() {
            tracing::debug!("Released cooldown of {} for {}", claim.key.message, claim.key.recipient);
        }
    }

    /// `true` if there is no live cooldown for `key`.
    ///
    /// A stale entry found here is removed on the spot.
    pub fn not_cooling(&self, key: &CooldownKey) -> bool {
        let now = self.clock.now();
        let Some(expiration) = self.entries.get(key).map(|entry| *entry.value()) else {
            return true;
        };
        if expiration > now {
            return false;
        }
        self.entries.remove_if(key, |_, expiration| *expiration <= now);
        true
    }

    /// The stored expiration for `key`, stale or not.
    pub fn expiration(&self, key: &CooldownKey) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| *entry.value())
    }

    /// Remove every entry whose expiration is at or before now. Returns the number
    /// of entries removed.
    pub fn remove_expired(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.entries.retain(|_, expiration| {
            let live = *expiration > now;
            if !live {
                removed += 1;
            }
            live
        });
        if removed > 0 {
            tracing::info!("Removed {removed} expired cooldown(s)");
        }
        removed
    }

    /// Number of stored entries, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run [`remove_expired`](Self::remove_expired) every `period` on the tokio
    /// runtime. Abort the returned handle to stop sweeping.
    pub fn spawn_sweeper(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let removed = self.remove_expired();
                tracing::trace!("Cooldown sweep removed {removed} entries, {} left", self.len());
            }
        })
    }
}

impl std::fmt::Debug for CooldownMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownMap").field("entries", &self.entries.len()).finish_non_exhaustive()
    }
}

fn expiration_after(now: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(delay)
        .ok()
        .and_then(|delay| now.checked_add_signed(delay))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
