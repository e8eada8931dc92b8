//! A sink that records deliveries instead of sending them.

use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use crate::capability::MacroSource;
use crate::core::MacroError;
use crate::message::{FinalMessageRecord, MessageSink};

/// One recorded delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Identity of the recipient, when it had one.
    pub recipient: Option<Uuid>,
    pub message: FinalMessageRecord,
}

/// Keeps every delivered message in order. Optionally fails every delivery, or
/// blocks for a while before recording it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<Delivery>>,
    fail_with: Option<String>,
    latency: Option<Duration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// A sink that sleeps for `latency` in every delivery.
    pub fn slow(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Snapshot of the deliveries so far.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// The substituted bodies delivered so far.
    pub fn messages(&self) -> Vec<String> {
        self.deliveries().into_iter().map(|d| d.message.message().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().map(|d| d.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageSink for RecordingSink {
    fn deliver(
        &self,
        recipient: &dyn MacroSource,
        message: &FinalMessageRecord,
    ) -> Result<(), MacroError> {
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        if let Some(reason) = &self.fail_with {
            return Err(MacroError::DeliveryFailed {
                key: message.key().to_string(),
                reason: reason.clone(),
            });
        }
        let delivery = Delivery {
            recipient: recipient.as_identifiable().map(|id| id.uuid()),
            message: message.clone(),
        };
        if let Ok(mut deliveries) = self.deliveries.lock() {
            deliveries.push(delivery);
        }
        Ok(())
    }
}
