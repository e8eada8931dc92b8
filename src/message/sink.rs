//! Outbound delivery of substituted messages.

use std::io::Write;
use std::sync::Mutex;

use super::FinalMessageRecord;
use crate::capability::MacroSource;
use crate::core::MacroError;

/// Delivers finished messages to a recipient.
pub trait MessageSink: Send + Sync {
    fn deliver(
        &self,
        recipient: &dyn MacroSource,
        message: &FinalMessageRecord,
    ) -> Result<(), MacroError>;
}

/// Writes each message to an [`io::Write`](std::io::Write), one field per line:
///
/// ```text
/// [GRAVE.CREATED] Your grave was created at world [1, 64, 2]
/// [GRAVE.CREATED] title: Grave created
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_all(&self, message: &FinalMessageRecord) -> std::io::Result<()> {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let key = message.key();
        writeln!(writer, "[{key}] {}", message.message())?;
        if let Some(title) = message.title() {
            writeln!(writer, "[{key}] title: {title}")?;
        }
        if let Some(subtitle) = message.subtitle() {
            writeln!(writer, "[{key}] subtitle: {subtitle}")?;
        }
        writer.flush()
    }
}

impl<W: Write + Send> MessageSink for WriterSink<W> {
    fn deliver(
        &self,
        _recipient: &dyn MacroSource,
        message: &FinalMessageRecord,
    ) -> Result<(), MacroError> {
        self.write_all(message).map_err(|e| MacroError::DeliveryFailed {
            key: message.key().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Writes each message as one line of JSON:
///
/// ```text
/// {"key":"GRAVE.CREATED","message":"Your grave was created at world [1, 64, 2]","title":"Grave created"}
/// ```
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> MessageSink for JsonSink<W> {
    fn deliver(
        &self,
        _recipient: &dyn MacroSource,
        message: &FinalMessageRecord,
    ) -> Result<(), MacroError> {
        let failed = |reason: String| MacroError::DeliveryFailed {
            key: message.key().to_string(),
            reason,
        };
        let line = serde_json::to_string(message).map_err(|e| failed(e.to_string()))?;
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(writer, "{line}").and_then(|()| writer.flush()).map_err(|e| failed(e.to_string()))
    }
}
