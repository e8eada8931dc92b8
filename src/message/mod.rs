//! Message records, catalogs and dispatch.
//!
//! A [`MessageRecord`] is an immutable message definition: body, optional title and
//! subtitle templates, display timings, a repeat delay and an enabled flag. Records
//! come from a [`MessageProvider`], normally a [`MessageCatalog`] loaded from a
//! TOML or YAML file.
//!
//! The [`MessageDispatcher`] turns a record key plus a recipient into a delivered
//! [`FinalMessageRecord`]:
//!
//! 1. look the record up and skip it if it is missing or disabled;
//! 2. skip recipients located in a world that is not enabled;
//! 3. resolve the recipient's identity and skip if the message is cooling down;
//! 4. extract the recipient (under `RECIPIENT`) and every attached macro source,
//!    substitute the three templates and hand the result to a [`MessageSink`];
//! 5. start the cooldown for the recipient.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use macromsg::adapter::AccessorRegistry;
//! use macromsg::cache::CooldownMap;
//! use macromsg::capability::JsonSource;
//! use macromsg::core::{ErrorPolicy, SystemClock};
//! use macromsg::extract::FieldExtractor;
//! use macromsg::message::{MessageCatalog, MessageDispatcher, MessageRecord, WriterSink};
//! use macromsg::templating::MacroContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut catalog = MessageCatalog::new();
//! catalog.insert("WELCOME".parse()?, MessageRecord::new("Welcome, {RECIPIENT}!"));
//!
//! let clock = Arc::new(SystemClock);
//! let dispatcher = MessageDispatcher::new(
//!     Arc::new(catalog),
//!     Arc::new(AccessorRegistry::with_defaults()),
//!     FieldExtractor::new(clock.clone()),
//!     Arc::new(CooldownMap::new(clock)),
//! );
//!
//! let steve = JsonSource::parse(r#"{"name": "Steve", "uuid": "0b2ad3a4-5c7e-4b0a-9c55-3e0d2f5b8a11"}"#, "steve")?;
//! let sink = WriterSink::new(std::io::stdout());
//! dispatcher.send(&steve, "WELCOME", &MacroContext::new(ErrorPolicy::Strict), &sink)?;
//! # Ok(())
//! # }
//! ```

mod catalog;
mod dispatcher;
mod record;
mod sink;


pub use catalog::{CatalogFormat, MessageCatalog, MessageProvider};
pub use dispatcher::{MessageDispatcher, SendOutcome};
pub use record::{FinalMessageRecord, MessageRecord};
pub use sink::{JsonSink, MessageSink, WriterSink};
