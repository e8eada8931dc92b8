use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;
use macromsg::adapter::{AccessorRegistry, Facet, FacetAdapter};
use macromsg::cache::CooldownMap;
use macromsg::capability::{JsonSource, Location};
use macromsg::core::{Clock, ErrorPolicy, ManualClock};
use macromsg::extract::FieldExtractor;
use macromsg::message::{MessageCatalog, MessageDispatcher, MessageRecord, SendOutcome, WriterSink};
use macromsg::templating::{MacroContext, substitute};
use macromsg::test_utils::{RecordingSink, TestSource, init_test_logging};

use crate::fixtures::{GRAVE_JSON, STEVE_JSON};

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()))
}

#[test]
fn test_json_sources_to_final_text() {
    init_test_logging(None);
    let grave = JsonSource::parse(GRAVE_JSON, "grave.json").unwrap();
    let mut macros = MacroContext::new(ErrorPolicy::Strict);
    macros.set_macro("GRAVE", Arc::new(grave)).unwrap();

    let registry = AccessorRegistry::with_defaults();
    let extractor = FieldExtractor::new(clock());
    let map = macros.build(&registry, &extractor);

    assert_eq!(map.get("GRAVE"), Some("grave"));
    assert_eq!(map.get("GRAVE.OWNER"), Some("Steve"));
    assert_eq!(map.get("GRAVE.OWNER.UUID"), Some("0f5a2d8e-54c1-4d3b-9a63-3c2b1f7a9e01"));
    assert_eq!(map.get("GRAVE.LOCATION"), Some("overworld [1, 64, 2]"));
    assert_eq!(
        substitute(
            "{GRAVE.OWNER}'s {GRAVE} holds {GRAVE.QUANTITY} items at {GRAVE.LOCATION.X},{GRAVE.LOCATION.Z} {MISSING}",
            &map
        ),
        "Steve's grave holds 12 items at 1,2 {MISSING}"
    );
}

#[test]
fn test_dispatch_through_writer_sink() {
    let mut catalog = MessageCatalog::new();
    catalog.insert(
        "GRAVE.CREATED".parse().unwrap(),
        MessageRecord::new("{RECIPIENT}, your {GRAVE} expires in {GRAVE.EXPIRATION}")
            .with_title("{GRAVE.EXPIRATION.INSTANT}"),
    );

    let clock = clock();
    let dispatcher = MessageDispatcher::new(
        Arc::new(catalog),
        Arc::new(AccessorRegistry::with_defaults()),
        FieldExtractor::new(clock.clone()),
        Arc::new(CooldownMap::new(clock.clone())),
    );

    let grave = TestSource::new()
        .name("grave")
        .expiration(clock.now() + chrono::Duration::minutes(90));
    let mut macros = MacroContext::new(ErrorPolicy::Strict);
    macros.set_macro("GRAVE", Arc::new(grave)).unwrap();

    let recipient = JsonSource::parse(STEVE_JSON, "steve.json").unwrap();
    let sink = WriterSink::new(Vec::new());
    let outcome = dispatcher.send(&recipient, "GRAVE.CREATED", &macros, &sink).unwrap();
    assert!(outcome.is_sent());

    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        output,
        "[GRAVE.CREATED] Steve the Brave, your grave expires in 1 hour, 30 minutes\n\
         [GRAVE.CREATED] title: May 1, 2024, 1:30:00 PM\n"
    );
}

#[test]
fn test_precedence_follows_registry_order() {
    let source = TestSource::new()
        .name("zombie")
        .location(Location::new(Some("nether"), 5.5, 70.0, -0.5))
        .quantity(3);
    let extractor = FieldExtractor::new(clock());

    let defaults = AccessorRegistry::with_defaults();
    let base = "MOB".parse().unwrap();
    assert_eq!(extractor.extract_source(&base, &source, &defaults).get("MOB"), Some("zombie"));

    // Location registered first claims the bare key; sub-keys are unaffected
    let mut custom = AccessorRegistry::new();
    custom
        .register(FacetAdapter::new(Facet::Location))
        .register(FacetAdapter::new(Facet::Name));
    let map = extractor.extract_source(&base, &source, &custom);
    assert_eq!(map.get("MOB"), Some("nether [5, 70, 0]"));
    assert_eq!(map.get("MOB.NAME"), Some("zombie"));
    assert!(map.get("MOB.QUANTITY").is_none());
}

#[test]
fn test_broadcast_with_mixed_outcomes() {
    let mut catalog = MessageCatalog::new();
    catalog.insert(
        "EVENT".parse().unwrap(),
        MessageRecord::new("Hello {RECIPIENT.NAME}").with_repeat_delay(Duration::from_secs(5)),
    );
    let clock = clock();
    let dispatcher = MessageDispatcher::new(
        Arc::new(catalog),
        Arc::new(AccessorRegistry::with_defaults()),
        FieldExtractor::new(clock.clone()),
        Arc::new(CooldownMap::new(clock.clone())),
    )
    .with_enabled_worlds(vec!["overworld".to_string()]);

    let alex = TestSource::new()
        .name("Alex")
        .random_uuid()
        .location(Location::new(Some("overworld"), 0.0, 0.0, 0.0));
    let herobrine = TestSource::new()
        .name("Herobrine")
        .random_uuid()
        .location(Location::new(Some("the_end"), 0.0, 0.0, 0.0));
    let macros = MacroContext::new(ErrorPolicy::Strict);
    let sink = RecordingSink::new();

    let recipients: [&dyn macromsg::capability::MacroSource; 2] = [&alex, &herobrine];
    let outcomes = dispatcher.broadcast(recipients, "EVENT", &macros, &sink).unwrap();
    assert!(outcomes[0].is_sent());
    assert_eq!(outcomes[1], SendOutcome::WorldDisabled);

    let outcomes = dispatcher.broadcast(recipients, "EVENT", &macros, &sink).unwrap();
    assert_eq!(outcomes[0], SendOutcome::Cooling);

    clock.advance(chrono::Duration::seconds(5));
    let outcomes = dispatcher.broadcast(recipients, "EVENT", &macros, &sink).unwrap();
    assert!(outcomes[0].is_sent());
    assert_eq!(sink.messages(), vec!["Hello Alex".to_string(), "Hello Alex".to_string()]);
}
