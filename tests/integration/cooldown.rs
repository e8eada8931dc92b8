use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use macromsg::adapter::AccessorRegistry;
use macromsg::cache::{CooldownKey, CooldownMap};
use macromsg::core::{Clock, ErrorPolicy, ManualClock, SystemClock};
use macromsg::extract::FieldExtractor;
use macromsg::message::{FinalMessageRecord, MessageCatalog, MessageDispatcher, MessageRecord};
use macromsg::templating::MacroContext;
use macromsg::test_utils::{RecordingSink, TestSource};
use uuid::Uuid;

fn message(key: &str, delay: Duration) -> FinalMessageRecord {
    FinalMessageRecord::new(
        key.parse().unwrap(),
        Arc::new(MessageRecord::new("x").with_repeat_delay(delay)),
        "x".to_string(),
        None,
        None,
    )
}

#[test]
fn test_concurrent_inserts_have_one_winner() {
    let clock = Arc::new(ManualClock::at_epoch());
    let map = Arc::new(CooldownMap::new(clock.clone()));
    let recipient = Uuid::new_v4();
    let winners = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for i in 0..16 {
            let map = &map;
            let winners = &winners;
            scope.spawn(move || {
                // different delays so a lost race would be visible in the stored expiration
                let record = message("RACE", Duration::from_secs(10 + i));
                if map.put_expiration(recipient, &record) {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert_eq!(map.len(), 1);

    let key = CooldownKey::new(recipient, "RACE".parse().unwrap());
    let expiration = map.expiration(&key).unwrap();
    let delay = (expiration - clock.now()).num_seconds();
    assert!((10..26).contains(&delay));
    assert!(!map.not_cooling(&key));
}

#[test]
fn test_concurrent_dispatch_delivers_once_per_recipient() {
    let mut catalog = MessageCatalog::new();
    catalog.insert(
        "GRAVE.CREATED".parse().unwrap(),
        MessageRecord::new("Grave for {RECIPIENT}").with_repeat_delay(Duration::from_secs(30)),
    );
    let clock = Arc::new(SystemClock);
    let dispatcher = MessageDispatcher::new(
        Arc::new(catalog),
        Arc::new(AccessorRegistry::with_defaults()),
        FieldExtractor::new(clock.clone()),
        Arc::new(CooldownMap::new(clock)),
    );
    let steve = TestSource::new().name("Steve").random_uuid();
    let alex = TestSource::new().name("Alex").random_uuid();
    let macros = MacroContext::new(ErrorPolicy::Strict);
    let sink = RecordingSink::slow(Duration::from_millis(50));
    let sent = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for i in 0..8 {
            let recipient = if i % 2 == 0 { &steve } else { &alex };
            let (dispatcher, macros, sink, sent) = (&dispatcher, &macros, &sink, &sent);
            scope.spawn(move || {
                let outcome = dispatcher.send(recipient, "GRAVE.CREATED", macros, sink).unwrap();
                if outcome.is_sent() {
                    sent.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(sent.load(Ordering::SeqCst), 2);
    let mut messages = sink.messages();
    messages.sort();
    assert_eq!(messages, vec!["Grave for Alex".to_string(), "Grave for Steve".to_string()]);
}

#[test]
fn test_concurrent_distinct_pairs_are_independent() {
    let map = Arc::new(CooldownMap::new(Arc::new(ManualClock::at_epoch())));
    let recipients: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();

    std::thread::scope(|scope| {
        for recipient in &recipients {
            let map = &map;
            scope.spawn(move || {
                for key in ["A", "B", "C"] {
                    assert!(map.put_expiration(*recipient, &message(key, Duration::from_secs(5))));
                }
            });
        }
    });

    assert_eq!(map.len(), 24);
}

#[test]
fn test_expiry_boundary_and_sweep() {
    let clock = Arc::new(ManualClock::at_epoch());
    let map = CooldownMap::new(clock.clone());
    let recipient = Uuid::new_v4();
    map.put_expiration(recipient, &message("SHORT", Duration::from_secs(1)));
    map.put_expiration(recipient, &message("LONG", Duration::from_secs(60)));

    let short = CooldownKey::new(recipient, "SHORT".parse().unwrap());
    let long = CooldownKey::new(recipient, "LONG".parse().unwrap());
    assert!(!map.not_cooling(&short));

    // expiration equal to now no longer cools
    clock.advance(chrono::Duration::seconds(1));
    assert_eq!(map.remove_expired(), 1);
    assert!(map.not_cooling(&short));
    assert!(!map.not_cooling(&long));
    assert_eq!(map.len(), 1);
}

#[tokio::test]
async fn test_sweeper_runs_in_background() {
    let map = Arc::new(CooldownMap::new(Arc::new(SystemClock)));
    map.put_expiration(Uuid::new_v4(), &message("BRIEF", Duration::from_millis(20)));
    map.put_expiration(Uuid::new_v4(), &message("KEPT", Duration::from_secs(3600)));

    let handle = map.clone().spawn_sweeper(Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    assert_eq!(map.len(), 1);
}
