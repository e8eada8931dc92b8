use std::time::Duration;

use macromsg::core::{ErrorPolicy, MacroError};
use macromsg::message::MessageCatalog;

use crate::common::TestWorkspace;
use crate::fixtures::{MESSAGES_TOML, MESSAGES_YAML};

#[tokio::test]
async fn test_load_toml_catalog() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    let path = workspace.write("messages.toml", MESSAGES_TOML)?;

    let catalog = MessageCatalog::load(&path, ErrorPolicy::Strict).await?;
    let keys: Vec<&str> = catalog.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, vec!["GRAVE.CREATED", "PLAYER.JOINED", "PLAYER.QUIT"]);

    let created = catalog.get("GRAVE.CREATED").unwrap();
    assert_eq!(created.title.as_deref(), Some("Grave created"));
    assert_eq!(created.repeat_delay, Duration::from_secs(30));
    assert!(!catalog.get("PLAYER.QUIT").unwrap().enabled);
    Ok(())
}

#[tokio::test]
async fn test_load_yaml_catalog() -> anyhow::Result<()> {
    let workspace = TestWorkspace::new()?;
    let path = workspace.write("messages.yml", MESSAGES_YAML)?;

    let catalog = MessageCatalog::load(&path, ErrorPolicy::Strict).await?;
    let keys: Vec<&str> = catalog.keys().map(|key| key.as_str()).collect();
    assert_eq!(keys, vec!["GRAVE.PROTECTED", "PLAYER.JOINED"]);
    Ok(())
}

#[tokio::test]
async fn test_load_errors() {
    let workspace = TestWorkspace::new().unwrap();

    let missing = MessageCatalog::load(&workspace.path("absent.toml"), ErrorPolicy::Lenient).await;
    assert!(missing.is_err());

    let json = workspace.write("messages.json", "{}").unwrap();
    let error = MessageCatalog::load(&json, ErrorPolicy::Lenient).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<MacroError>(),
        Some(MacroError::UnsupportedFormat { .. })
    ));

    let broken = workspace.write("broken.yaml", "messages: [unterminated").unwrap();
    let error = MessageCatalog::load(&broken, ErrorPolicy::Lenient).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<MacroError>(),
        Some(MacroError::CatalogParseError { .. })
    ));
}

#[tokio::test]
async fn test_lenient_load_skips_invalid_keys() {
    let workspace = TestWorkspace::new().unwrap();
    let path = workspace
        .write(
            "messages.toml",
            "[messages.ok]\nbody = \"lowercase key\"\n\n[messages.OK]\nbody = \"kept\"\n",
        )
        .unwrap();

    let catalog = MessageCatalog::load(&path, ErrorPolicy::Lenient).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("OK").unwrap().body, "kept");

    let strict = MessageCatalog::load(&path, ErrorPolicy::Strict).await;
    assert!(strict.is_err());
}
