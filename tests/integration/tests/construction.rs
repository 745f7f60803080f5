//! Store construction and configuration tests.

use idf_store::{ErrorKind, StoreConfig};

use crate::common::{store_with, store_with_config, FakeBackend};

/// Tests that the lowest priority backend becomes primary.
#[tokio::test]
async fn test_primary_is_lowest_priority() -> anyhow::Result<()> {
    let secondary = FakeBackend::new(2, "Partners", 10).shared();
    let primary = FakeBackend::new(1, "Employees", 1).shared();
    let (store, _) = store_with(&[&secondary, &primary])?;

    assert_eq!(store.primary_backend_name()?, "Employees");
    assert_eq!(store.backend_names(), ["Employees", "Partners"]);
    Ok(())
}

/// Tests that equal priorities keep both backends.
#[tokio::test]
async fn test_equal_priorities_keep_both() -> anyhow::Result<()> {
    let first = FakeBackend::new(1, "first", 5).shared();
    let second = FakeBackend::new(2, "second", 5).shared();
    let (store, _) = store_with(&[&first, &second])?;

    assert_eq!(store.registry().len(), 2);
    assert_eq!(store.primary_backend_name()?, "first");
    Ok(())
}

/// Tests that disabled backends are left out.
#[tokio::test]
async fn test_disabled_backends_are_skipped() -> anyhow::Result<()> {
    let disabled = FakeBackend::new(1, "legacy", 0).disabled().shared();
    let active = FakeBackend::new(2, "active", 5).shared();
    let (store, _) = store_with(&[&disabled, &active])?;

    assert_eq!(store.primary_backend_name()?, "active");
    assert_eq!(store.backend_names(), ["active"]);
    assert!(!store.registry().contains_id(1));
    Ok(())
}

/// Tests that a store needs at least one enabled backend.
#[tokio::test]
async fn test_no_enabled_backend_is_rejected() {
    let disabled = FakeBackend::new(1, "legacy", 0).disabled().shared();

    let err = store_with(&[&disabled]).unwrap_err();
    let err = err
        .downcast_ref::<idf_store::StoreError>()
        .expect("store error");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Tests that duplicate backend names are rejected regardless of case.
#[tokio::test]
async fn test_duplicate_names_are_rejected() {
    let a = FakeBackend::new(1, "Directory", 0).shared();
    let b = FakeBackend::new(2, "DIRECTORY", 1).shared();

    let err = store_with(&[&a, &b]).unwrap_err();
    let err = err
        .downcast_ref::<idf_store::StoreError>()
        .expect("store error");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Tests that configuration is loaded from TOML and honored.
#[tokio::test]
async fn test_config_from_toml() -> anyhow::Result<()> {
    let config = StoreConfig::from_toml_str(
        r#"
            username_claim_uri = "urn:example:uid"
            require_username_claim = true
        "#,
    )?;
    let backend = FakeBackend::new(1, "primary", 0).shared();
    let (store, _) = store_with_config(config, &[&backend])?;

    assert_eq!(store.config().username_claim_uri, "urn:example:uid");

    let payload = idf_model::NewUser::new().with_claim("urn:example:uid", "jdoe");
    store.add_user(&payload, None).await?;

    let payload = crate::common::new_user("jdoe", "secret");
    let err = store.add_user(&payload, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    Ok(())
}
