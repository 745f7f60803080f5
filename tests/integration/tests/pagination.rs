//! Pagination guard tests.

use idf_model::{Claim, MetaClaim};
use idf_store::{ErrorKind, DEFAULT_USERNAME_CLAIM};

use crate::common::{store_with, username, FakeBackend, GROUP_NAME_CLAIM};

fn seeded() -> std::sync::Arc<FakeBackend> {
    let backend = FakeBackend::new(1, "primary", 0).shared();
    for name in ["alice", "bob", "carol", "dave"] {
        backend.seed_user(name, name, "secret");
    }
    backend.seed_group("admins", "admins");
    backend.seed_group("staff", "staff");
    backend
}

/// Tests that a negative offset fails before any backend call.
#[tokio::test]
async fn test_negative_offset_is_invalid() -> anyhow::Result<()> {
    let primary = seeded();
    let (store, _) = store_with(&[&primary])?;

    let err = store.list_users(-1, 10, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = store
        .list_users_by_claim(&username("alice"), -1, 10, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = store.list_groups(-5, 0, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    assert!(primary.calls().is_empty());
    Ok(())
}

/// Tests that a zero length returns nothing without a backend call.
#[tokio::test]
async fn test_zero_length_is_empty() -> anyhow::Result<()> {
    let primary = seeded();
    let (store, _) = store_with(&[&primary])?;

    assert!(store.list_users(0, 0, None).await?.is_empty());
    assert!(store.list_groups(1, 0, None).await?.is_empty());
    assert!(store
        .list_groups_by_meta_claim(&MetaClaim::new("dialect", GROUP_NAME_CLAIM), "*", 0, 0, None)
        .await?
        .is_empty());

    assert!(primary.calls().is_empty());
    Ok(())
}

/// Tests that the window is checked before the backend name.
#[tokio::test]
async fn test_window_checked_before_backend_name() -> anyhow::Result<()> {
    let primary = seeded();
    let (store, _) = store_with(&[&primary])?;

    assert!(store.list_users(0, 0, Some("unknown")).await?.is_empty());
    assert!(store.list_groups(0, 0, Some("nope")).await?.is_empty());
    assert!(store
        .list_users_by_claim(&username("alice"), 3, 0, Some("unknown"))
        .await?
        .is_empty());

    let err = store.list_users(-1, 10, Some("unknown")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains("offset"));

    let err = store.list_groups(0, 10, Some("nope")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    assert!(primary.calls().is_empty());
    Ok(())
}

/// Tests bounded and unbounded windows.
#[tokio::test]
async fn test_windows() -> anyhow::Result<()> {
    let primary = seeded();
    let (store, _) = store_with(&[&primary])?;

    let users = store.list_users(1, 2, None).await?;
    let names: Vec<_> = users.iter().map(|u| u.unique_id().to_string()).collect();
    assert_eq!(
        names,
        [
            idf_store::codec::encode(1, "bob"),
            idf_store::codec::encode(1, "carol")
        ]
    );

    assert_eq!(store.list_users(2, -1, None).await?.len(), 2);
    assert_eq!(store.list_groups(0, 10, None).await?.len(), 2);
    Ok(())
}

/// Tests claim and pattern filtered listings.
#[tokio::test]
async fn test_filtered_listings() -> anyhow::Result<()> {
    let primary = seeded();
    let (store, _) = store_with(&[&primary])?;

    let users = store
        .list_users_by_claim(&username("carol"), 0, 10, None)
        .await?;
    assert_eq!(users.len(), 1);

    let users = store
        .list_users_by_meta_claim(
            &MetaClaim::new("dialect", DEFAULT_USERNAME_CLAIM),
            "a*",
            0,
            -1,
            Some("primary"),
        )
        .await?;
    // alice, carol, dave
    assert_eq!(users.len(), 3);

    let groups = store
        .list_groups_by_claim(&Claim::new(GROUP_NAME_CLAIM, "staff"), 0, 10, None)
        .await?;
    assert_eq!(groups.len(), 1);
    Ok(())
}
