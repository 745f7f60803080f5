//! Lazy user and group handle tests.

use idf_model::{Credential, MetaClaim};
use idf_store::{codec, ErrorKind, Permission, DEFAULT_USERNAME_CLAIM};

use crate::common::{new_group, new_user, store_with, username, FakeBackend, GROUP_NAME_CLAIM};

/// Tests that building handles never contacts a backend.
#[tokio::test]
async fn test_handles_are_lazy() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    let (store, _) = store_with(&[&a])?;

    let users = store.list_users(0, 10, None).await?;
    assert_eq!(a.calls(), ["list_user_ids"]);

    a.clear_calls();
    let user = &users[0];
    assert_eq!(user.unique_id(), codec::encode(1, "jdoe"));
    assert!(a.calls().is_empty());

    assert_eq!(user.claims().await?, [username("jdoe")]);
    assert_eq!(a.calls(), ["user_claims"]);
    Ok(())
}

/// Tests user handle operations end to end.
#[tokio::test]
async fn test_user_handle_operations() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    let b = FakeBackend::new(2, "b", 1).shared();
    let (store, _) = store_with(&[&a, &b])?;

    let user = store.add_user(&new_user("jdoe", "secret"), None).await?;
    let admins = store.add_group(&new_group("admins"), None).await?;
    let foreign = store.add_group(&new_group("partners"), Some("b")).await?;

    user.update_groups(&[admins.unique_id().to_string()]).await?;
    assert!(user.is_in_group(admins.unique_id()).await?);
    assert!(!user.is_in_group(foreign.unique_id()).await?);
    assert_eq!(user.groups().await?, [admins.clone()]);

    let err = user
        .update_groups_delta(&[foreign.unique_id().to_string()], &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    user.update_groups_delta(&[], &[admins.unique_id().to_string()])
        .await?;
    assert!(user.groups().await?.is_empty());

    let names = user
        .claims_for(&[MetaClaim::new("dialect", DEFAULT_USERNAME_CLAIM)])
        .await?;
    assert_eq!(names, [username("jdoe")]);

    user.update_credentials(&[Credential::password("rotated")])
        .await?;
    store
        .authenticate(&username("jdoe"), &[Credential::password("rotated")], None)
        .await?;

    user.update_credentials_delta(&[Credential::password("again")], &[])
        .await?;
    store
        .authenticate(&username("jdoe"), &[Credential::password("again")], None)
        .await?;

    user.update_claims_delta(&[username("john")], &[username("jdoe")])
        .await?;
    user.update_claims(&[username("jdoe")]).await?;
    assert_eq!(user.claims().await?, [username("jdoe")]);

    let unique_id = user.unique_id().to_string();
    user.delete().await?;
    let err = store.get_user(&unique_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

/// Tests group handle operations end to end.
#[tokio::test]
async fn test_group_handle_operations() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    let (store, _) = store_with(&[&a])?;

    let users = store
        .add_users(&[new_user("jdoe", "pw"), new_user("asmith", "pw")], None)
        .await?;
    let group = store.add_group(&new_group("admins"), None).await?;
    let ids: Vec<String> = users.iter().map(|u| u.unique_id().to_string()).collect();

    group.update_users(&ids).await?;
    assert_eq!(group.users().await?.len(), 2);
    assert!(group.has_member(&ids[0]).await?);

    group.update_users_delta(&[], &ids[..1]).await?;
    assert!(!group.has_member(&ids[0]).await?);
    assert_eq!(group.users().await?, [users[1].clone()]);

    let names = group
        .claims_for(&[MetaClaim::new("dialect", GROUP_NAME_CLAIM)])
        .await?;
    assert_eq!(names.len(), 1);
    assert_eq!(group.claims().await?, names);

    let renamed = idf_model::Claim::new(GROUP_NAME_CLAIM, "administrators");
    group
        .update_claims_delta(&[renamed.clone()], &names)
        .await?;
    group.update_claims(&[renamed.clone()]).await?;
    assert_eq!(group.claims().await?, [renamed]);

    let unique_id = group.unique_id().to_string();
    group.delete().await?;
    let err = store.get_group(&unique_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

/// Tests that permission checks go to the injected authorization store.
#[tokio::test]
async fn test_authorization_is_injected() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    a.seed_group("admins", "admins");
    let (store, authorization) = store_with(&[&a])?;

    let read = Permission::new("reports", "read");
    let user = store.get_user(&codec::encode(1, "jdoe")).await?;
    let group = store.get_group(&codec::encode(1, "admins")).await?;
    authorization.grant(user.unique_id(), read.clone());

    assert!(user.is_authorized(&read).await?);
    assert!(!user.is_authorized(&Permission::new("reports", "write")).await?);
    assert!(!group.is_authorized(&read).await?);

    let checks = authorization.checks();
    assert_eq!(checks.len(), 3);
    assert_eq!(checks[0], (user.unique_id().to_string(), "a".to_string()));
    assert_eq!(checks[2], (group.unique_id().to_string(), "a".to_string()));
    assert!(a.calls().iter().all(|call| *call != "user_claims"));
    Ok(())
}

/// Tests that handles share the store they came from.
#[tokio::test]
async fn test_handle_equality_and_store() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    let (store, _) = store_with(&[&a])?;

    let by_id = store.get_user(&codec::encode(1, "jdoe")).await?;
    let by_claim = store.get_user_by_claim(&username("jdoe"), None).await?;

    assert_eq!(by_id, by_claim);
    assert_eq!(by_claim.store().primary_backend_name()?, "a");
    Ok(())
}
