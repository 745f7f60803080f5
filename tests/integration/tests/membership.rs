//! Group membership tests, including the cross-backend invariant.

use idf_store::{codec, ErrorKind};

use crate::common::{store_with, FakeBackend};

/// Tests that entities in different backends are never related.
#[tokio::test]
async fn test_membership_across_backends_is_false() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    let b = FakeBackend::new(2, "b", 1).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    b.seed_group("admins", "admins");
    let (store, _) = store_with(&[&a, &b])?;

    let member = store
        .is_user_in_group(&codec::encode(1, "jdoe"), &codec::encode(2, "admins"))
        .await?;

    assert!(!member);
    assert!(a.calls().is_empty());
    assert!(b.calls().is_empty());
    Ok(())
}

/// Tests membership checks within one backend.
#[tokio::test]
async fn test_membership_in_same_backend() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    a.seed_user("asmith", "asmith", "secret");
    a.seed_group("admins", "admins");
    a.seed_membership("jdoe", "admins");
    let (store, _) = store_with(&[&a])?;
    let admins = codec::encode(1, "admins");

    assert!(store.is_user_in_group(&codec::encode(1, "jdoe"), &admins).await?);
    assert!(!store.is_user_in_group(&codec::encode(1, "asmith"), &admins).await?);
    assert_eq!(a.call_count("is_user_in_group"), 2);

    let err = store
        .is_user_in_group(&codec::encode(1, "ghost"), &admins)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

/// Tests that a foreign group id fails before the backend is asked to write.
#[tokio::test]
async fn test_update_groups_rejects_foreign_ids() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    let b = FakeBackend::new(2, "b", 1).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    a.seed_group("staff", "staff");
    b.seed_group("admins", "admins");
    let (store, _) = store_with(&[&a, &b])?;
    let user = codec::encode(1, "jdoe");

    let err = store
        .update_groups_of_user(
            &user,
            &[codec::encode(1, "staff"), codec::encode(2, "admins")],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(a.call_count("update_groups_of_user"), 0);
    assert!(b.calls().is_empty());
    assert!(a.groups_of("jdoe").is_empty());

    let err = store
        .update_groups_of_user_delta(&user, &[], &[codec::encode(2, "admins")])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(a.call_count("update_groups_of_user_delta"), 0);
    Ok(())
}

/// Tests that a foreign user id fails before the backend is asked to write.
#[tokio::test]
async fn test_update_users_rejects_foreign_ids() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    let b = FakeBackend::new(2, "b", 1).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    a.seed_group("admins", "admins");
    b.seed_user("asmith", "asmith", "secret");
    let (store, _) = store_with(&[&a, &b])?;
    let admins = codec::encode(1, "admins");

    let err = store
        .update_users_of_group(
            &admins,
            &[codec::encode(1, "jdoe"), codec::encode(2, "asmith")],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(a.call_count("update_users_of_group"), 0);
    assert!(b.calls().is_empty());
    assert!(a.groups_of("jdoe").is_empty());

    let err = store
        .update_users_of_group_delta(&admins, &[codec::encode(2, "asmith")], &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = store
        .update_users_of_group_delta(&admins, &[], &[codec::encode(2, "asmith")])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(a.call_count("update_users_of_group_delta"), 0);
    assert!(b.calls().is_empty());
    Ok(())
}

/// Tests membership writes from both sides.
#[tokio::test]
async fn test_membership_updates() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    a.seed_user("jdoe", "jdoe", "secret");
    a.seed_user("asmith", "asmith", "secret");
    a.seed_group("admins", "admins");
    a.seed_group("staff", "staff");
    let (store, _) = store_with(&[&a])?;
    let jdoe = codec::encode(1, "jdoe");
    let asmith = codec::encode(1, "asmith");
    let admins = codec::encode(1, "admins");
    let staff = codec::encode(1, "staff");

    store
        .update_groups_of_user(&jdoe, &[admins.clone(), staff.clone()])
        .await?;
    assert_eq!(a.groups_of("jdoe"), ["admins", "staff"]);

    store
        .update_groups_of_user_delta(&jdoe, &[], &[staff.clone()])
        .await?;
    assert_eq!(a.groups_of("jdoe"), ["admins"]);

    store
        .update_users_of_group_delta(&staff, &[asmith.clone()], &[])
        .await?;
    let members: Vec<String> = store
        .users_of_group(&staff)
        .await?
        .iter()
        .map(|u| u.unique_id().to_string())
        .collect();
    assert_eq!(members, [asmith.clone()]);

    store.update_users_of_group(&admins, &[asmith.clone()]).await?;
    let groups = store.groups_of_user(&asmith).await?;
    assert_eq!(groups.len(), 2);
    assert!(store.groups_of_user(&jdoe).await?.is_empty());

    let err = store
        .update_users_of_group(&admins, &[codec::encode(1, "")])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    Ok(())
}

/// Tests group claim updates by unique id.
#[tokio::test]
async fn test_group_claims() -> anyhow::Result<()> {
    let a = FakeBackend::new(1, "a", 0).shared();
    a.seed_group("admins", "admins");
    let (store, _) = store_with(&[&a])?;
    let admins = codec::encode(1, "admins");

    let description = idf_model::Claim::new("urn:example:description", "administrators");
    store
        .update_group_claims_delta(&admins, &[description.clone()], &[])
        .await?;
    assert_eq!(store.group_claims(&admins).await?.len(), 2);

    store
        .update_group_claims(&admins, &[description.clone()])
        .await?;
    assert_eq!(store.group_claims(&admins).await?, [description]);
    Ok(())
}
