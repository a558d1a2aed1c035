//! Integration tests for users vertical slice
//!
//! Tests user operations including:
//! - Creation and lookup by id and username
//! - Unique username enforcement
//! - Listing order


use fave_core::types::{NewUser, UserId};
use fave_core::{FaveError, UserStore};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_find_user() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    let user = create_test_user(store, "alice").await;
    assert_eq!(user.username, "alice");

    let found = store.find_user_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.username, "alice");
    assert_eq!(found.created_at.timestamp(), user.created_at.timestamp());
}

#[tokio::test]
async fn test_find_credentials_by_username() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    let user = create_test_user(store, "alice").await;

    let creds = store
        .find_credentials_by_username("alice")
        .await
        .unwrap()
        .expect("credentials should exist");
    assert_eq!(creds.user.id, user.id);
    assert_eq!(creds.password_hash, "hash-of-alice");
}

#[tokio::test]
async fn test_unknown_user_lookups_return_none() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    assert!(store
        .find_credentials_by_username("nobody")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_user_by_id(&UserId::new("missing"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "alice").await;

    let result = store
        .create_user(NewUser {
            username: "alice".to_string(),
            password_hash: "other-hash".to_string(),
        })
        .await;

    assert!(matches!(result, Err(FaveError::Duplicate(_))));

    // The original record is untouched and no second record exists
    let users = store.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    let creds = store
        .find_credentials_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(creds.password_hash, "hash-of-alice");
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "alice").await;
    create_test_user(store, "Alice").await;

    assert_eq!(store.list_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_users_ordered_by_username() {
    let test_db = TestDb::new().await;
    let store = test_db.store();

    create_test_user(store, "carol").await;
    create_test_user(store, "alice").await;
    create_test_user(store, "bob").await;

    let names: Vec<String> = store
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}
