// The full-list cache lives in AppData; every service instance built from
// the same AppData must share one authoritative slot per entity family.

mod common;

use dcf_admin_backend::services::{PermissionService, RoleService, UserService};
use dcf_admin_backend::types::dto::permission::CreatePermissionRequest;
use dcf_admin_backend::types::dto::role::CreateRoleRequest;
use dcf_admin_backend::types::dto::user::CreateUserRequest;

fn user_request(username: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: "password123".to_string(),
        firstname: None,
        lastname: None,
        language: None,
        role_id: None,
    }
}

#[tokio::test]
async fn test_write_through_one_instance_invalidates_anothers_cache() {
    let app_data = common::setup_app_data().await;

    let reader = UserService::new(app_data.clone());
    let writer = UserService::new(app_data.clone());

    assert!(reader.list_all().await.unwrap().is_empty());
    assert!(app_data.caches.users.is_populated().await);

    writer.create(user_request("alice")).await.unwrap();

    // The reader must observe the write, not its own stale snapshot
    let listed = reader.list_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username, "alice");
}

#[tokio::test]
async fn test_each_entity_family_has_an_independent_cache_slot() {
    let app_data = common::setup_app_data().await;

    let users = UserService::new(app_data.clone());
    let roles = RoleService::new(app_data.clone());
    let permissions = PermissionService::new(app_data.clone());

    users.list_all().await.unwrap();
    roles.list_all().await.unwrap();
    permissions.list_all().await.unwrap();

    assert!(app_data.caches.users.is_populated().await);
    assert!(app_data.caches.roles.is_populated().await);
    assert!(app_data.caches.permissions.is_populated().await);

    // A role write clears only the roles slot
    roles
        .create(CreateRoleRequest {
            name: "EDITOR".to_string(),
            permission_ids: None,
        })
        .await
        .unwrap();

    assert!(app_data.caches.users.is_populated().await);
    assert!(!app_data.caches.roles.is_populated().await);
    assert!(app_data.caches.permissions.is_populated().await);

    // A permission write clears only the permissions slot
    permissions
        .create(CreatePermissionRequest {
            name: "users:read".to_string(),
        })
        .await
        .unwrap();

    assert!(app_data.caches.users.is_populated().await);
    assert!(!app_data.caches.permissions.is_populated().await);
}

#[tokio::test]
async fn test_paginated_reads_do_not_populate_the_cache() {
    let app_data = common::setup_app_data().await;

    let users = UserService::new(app_data.clone());
    users.create(user_request("alice")).await.unwrap();

    users
        .list_page(Default::default(), None)
        .await
        .unwrap();

    // Paginated reads bypass the full-list cache entirely
    assert!(!app_data.caches.users.is_populated().await);
}
