// Seeded protected records must survive every mutation attempt unchanged.

mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use dcf_admin_backend::bootstrap;
use dcf_admin_backend::errors::AdminError;
use dcf_admin_backend::services::{RoleService, UserService};
use dcf_admin_backend::types::db::role::{self, Entity as Role};
use dcf_admin_backend::types::db::user::{self, Entity as User};
use dcf_admin_backend::types::dto::role::UpdateRoleRequest;
use dcf_admin_backend::types::dto::user::UpdateUserRequest;

fn empty_user_patch() -> UpdateUserRequest {
    UpdateUserRequest {
        username: None,
        password: None,
        firstname: None,
        lastname: None,
        language: None,
        role_id: None,
    }
}

#[tokio::test]
async fn test_seeded_admin_user_cannot_be_edited_or_deleted() {
    let app_data = common::setup_app_data().await;
    bootstrap::seed_defaults(&app_data).await.unwrap();

    let service = UserService::new(app_data.clone());

    let admin = User::find()
        .filter(user::Column::Username.eq("admin"))
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();

    let mut patch = empty_user_patch();
    patch.username = Some("root".to_string());
    patch.password = Some("newpassword".to_string());
    let result = service.update(admin.id, patch).await;
    assert!(matches!(result, Err(AdminError::Protected(_))));

    let result = service.delete(admin.id).await;
    assert!(matches!(result, Err(AdminError::Protected(_))));

    // Byte-for-byte unchanged
    let after = User::find_by_id(admin.id)
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after, admin);
}

#[tokio::test]
async fn test_seeded_admin_role_cannot_be_edited_or_deleted() {
    let app_data = common::setup_app_data().await;
    bootstrap::seed_defaults(&app_data).await.unwrap();

    let service = RoleService::new(app_data.clone());

    let admin_role = Role::find()
        .filter(role::Column::Name.eq("ADMIN"))
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();

    let result = service
        .update(
            admin_role.id,
            UpdateRoleRequest {
                name: Some("SUPERADMIN".to_string()),
                permission_ids: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AdminError::Protected(_))));

    let result = service.delete(admin_role.id).await;
    assert!(matches!(result, Err(AdminError::Protected(_))));

    let after = Role::find_by_id(admin_role.id)
        .one(&app_data.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after, admin_role);
}

#[tokio::test]
async fn test_creating_user_colliding_with_seeded_admin_conflicts() {
    let app_data = common::setup_app_data().await;
    bootstrap::seed_defaults(&app_data).await.unwrap();

    let service = UserService::new(app_data.clone());

    let result = service
        .create(dcf_admin_backend::types::dto::user::CreateUserRequest {
            username: "ADMIN".to_string(),
            password: "whatever".to_string(),
            firstname: None,
            lastname: None,
            language: None,
            role_id: None,
        })
        .await;

    assert!(matches!(result, Err(AdminError::DuplicateUsername { .. })));
}
