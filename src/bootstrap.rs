// Startup seeder
// Ensures the ADMIN role, the admin account and the demo accounts exist.

use sea_orm::{ActiveValue::NotSet, Set};

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::types::db::{role, user};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_ROLE_NAME: &str = "ADMIN";

// Demo credentials only; the admin password is expected to be changed
// through the frontend after first login.
const ADMIN_DEFAULT_PASSWORD: &str = "123456";
const DEMO_USER_COUNT: usize = 50;

/// Seed the default records, skipping anything that already exists
///
/// Runs on every process start and is idempotent: a second run against the
/// same database creates nothing and modifies nothing.
pub async fn seed_defaults(app_data: &AppData) -> Result<(), InternalError> {
    let db = &app_data.db;

    // Ensure the ADMIN role exists
    let admin_role = match app_data
        .role_store
        .find_by_name_ignore_case(db, ADMIN_ROLE_NAME)
        .await?
    {
        Some(role) => role,
        None => {
            let created = app_data
                .role_store
                .insert(
                    db,
                    role::ActiveModel {
                        id: NotSet,
                        name: Set(ADMIN_ROLE_NAME.to_string()),
                    },
                )
                .await?;
            tracing::info!(role_id = created.id, "ADMIN role created");
            created
        }
    };

    // Ensure the admin account exists
    if !app_data
        .user_store
        .exists_by_username_ignore_case(db, ADMIN_USERNAME)
        .await?
    {
        let password_hash = app_data.hasher.hash(ADMIN_DEFAULT_PASSWORD)?;
        let admin = app_data
            .user_store
            .insert(
                db,
                user::ActiveModel {
                    id: NotSet,
                    username: Set(ADMIN_USERNAME.to_string()),
                    password_hash: Set(password_hash),
                    firstname: Set(Some("Admin".to_string())),
                    lastname: Set(Some("Admin".to_string())),
                    language: Set("en".to_string()),
                },
            )
            .await?;
        app_data
            .user_store
            .replace_roles(db, admin.id, &[admin_role.id])
            .await?;
        tracing::info!(username = ADMIN_USERNAME, "admin user created");
    }

    // Ensure the demo accounts user01..user50 exist, password = username
    let mut created_count = 0;
    for i in 1..=DEMO_USER_COUNT {
        let username = format!("user{:02}", i);
        if app_data
            .user_store
            .exists_by_username_ignore_case(db, &username)
            .await?
        {
            continue;
        }

        let password_hash = app_data.hasher.hash(&username)?;
        let demo_user = app_data
            .user_store
            .insert(
                db,
                user::ActiveModel {
                    id: NotSet,
                    username: Set(username),
                    password_hash: Set(password_hash),
                    firstname: Set(Some("User".to_string())),
                    lastname: Set(Some(format!("{:02}", i))),
                    language: Set("en".to_string()),
                },
            )
            .await?;
        app_data
            .user_store
            .replace_roles(db, demo_user.id, &[admin_role.id])
            .await?;
        created_count += 1;
    }
    if created_count > 0 {
        tracing::info!(count = created_count, "demo users created");
    }

    // Seeding writes bypass the services, so clear the affected caches
    app_data.caches.users.invalidate().await;
    app_data.caches.roles.invalidate().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ColumnTrait, Database, EntityTrait, PaginatorTrait, QueryFilter};
    use std::sync::Arc;

    use crate::types::db::role::Entity as Role;
    use crate::types::db::user::Entity as User;

    async fn setup() -> Arc<AppData> {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        Arc::new(AppData::new(db))
    }

    #[tokio::test]
    async fn test_seed_creates_admin_and_demo_users() {
        let app_data = setup().await;

        seed_defaults(&app_data).await.unwrap();

        let total = User::find().count(&app_data.db).await.unwrap();
        assert_eq!(total, 51);

        let roles = Role::find().all(&app_data.db).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "ADMIN");
    }

    #[tokio::test]
    async fn test_seed_twice_never_duplicates() {
        let app_data = setup().await;

        seed_defaults(&app_data).await.unwrap();
        seed_defaults(&app_data).await.unwrap();

        let admins = User::find()
            .filter(user::Column::Username.eq("admin"))
            .count(&app_data.db)
            .await
            .unwrap();
        assert_eq!(admins, 1);

        let total = User::find().count(&app_data.db).await.unwrap();
        assert_eq!(total, 51);

        let roles = Role::find().count(&app_data.db).await.unwrap();
        assert_eq!(roles, 1);
    }

    #[tokio::test]
    async fn test_seeded_admin_has_role_and_default_password() {
        let app_data = setup().await;

        seed_defaults(&app_data).await.unwrap();

        let admin = User::find()
            .filter(user::Column::Username.eq("admin"))
            .one(&app_data.db)
            .await
            .unwrap()
            .unwrap();

        assert!(app_data.hasher.verify("123456", &admin.password_hash));

        let roles = app_data
            .user_store
            .roles_of_one(&app_data.db, &admin)
            .await
            .unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "ADMIN");
    }

    #[tokio::test]
    async fn test_demo_users_use_username_as_password() {
        let app_data = setup().await;

        seed_defaults(&app_data).await.unwrap();

        let demo = User::find()
            .filter(user::Column::Username.eq("user07"))
            .one(&app_data.db)
            .await
            .unwrap()
            .unwrap();

        assert!(app_data.hasher.verify("user07", &demo.password_hash));
        assert_eq!(demo.firstname.as_deref(), Some("User"));
        assert_eq!(demo.lastname.as_deref(), Some("07"));
    }
}
