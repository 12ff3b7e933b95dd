use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};

use crate::app_data::AppData;
use crate::errors::{AdminError, InternalError};
use crate::services::ListCaches;
use crate::stores::{PermissionStore, RoleStore};
use crate::types::db::role;
use crate::types::dto::common::PageResponse;
use crate::types::dto::role::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use crate::types::internal::PageRequest;

/// Name of the protected built-in role, matched case-insensitively.
pub const PROTECTED_ROLE_NAME: &str = "ADMIN";

/// Business rules around role records
///
/// Enforces the protected-ADMIN guard on mutation, resolves permission id
/// sets permissively (ids that do not resolve are dropped, not rejected),
/// and keeps the shared full-list cache coherent across writes.
pub struct RoleService {
    db: DatabaseConnection,
    role_store: Arc<RoleStore>,
    permission_store: Arc<PermissionStore>,
    caches: Arc<ListCaches>,
}

impl RoleService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            role_store: app_data.role_store.clone(),
            permission_store: app_data.permission_store.clone(),
            caches: app_data.caches.clone(),
        }
    }

    /// Full role collection, served from the cache when populated
    pub async fn list_all(&self) -> Result<Vec<RoleResponse>, AdminError> {
        self.caches.roles.get_or_load(self.load_all()).await
    }

    async fn load_all(&self) -> Result<Vec<RoleResponse>, AdminError> {
        let roles = self.role_store.find_all(&self.db).await?;
        Ok(self.assemble(&self.db, roles).await?)
    }

    /// One page of roles; always bypasses the cache
    pub async fn list_page(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<PageResponse<RoleResponse>, AdminError> {
        let (rows, total_elements, total_pages) =
            self.role_store.find_page(&self.db, page, search).await?;
        let content = self.assemble(&self.db, rows).await?;

        Ok(PageResponse {
            content,
            number: page.page,
            size: page.size,
            total_elements,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<RoleResponse, AdminError> {
        let role = self
            .role_store
            .find_by_id(&self.db, id)
            .await?
            .ok_or(AdminError::not_found("Role", id))?;

        Ok(self.assemble_one(&self.db, role).await?)
    }

    /// Create a role and attach whichever of the given permission ids resolve
    pub async fn create(&self, req: CreateRoleRequest) -> Result<RoleResponse, AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let model = role::ActiveModel {
            id: NotSet,
            name: Set(req.name),
        };
        let created = self.role_store.insert(&txn, model).await?;

        if let Some(permission_ids) = req.permission_ids {
            let resolved = self.resolve_permission_ids(&txn, &permission_ids).await?;
            self.role_store
                .replace_permissions(&txn, created.id, &resolved)
                .await?;
        }

        let response = self.assemble_one(&txn, created).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("create_role", e))?;
        self.caches.roles.invalidate().await;

        tracing::info!(role_id = response.id, name = %response.name, "role created");
        Ok(response)
    }

    /// Patch a role; a supplied permission id set fully replaces the old one
    pub async fn update(&self, id: i32, req: UpdateRoleRequest) -> Result<RoleResponse, AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let role = self
            .role_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("Role", id))?;

        if role.name.eq_ignore_ascii_case(PROTECTED_ROLE_NAME) {
            return Err(AdminError::Protected("ADMIN role cannot be edited"));
        }

        let mut model: role::ActiveModel = role.clone().into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }

        let role = if model.is_changed() {
            self.role_store.save(&txn, model).await?
        } else {
            role
        };

        if let Some(permission_ids) = req.permission_ids {
            let resolved = self.resolve_permission_ids(&txn, &permission_ids).await?;
            self.role_store
                .replace_permissions(&txn, role.id, &resolved)
                .await?;
        }

        let response = self.assemble_one(&txn, role).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("update_role", e))?;
        self.caches.roles.invalidate().await;

        tracing::info!(role_id = id, "role updated");
        Ok(response)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let role = self
            .role_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("Role", id))?;

        if role.name.eq_ignore_ascii_case(PROTECTED_ROLE_NAME) {
            return Err(AdminError::Protected("ADMIN role cannot be deleted"));
        }

        self.role_store.delete(&txn, id).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("delete_role", e))?;
        self.caches.roles.invalidate().await;

        tracing::info!(role_id = id, "role deleted");
        Ok(())
    }

    /// Permissive id resolution: unresolvable ids are dropped silently
    async fn resolve_permission_ids(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[i32],
    ) -> Result<Vec<i32>, InternalError> {
        let resolved = self.permission_store.find_by_ids(conn, ids).await?;
        if resolved.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                resolved = resolved.len(),
                "dropped unresolvable permission ids"
            );
        }
        Ok(resolved.into_iter().map(|permission| permission.id).collect())
    }

    async fn assemble(
        &self,
        conn: &impl ConnectionTrait,
        roles: Vec<role::Model>,
    ) -> Result<Vec<RoleResponse>, InternalError> {
        let permissions = self.role_store.permissions_of(conn, &roles).await?;

        Ok(roles
            .into_iter()
            .zip(permissions)
            .map(|(role, perms)| RoleResponse::from_parts(role, perms))
            .collect())
    }

    async fn assemble_one(
        &self,
        conn: &impl ConnectionTrait,
        role: role::Model,
    ) -> Result<RoleResponse, InternalError> {
        let permissions = self.role_store.permissions_of_one(conn, &role).await?;
        Ok(RoleResponse::from_parts(role, permissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, EntityTrait};

    use crate::types::db::permission;
    use crate::types::db::role::Entity as Role;

    async fn setup() -> Arc<AppData> {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        Arc::new(AppData::new(db))
    }

    async fn insert_permission(app_data: &Arc<AppData>, name: &str) -> permission::Model {
        let model = permission::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };
        app_data
            .permission_store
            .insert(&app_data.db, model)
            .await
            .expect("Failed to insert permission")
    }

    #[tokio::test]
    async fn test_create_role_attaches_resolved_permissions() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());
        let read = insert_permission(&app_data, "users:read").await;
        let write = insert_permission(&app_data, "users:write").await;

        let created = service
            .create(CreateRoleRequest {
                name: "EDITOR".to_string(),
                permission_ids: Some(vec![read.id, write.id]),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "EDITOR");
        assert_eq!(created.permissions.len(), 2);
    }

    #[tokio::test]
    async fn test_create_role_drops_unresolvable_permission_ids() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());
        let read = insert_permission(&app_data, "users:read").await;

        let created = service
            .create(CreateRoleRequest {
                name: "EDITOR".to_string(),
                permission_ids: Some(vec![read.id, 998, 999]),
            })
            .await
            .unwrap();

        // Unknown ids are not an error; they are simply dropped
        assert_eq!(created.permissions.len(), 1);
        assert_eq!(created.permissions[0].name, "users:read");
    }

    #[tokio::test]
    async fn test_update_replaces_permission_set() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());
        let read = insert_permission(&app_data, "users:read").await;
        let write = insert_permission(&app_data, "users:write").await;

        let created = service
            .create(CreateRoleRequest {
                name: "EDITOR".to_string(),
                permission_ids: Some(vec![read.id]),
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateRoleRequest {
                    name: None,
                    permission_ids: Some(vec![write.id]),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "EDITOR");
        assert_eq!(updated.permissions.len(), 1);
        assert_eq!(updated.permissions[0].name, "users:write");
    }

    #[tokio::test]
    async fn test_protected_admin_role_cannot_be_edited_any_case() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());

        for name in ["ADMIN", "admin", "Admin"] {
            let created = service
                .create(CreateRoleRequest {
                    name: name.to_string(),
                    permission_ids: None,
                })
                .await
                .unwrap();

            let result = service
                .update(
                    created.id,
                    UpdateRoleRequest {
                        name: Some("RENAMED".to_string()),
                        permission_ids: None,
                    },
                )
                .await;

            assert!(matches!(result, Err(AdminError::Protected(_))));

            let stored = Role::find_by_id(created.id)
                .one(&app_data.db)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stored.name, name);

            service
                .role_store
                .delete(&app_data.db, created.id)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_protected_admin_role_cannot_be_deleted() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());

        let created = service
            .create(CreateRoleRequest {
                name: "ADMIN".to_string(),
                permission_ids: None,
            })
            .await
            .unwrap();

        let result = service.delete(created.id).await;
        assert!(matches!(result, Err(AdminError::Protected(_))));

        let stored = Role::find_by_id(created.id).one(&app_data.db).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_list_all_reflects_writes_without_stale_cache() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());

        assert!(service.list_all().await.unwrap().is_empty());

        let created = service
            .create(CreateRoleRequest {
                name: "EDITOR".to_string(),
                permission_ids: None,
            })
            .await
            .unwrap();

        let listed = service.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);

        service.delete(created.id).await.unwrap();
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_page_filters_by_name() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());

        for name in ["EDITOR", "VIEWER", "AUDITOR"] {
            service
                .create(CreateRoleRequest {
                    name: name.to_string(),
                    permission_ids: None,
                })
                .await
                .unwrap();
        }

        let page = service
            .list_page(PageRequest::default(), Some("itor"))
            .await
            .unwrap();

        // Case-insensitive substring over the role name
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_fails_not_found() {
        let app_data = setup().await;
        let service = RoleService::new(app_data.clone());

        let result = service.get_by_id(42).await;

        assert!(matches!(
            result,
            Err(AdminError::NotFound { entity: "Role", .. })
        ));
    }
}
