use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, Set, TransactionTrait};

use crate::app_data::AppData;
use crate::errors::{AdminError, InternalError};
use crate::services::ListCaches;
use crate::stores::PermissionStore;
use crate::types::db::permission;
use crate::types::dto::common::PageResponse;
use crate::types::dto::permission::{
    CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest,
};
use crate::types::internal::PageRequest;

/// Business rules around permission records
///
/// Permissions carry no protected sentinel and no name uniqueness; the
/// service's only invariant is cache coherency across writes.
pub struct PermissionService {
    db: DatabaseConnection,
    permission_store: Arc<PermissionStore>,
    caches: Arc<ListCaches>,
}

impl PermissionService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            permission_store: app_data.permission_store.clone(),
            caches: app_data.caches.clone(),
        }
    }

    /// Full permission collection, served from the cache when populated
    pub async fn list_all(&self) -> Result<Vec<PermissionResponse>, AdminError> {
        self.caches.permissions.get_or_load(self.load_all()).await
    }

    async fn load_all(&self) -> Result<Vec<PermissionResponse>, AdminError> {
        let permissions = self.permission_store.find_all(&self.db).await?;
        Ok(permissions.into_iter().map(PermissionResponse::from).collect())
    }

    /// One page of permissions; always bypasses the cache
    pub async fn list_page(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<PageResponse<PermissionResponse>, AdminError> {
        let (rows, total_elements, total_pages) = self
            .permission_store
            .find_page(&self.db, page, search)
            .await?;

        Ok(PageResponse {
            content: rows.into_iter().map(PermissionResponse::from).collect(),
            number: page.page,
            size: page.size,
            total_elements,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<PermissionResponse, AdminError> {
        let permission = self
            .permission_store
            .find_by_id(&self.db, id)
            .await?
            .ok_or(AdminError::not_found("Permission", id))?;

        Ok(PermissionResponse::from(permission))
    }

    /// Create a permission; stored as given, duplicate names included
    pub async fn create(
        &self,
        req: CreatePermissionRequest,
    ) -> Result<PermissionResponse, AdminError> {
        let model = permission::ActiveModel {
            id: NotSet,
            name: Set(req.name),
        };

        let created = self.permission_store.insert(&self.db, model).await?;
        self.caches.permissions.invalidate().await;

        tracing::info!(permission_id = created.id, name = %created.name, "permission created");
        Ok(PermissionResponse::from(created))
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdatePermissionRequest,
    ) -> Result<PermissionResponse, AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let permission = self
            .permission_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("Permission", id))?;

        let mut model: permission::ActiveModel = permission.clone().into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }

        let permission = if model.is_changed() {
            self.permission_store.save(&txn, model).await?
        } else {
            permission
        };

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("update_permission", e))?;
        self.caches.permissions.invalidate().await;

        tracing::info!(permission_id = id, "permission updated");
        Ok(PermissionResponse::from(permission))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        self.permission_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("Permission", id))?;

        self.permission_store.delete(&txn, id).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("delete_permission", e))?;
        self.caches.permissions.invalidate().await;

        tracing::info!(permission_id = id, "permission deleted");
        Ok(())
    }
}
