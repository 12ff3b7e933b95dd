use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::errors::InternalError;
use crate::stores::contains_ignore_case;
use crate::types::db::permission::{self, Entity as Permission};
use crate::types::db::role_permission;
use crate::types::internal::PageRequest;

/// PermissionStore is the persistence gateway for the permissions table.
pub struct PermissionStore {}

impl PermissionStore {
    pub fn new() -> Self {
        Self {}
    }

    /// All permissions ordered by id ascending
    pub async fn find_all(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<permission::Model>, InternalError> {
        Permission::find()
            .order_by_asc(permission::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_all_permissions", e))
    }

    /// One page of permissions, optionally filtered by a case-insensitive
    /// substring match over the permission name
    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<(Vec<permission::Model>, u64, u64), InternalError> {
        let mut query = Permission::find().order_by_asc(permission::Column::Id);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(contains_ignore_case(permission::Column::Name, term));
        }

        let paginator = query.paginate(conn, page.size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| InternalError::database("count_permissions_page", e))?;
        let rows = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| InternalError::database("fetch_permissions_page", e))?;

        Ok((rows, totals.number_of_items, totals.number_of_pages))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<permission::Model>, InternalError> {
        Permission::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_permission_by_id", e))
    }

    /// Resolve the subset of the given ids that exist
    ///
    /// Ids that do not resolve are dropped without error; callers treat the
    /// returned models as the authoritative set.
    pub async fn find_by_ids(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[i32],
    ) -> Result<Vec<permission::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Permission::find()
            .filter(permission::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(permission::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_permissions_by_ids", e))
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        model: permission::ActiveModel,
    ) -> Result<permission::Model, InternalError> {
        model
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_permission", e))
    }

    pub async fn save(
        &self,
        conn: &impl ConnectionTrait,
        model: permission::ActiveModel,
    ) -> Result<permission::Model, InternalError> {
        model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_permission", e))
    }

    /// Delete a permission and its junction rows
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<(), InternalError> {
        role_permission::Entity::delete_many()
            .filter(role_permission::Column::PermissionId.eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_permission_assignments", e))?;

        Permission::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_permission", e))?;

        Ok(())
    }
}

impl Default for PermissionStore {
    fn default() -> Self {
        Self::new()
    }
}
