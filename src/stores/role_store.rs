use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::stores::{contains_ignore_case, eq_ignore_case};
use crate::types::db::role::{self, Entity as Role};
use crate::types::db::{permission, role_permission, user_role};
use crate::types::internal::PageRequest;

/// RoleStore is the persistence gateway for the roles table and the
/// role_permissions junction.
pub struct RoleStore {}

impl RoleStore {
    pub fn new() -> Self {
        Self {}
    }

    /// All roles ordered by id ascending
    pub async fn find_all(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<role::Model>, InternalError> {
        Role::find()
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_all_roles", e))
    }

    /// One page of roles, optionally filtered by a case-insensitive
    /// substring match over the role name
    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<(Vec<role::Model>, u64, u64), InternalError> {
        let mut query = Role::find().order_by_asc(role::Column::Id);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(contains_ignore_case(role::Column::Name, term));
        }

        let paginator = query.paginate(conn, page.size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| InternalError::database("count_roles_page", e))?;
        let rows = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| InternalError::database("fetch_roles_page", e))?;

        Ok((rows, totals.number_of_items, totals.number_of_pages))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<role::Model>, InternalError> {
        Role::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role_by_id", e))
    }

    pub async fn find_by_name_ignore_case(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<Option<role::Model>, InternalError> {
        Role::find()
            .filter(eq_ignore_case(role::Column::Name, name))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role_by_name", e))
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        model: role::ActiveModel,
    ) -> Result<role::Model, InternalError> {
        model
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_role", e))
    }

    pub async fn save(
        &self,
        conn: &impl ConnectionTrait,
        model: role::ActiveModel,
    ) -> Result<role::Model, InternalError> {
        model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_role", e))
    }

    /// Replace the role's permission set with the given permission ids
    pub async fn replace_permissions(
        &self,
        conn: &impl ConnectionTrait,
        role_id: i32,
        permission_ids: &[i32],
    ) -> Result<(), InternalError> {
        role_permission::Entity::delete_many()
            .filter(role_permission::Column::RoleId.eq(role_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_role_permissions", e))?;

        if !permission_ids.is_empty() {
            let rows: Vec<role_permission::ActiveModel> = permission_ids
                .iter()
                .map(|permission_id| role_permission::ActiveModel {
                    role_id: Set(role_id),
                    permission_id: Set(*permission_id),
                })
                .collect();

            role_permission::Entity::insert_many(rows)
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("insert_role_permissions", e))?;
        }

        Ok(())
    }

    /// Resolve the permissions of each given role, index-aligned with the input
    pub async fn permissions_of(
        &self,
        conn: &impl ConnectionTrait,
        roles: &Vec<role::Model>,
    ) -> Result<Vec<Vec<permission::Model>>, InternalError> {
        roles
            .load_many_to_many(permission::Entity, role_permission::Entity, conn)
            .await
            .map_err(|e| InternalError::database("load_role_permissions", e))
    }

    /// Resolve the permissions of a single role
    pub async fn permissions_of_one(
        &self,
        conn: &impl ConnectionTrait,
        role: &role::Model,
    ) -> Result<Vec<permission::Model>, InternalError> {
        role.find_related(permission::Entity)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("load_role_permissions", e))
    }

    /// Delete a role and its junction rows on both sides
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<(), InternalError> {
        role_permission::Entity::delete_many()
            .filter(role_permission::Column::RoleId.eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_role_permissions", e))?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::RoleId.eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_role_assignments", e))?;

        Role::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_role", e))?;

        Ok(())
    }
}

impl Default for RoleStore {
    fn default() -> Self {
        Self::new()
    }
}
