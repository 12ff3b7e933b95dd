use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::stores::{contains_ignore_case, eq_ignore_case};
use crate::types::db::user::{self, Entity as User};
use crate::types::db::{role, user_role};
use crate::types::internal::PageRequest;

/// UserStore is the persistence gateway for the users table and the
/// user_roles junction. Business rules live in the service layer; every
/// method here takes a connection so mutations can run inside the
/// caller's transaction.
pub struct UserStore {}

impl UserStore {
    pub fn new() -> Self {
        Self {}
    }

    /// All users ordered by id ascending
    pub async fn find_all(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_all_users", e))
    }

    /// One page of users, optionally filtered by a case-insensitive
    /// substring match over username, firstname and lastname
    ///
    /// Returns the rows plus the total item and page counts.
    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<(Vec<user::Model>, u64, u64), InternalError> {
        let mut query = User::find().order_by_asc(user::Column::Id);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ignore_case(user::Column::Username, term))
                    .add(contains_ignore_case(user::Column::Firstname, term))
                    .add(contains_ignore_case(user::Column::Lastname, term)),
            );
        }

        let paginator = query.paginate(conn, page.size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| InternalError::database("count_users_page", e))?;
        let rows = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| InternalError::database("fetch_users_page", e))?;

        Ok((rows, totals.number_of_items, totals.number_of_pages))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn exists_by_username_ignore_case(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<bool, InternalError> {
        let count = User::find()
            .filter(eq_ignore_case(user::Column::Username, username))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("exists_by_username", e))?;
        Ok(count > 0)
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        model: user::ActiveModel,
    ) -> Result<user::Model, InternalError> {
        model
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_user", e))
    }

    pub async fn save(
        &self,
        conn: &impl ConnectionTrait,
        model: user::ActiveModel,
    ) -> Result<user::Model, InternalError> {
        model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    /// Replace the user's role set with the given role ids
    pub async fn replace_roles(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role_ids: &[i32],
    ) -> Result<(), InternalError> {
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_user_roles", e))?;

        if !role_ids.is_empty() {
            let rows: Vec<user_role::ActiveModel> = role_ids
                .iter()
                .map(|role_id| user_role::ActiveModel {
                    user_id: Set(user_id),
                    role_id: Set(*role_id),
                })
                .collect();

            user_role::Entity::insert_many(rows)
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("insert_user_roles", e))?;
        }

        Ok(())
    }

    /// Resolve the roles of each given user, index-aligned with the input
    pub async fn roles_of(
        &self,
        conn: &impl ConnectionTrait,
        users: &Vec<user::Model>,
    ) -> Result<Vec<Vec<role::Model>>, InternalError> {
        users
            .load_many_to_many(role::Entity, user_role::Entity, conn)
            .await
            .map_err(|e| InternalError::database("load_user_roles", e))
    }

    /// Resolve the roles of a single user
    pub async fn roles_of_one(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
    ) -> Result<Vec<role::Model>, InternalError> {
        user.find_related(role::Entity)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("load_user_roles", e))
    }

    /// Delete a user and its junction rows
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<(), InternalError> {
        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_user_roles", e))?;

        User::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        Ok(())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
