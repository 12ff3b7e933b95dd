use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};

use crate::app_data::AppData;
use crate::errors::{AdminError, InternalError};
use crate::services::{CredentialHasher, ListCaches};
use crate::stores::{RoleStore, UserStore};
use crate::types::db::user;
use crate::types::dto::common::PageResponse;
use crate::types::dto::role::RoleResponse;
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::types::internal::PageRequest;

/// Username of the protected built-in account. The check is name-based and
/// case-insensitive: any record colliding with this name is protected,
/// whether or not it is the seeded one.
pub const PROTECTED_USERNAME: &str = "admin";

/// Business rules around user records
///
/// Wraps the persistence gateway with the mutation guard (the protected
/// admin account may be read but never edited or deleted), the uniqueness
/// check on create, and coherency of the shared full-list cache. Each
/// guard-check-then-write sequence runs inside one transaction.
pub struct UserService {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    hasher: Arc<CredentialHasher>,
    caches: Arc<ListCaches>,
}

impl UserService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            user_store: app_data.user_store.clone(),
            role_store: app_data.role_store.clone(),
            hasher: app_data.hasher.clone(),
            caches: app_data.caches.clone(),
        }
    }

    /// Full user collection, served from the cache when populated
    pub async fn list_all(&self) -> Result<Vec<UserResponse>, AdminError> {
        self.caches.users.get_or_load(self.load_all()).await
    }

    async fn load_all(&self) -> Result<Vec<UserResponse>, AdminError> {
        let users = self.user_store.find_all(&self.db).await?;
        Ok(self.assemble(&self.db, users).await?)
    }

    /// One page of users; always bypasses the cache
    pub async fn list_page(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<PageResponse<UserResponse>, AdminError> {
        let (rows, total_elements, total_pages) =
            self.user_store.find_page(&self.db, page, search).await?;
        let content = self.assemble(&self.db, rows).await?;

        Ok(PageResponse {
            content,
            number: page.page,
            size: page.size,
            total_elements,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<UserResponse, AdminError> {
        let user = self
            .user_store
            .find_by_id(&self.db, id)
            .await?
            .ok_or(AdminError::not_found("User", id))?;

        Ok(self.assemble_one(&self.db, user).await?)
    }

    /// Create a user, hashing the password and attaching at most one role
    pub async fn create(&self, req: CreateUserRequest) -> Result<UserResponse, AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        if self
            .user_store
            .exists_by_username_ignore_case(&txn, &req.username)
            .await?
        {
            return Err(AdminError::duplicate_username(&req.username));
        }

        let role = match req.role_id {
            Some(role_id) => Some(
                self.role_store
                    .find_by_id(&txn, role_id)
                    .await?
                    .ok_or(AdminError::not_found("Role", role_id))?,
            ),
            None => None,
        };

        let password_hash = self.hasher.hash(&req.password)?;

        let model = user::ActiveModel {
            id: NotSet,
            username: Set(req.username),
            password_hash: Set(password_hash),
            firstname: Set(req.firstname),
            lastname: Set(req.lastname),
            language: Set(req.language.unwrap_or_else(|| "en".to_string())),
        };

        let created = self.user_store.insert(&txn, model).await?;

        if let Some(role) = &role {
            self.user_store
                .replace_roles(&txn, created.id, &[role.id])
                .await?;
        }

        let response = self.assemble_one(&txn, created).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("create_user", e))?;
        self.caches.users.invalidate().await;

        tracing::info!(user_id = response.id, username = %response.username, "user created");
        Ok(response)
    }

    /// Patch a user; supplied fields overwrite, absent fields stay.
    ///
    /// A blank password is skipped rather than hashed, and a supplied role
    /// id replaces the whole role set with that single role.
    pub async fn update(&self, id: i32, req: UpdateUserRequest) -> Result<UserResponse, AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let user = self
            .user_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("User", id))?;

        if user.username.eq_ignore_ascii_case(PROTECTED_USERNAME) {
            return Err(AdminError::Protected("Admin user cannot be edited"));
        }

        let mut model: user::ActiveModel = user.clone().into();
        if let Some(username) = req.username {
            model.username = Set(username);
        }
        if let Some(password) = req.password {
            if !password.trim().is_empty() {
                model.password_hash = Set(self.hasher.hash(&password)?);
            }
        }
        if let Some(firstname) = req.firstname {
            model.firstname = Set(Some(firstname));
        }
        if let Some(lastname) = req.lastname {
            model.lastname = Set(Some(lastname));
        }
        if let Some(language) = req.language {
            model.language = Set(language);
        }

        let user = if model.is_changed() {
            self.user_store.save(&txn, model).await?
        } else {
            user
        };

        if let Some(role_id) = req.role_id {
            let role = self
                .role_store
                .find_by_id(&txn, role_id)
                .await?
                .ok_or(AdminError::not_found("Role", role_id))?;
            self.user_store
                .replace_roles(&txn, user.id, &[role.id])
                .await?;
        }

        let response = self.assemble_one(&txn, user).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("update_user", e))?;
        self.caches.users.invalidate().await;

        tracing::info!(user_id = id, "user updated");
        Ok(response)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let user = self
            .user_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("User", id))?;

        if user.username.eq_ignore_ascii_case(PROTECTED_USERNAME) {
            return Err(AdminError::Protected("Admin user cannot be deleted"));
        }

        self.user_store.delete(&txn, id).await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("delete_user", e))?;
        self.caches.users.invalidate().await;

        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Resolve roles and permissions for a batch of users
    async fn assemble(
        &self,
        conn: &impl ConnectionTrait,
        users: Vec<user::Model>,
    ) -> Result<Vec<UserResponse>, InternalError> {
        let roles_per_user = self.user_store.roles_of(conn, &users).await?;

        // Resolve each distinct role's permissions once
        let mut distinct_roles: Vec<_> = roles_per_user.iter().flatten().cloned().collect();
        distinct_roles.sort_by_key(|role| role.id);
        distinct_roles.dedup_by_key(|role| role.id);

        let permissions = self.role_store.permissions_of(conn, &distinct_roles).await?;
        let permissions_by_role: HashMap<i32, _> = distinct_roles
            .iter()
            .zip(permissions)
            .map(|(role, perms)| (role.id, perms))
            .collect();

        Ok(users
            .into_iter()
            .zip(roles_per_user)
            .map(|(user, roles)| {
                let role_responses = roles
                    .into_iter()
                    .map(|role| {
                        let perms = permissions_by_role
                            .get(&role.id)
                            .cloned()
                            .unwrap_or_default();
                        RoleResponse::from_parts(role, perms)
                    })
                    .collect();
                UserResponse::from_parts(user, role_responses)
            })
            .collect())
    }

    /// Resolve roles and permissions for a single user
    async fn assemble_one(
        &self,
        conn: &impl ConnectionTrait,
        user: user::Model,
    ) -> Result<UserResponse, InternalError> {
        let roles = self.user_store.roles_of_one(conn, &user).await?;
        let permissions = self.role_store.permissions_of(conn, &roles).await?;

        let role_responses = roles
            .into_iter()
            .zip(permissions)
            .map(|(role, perms)| RoleResponse::from_parts(role, perms))
            .collect();

        Ok(UserResponse::from_parts(user, role_responses))
    }
}
