use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::errors::AdminApiError;
use crate::services::UserService;
use crate::types::dto::common::{DeletedResponse, PageResponse};
use crate::types::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::types::internal::PageRequest;

/// User administration API endpoints
pub struct UserApi {
    user_service: UserService,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_service: UserService::new(app_data),
        }
    }
}

/// API tags for user endpoints
#[derive(Tags)]
enum UserTags {
    /// User administration
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// Paginated user list with optional text search
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list(
        &self,
        search: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<PageResponse<UserResponse>>, AdminApiError> {
        let page_request = PageRequest::from_params(page.0, size.0);
        let result = self
            .user_service
            .list_page(page_request, search.0.as_deref())
            .await?;
        Ok(Json(result))
    }

    /// Full user list
    #[oai(path = "/all", method = "get", tag = "UserTags::Users")]
    async fn list_all(&self) -> Result<Json<Vec<UserResponse>>, AdminApiError> {
        Ok(Json(self.user_service.list_all().await?))
    }

    /// Single user by id
    #[oai(path = "/:id", method = "get", tag = "UserTags::Users")]
    async fn get(&self, id: Path<i32>) -> Result<Json<UserResponse>, AdminApiError> {
        Ok(Json(self.user_service.get_by_id(id.0).await?))
    }

    /// Create a user
    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, AdminApiError> {
        Ok(Json(self.user_service.create(body.0).await?))
    }

    /// Patch a user; absent fields are left unchanged
    #[oai(path = "/:id", method = "put", tag = "UserTags::Users")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserResponse>, AdminApiError> {
        Ok(Json(self.user_service.update(id.0, body.0).await?))
    }

    /// Delete a user
    #[oai(path = "/:id", method = "delete", tag = "UserTags::Users")]
    async fn delete(&self, id: Path<i32>) -> Result<DeletedResponse, AdminApiError> {
        self.user_service.delete(id.0).await?;
        Ok(DeletedResponse::NoContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_api() -> UserApi {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        UserApi::new(Arc::new(AppData::new(db)))
    }

    fn create_request(username: &str) -> CreateUserRequest {
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
    async fn test_get_missing_user_returns_404() {
        let api = setup_api().await;

        let result = api.get(Path(42)).await;

        match result {
            Err(err) => assert_eq!(err.status_code(), 404),
            Ok(_) => panic!("Expected NotFound error"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_create_returns_409() {
        let api = setup_api().await;

        api.create(Json(create_request("alice"))).await.unwrap();
        let result = api.create(Json(create_request("ALICE"))).await;

        match result {
            Err(err) => assert_eq!(err.status_code(), 409),
            Ok(_) => panic!("Expected Conflict error"),
        }
    }

    #[tokio::test]
    async fn test_protected_admin_update_returns_403() {
        let api = setup_api().await;

        let created = api.create(Json(create_request("admin"))).await.unwrap();

        let patch = UpdateUserRequest {
            username: None,
            password: None,
            firstname: Some("Changed".to_string()),
            lastname: None,
            language: None,
            role_id: None,
        };
        let result = api.update(Path(created.0.id), Json(patch)).await;

        match result {
            Err(err) => assert_eq!(err.status_code(), 403),
            Ok(_) => panic!("Expected Forbidden error"),
        }
    }

    #[tokio::test]
    async fn test_list_returns_page_envelope() {
        let api = setup_api().await;

        api.create(Json(create_request("alice"))).await.unwrap();

        let page = api
            .list(Query(None), Query(None), Query(None))
            .await
            .unwrap();

        assert_eq!(page.0.content.len(), 1);
        assert_eq!(page.0.total_elements, 1);
        assert_eq!(page.0.number, 0);
        assert_eq!(page.0.size, 20);
    }
}
