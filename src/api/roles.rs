use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::errors::AdminApiError;
use crate::services::RoleService;
use crate::types::dto::common::{DeletedResponse, PageResponse};
use crate::types::dto::role::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use crate::types::internal::PageRequest;

/// Role administration API endpoints
pub struct RoleApi {
    role_service: RoleService,
}

impl RoleApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            role_service: RoleService::new(app_data),
        }
    }
}

/// API tags for role endpoints
#[derive(Tags)]
enum RoleTags {
    /// Role administration
    Roles,
}

#[OpenApi(prefix_path = "/roles")]
impl RoleApi {
    /// Paginated role list with optional name search
    #[oai(path = "/", method = "get", tag = "RoleTags::Roles")]
    async fn list(
        &self,
        search: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<PageResponse<RoleResponse>>, AdminApiError> {
        let page_request = PageRequest::from_params(page.0, size.0);
        let result = self
            .role_service
            .list_page(page_request, search.0.as_deref())
            .await?;
        Ok(Json(result))
    }

    /// Full role list
    #[oai(path = "/all", method = "get", tag = "RoleTags::Roles")]
    async fn list_all(&self) -> Result<Json<Vec<RoleResponse>>, AdminApiError> {
        Ok(Json(self.role_service.list_all().await?))
    }

    /// Single role by id
    #[oai(path = "/:id", method = "get", tag = "RoleTags::Roles")]
    async fn get(&self, id: Path<i32>) -> Result<Json<RoleResponse>, AdminApiError> {
        Ok(Json(self.role_service.get_by_id(id.0).await?))
    }

    /// Create a role with an optional permission id set
    #[oai(path = "/", method = "post", tag = "RoleTags::Roles")]
    async fn create(
        &self,
        body: Json<CreateRoleRequest>,
    ) -> Result<Json<RoleResponse>, AdminApiError> {
        Ok(Json(self.role_service.create(body.0).await?))
    }

    /// Patch a role; absent fields are left unchanged
    #[oai(path = "/:id", method = "put", tag = "RoleTags::Roles")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<UpdateRoleRequest>,
    ) -> Result<Json<RoleResponse>, AdminApiError> {
        Ok(Json(self.role_service.update(id.0, body.0).await?))
    }

    /// Delete a role
    #[oai(path = "/:id", method = "delete", tag = "RoleTags::Roles")]
    async fn delete(&self, id: Path<i32>) -> Result<DeletedResponse, AdminApiError> {
        self.role_service.delete(id.0).await?;
        Ok(DeletedResponse::NoContent)
    }
}
