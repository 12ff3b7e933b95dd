use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::errors::AdminApiError;
use crate::services::PermissionService;
use crate::types::dto::common::{DeletedResponse, PageResponse};
use crate::types::dto::permission::{
    CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest,
};
use crate::types::internal::PageRequest;

/// Permission administration API endpoints
pub struct PermissionApi {
    permission_service: PermissionService,
}

impl PermissionApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            permission_service: PermissionService::new(app_data),
        }
    }
}

/// API tags for permission endpoints
#[derive(Tags)]
enum PermissionTags {
    /// Permission administration
    Permissions,
}

#[OpenApi(prefix_path = "/permissions")]
impl PermissionApi {
    /// Paginated permission list with optional name search
    #[oai(path = "/", method = "get", tag = "PermissionTags::Permissions")]
    async fn list(
        &self,
        search: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<PageResponse<PermissionResponse>>, AdminApiError> {
        let page_request = PageRequest::from_params(page.0, size.0);
        let result = self
            .permission_service
            .list_page(page_request, search.0.as_deref())
            .await?;
        Ok(Json(result))
    }

    /// Full permission list
    #[oai(path = "/all", method = "get", tag = "PermissionTags::Permissions")]
    async fn list_all(&self) -> Result<Json<Vec<PermissionResponse>>, AdminApiError> {
        Ok(Json(self.permission_service.list_all().await?))
    }

    /// Single permission by id
    #[oai(path = "/:id", method = "get", tag = "PermissionTags::Permissions")]
    async fn get(&self, id: Path<i32>) -> Result<Json<PermissionResponse>, AdminApiError> {
        Ok(Json(self.permission_service.get_by_id(id.0).await?))
    }

    /// Create a permission
    #[oai(path = "/", method = "post", tag = "PermissionTags::Permissions")]
    async fn create(
        &self,
        body: Json<CreatePermissionRequest>,
    ) -> Result<Json<PermissionResponse>, AdminApiError> {
        Ok(Json(self.permission_service.create(body.0).await?))
    }

    /// Patch a permission; absent fields are left unchanged
    #[oai(path = "/:id", method = "put", tag = "PermissionTags::Permissions")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<UpdatePermissionRequest>,
    ) -> Result<Json<PermissionResponse>, AdminApiError> {
        Ok(Json(self.permission_service.update(id.0, body.0).await?))
    }

    /// Delete a permission
    #[oai(path = "/:id", method = "delete", tag = "PermissionTags::Permissions")]
    async fn delete(&self, id: Path<i32>) -> Result<DeletedResponse, AdminApiError> {
        self.permission_service.delete(id.0).await?;
        Ok(DeletedResponse::NoContent)
    }
}
