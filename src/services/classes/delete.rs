use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, conflict, finish, not_found};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if storage.get_class(scope.branch_id, class_id).await?.is_none() {
            return Err(not_found(ErrorCode::ClassNotFound, "Class not found"));
        }

        let sections = storage
            .count_sections_in_class(scope.branch_id, class_id)
            .await?;
        if sections > 0 {
            return Err(conflict(
                ErrorCode::ClassHasSections,
                format!("Class still has {sections} section(s); delete them first"),
            ));
        }

        if !storage.delete_class(scope.branch_id, class_id).await? {
            return Err(not_found(ErrorCode::ClassNotFound, "Class not found"));
        }
        info!("Class {} deleted from branch {}", class_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Class deleted successfully")))
    })
    .await
}
