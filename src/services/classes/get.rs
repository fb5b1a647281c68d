use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_class(scope.branch_id, class_id).await? {
            Some(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                class,
                "Class information retrieved successfully",
            ))),
            None => Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        }
    })
    .await
}
