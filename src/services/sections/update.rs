use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SectionService, check_capacity};
use crate::models::sections::requests::UpdateSectionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::references::require_active_teacher;
use crate::services::{branch_scope, conflict, finish, invalid, not_found};
use crate::utils::validate::require_text;

pub async fn update_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
    update_data: UpdateSectionRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if storage.get_section(scope.branch_id, section_id).await?.is_none() {
            return Err(not_found(ErrorCode::SectionNotFound, "Section not found"));
        }

        let name = update_data
            .name
            .map(|v| require_text("name", &v, 32))
            .transpose()
            .map_err(invalid)?;

        if let Some(capacity) = update_data.capacity {
            check_capacity(capacity).map_err(invalid)?;
            // 容量不能低于当前有效注册人数
            let enrolled = storage
                .count_active_enrollments(scope.branch_id, section_id)
                .await?;
            if (capacity as u64) < enrolled {
                return Err(conflict(
                    ErrorCode::SectionFull,
                    format!("Section already has {enrolled} active enrollments"),
                ));
            }
        }

        if let Some(Some(teacher_id)) = update_data.class_teacher_id {
            require_active_teacher(&storage, scope.branch_id, teacher_id).await?;
        }

        let update_data = UpdateSectionRequest {
            name,
            ..update_data
        };
        match storage
            .update_section(scope.branch_id, section_id, update_data)
            .await?
        {
            Some(section) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                section,
                "Section updated successfully",
            ))),
            None => Err(not_found(ErrorCode::SectionNotFound, "Section not found")),
        }
    })
    .await
}
