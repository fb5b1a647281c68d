use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SectionService, check_capacity};
use crate::models::ApiResponse;
use crate::models::sections::requests::CreateSectionRequest;
use crate::services::references::{require_active_teacher, require_class};
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::require_text;

pub async fn create_section(
    service: &SectionService,
    request: &HttpRequest,
    section_data: CreateSectionRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let name = require_text("name", &section_data.name, 32).map_err(invalid)?;
        check_capacity(section_data.capacity).map_err(invalid)?;
        require_class(&storage, scope.branch_id, section_data.class_id).await?;
        if let Some(teacher_id) = section_data.class_teacher_id {
            require_active_teacher(&storage, scope.branch_id, teacher_id).await?;
        }

        let section = storage
            .create_section(
                scope.branch_id,
                CreateSectionRequest {
                    name,
                    ..section_data
                },
            )
            .await?;
        info!(
            "Section {} ({}) created for class {}",
            section.id, section.name, section.class_id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            section,
            "Section created successfully",
        )))
    })
    .await
}
