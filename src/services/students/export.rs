//! 学生名单导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::models::ErrorCode;
use crate::models::students::entities::Student;
use crate::models::students::requests::StudentListParams;
use crate::services::{branch_scope, finish, reject};

const HEADER: [&str; 11] = [
    "id",
    "admission_no",
    "first_name",
    "last_name",
    "gender",
    "date_of_birth",
    "guardian_name",
    "guardian_phone",
    "guardian_email",
    "status",
    "created_at",
];

pub async fn export_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let students = storage.list_all_students(scope.branch_id, query).await?;
        let data = write_csv(&students).map_err(|e| {
            error!("CSV export failed: {}", e);
            reject(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate CSV",
            )
        })?;
        info!(
            "Exported {} students from branch {}",
            students.len(),
            scope.branch_id
        );

        Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!(
                    "attachment; filename=\"students-branch-{}.csv\"",
                    scope.branch_id
                ),
            ))
            .body(data))
    })
    .await
}

fn write_csv(students: &[Student]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;

    for student in students {
        wtr.write_record([
            student.id.to_string(),
            student.admission_no.clone(),
            student.first_name.clone(),
            student.last_name.clone(),
            student.gender.map(|g| g.to_string()).unwrap_or_default(),
            student.date_of_birth.clone().unwrap_or_default(),
            student.guardian_name.clone().unwrap_or_default(),
            student.guardian_phone.clone().unwrap_or_default(),
            student.guardian_email.clone().unwrap_or_default(),
            student.status.to_string(),
            student.created_at.to_rfc3339(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::{Gender, StudentStatus};
    use chrono::Utc;

    #[test]
    fn test_csv_quotes_commas_and_keeps_header() {
        let student = Student {
            id: 3,
            branch_id: 1,
            admission_no: "ADM-003".to_string(),
            first_name: "Mira".to_string(),
            last_name: "Das, Jr".to_string(),
            gender: Some(Gender::Female),
            date_of_birth: None,
            guardian_name: None,
            guardian_phone: Some("9876543210".to_string()),
            guardian_email: None,
            status: StudentStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let data = String::from_utf8(write_csv(&[student]).unwrap()).unwrap();
        let mut lines = data.lines();
        assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
        let row = lines.next().unwrap();
        assert!(row.starts_with("3,ADM-003,Mira,\"Das, Jr\",female,"));
        assert!(row.contains(",active,"));
    }
}
