use super::{SeaOrmStorage, db_error};
use crate::entity::{classes, invoices, sections, students, teachers};
use crate::errors::Result;
use crate::models::{
    dashboard::responses::DashboardResponse,
    invoices::entities::{InvoiceStatus, round_money},
    students::entities::StudentStatus,
    teachers::entities::TeacherStatus,
};
use crate::storage::{AttendanceStorage, DashboardStorage};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

#[async_trait]
impl DashboardStorage for SeaOrmStorage {
    async fn dashboard_stats(&self, branch_id: i64, today: &str) -> Result<DashboardResponse> {
        let active_students = students::Entity::find()
            .filter(students::Column::BranchId.eq(branch_id))
            .filter(students::Column::Status.eq(StudentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count students"))?;

        let active_teachers = teachers::Entity::find()
            .filter(teachers::Column::BranchId.eq(branch_id))
            .filter(teachers::Column::Status.eq(TeacherStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count teachers"))?;

        let classes = classes::Entity::find()
            .filter(classes::Column::BranchId.eq(branch_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count classes"))?;

        let sections = sections::Entity::find()
            .filter(sections::Column::BranchId.eq(branch_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count sections"))?;

        let today_attendance = self.attendance_counts_on(branch_id, today).await?;

        // 未取消账单的未结金额合计
        let amounts: Vec<(f64, f64)> = invoices::Entity::find()
            .select_only()
            .column(invoices::Column::TotalAmount)
            .column(invoices::Column::PaidAmount)
            .filter(invoices::Column::BranchId.eq(branch_id))
            .filter(invoices::Column::Status.ne(InvoiceStatus::Cancelled.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load invoices"))?;
        let outstanding: f64 = amounts
            .iter()
            .map(|(total, paid)| (total - paid).max(0.0))
            .sum();

        Ok(DashboardResponse {
            branch_id,
            active_students: active_students as i64,
            active_teachers: active_teachers as i64,
            classes: classes as i64,
            sections: sections as i64,
            today_attendance_rate: today_attendance.attendance_rate(),
            outstanding_fees: round_money(outstanding),
        })
    }
}
