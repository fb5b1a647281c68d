//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub branch_id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 派生字段依赖所属考试的满分与及格线
    pub fn into_mark(self, max_marks: f64, pass_marks: f64) -> crate::models::marks::entities::Mark {
        use crate::models::marks::entities::Mark;
        use crate::utils::grading::{letter_grade, percentage};

        let percentage = percentage(self.marks_obtained, max_marks);

        Mark {
            id: self.id,
            branch_id: self.branch_id,
            exam_id: self.exam_id,
            student_id: self.student_id,
            marks_obtained: self.marks_obtained,
            remarks: self.remarks,
            percentage,
            letter_grade: letter_grade(percentage).to_string(),
            passed: self.marks_obtained >= pass_marks,
            created_at: super::timestamp(self.created_at),
            updated_at: super::timestamp(self.updated_at),
        }
    }
}
