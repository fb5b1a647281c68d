//! 请求体中外部引用的校验
//!
//! 引用按当前校区解析，找不到时返回 400（而不是 404），
//! 调用方无法借此探测其他校区的数据。

use std::sync::Arc;

use actix_web::HttpResponse;

use super::{bad_reference, invalid};
use crate::models::ErrorCode;
use crate::models::classes::entities::Class;
use crate::models::sections::entities::Section;
use crate::models::students::entities::{Student, StudentStatus};
use crate::models::subjects::entities::Subject;
use crate::models::teachers::entities::{Teacher, TeacherStatus};
use crate::storage::Storage;

pub(crate) async fn require_class(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    class_id: i64,
) -> Result<Class, HttpResponse> {
    storage
        .get_class(branch_id, class_id)
        .await?
        .ok_or_else(|| {
            bad_reference(
                ErrorCode::ClassNotFound,
                format!("Class {class_id} does not exist in this branch"),
            )
        })
}

pub(crate) async fn require_section(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    section_id: i64,
) -> Result<Section, HttpResponse> {
    storage
        .get_section(branch_id, section_id)
        .await?
        .ok_or_else(|| {
            bad_reference(
                ErrorCode::SectionNotFound,
                format!("Section {section_id} does not exist in this branch"),
            )
        })
}

pub(crate) async fn require_subject(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    subject_id: i64,
) -> Result<Subject, HttpResponse> {
    storage
        .get_subject(branch_id, subject_id)
        .await?
        .ok_or_else(|| {
            bad_reference(
                ErrorCode::SubjectNotFound,
                format!("Subject {subject_id} does not exist in this branch"),
            )
        })
}

pub(crate) async fn require_student(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    student_id: i64,
) -> Result<Student, HttpResponse> {
    storage
        .get_student(branch_id, student_id)
        .await?
        .ok_or_else(|| {
            bad_reference(
                ErrorCode::StudentNotFound,
                format!("Student {student_id} does not exist in this branch"),
            )
        })
}

pub(crate) async fn require_active_student(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    student_id: i64,
) -> Result<Student, HttpResponse> {
    let student = require_student(storage, branch_id, student_id).await?;
    if student.status != StudentStatus::Active {
        return Err(invalid(format!(
            "Student {student_id} is {} and cannot be enrolled",
            student.status
        )));
    }
    Ok(student)
}

pub(crate) async fn require_active_teacher(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    teacher_id: i64,
) -> Result<Teacher, HttpResponse> {
    let teacher = storage
        .get_teacher(branch_id, teacher_id)
        .await?
        .ok_or_else(|| {
            bad_reference(
                ErrorCode::TeacherNotFound,
                format!("Teacher {teacher_id} does not exist in this branch"),
            )
        })?;
    if teacher.status != TeacherStatus::Active {
        return Err(invalid(format!("Teacher {teacher_id} is not active")));
    }
    Ok(teacher)
}

/// 科目须适用于班级年级
pub(crate) fn require_applicable(subject: &Subject, class: &Class) -> Result<(), HttpResponse> {
    if subject.applies_to(class.grade_level) {
        return Ok(());
    }
    Err(bad_reference(
        ErrorCode::SubjectNotApplicable,
        format!(
            "Subject '{}' is taught in grades {}-{} and does not apply to grade {}",
            subject.code, subject.applicable_from, subject.applicable_to, class.grade_level
        ),
    ))
}
