use sea_orm_migration::prelude::*;

use crate::{fk_cascade, fk_restrict, fk_set_null, pk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 学生表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk(Students::Id))
                    .col(ColumnDef::new(Students::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Students::AdmissionNo).string().not_null())
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().null())
                    .col(ColumnDef::new(Students::DateOfBirth).string().null())
                    .col(ColumnDef::new(Students::GuardianName).string().null())
                    .col(ColumnDef::new(Students::GuardianPhone).string().null())
                    .col(ColumnDef::new(Students::GuardianEmail).string().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Students::Table,
                        Students::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 教师表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(pk(Teachers::Id))
                    .col(ColumnDef::new(Teachers::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Teachers::EmployeeNo).string().not_null())
                    .col(ColumnDef::new(Teachers::FirstName).string().not_null())
                    .col(ColumnDef::new(Teachers::LastName).string().not_null())
                    .col(ColumnDef::new(Teachers::Email).string().null())
                    .col(ColumnDef::new(Teachers::Phone).string().null())
                    .col(ColumnDef::new(Teachers::Specialization).string().null())
                    .col(ColumnDef::new(Teachers::HireDate).string().null())
                    .col(ColumnDef::new(Teachers::Status).string().not_null())
                    .col(ColumnDef::new(Teachers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Teachers::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Teachers::Table,
                        Teachers::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 年级班级表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(pk(Classes::Id))
                    .col(ColumnDef::new(Classes::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .col(ColumnDef::new(Classes::GradeLevel).integer().not_null())
                    .col(ColumnDef::new(Classes::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Classes::Table,
                        Classes::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 分班表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(pk(Sections::Id))
                    .col(ColumnDef::new(Sections::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Sections::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Sections::Name).string().not_null())
                    .col(ColumnDef::new(Sections::Capacity).integer().not_null())
                    .col(ColumnDef::new(Sections::ClassTeacherId).big_integer().null())
                    .col(ColumnDef::new(Sections::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sections::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Sections::Table,
                        Sections::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Sections::Table,
                        Sections::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut fk_set_null(
                        Sections::Table,
                        Sections::ClassTeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 科目表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(pk(Subjects::Id))
                    .col(ColumnDef::new(Subjects::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::Code).string().not_null())
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::MinGrade).integer().null())
                    .col(ColumnDef::new(Subjects::MaxGrade).integer().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Subjects::Table,
                        Subjects::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 选课/注册表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk(Enrollments::Id))
                    .col(
                        ColumnDef::new(Enrollments::BranchId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::RollNumber).integer().null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk_cascade(
                        Enrollments::Table,
                        Enrollments::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Enrollments::Table,
                        Enrollments::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Enrollments::Table,
                        Enrollments::SectionId,
                        Sections::Table,
                        Sections::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 考试表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(pk(Exams::Id))
                    .col(ColumnDef::new(Exams::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::Name).string().not_null())
                    .col(ColumnDef::new(Exams::ExamDate).string().not_null())
                    .col(ColumnDef::new(Exams::MaxMarks).double().not_null())
                    .col(ColumnDef::new(Exams::PassMarks).double().not_null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Exams::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Exams::Table,
                        Exams::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Exams::Table,
                        Exams::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Exams::Table,
                        Exams::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 成绩表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(pk(Marks::Id))
                    .col(ColumnDef::new(Marks::BranchId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::MarksObtained).double().not_null())
                    .col(ColumnDef::new(Marks::Remarks).string().null())
                    .col(ColumnDef::new(Marks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Marks::UpdatedAt).big_integer().not_null())
                    .foreign_key(&mut fk_cascade(
                        Marks::Table,
                        Marks::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_cascade(
                        Marks::Table,
                        Marks::ExamId,
                        Exams::Table,
                        Exams::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        Marks::Table,
                        Marks::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 考勤表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AttendanceSessions::Table)
                    .if_not_exists()
                    .col(pk(AttendanceSessions::Id))
                    .col(
                        ColumnDef::new(AttendanceSessions::BranchId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceSessions::Date).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceSessions::TakenBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk_cascade(
                        AttendanceSessions::Table,
                        AttendanceSessions::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        AttendanceSessions::Table,
                        AttendanceSessions::SectionId,
                        Sections::Table,
                        Sections::Id,
                    ))
                    .foreign_key(&mut fk_set_null(
                        AttendanceSessions::Table,
                        AttendanceSessions::TakenBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(pk(AttendanceRecords::Id))
                    .col(
                        ColumnDef::new(AttendanceRecords::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Remarks).string().null())
                    .foreign_key(&mut fk_cascade(
                        AttendanceRecords::Table,
                        AttendanceRecords::SessionId,
                        AttendanceSessions::Table,
                        AttendanceSessions::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        AttendanceRecords::Table,
                        AttendanceRecords::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 课表 ====================
        manager
            .create_table(
                Table::create()
                    .table(TimetablePeriods::Table)
                    .if_not_exists()
                    .col(pk(TimetablePeriods::Id))
                    .col(
                        ColumnDef::new(TimetablePeriods::BranchId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::DayOfWeek)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::StartTime)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::EndTime)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimetablePeriods::Room).string().null())
                    .col(
                        ColumnDef::new(TimetablePeriods::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetablePeriods::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut fk_cascade(
                        TimetablePeriods::Table,
                        TimetablePeriods::BranchId,
                        Branches::Table,
                        Branches::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        TimetablePeriods::Table,
                        TimetablePeriods::SectionId,
                        Sections::Table,
                        Sections::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        TimetablePeriods::Table,
                        TimetablePeriods::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .foreign_key(&mut fk_restrict(
                        TimetablePeriods::Table,
                        TimetablePeriods::TeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // ==================== 唯一约束 ====================
        let unique_indexes = [
            Index::create()
                .if_not_exists()
                .name("uq_students_branch_admission")
                .table(Students::Table)
                .col(Students::BranchId)
                .col(Students::AdmissionNo)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_teachers_branch_employee")
                .table(Teachers::Table)
                .col(Teachers::BranchId)
                .col(Teachers::EmployeeNo)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_classes_branch_name_year")
                .table(Classes::Table)
                .col(Classes::BranchId)
                .col(Classes::Name)
                .col(Classes::AcademicYear)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_sections_class_name")
                .table(Sections::Table)
                .col(Sections::ClassId)
                .col(Sections::Name)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_subjects_branch_code")
                .table(Subjects::Table)
                .col(Subjects::BranchId)
                .col(Subjects::Code)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_marks_exam_student")
                .table(Marks::Table)
                .col(Marks::ExamId)
                .col(Marks::StudentId)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_attendance_sessions_section_date")
                .table(AttendanceSessions::Table)
                .col(AttendanceSessions::SectionId)
                .col(AttendanceSessions::Date)
                .unique()
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("uq_attendance_records_session_student")
                .table(AttendanceRecords::Table)
                .col(AttendanceRecords::SessionId)
                .col(AttendanceRecords::StudentId)
                .unique()
                .to_owned(),
        ];
        for index in unique_indexes {
            manager.create_index(index).await?;
        }

        // ==================== 普通索引 ====================
        let indexes = [
            Index::create()
                .if_not_exists()
                .name("idx_enrollments_student_id")
                .table(Enrollments::Table)
                .col(Enrollments::StudentId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_enrollments_section_id")
                .table(Enrollments::Table)
                .col(Enrollments::SectionId)
                .to_owned(),
            Index::create()
                .if_not_exists()
                .name("idx_timetable_periods_day")
                .table(TimetablePeriods::Table)
                .col(TimetablePeriods::BranchId)
                .col(TimetablePeriods::DayOfWeek)
                .to_owned(),
        ];
        for index in indexes {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TimetablePeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    BranchId,
    AdmissionNo,
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
    GuardianName,
    GuardianPhone,
    GuardianEmail,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
    BranchId,
    EmployeeNo,
    FirstName,
    LastName,
    Email,
    Phone,
    Specialization,
    HireDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    BranchId,
    Name,
    GradeLevel,
    AcademicYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    BranchId,
    ClassId,
    Name,
    Capacity,
    ClassTeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    BranchId,
    Code,
    Name,
    MinGrade,
    MaxGrade,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    BranchId,
    StudentId,
    SectionId,
    AcademicYear,
    RollNumber,
    Status,
    EnrolledAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Exams {
    Table,
    Id,
    BranchId,
    ClassId,
    SubjectId,
    Name,
    ExamDate,
    MaxMarks,
    PassMarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Marks {
    Table,
    Id,
    BranchId,
    ExamId,
    StudentId,
    MarksObtained,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceSessions {
    Table,
    Id,
    BranchId,
    SectionId,
    Date,
    TakenBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    Table,
    Id,
    SessionId,
    StudentId,
    Status,
    Remarks,
}

#[derive(DeriveIden)]
enum TimetablePeriods {
    Table,
    Id,
    BranchId,
    SectionId,
    SubjectId,
    TeacherId,
    DayOfWeek,
    StartTime,
    EndTime,
    Room,
    CreatedAt,
    UpdatedAt,
}
