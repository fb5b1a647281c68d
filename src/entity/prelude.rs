//! 预导入模块，方便使用

pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords,
    Model as AttendanceRecordModel,
};
pub use super::attendance_sessions::{
    ActiveModel as AttendanceSessionActiveModel, Entity as AttendanceSessions,
    Model as AttendanceSessionModel,
};
pub use super::branches::{
    ActiveModel as BranchActiveModel, Entity as Branches, Model as BranchModel,
};
pub use super::campaigns::{
    ActiveModel as CampaignActiveModel, Entity as Campaigns, Model as CampaignModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::fee_structures::{
    ActiveModel as FeeStructureActiveModel, Entity as FeeStructures, Model as FeeStructureModel,
};
pub use super::invoices::{
    ActiveModel as InvoiceActiveModel, Entity as Invoices, Model as InvoiceModel,
};
pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks, Model as MarkModel};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::sections::{
    ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::tenants::{ActiveModel as TenantActiveModel, Entity as Tenants, Model as TenantModel};
pub use super::timetable_periods::{
    ActiveModel as TimetablePeriodActiveModel, Entity as TimetablePeriods,
    Model as TimetablePeriodModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
