//! 存储层
//!
//! 每类资源一个存储 trait，`Storage` 汇总全部能力。校区范围内的数据
//! 一律以 `branch_id` 作为首个参数并在查询中过滤，跨校区的记录表现为不存在。

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    attendance::{
        entities::{AttendanceCounts, AttendanceRecord, AttendanceSession},
        requests::{AttendanceListParams, AttendanceRecordInput, CreateAttendanceRequest},
    },
    branches::{
        entities::Branch,
        requests::{BranchListParams, CreateBranchRequest, UpdateBranchRequest},
    },
    campaigns::{
        entities::Campaign,
        requests::{CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest},
        responses::SendCampaignResponse,
    },
    classes::{
        entities::Class,
        requests::{ClassListParams, CreateClassRequest, UpdateClassRequest},
    },
    dashboard::responses::DashboardResponse,
    enrollments::{
        entities::Enrollment,
        requests::{EnrollmentListParams, UpdateEnrollmentRequest},
    },
    exams::{
        entities::Exam,
        requests::{CreateExamRequest, ExamListParams, UpdateExamRequest},
    },
    fee_structures::{
        entities::FeeStructure,
        requests::{CreateFeeStructureRequest, FeeStructureListParams, UpdateFeeStructureRequest},
    },
    invoices::{
        entities::{Invoice, InvoiceItem},
        requests::InvoiceListParams,
        responses::FeeBalanceResponse,
    },
    marks::{
        entities::Mark,
        requests::{BulkMarkEntry, CreateMarkRequest, MarkListParams, UpdateMarkRequest},
        responses::BulkMarksResponse,
    },
    messages::{
        entities::{Message, MessageStatus},
        requests::{CreateMessageRequest, MessageListParams},
    },
    payments::{
        entities::Payment,
        requests::{CreatePaymentRequest, PaymentListParams},
        responses::PaymentReceiptResponse,
    },
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, SectionListParams, UpdateSectionRequest},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest},
    },
    tenants::{
        entities::Tenant,
        requests::{CreateTenantRequest, TenantListParams, UpdateTenantRequest},
    },
    timetables::{
        entities::TimetablePeriod,
        requests::{
            CreateTimetablePeriodRequest, TimetableListParams, UpdateTimetablePeriodRequest,
        },
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListParams},
    },
};

pub mod sea_orm_storage;

/// 新建注册所需字段（已由服务层校验）
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub section_id: i64,
    pub academic_year: String,
    pub roll_number: Option<i32>,
    pub enrolled_at: String,
}

/// 注册写入结果
#[derive(Debug)]
pub enum EnrollmentWrite {
    Saved(Enrollment),
    NotFound,
    SectionFull,
    AlreadyEnrolled,
}

/// 新建账单所需字段（编号与合计已由服务层生成）
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub student_id: i64,
    pub invoice_no: String,
    pub issue_date: String,
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
    pub total_amount: f64,
}

/// 账单修改结果，已有缴费的账单被锁定
#[derive(Debug)]
pub enum InvoiceWrite<T> {
    Done(T),
    NotFound,
    Locked,
}

/// 缴费结果
#[derive(Debug)]
pub enum PaymentOutcome {
    Recorded(PaymentReceiptResponse),
    InvoiceNotFound,
    InvoiceNotPayable,
    ExceedsBalance { outstanding: f64 },
}

/// 通知活动修改结果，已发送的活动不可修改
#[derive(Debug)]
pub enum CampaignWrite<T> {
    Done(T),
    NotFound,
    AlreadySent,
}

/// 通知活动发送结果
#[derive(Debug)]
pub enum CampaignSend {
    Sent(SendCampaignResponse),
    NotFound,
    AlreadySent,
    NoRecipients,
}

#[async_trait]
pub trait TenantStorage: Send + Sync {
    async fn create_tenant(&self, req: CreateTenantRequest) -> Result<Tenant>;
    async fn get_tenant_by_id(&self, id: i64) -> Result<Option<Tenant>>;
    async fn list_tenants_with_pagination(
        &self,
        params: TenantListParams,
    ) -> Result<PaginatedResponse<Tenant>>;
    async fn update_tenant(&self, id: i64, update: UpdateTenantRequest) -> Result<Option<Tenant>>;
    async fn delete_tenant(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait BranchStorage: Send + Sync {
    async fn create_branch(&self, tenant_id: i64, req: CreateBranchRequest) -> Result<Branch>;
    // 不限定租户，供校区中间件解析请求头使用
    async fn get_branch_by_id(&self, id: i64) -> Result<Option<Branch>>;
    async fn get_branch(&self, tenant_id: i64, id: i64) -> Result<Option<Branch>>;
    async fn list_branches_with_pagination(
        &self,
        tenant_id: i64,
        params: BranchListParams,
    ) -> Result<PaginatedResponse<Branch>>;
    async fn update_branch(
        &self,
        tenant_id: i64,
        id: i64,
        update: UpdateBranchRequest,
    ) -> Result<Option<Branch>>;
    async fn delete_branch(&self, tenant_id: i64, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    // 请求中的 password 字段须为已哈希的值
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // tenant_id 为 Some 时只列出该租户的用户
    async fn list_users_with_pagination(
        &self,
        tenant_id: Option<i64>,
        params: UserListParams,
    ) -> Result<PaginatedResponse<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
}

#[async_trait]
pub trait StudentStorage: Send + Sync {
    async fn create_student(&self, branch_id: i64, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student(&self, branch_id: i64, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        branch_id: i64,
        params: StudentListParams,
    ) -> Result<PaginatedResponse<Student>>;
    // 导出用，不分页
    async fn list_all_students(
        &self,
        branch_id: i64,
        params: StudentListParams,
    ) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, branch_id: i64, id: i64) -> Result<bool>;
    async fn student_attendance_counts(
        &self,
        branch_id: i64,
        student_id: i64,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<AttendanceCounts>;
    async fn student_fee_balance(
        &self,
        branch_id: i64,
        student_id: i64,
        today: &str,
    ) -> Result<FeeBalanceResponse>;
}

#[async_trait]
pub trait TeacherStorage: Send + Sync {
    async fn create_teacher(&self, branch_id: i64, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher(&self, branch_id: i64, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        branch_id: i64,
        params: TeacherListParams,
    ) -> Result<PaginatedResponse<Teacher>>;
    async fn update_teacher(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, branch_id: i64, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ClassStorage: Send + Sync {
    async fn create_class(&self, branch_id: i64, req: CreateClassRequest) -> Result<Class>;
    async fn get_class(&self, branch_id: i64, id: i64) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(
        &self,
        branch_id: i64,
        params: ClassListParams,
    ) -> Result<PaginatedResponse<Class>>;
    async fn update_class(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    async fn delete_class(&self, branch_id: i64, id: i64) -> Result<bool>;
    async fn count_sections_in_class(&self, branch_id: i64, class_id: i64) -> Result<u64>;
    // 班级考试与其分组课表引用的科目
    async fn list_class_subject_ids(&self, branch_id: i64, class_id: i64) -> Result<Vec<i64>>;
}

#[async_trait]
pub trait SectionStorage: Send + Sync {
    async fn create_section(&self, branch_id: i64, req: CreateSectionRequest) -> Result<Section>;
    async fn get_section(&self, branch_id: i64, id: i64) -> Result<Option<Section>>;
    async fn list_sections_with_pagination(
        &self,
        branch_id: i64,
        params: SectionListParams,
    ) -> Result<PaginatedResponse<Section>>;
    async fn update_section(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>>;
    async fn delete_section(&self, branch_id: i64, id: i64) -> Result<bool>;
    async fn count_active_enrollments(&self, branch_id: i64, section_id: i64) -> Result<u64>;
}

#[async_trait]
pub trait SubjectStorage: Send + Sync {
    // code 须为已规范化的值
    async fn create_subject(&self, branch_id: i64, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject(&self, branch_id: i64, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        branch_id: i64,
        params: SubjectListParams,
    ) -> Result<PaginatedResponse<Subject>>;
    async fn list_all_subjects(&self, branch_id: i64) -> Result<Vec<Subject>>;
    async fn update_subject(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, branch_id: i64, id: i64) -> Result<bool>;
    // 通过考试或课表引用该科目的班级年级
    async fn list_subject_grade_levels(&self, branch_id: i64, subject_id: i64) -> Result<Vec<i32>>;
}

#[async_trait]
pub trait EnrollmentStorage: Send + Sync {
    // 在事务中检查年度唯一与分组容量
    async fn create_enrollment(&self, branch_id: i64, new: NewEnrollment)
    -> Result<EnrollmentWrite>;
    async fn get_enrollment(&self, branch_id: i64, id: i64) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        branch_id: i64,
        params: EnrollmentListParams,
    ) -> Result<PaginatedResponse<Enrollment>>;
    async fn update_enrollment(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<EnrollmentWrite>;
    async fn delete_enrollment(&self, branch_id: i64, id: i64) -> Result<bool>;
    // 学生在该班级任一分组中是否有注册记录
    async fn is_enrolled_in_class(
        &self,
        branch_id: i64,
        student_id: i64,
        class_id: i64,
    ) -> Result<bool>;
    async fn active_student_ids_in_section(
        &self,
        branch_id: i64,
        section_id: i64,
    ) -> Result<Vec<i64>>;
}

#[async_trait]
pub trait ExamStorage: Send + Sync {
    async fn create_exam(&self, branch_id: i64, req: CreateExamRequest) -> Result<Exam>;
    async fn get_exam(&self, branch_id: i64, id: i64) -> Result<Option<Exam>>;
    async fn list_exams_with_pagination(
        &self,
        branch_id: i64,
        params: ExamListParams,
    ) -> Result<PaginatedResponse<Exam>>;
    async fn update_exam(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>>;
    async fn delete_exam(&self, branch_id: i64, id: i64) -> Result<bool>;
    async fn highest_mark_for_exam(&self, branch_id: i64, exam_id: i64) -> Result<Option<f64>>;
}

#[async_trait]
pub trait MarkStorage: Send + Sync {
    async fn create_mark(&self, branch_id: i64, exam: &Exam, req: CreateMarkRequest)
    -> Result<Mark>;
    async fn get_mark(&self, branch_id: i64, id: i64) -> Result<Option<Mark>>;
    async fn list_marks_with_pagination(
        &self,
        branch_id: i64,
        params: MarkListParams,
    ) -> Result<PaginatedResponse<Mark>>;
    async fn list_marks_for_exam(&self, branch_id: i64, exam: &Exam) -> Result<Vec<Mark>>;
    async fn update_mark(
        &self,
        branch_id: i64,
        exam: &Exam,
        id: i64,
        update: UpdateMarkRequest,
    ) -> Result<Option<Mark>>;
    async fn delete_mark(&self, branch_id: i64, id: i64) -> Result<bool>;
    // 单事务内按 (exam, student) 插入或更新
    async fn bulk_upsert_marks(
        &self,
        branch_id: i64,
        exam: &Exam,
        entries: Vec<BulkMarkEntry>,
    ) -> Result<BulkMarksResponse>;
}

#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    async fn create_attendance(
        &self,
        branch_id: i64,
        taken_by: Option<i64>,
        req: CreateAttendanceRequest,
    ) -> Result<(AttendanceSession, Vec<AttendanceRecord>)>;
    async fn find_attendance_session(
        &self,
        branch_id: i64,
        section_id: i64,
        date: &str,
    ) -> Result<Option<AttendanceSession>>;
    async fn get_attendance(
        &self,
        branch_id: i64,
        id: i64,
    ) -> Result<Option<(AttendanceSession, Vec<AttendanceRecord>)>>;
    async fn list_attendance_with_pagination(
        &self,
        branch_id: i64,
        params: AttendanceListParams,
    ) -> Result<PaginatedResponse<AttendanceSession>>;
    // 整体替换场次的明细
    async fn replace_attendance_records(
        &self,
        branch_id: i64,
        id: i64,
        taken_by: Option<i64>,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Option<(AttendanceSession, Vec<AttendanceRecord>)>>;
    async fn delete_attendance(&self, branch_id: i64, id: i64) -> Result<bool>;
    async fn attendance_counts_on(&self, branch_id: i64, date: &str) -> Result<AttendanceCounts>;
}

#[async_trait]
pub trait TimetableStorage: Send + Sync {
    async fn create_period(
        &self,
        branch_id: i64,
        req: CreateTimetablePeriodRequest,
    ) -> Result<TimetablePeriod>;
    async fn get_period(&self, branch_id: i64, id: i64) -> Result<Option<TimetablePeriod>>;
    async fn list_periods_with_pagination(
        &self,
        branch_id: i64,
        params: TimetableListParams,
    ) -> Result<PaginatedResponse<TimetablePeriod>>;
    // 冲突检测的候选集
    async fn list_periods_on_day(&self, branch_id: i64, day_of_week: i32)
    -> Result<Vec<TimetablePeriod>>;
    async fn list_section_periods(
        &self,
        branch_id: i64,
        section_id: i64,
    ) -> Result<Vec<TimetablePeriod>>;
    async fn update_period(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateTimetablePeriodRequest,
    ) -> Result<Option<TimetablePeriod>>;
    async fn delete_period(&self, branch_id: i64, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait FeeStructureStorage: Send + Sync {
    async fn create_fee_structure(
        &self,
        branch_id: i64,
        req: CreateFeeStructureRequest,
    ) -> Result<FeeStructure>;
    async fn get_fee_structure(&self, branch_id: i64, id: i64) -> Result<Option<FeeStructure>>;
    async fn list_fee_structures_with_pagination(
        &self,
        branch_id: i64,
        params: FeeStructureListParams,
    ) -> Result<PaginatedResponse<FeeStructure>>;
    async fn update_fee_structure(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>>;
    async fn delete_fee_structure(&self, branch_id: i64, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait InvoiceStorage: Send + Sync {
    async fn create_invoice(&self, branch_id: i64, new: NewInvoice) -> Result<Invoice>;
    async fn get_invoice(&self, branch_id: i64, id: i64) -> Result<Option<Invoice>>;
    // today 用于 overdue 过滤
    async fn list_invoices_with_pagination(
        &self,
        branch_id: i64,
        params: InvoiceListParams,
        today: &str,
    ) -> Result<PaginatedResponse<Invoice>>;
    async fn update_invoice(
        &self,
        branch_id: i64,
        id: i64,
        due_date: Option<String>,
        items: Option<Vec<InvoiceItem>>,
    ) -> Result<InvoiceWrite<Invoice>>;
    async fn cancel_invoice(&self, branch_id: i64, id: i64) -> Result<InvoiceWrite<Invoice>>;
    async fn delete_invoice(&self, branch_id: i64, id: i64) -> Result<InvoiceWrite<()>>;
}

#[async_trait]
pub trait PaymentStorage: Send + Sync {
    async fn record_payment(
        &self,
        branch_id: i64,
        recorded_by: Option<i64>,
        req: CreatePaymentRequest,
    ) -> Result<PaymentOutcome>;
    async fn get_payment(&self, branch_id: i64, id: i64) -> Result<Option<Payment>>;
    async fn list_payments_with_pagination(
        &self,
        branch_id: i64,
        params: PaymentListParams,
    ) -> Result<PaginatedResponse<Payment>>;
    // 删除缴费并回退账单金额，返回更新后的账单
    async fn delete_payment(&self, branch_id: i64, id: i64) -> Result<Option<Invoice>>;
}

#[async_trait]
pub trait CampaignStorage: Send + Sync {
    async fn create_campaign(&self, branch_id: i64, req: CreateCampaignRequest)
    -> Result<Campaign>;
    async fn get_campaign(&self, branch_id: i64, id: i64) -> Result<Option<Campaign>>;
    async fn list_campaigns_with_pagination(
        &self,
        branch_id: i64,
        params: CampaignListParams,
    ) -> Result<PaginatedResponse<Campaign>>;
    async fn update_campaign(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateCampaignRequest,
    ) -> Result<CampaignWrite<Campaign>>;
    async fn delete_campaign(&self, branch_id: i64, id: i64) -> Result<CampaignWrite<()>>;
    async fn send_campaign(&self, branch_id: i64, id: i64) -> Result<CampaignSend>;
}

#[async_trait]
pub trait MessageStorage: Send + Sync {
    async fn create_message(
        &self,
        branch_id: i64,
        recipient: String,
        req: CreateMessageRequest,
    ) -> Result<Message>;
    async fn get_message(&self, branch_id: i64, id: i64) -> Result<Option<Message>>;
    async fn list_messages_with_pagination(
        &self,
        branch_id: i64,
        params: MessageListParams,
    ) -> Result<PaginatedResponse<Message>>;
    async fn update_message_status(
        &self,
        branch_id: i64,
        id: i64,
        status: MessageStatus,
    ) -> Result<Option<Message>>;
}

#[async_trait]
pub trait DashboardStorage: Send + Sync {
    async fn dashboard_stats(&self, branch_id: i64, today: &str) -> Result<DashboardResponse>;
}

#[async_trait]
pub trait SystemStorage: Send + Sync {
    // 数据库是否可达
    async fn ping(&self) -> bool;
}

pub trait Storage:
    TenantStorage
    + BranchStorage
    + UserStorage
    + StudentStorage
    + TeacherStorage
    + ClassStorage
    + SectionStorage
    + SubjectStorage
    + EnrollmentStorage
    + ExamStorage
    + MarkStorage
    + AttendanceStorage
    + TimetableStorage
    + FeeStructureStorage
    + InvoiceStorage
    + PaymentStorage
    + CampaignStorage
    + MessageStorage
    + DashboardStorage
    + SystemStorage
{
}

impl<T> Storage for T where
    T: TenantStorage
        + BranchStorage
        + UserStorage
        + StudentStorage
        + TeacherStorage
        + ClassStorage
        + SectionStorage
        + SubjectStorage
        + EnrollmentStorage
        + ExamStorage
        + MarkStorage
        + AttendanceStorage
        + TimetableStorage
        + FeeStructureStorage
        + InvoiceStorage
        + PaymentStorage
        + CampaignStorage
        + MessageStorage
        + DashboardStorage
        + SystemStorage
{
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
