use serde::{Serialize, Serializer};

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证与用户；3xxx 租户与校区；
/// 4xxx 教务；5xxx 财务；6xxx 通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1500,

    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserInactive = 2003,
    CanNotDeleteCurrentUser = 2004,
    InvalidRefreshToken = 2005,

    TenantNotFound = 3000,
    TenantAlreadyExists = 3001,
    TenantSuspended = 3002,
    TenantMismatch = 3003,
    BranchNotFound = 3004,
    BranchAlreadyExists = 3005,
    BranchHeaderMissing = 3006,
    BranchHeaderInvalid = 3007,
    TenantHeaderInvalid = 3008,

    StudentNotFound = 4000,
    TeacherNotFound = 4001,
    ClassNotFound = 4002,
    SectionNotFound = 4003,
    SubjectNotFound = 4004,
    SubjectNotApplicable = 4005,
    EnrollmentNotFound = 4006,
    DuplicateEnrollment = 4007,
    SectionFull = 4008,
    ExamNotFound = 4009,
    MarkNotFound = 4010,
    StudentNotInClass = 4011,
    AttendanceNotFound = 4012,
    AttendanceAlreadyTaken = 4013,
    TimetablePeriodNotFound = 4014,
    TimetableConflict = 4015,
    ClassHasSections = 4016,

    FeeStructureNotFound = 5000,
    InvoiceNotFound = 5001,
    InvoiceNotPayable = 5002,
    InvoiceLocked = 5003,
    PaymentNotFound = 5004,
    PaymentExceedsBalance = 5005,

    CampaignNotFound = 6000,
    CampaignAlreadySent = 6001,
    MessageNotFound = 6002,
    NoRecipients = 6003,
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*self as i32)
    }
}
