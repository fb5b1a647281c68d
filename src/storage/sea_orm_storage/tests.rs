//! 基于内存 SQLite 的存储层集成测试

use super::SeaOrmStorage;
use crate::errors::SchoolError;
use crate::models::{
    ListQuery,
    attendance::{
        entities::AttendanceStatus,
        requests::{AttendanceRecordInput, CreateAttendanceRequest},
    },
    branches::requests::CreateBranchRequest,
    campaigns::{
        entities::{Audience, CampaignStatus, Channel},
        requests::CreateCampaignRequest,
    },
    classes::requests::{CreateClassRequest, UpdateClassRequest},
    enrollments::{entities::EnrollmentStatus, requests::UpdateEnrollmentRequest},
    exams::requests::CreateExamRequest,
    invoices::entities::{InvoiceItem, InvoiceStatus},
    marks::requests::BulkMarkEntry,
    messages::requests::MessageListParams,
    payments::{entities::PaymentMethod, requests::CreatePaymentRequest},
    sections::requests::CreateSectionRequest,
    students::requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
    subjects::requests::CreateSubjectRequest,
    tenants::requests::CreateTenantRequest,
};
use crate::storage::*;

struct Fixture {
    storage: SeaOrmStorage,
    branch_a: i64,
    branch_b: i64,
}

async fn setup() -> Fixture {
    let storage = SeaOrmStorage::in_memory().await.expect("in-memory storage");

    let tenant = storage
        .create_tenant(CreateTenantRequest {
            name: "Greenfield Schools".to_string(),
            code: "greenfield".to_string(),
            status: None,
        })
        .await
        .expect("tenant");

    let mut branches = Vec::new();
    for code in ["north", "south"] {
        let branch = storage
            .create_branch(
                tenant.id,
                CreateBranchRequest {
                    name: format!("{code} campus"),
                    code: code.to_string(),
                    address: None,
                    phone: None,
                },
            )
            .await
            .expect("branch");
        branches.push(branch.id);
    }

    Fixture {
        storage,
        branch_a: branches[0],
        branch_b: branches[1],
    }
}

async fn seed_student(storage: &SeaOrmStorage, branch_id: i64, admission_no: &str) -> i64 {
    seed_student_with(
        storage,
        branch_id,
        admission_no,
        Some(format!("{admission_no}@example.com")),
    )
    .await
}

async fn seed_student_with(
    storage: &SeaOrmStorage,
    branch_id: i64,
    admission_no: &str,
    guardian_email: Option<String>,
) -> i64 {
    storage
        .create_student(
            branch_id,
            CreateStudentRequest {
                admission_no: admission_no.to_string(),
                first_name: "Student".to_string(),
                last_name: admission_no.to_string(),
                gender: None,
                date_of_birth: None,
                guardian_name: None,
                guardian_phone: None,
                guardian_email,
                status: None,
            },
        )
        .await
        .expect("student")
        .id
}

/// 返回 (class_id, section_id)
async fn seed_section(storage: &SeaOrmStorage, branch_id: i64, capacity: i32) -> (i64, i64) {
    let class = storage
        .create_class(
            branch_id,
            CreateClassRequest {
                name: "Grade 5".to_string(),
                grade_level: 5,
                academic_year: "2025-2026".to_string(),
            },
        )
        .await
        .expect("class");
    let section = storage
        .create_section(
            branch_id,
            CreateSectionRequest {
                class_id: class.id,
                name: "A".to_string(),
                capacity,
                class_teacher_id: None,
            },
        )
        .await
        .expect("section");
    (class.id, section.id)
}

async fn add_section(storage: &SeaOrmStorage, branch_id: i64, class_id: i64, name: &str) -> i64 {
    storage
        .create_section(
            branch_id,
            CreateSectionRequest {
                class_id,
                name: name.to_string(),
                capacity: 30,
                class_teacher_id: None,
            },
        )
        .await
        .expect("section")
        .id
}

fn invoice_for(student_id: i64, invoice_no: &str, amount: f64) -> NewInvoice {
    NewInvoice {
        student_id,
        invoice_no: invoice_no.to_string(),
        issue_date: "2025-06-01".to_string(),
        due_date: "2025-06-30".to_string(),
        items: vec![InvoiceItem {
            description: "Tuition".to_string(),
            amount,
            fee_structure_id: None,
        }],
        total_amount: amount,
    }
}

fn campaign(audience: Audience, audience_ref_id: Option<i64>) -> CreateCampaignRequest {
    CreateCampaignRequest {
        name: "Term reminder".to_string(),
        channel: Channel::Email,
        subject: Some("Term starts Monday".to_string()),
        body: "Classes resume on Monday.".to_string(),
        audience,
        audience_ref_id,
    }
}

fn enrollment(student_id: i64, section_id: i64) -> NewEnrollment {
    NewEnrollment {
        student_id,
        section_id,
        academic_year: "2025-2026".to_string(),
        roll_number: None,
        enrolled_at: "2025-06-01".to_string(),
    }
}

#[tokio::test]
async fn test_branch_isolation() {
    let fx = setup().await;
    let student = seed_student(&fx.storage, fx.branch_a, "A-001").await;

    assert!(fx.storage.get_student(fx.branch_a, student).await.unwrap().is_some());
    assert!(fx.storage.get_student(fx.branch_b, student).await.unwrap().is_none());

    let updated = fx
        .storage
        .update_student(
            fx.branch_b,
            student,
            UpdateStudentRequest {
                first_name: Some("Intruder".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_none());
    assert!(!fx.storage.delete_student(fx.branch_b, student).await.unwrap());

    let listed = fx
        .storage
        .list_students_with_pagination(fx.branch_b, StudentListParams::default())
        .await
        .unwrap();
    assert_eq!(listed.pagination.total, 0);

    let listed = fx
        .storage
        .list_students_with_pagination(fx.branch_a, StudentListParams::default())
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].first_name, "Student");
}

#[tokio::test]
async fn test_admission_no_unique_per_branch() {
    let fx = setup().await;
    seed_student(&fx.storage, fx.branch_a, "A-001").await;
    seed_student(&fx.storage, fx.branch_b, "A-001").await;

    let duplicate = fx
        .storage
        .create_student(
            fx.branch_a,
            CreateStudentRequest {
                admission_no: "A-001".to_string(),
                first_name: "Dup".to_string(),
                last_name: "Dup".to_string(),
                gender: None,
                date_of_birth: None,
                guardian_name: None,
                guardian_phone: None,
                guardian_email: None,
                status: None,
            },
        )
        .await;
    let err = duplicate.unwrap_err();
    assert_eq!(err.status_code(), actix_web::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_single_active_enrollment_per_year() {
    let fx = setup().await;
    let student = seed_student(&fx.storage, fx.branch_a, "A-001").await;
    let (_, section) = seed_section(&fx.storage, fx.branch_a, 30).await;

    let first = fx
        .storage
        .create_enrollment(fx.branch_a, enrollment(student, section))
        .await
        .unwrap();
    let EnrollmentWrite::Saved(first) = first else {
        panic!("expected enrollment to be saved");
    };

    let second = fx
        .storage
        .create_enrollment(fx.branch_a, enrollment(student, section))
        .await
        .unwrap();
    assert!(matches!(second, EnrollmentWrite::AlreadyEnrolled));

    // 撤销后可再次注册
    let withdrawn = fx
        .storage
        .update_enrollment(
            fx.branch_a,
            first.id,
            UpdateEnrollmentRequest {
                status: Some(EnrollmentStatus::Withdrawn),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(matches!(withdrawn, EnrollmentWrite::Saved(_)));

    let again = fx
        .storage
        .create_enrollment(fx.branch_a, enrollment(student, section))
        .await
        .unwrap();
    assert!(matches!(again, EnrollmentWrite::Saved(_)));
}

#[tokio::test]
async fn test_section_capacity() {
    let fx = setup().await;
    let (_, section) = seed_section(&fx.storage, fx.branch_a, 2).await;

    for no in ["A-001", "A-002"] {
        let student = seed_student(&fx.storage, fx.branch_a, no).await;
        let saved = fx
            .storage
            .create_enrollment(fx.branch_a, enrollment(student, section))
            .await
            .unwrap();
        assert!(matches!(saved, EnrollmentWrite::Saved(_)));
    }

    let late = seed_student(&fx.storage, fx.branch_a, "A-003").await;
    let full = fx
        .storage
        .create_enrollment(fx.branch_a, enrollment(late, section))
        .await
        .unwrap();
    assert!(matches!(full, EnrollmentWrite::SectionFull));
    assert_eq!(
        fx.storage
            .count_active_enrollments(fx.branch_a, section)
            .await
            .unwrap(),
        2
    );

    // 其他校区无法引用该分组
    let foreign = seed_student(&fx.storage, fx.branch_b, "B-001").await;
    let missing = fx
        .storage
        .create_enrollment(fx.branch_b, enrollment(foreign, section))
        .await
        .unwrap();
    assert!(matches!(missing, EnrollmentWrite::NotFound));
}

#[tokio::test]
async fn test_payment_overpay_rejected() {
    let fx = setup().await;
    let student = seed_student(&fx.storage, fx.branch_a, "A-001").await;

    let invoice = fx
        .storage
        .create_invoice(
            fx.branch_a,
            NewInvoice {
                student_id: student,
                invoice_no: "INV-1-20250601-ABC123".to_string(),
                issue_date: "2025-06-01".to_string(),
                due_date: "2025-06-30".to_string(),
                items: vec![InvoiceItem {
                    description: "Tuition".to_string(),
                    amount: 100.0,
                    fee_structure_id: None,
                }],
                total_amount: 100.0,
            },
        )
        .await
        .unwrap();

    let pay = |amount: f64| CreatePaymentRequest {
        invoice_id: invoice.id,
        amount,
        method: PaymentMethod::Cash,
        reference: None,
        paid_at: None,
    };

    let partial = fx.storage.record_payment(fx.branch_a, None, pay(40.0)).await.unwrap();
    let PaymentOutcome::Recorded(receipt) = partial else {
        panic!("expected payment to be recorded");
    };
    assert_eq!(receipt.invoice.status, InvoiceStatus::PartiallyPaid);
    assert_eq!(receipt.invoice.balance, 60.0);

    let over = fx.storage.record_payment(fx.branch_a, None, pay(60.01)).await.unwrap();
    assert!(matches!(
        over,
        PaymentOutcome::ExceedsBalance { outstanding } if outstanding == 60.0
    ));

    // 已有缴费的账单不可取消
    let locked = fx.storage.cancel_invoice(fx.branch_a, invoice.id).await.unwrap();
    assert!(matches!(locked, InvoiceWrite::Locked));

    let rest = fx.storage.record_payment(fx.branch_a, None, pay(60.0)).await.unwrap();
    let PaymentOutcome::Recorded(receipt) = rest else {
        panic!("expected payment to be recorded");
    };
    assert_eq!(receipt.invoice.status, InvoiceStatus::Paid);

    let closed = fx.storage.record_payment(fx.branch_a, None, pay(1.0)).await.unwrap();
    assert!(matches!(closed, PaymentOutcome::InvoiceNotPayable));

    let cross = fx.storage.record_payment(fx.branch_b, None, pay(1.0)).await.unwrap();
    assert!(matches!(cross, PaymentOutcome::InvoiceNotFound));

    // 删除缴费后账单回退
    let reverted = fx
        .storage
        .delete_payment(fx.branch_a, receipt.payment.id)
        .await
        .unwrap()
        .expect("invoice after reversal");
    assert_eq!(reverted.paid_amount, 40.0);
    assert_eq!(reverted.status, InvoiceStatus::PartiallyPaid);
}

#[tokio::test]
async fn test_attendance_transaction() {
    let fx = setup().await;
    let (_, section) = seed_section(&fx.storage, fx.branch_a, 30).await;
    let present = seed_student(&fx.storage, fx.branch_a, "A-001").await;
    let late = seed_student(&fx.storage, fx.branch_a, "A-002").await;

    let (session, records) = fx
        .storage
        .create_attendance(
            fx.branch_a,
            None,
            CreateAttendanceRequest {
                section_id: section,
                date: "2025-06-02".to_string(),
                records: vec![
                    AttendanceRecordInput {
                        student_id: present,
                        status: AttendanceStatus::Present,
                        remarks: None,
                    },
                    AttendanceRecordInput {
                        student_id: late,
                        status: AttendanceStatus::Late,
                        remarks: Some("bus delay".to_string()),
                    },
                ],
            },
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 2);

    // 同一分组同一天只能有一次考勤
    let duplicate = fx
        .storage
        .create_attendance(
            fx.branch_a,
            None,
            CreateAttendanceRequest {
                section_id: section,
                date: "2025-06-02".to_string(),
                records: vec![AttendanceRecordInput {
                    student_id: present,
                    status: AttendanceStatus::Absent,
                    remarks: None,
                }],
            },
        )
        .await;
    assert!(duplicate.is_err());

    let (_, stored) = fx
        .storage
        .get_attendance(fx.branch_a, session.id)
        .await
        .unwrap()
        .expect("session");
    assert_eq!(stored.len(), 2);

    let counts = fx
        .storage
        .attendance_counts_on(fx.branch_a, "2025-06-02")
        .await
        .unwrap();
    assert_eq!(counts.total, 2);
    assert_eq!(counts.attendance_rate(), Some(100.0));

    let (_, replaced) = fx
        .storage
        .replace_attendance_records(
            fx.branch_a,
            session.id,
            None,
            vec![AttendanceRecordInput {
                student_id: present,
                status: AttendanceStatus::Absent,
                remarks: None,
            }],
        )
        .await
        .unwrap()
        .expect("session");
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].status, AttendanceStatus::Absent);

    assert!(fx.storage.get_attendance(fx.branch_b, session.id).await.unwrap().is_none());
    assert!(fx.storage.delete_attendance(fx.branch_a, session.id).await.unwrap());
    let summary = fx
        .storage
        .student_attendance_counts(fx.branch_a, present, None, None)
        .await
        .unwrap();
    assert_eq!(summary.total, 0);
}

#[tokio::test]
async fn test_class_section_count() {
    let fx = setup().await;
    let (class, _) = seed_section(&fx.storage, fx.branch_a, 30).await;

    assert_eq!(fx.storage.count_sections_in_class(fx.branch_a, class).await.unwrap(), 1);
    assert_eq!(fx.storage.count_sections_in_class(fx.branch_b, class).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_query_defaults_apply() {
    let fx = setup().await;
    for no in ["A-001", "A-002", "A-003"] {
        seed_student(&fx.storage, fx.branch_a, no).await;
    }

    let params = StudentListParams {
        list: ListQuery {
            page: Some(2),
            page_size: Some(2),
            ..Default::default()
        },
        ..Default::default()
    };
    let page = fx
        .storage
        .list_students_with_pagination(fx.branch_a, params)
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let fx = setup().await;
    seed_student(&fx.storage, fx.branch_a, "A-001").await;

    let params = StudentListParams {
        list: ListQuery {
            page: Some(i64::MAX),
            ..Default::default()
        },
        ..Default::default()
    };
    let page = fx
        .storage
        .list_students_with_pagination(fx.branch_a, params)
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test]
async fn test_paid_records_block_student_delete() {
    let fx = setup().await;
    let student = seed_student(&fx.storage, fx.branch_a, "A-001").await;
    let invoice = fx
        .storage
        .create_invoice(fx.branch_a, invoice_for(student, "INV-1-20250601-PAID01", 100.0))
        .await
        .unwrap();

    let outcome = fx
        .storage
        .record_payment(
            fx.branch_a,
            None,
            CreatePaymentRequest {
                invoice_id: invoice.id,
                amount: 40.0,
                method: PaymentMethod::Cash,
                reference: None,
                paid_at: None,
            },
        )
        .await
        .unwrap();
    let PaymentOutcome::Recorded(receipt) = outcome else {
        panic!("expected payment to be recorded");
    };

    let edit = fx
        .storage
        .update_invoice(fx.branch_a, invoice.id, Some("2025-07-31".to_string()), None)
        .await
        .unwrap();
    assert!(matches!(edit, InvoiceWrite::Locked));
    let removed = fx.storage.delete_invoice(fx.branch_a, invoice.id).await.unwrap();
    assert!(matches!(removed, InvoiceWrite::Locked));

    let err = fx
        .storage
        .delete_student(fx.branch_a, student)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Conflict(_)));

    assert!(fx.storage.get_student(fx.branch_a, student).await.unwrap().is_some());
    assert!(fx.storage.get_invoice(fx.branch_a, invoice.id).await.unwrap().is_some());
    assert!(
        fx.storage
            .get_payment(fx.branch_a, receipt.payment.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_unpaid_invoice_edit_and_delete() {
    let fx = setup().await;
    let student = seed_student(&fx.storage, fx.branch_a, "A-001").await;
    let invoice = fx
        .storage
        .create_invoice(fx.branch_a, invoice_for(student, "INV-1-20250601-OPEN01", 80.0))
        .await
        .unwrap();

    let edited = fx
        .storage
        .update_invoice(fx.branch_a, invoice.id, Some("2025-07-31".to_string()), None)
        .await
        .unwrap();
    let InvoiceWrite::Done(edited) = edited else {
        panic!("expected unpaid invoice to be editable");
    };
    assert_eq!(edited.due_date, "2025-07-31");

    let foreign = fx.storage.cancel_invoice(fx.branch_b, invoice.id).await.unwrap();
    assert!(matches!(foreign, InvoiceWrite::NotFound));

    let removed = fx.storage.delete_invoice(fx.branch_a, invoice.id).await.unwrap();
    assert!(matches!(removed, InvoiceWrite::Done(())));
    assert!(fx.storage.get_invoice(fx.branch_a, invoice.id).await.unwrap().is_none());

    // 无账单后学生可删除
    assert!(fx.storage.delete_student(fx.branch_a, student).await.unwrap());
}

#[tokio::test]
async fn test_campaign_send_resolves_audience() {
    let fx = setup().await;
    let (class, section_a) = seed_section(&fx.storage, fx.branch_a, 30).await;
    let section_b = add_section(&fx.storage, fx.branch_a, class, "B").await;
    let empty_section = add_section(&fx.storage, fx.branch_a, class, "C").await;

    let reachable = seed_student(&fx.storage, fx.branch_a, "A-001").await;
    let no_email = seed_student_with(&fx.storage, fx.branch_a, "A-002", None).await;
    let other_section = seed_student(&fx.storage, fx.branch_a, "A-003").await;
    seed_student(&fx.storage, fx.branch_a, "A-004").await;

    for (student, section) in [
        (reachable, section_a),
        (no_email, section_a),
        (other_section, section_b),
    ] {
        let saved = fx
            .storage
            .create_enrollment(fx.branch_a, enrollment(student, section))
            .await
            .unwrap();
        assert!(matches!(saved, EnrollmentWrite::Saved(_)));
    }

    // 分组对象：缺少邮箱的学生计入 skipped
    let by_section = fx
        .storage
        .create_campaign(fx.branch_a, campaign(Audience::Section, Some(section_a)))
        .await
        .unwrap();
    let CampaignSend::Sent(sent) = fx
        .storage
        .send_campaign(fx.branch_a, by_section.id)
        .await
        .unwrap()
    else {
        panic!("expected section campaign to be sent");
    };
    assert_eq!(sent.queued, 1);
    assert_eq!(sent.skipped, 1);
    assert_eq!(sent.campaign.status, CampaignStatus::Sent);
    assert!(sent.campaign.sent_at.is_some());

    let messages = fx
        .storage
        .list_messages_with_pagination(
            fx.branch_a,
            MessageListParams {
                campaign_id: Some(by_section.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(messages.items.len(), 1);
    assert_eq!(messages.items[0].student_id, Some(reachable));
    assert_eq!(messages.items[0].recipient, "A-001@example.com");

    let again = fx
        .storage
        .send_campaign(fx.branch_a, by_section.id)
        .await
        .unwrap();
    assert!(matches!(again, CampaignSend::AlreadySent));

    // 班级对象覆盖其下所有分组，未注册学生不在其中
    let by_class = fx
        .storage
        .create_campaign(fx.branch_a, campaign(Audience::Class, Some(class)))
        .await
        .unwrap();
    let CampaignSend::Sent(sent) = fx
        .storage
        .send_campaign(fx.branch_a, by_class.id)
        .await
        .unwrap()
    else {
        panic!("expected class campaign to be sent");
    };
    assert_eq!(sent.queued, 2);
    assert_eq!(sent.skipped, 1);

    // 无收件人时保持草稿
    let nobody = fx
        .storage
        .create_campaign(fx.branch_a, campaign(Audience::Section, Some(empty_section)))
        .await
        .unwrap();
    let outcome = fx.storage.send_campaign(fx.branch_a, nobody.id).await.unwrap();
    assert!(matches!(outcome, CampaignSend::NoRecipients));
    let draft = fx
        .storage
        .get_campaign(fx.branch_a, nobody.id)
        .await
        .unwrap()
        .expect("campaign");
    assert_eq!(draft.status, CampaignStatus::Draft);
    assert!(draft.sent_at.is_none());

    let cross = fx.storage.send_campaign(fx.branch_b, nobody.id).await.unwrap();
    assert!(matches!(cross, CampaignSend::NotFound));
}

#[tokio::test]
async fn test_bulk_marks_upsert_counts() {
    let fx = setup().await;
    let (class, _) = seed_section(&fx.storage, fx.branch_a, 30).await;
    let first = seed_student(&fx.storage, fx.branch_a, "A-001").await;
    let second = seed_student(&fx.storage, fx.branch_a, "A-002").await;

    let subject = fx
        .storage
        .create_subject(
            fx.branch_a,
            CreateSubjectRequest {
                code: "mathematics".to_string(),
                name: "Mathematics".to_string(),
                min_grade: None,
                max_grade: None,
            },
        )
        .await
        .unwrap();
    let exam = fx
        .storage
        .create_exam(
            fx.branch_a,
            CreateExamRequest {
                class_id: class,
                subject_id: subject.id,
                name: "Unit test 1".to_string(),
                exam_date: "2025-07-10".to_string(),
                max_marks: 50.0,
                pass_marks: 20.0,
            },
        )
        .await
        .unwrap();

    let entry = |student_id: i64, marks_obtained: f64| BulkMarkEntry {
        student_id,
        marks_obtained,
        remarks: None,
    };

    let initial = fx
        .storage
        .bulk_upsert_marks(fx.branch_a, &exam, vec![entry(first, 18.0)])
        .await
        .unwrap();
    assert_eq!((initial.created, initial.updated), (1, 0));
    assert!(!initial.items[0].passed);

    let regraded = fx
        .storage
        .bulk_upsert_marks(fx.branch_a, &exam, vec![entry(first, 42.0), entry(second, 25.0)])
        .await
        .unwrap();
    assert_eq!((regraded.created, regraded.updated), (1, 1));
    assert_eq!(regraded.exam_id, exam.id);

    let stored = fx.storage.list_marks_for_exam(fx.branch_a, &exam).await.unwrap();
    assert_eq!(stored.len(), 2);
    let first_mark = stored
        .iter()
        .find(|m| m.student_id == first)
        .expect("first student mark");
    assert_eq!(first_mark.marks_obtained, 42.0);
    assert!(first_mark.passed);

    // 班级与科目均被考试引用
    assert_eq!(
        fx.storage.list_class_subject_ids(fx.branch_a, class).await.unwrap(),
        vec![subject.id]
    );
    assert_eq!(
        fx.storage
            .list_subject_grade_levels(fx.branch_a, subject.id)
            .await
            .unwrap(),
        vec![5]
    );

    let err = fx
        .storage
        .delete_subject(fx.branch_a, subject.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Conflict(_)));

    // 考试删除时其成绩一并删除
    assert!(fx.storage.delete_exam(fx.branch_a, exam.id).await.unwrap());
    assert!(fx.storage.list_class_subject_ids(fx.branch_a, class).await.unwrap().is_empty());
    assert!(fx.storage.delete_subject(fx.branch_a, subject.id).await.unwrap());

    let renamed = fx
        .storage
        .update_class(
            fx.branch_a,
            class,
            UpdateClassRequest {
                grade_level: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("class");
    assert_eq!(renamed.grade_level, 6);
}
