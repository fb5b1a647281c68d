pub mod auth;

pub mod tenants;

pub mod branches;

pub mod users;

pub mod students;

pub mod teachers;

pub mod classes;

pub mod sections;

pub mod subjects;

pub mod enrollments;

pub mod exams;

pub mod marks;

pub mod attendance;

pub mod fee_structures;

pub mod invoices;

pub mod payments;

pub mod campaigns;

pub mod messages;

pub mod timetables;

pub mod dashboard;

pub mod system;

pub mod frontend;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use branches::configure_branches_routes;
pub use campaigns::configure_campaigns_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use enrollments::configure_enrollments_routes;
pub use exams::configure_exams_routes;
pub use fee_structures::configure_fee_structures_routes;
pub use frontend::configure_frontend_routes;
pub use invoices::configure_invoices_routes;
pub use marks::configure_marks_routes;
pub use messages::configure_messages_routes;
pub use payments::configure_payments_routes;
pub use sections::configure_sections_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teachers_routes;
pub use tenants::configure_tenants_routes;
pub use timetables::configure_timetables_routes;
pub use users::configure_user_routes;
