pub mod auth_tokens;
pub mod batches;
pub mod course_batches;
pub mod course_statuses;
pub mod courses;
pub mod departments;
pub mod hods;
pub mod programs;
pub mod sem_reports;
pub mod students;
pub mod users;
