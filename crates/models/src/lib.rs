pub mod course_status;
pub mod enrollment;
pub mod identity;
pub mod import;
pub mod semester;
