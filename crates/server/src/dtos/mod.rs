pub mod auth;
pub mod course;
pub mod directory;
pub mod enrollment;
pub mod hod;
pub mod import;
pub mod registration;
