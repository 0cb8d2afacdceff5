pub mod catalog;
pub mod directory;
pub mod enrollment;
pub mod identity;
pub mod import;
