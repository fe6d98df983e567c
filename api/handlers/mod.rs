pub mod status;
pub mod projects;
