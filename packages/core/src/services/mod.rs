pub mod file_source;
pub mod synthetic;
