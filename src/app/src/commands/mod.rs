pub mod preferences;
pub mod schedule;
pub mod upload;
