pub mod dashboard;
pub mod engagement;
pub mod insights;
