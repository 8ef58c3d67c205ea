pub mod app_error;
pub mod token;
pub mod use_cases;
