pub mod alarm;
pub mod auth;
