pub mod alarm;
pub mod user;
