pub mod alarm;
pub mod auth;
pub mod health;
