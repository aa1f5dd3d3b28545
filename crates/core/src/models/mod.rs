pub mod alarm;
pub mod days;
pub mod session;
pub mod time;
pub mod wake;
