pub mod config;
pub mod log;
pub mod one_time;
pub mod recurring;
pub mod resolve;
pub mod users;
