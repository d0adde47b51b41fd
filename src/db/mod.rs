pub mod initialize;
pub mod log;
pub mod migrate;
pub mod one_time;
pub mod pool;
pub mod recurring;
pub mod stats;
pub mod users;
