pub mod config;
pub mod day_count;
pub mod types;
