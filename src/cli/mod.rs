pub mod chunks;
pub mod config;
pub mod info;
pub mod progress;
pub mod tag;
