pub mod cli;
pub mod config;
pub mod engine;
pub mod report;
pub mod utils;
