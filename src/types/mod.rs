pub mod config;
pub mod inputs;
pub mod scoring;
