//! primegen library — application logic for the prime generator binary.

pub mod app;
pub mod config;
pub mod errors;
