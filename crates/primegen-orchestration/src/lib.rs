//! # primegen-orchestration
//!
//! Pipeline wiring, thread lifecycle, and run reporting.

pub mod interfaces;
pub mod pipeline;

pub use interfaces::{ResultPresenter, RunReport, Termination};
pub use pipeline::run_pipeline;
