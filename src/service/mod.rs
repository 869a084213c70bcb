//! Upload handling around the core pipeline
//!
//! Intake checks, configuration, orchestration and response shapes. This
//! is the layer a transport (CLI, HTTP handler) talks to.

pub mod config;
pub mod intake;
pub mod pipeline;
pub mod report;

pub use config::ServiceConfig;
pub use intake::{IntakeError, Upload};
pub use pipeline::{FrequencyPipeline, PipelineError};
pub use report::{AnalysisReport, ErrorReport, FileReport, Outcome};
