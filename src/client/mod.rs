//! Backend API client
//!
//! This module provides:
//! - Local validation of source files before upload
//! - Typed requests for the optimize and compare endpoints
//! - Response parsing into validated types
//! - A blocking HTTP implementation of [`Backend`]

pub mod http;
pub mod request;
pub mod response;

#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpBackend;
pub use request::{CompareRequest, ModelKind, OptimizeRequest, SourceFile};
pub use response::{
    BaselineOutcome, CompareResponse, HealthStatus, MethodMetrics, MethodOutcome,
    OptimizeResponse, ReportedImprovement,
};

use crate::error::IrisError;

/// Operations the optimization service offers
pub trait Backend {
    /// Check whether the service is up. Never fails; an unreachable service
    /// is reported through [`HealthStatus::available`].
    fn health(&self) -> HealthStatus;

    /// Predict a pass sequence for a source file
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, IrisError>;

    /// Compile and measure predicted passes against the standard levels
    fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, IrisError>;
}
