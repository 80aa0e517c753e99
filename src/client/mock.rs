//! Scripted backend for command tests

use super::request::{CompareRequest, OptimizeRequest};
use super::response::{CompareResponse, HealthStatus, OptimizeResponse};
use super::Backend;
use crate::error::IrisError;
use serde_json::Value;
use std::cell::RefCell;

/// Answers every call from canned JSON bodies and records what was asked
#[derive(Default)]
pub(crate) struct MockBackend {
    pub health: Option<Value>,
    pub optimize: Option<Value>,
    pub compare: Option<Value>,
    pub unreachable: bool,
    pub optimize_calls: RefCell<Vec<OptimizeRequest>>,
    pub compare_calls: RefCell<Vec<CompareRequest>>,
}

impl MockBackend {
    pub(crate) fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_optimize(body: Value) -> Self {
        Self {
            optimize: Some(body),
            ..Self::default()
        }
    }

    pub(crate) fn with_compare(body: Value) -> Self {
        Self {
            compare: Some(body),
            ..Self::default()
        }
    }

    fn down(endpoint: &str) -> IrisError {
        IrisError::BackendUnavailable {
            url: format!("http://mock{}", endpoint),
            reason: "connection refused or host unreachable".to_string(),
        }
    }
}

impl Backend for MockBackend {
    fn health(&self) -> HealthStatus {
        match (&self.health, self.unreachable) {
            (Some(body), false) => HealthStatus::from_json(body.clone()),
            _ => HealthStatus::unavailable(Self::down("/api/health").to_string()),
        }
    }

    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, IrisError> {
        self.optimize_calls.borrow_mut().push(request.clone());
        match (&self.optimize, self.unreachable) {
            (Some(body), false) => OptimizeResponse::from_json(body.clone()),
            _ => Err(Self::down("/api/optimize")),
        }
    }

    fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, IrisError> {
        self.compare_calls.borrow_mut().push(request.clone());
        match (&self.compare, self.unreachable) {
            (Some(body), false) => CompareResponse::from_json(body.clone()),
            _ => Err(Self::down("/api/compare")),
        }
    }
}
