//! Request/response facade for a transport layer.
//!
//! An HTTP handler (or any other caller) deserializes an
//! [`OptimizeRequest`], calls [`optimize`] or [`plan_simple`] and
//! serializes the [`OptimizeResponse`]. Input validation and parameter
//! validation both happen here, before any planning starts.
//!
//! # Wire shape
//!
//! ```json
//! {
//!   "households": [{"id": 1, "communityId": 10, "hoursGiven": 4, "hoursReceived": 0}],
//!   "requests": [{"id": 7, "householdId": 1, "taskType": "SOWING", "estimatedHours": 3,
//!                 "urgency": "HIGH",
//!                 "window": {"start": "2025-03-01T00:00:00Z", "end": "2025-03-02T00:00:00Z"}}],
//!   "parameters": {"populationSize": 30, "maxGenerations": 50, "seed": 42}
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{GaParameters, ParameterError, ParameterSpec};
use crate::ga::{evaluate, FitnessDetail, GaRunner};
use crate::models::{AidAssignment, Household, Request};
use crate::scheduler::SimplePlanner;
use crate::validation::{validate_input, ValidationError};

/// Planning input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// Participating households.
    pub households: Vec<Household>,
    /// Requests to plan.
    pub requests: Vec<Request>,
    /// Optimizer parameters; defaults when absent.
    #[serde(default)]
    pub parameters: Option<ParameterSpec>,
}

/// Planning output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    /// Assignments of the chosen plan.
    pub assignments: Vec<AidAssignment>,
    /// Scalar fitness of the plan.
    pub fitness: f64,
    /// Fitness breakdown.
    pub fitness_detail: FitnessDetail,
}

/// Rejected planning input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl OptimizeRequest {
    /// Creates a request with default parameters.
    pub fn new(households: Vec<Household>, requests: Vec<Request>) -> Self {
        Self {
            households,
            requests,
            parameters: None,
        }
    }

    /// Sets the parameters.
    pub fn with_parameters(mut self, parameters: ParameterSpec) -> Self {
        self.parameters = Some(parameters);
        self
    }

    fn validated_parameters(&self) -> Result<GaParameters, ServiceError> {
        if let Err(errors) = validate_input(&self.households, &self.requests) {
            warn!(event = "input_rejected", errors = errors.len());
            return Err(ServiceError::InvalidInput(errors));
        }
        let spec = self.parameters.clone().unwrap_or_default();
        spec.validate().map_err(|e| {
            warn!(event = "parameters_rejected", error = %e);
            ServiceError::from(e)
        })
    }
}

/// Validates the request and runs the genetic optimizer.
pub fn optimize(request: &OptimizeRequest) -> Result<OptimizeResponse, ServiceError> {
    let params = request.validated_parameters()?;
    let outcome = GaRunner::run(&request.households, &request.requests, &params);

    Ok(OptimizeResponse {
        assignments: outcome.plan.into_assignments(),
        fitness: outcome.fitness,
        fitness_detail: outcome.detail,
    })
}

/// Validates the request and runs the greedy baseline planner.
///
/// The plan is scored with the same weights and cap the optimizer would
/// use; `fitnessDetail.generation` is 0.
pub fn plan_simple(request: &OptimizeRequest) -> Result<OptimizeResponse, ServiceError> {
    let params = request.validated_parameters()?;
    let plan = SimplePlanner::new().plan(&request.households, &request.requests);
    let (fitness, fitness_detail) = evaluate(
        &request.households,
        &request.requests,
        &plan,
        &params.weights(),
        params.max_hours_per_household(),
    );
    info!(event = "simple_plan", fitness, assignments = plan.assignment_count());

    Ok(OptimizeResponse {
        assignments: plan.into_assignments(),
        fitness,
        fitness_detail,
    })
}
