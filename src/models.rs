use serde::{Deserialize, Serialize};

use crate::chain::IntermediateSteps;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskParams {
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_steps: Option<IntermediateSteps>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub database: &'static str,
}
