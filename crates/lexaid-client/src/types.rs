// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies that exist only on the wire.
//!
//! Domain payloads (analysis, advice, documents, templates, resources) are
//! shared from `lexaid-core`; the types here cover the envelopes around them.

use lexaid_core::{HealthStatus, Identifier, IssueSubmission, Urgency};
use serde::{Deserialize, Serialize};

/// Body of `POST analyze`.
///
/// Optional fields are always present and `null` when unset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub description: &'a str,
    pub location: Option<&'a str>,
    pub email: Option<&'a str>,
    pub urgency: Urgency,
}

impl<'a> From<&'a IssueSubmission> for AnalyzeRequest<'a> {
    fn from(submission: &'a IssueSubmission) -> Self {
        Self {
            description: submission.description.trim(),
            location: submission.location.as_deref(),
            email: submission.email.as_deref(),
            urgency: submission.urgency,
        }
    }
}

/// Body of `POST advice`.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceRequest<'a> {
    pub issue_id: &'a Identifier,
}

/// Response of `GET health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub database_connected: Option<bool>,
    #[serde(default)]
    pub llm_available: Option<bool>,
}

impl HealthResponse {
    /// Folds the reported flags into a [`HealthStatus`].
    ///
    /// A false component flag degrades an otherwise healthy status.
    pub fn into_status(self) -> HealthStatus {
        let mut problems = Vec::new();
        if self.database_connected == Some(false) {
            problems.push("database disconnected");
        }
        if self.llm_available == Some(false) {
            problems.push("language model unavailable");
        }

        match self.status.to_ascii_lowercase().as_str() {
            "healthy" | "ok" if problems.is_empty() => HealthStatus::Healthy,
            "healthy" | "ok" | "degraded" => {
                if problems.is_empty() {
                    HealthStatus::Degraded("service reports degraded".to_string())
                } else {
                    HealthStatus::Degraded(problems.join(", "))
                }
            }
            other => HealthStatus::Unhealthy(format!("service reports `{other}`")),
        }
    }
}

/// Error body shape used by the service for non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: serde_json::Value,
}

impl ApiErrorResponse {
    /// Human-readable detail; structured details are rendered as compact JSON.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
