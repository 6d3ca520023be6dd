// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lexaid status` command implementation.
//!
//! Probes the legal service's health endpoint and reports whether it is
//! reachable, degraded or down.

use std::io::IsTerminal;

use lexaid_client::HttpLegalService;
use lexaid_config::LexaidConfig;
use lexaid_core::{HealthStatus, LegalService, LexaidError};
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub reachable: bool,
    pub status: String,
    pub detail: Option<String>,
    pub base_url: String,
}

impl StatusResponse {
    fn from_result(base_url: &str, result: &Result<HealthStatus, LexaidError>) -> Self {
        let (reachable, status, detail) = match result {
            Ok(HealthStatus::Healthy) => (true, "healthy", None),
            Ok(HealthStatus::Degraded(reason)) => (true, "degraded", Some(reason.clone())),
            Ok(HealthStatus::Unhealthy(reason)) => (true, "unhealthy", Some(reason.clone())),
            Err(e) => (false, "unreachable", Some(e.to_string())),
        };
        Self {
            reachable,
            status: status.to_string(),
            detail,
            base_url: base_url.to_string(),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Run the `lexaid status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(config: &LexaidConfig, json: bool, plain: bool) -> Result<(), LexaidError> {
    let service = HttpLegalService::new(config)?;
    let result = service.health_check().await;
    let response = StatusResponse::from_result(service.client().base_url().as_str(), &result);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&response, use_color);
    }
    Ok(())
}

fn print_status(response: &StatusResponse, use_color: bool) {
    println!();
    println!("  lexaid status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        let state = if response.is_healthy() {
            format!("{} {}", "✓".green(), response.status.green())
        } else if response.reachable {
            format!("{} {}", "!".yellow(), response.status.yellow())
        } else {
            format!("{} {}", "✗".red(), response.status.red())
        };
        println!("    State:    {state}");
    } else {
        let tag = if response.is_healthy() {
            "[OK]"
        } else if response.reachable {
            "[WARN]"
        } else {
            "[FAIL]"
        };
        println!("    State:    {tag} {}", response.status);
    }

    if let Some(detail) = &response.detail {
        println!("    Detail:   {detail}");
    }
    println!("    Service:  {}", response.base_url);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_response_serializes() {
        let resp = StatusResponse::from_result("http://localhost:8000/api/", &Ok(HealthStatus::Healthy));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"reachable\":true"));
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"detail\":null"));
        assert!(resp.is_healthy());
    }

    #[test]
    fn degraded_keeps_reason() {
        let resp = StatusResponse::from_result(
            "http://svc/",
            &Ok(HealthStatus::Degraded("database disconnected".into())),
        );
        assert!(resp.reachable);
        assert!(!resp.is_healthy());
        assert_eq!(resp.detail.as_deref(), Some("database disconnected"));
    }

    #[test]
    fn transport_error_is_unreachable() {
        let err = LexaidError::transport("connection refused", std::io::Error::other("refused"));
        let resp = StatusResponse::from_result("http://svc/", &Err(err));
        assert!(!resp.reachable);
        assert_eq!(resp.status, "unreachable");
        assert!(resp.detail.unwrap().contains("connection refused"));
    }
}
