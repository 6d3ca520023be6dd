// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for the intake shell.
//!
//! Every function returns a `String` so the shell decides where it goes.

use std::fmt::Write as _;

use colored::Colorize;
use lexaid_core::{
    AdviceResult, AnalysisResult, DocumentTemplate, GeneratedDocument, HealthStatus, Identifier,
    LexaidError, ResourceEntry, View,
};

pub fn analysis(issue_id: &Identifier, analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Case".bold(), issue_id.to_string().cyan());
    let _ = writeln!(out, "  category:   {}", analysis.category_label());
    let _ = writeln!(out, "  confidence: {}%", analysis.confidence_percent());
    let _ = writeln!(out, "  complexity: {}", analysis.estimated_complexity);
    if !analysis.suggested_actions.is_empty() {
        let _ = writeln!(out, "{}", "Suggested actions".bold());
        for action in &analysis.suggested_actions {
            let _ = writeln!(out, "  - {action}");
        }
    }
    out
}

pub fn advice(advice: &AdviceResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Advice".bold());
    let _ = writeln!(out, "{}", advice.advice);
    if !advice.next_steps.is_empty() {
        let _ = writeln!(out, "{}", "Next steps".bold());
        for (i, step) in advice.next_steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {step}", i + 1);
        }
    }
    if !advice.relevant_laws.is_empty() {
        let _ = writeln!(out, "{}", "Relevant laws".bold());
        for law in &advice.relevant_laws {
            let _ = writeln!(out, "  - {law}");
        }
    }
    out
}

/// Numbered list of generated documents; `link` resolves each download URL.
pub fn documents(docs: &[GeneratedDocument], link: impl Fn(&GeneratedDocument) -> String) -> String {
    if docs.is_empty() {
        return format!("{}\n", "No documents generated yet.".dimmed());
    }
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({})",
            i + 1,
            doc.file_name.bold(),
            doc.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out, "     {}", link(doc).underline());
    }
    out
}

pub fn templates(templates: &[DocumentTemplate]) -> String {
    if templates.is_empty() {
        return format!("{}\n", "No templates available.".dimmed());
    }
    let mut out = String::new();
    for template in templates {
        let _ = write!(out, "  [{}] {}", template.id.to_string().cyan(), template.name);
        if let Some(category) = &template.category {
            let _ = write!(out, " {}", format!("({category})").dimmed());
        }
        out.push('\n');
        if let Some(description) = &template.description {
            let _ = writeln!(out, "      {description}");
        }
    }
    out
}

pub fn resources(resources: &[ResourceEntry]) -> String {
    if resources.is_empty() {
        return format!("{}\n", "No matching resources.".dimmed());
    }
    let mut out = String::new();
    for resource in resources {
        let _ = writeln!(out, "  {}", resource.name.bold());
        if let Some(description) = &resource.description {
            let _ = writeln!(out, "      {description}");
        }
        let contact: Vec<&str> = [&resource.phone, &resource.email, &resource.website]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect();
        if !contact.is_empty() {
            let _ = writeln!(out, "      {}", contact.join(" | "));
        }
    }
    out
}

/// One line listing every view; the active one is marked, unreachable ones dimmed.
pub fn views(active: View, enabled: &[View]) -> String {
    let labels: Vec<String> = View::ALL
        .iter()
        .map(|view| {
            let name = view.to_string();
            if *view == active {
                format!("[{}]", name.green().bold())
            } else if enabled.contains(view) {
                name
            } else {
                name.dimmed().to_string()
            }
        })
        .collect();
    format!("{}\n", labels.join("  "))
}

pub fn health(status: &HealthStatus) -> String {
    match status {
        HealthStatus::Healthy => format!("{}\n", "healthy".green()),
        HealthStatus::Degraded(reason) => format!("{} ({reason})\n", "degraded".yellow()),
        HealthStatus::Unhealthy(reason) => format!("{} ({reason})\n", "unhealthy".red()),
    }
}

/// Remote failures show the recorded user-facing message; local ones show the error itself.
pub fn error(err: &LexaidError, recorded: Option<&str>) -> String {
    match (err, recorded) {
        (LexaidError::Service { .. }, Some(message)) => {
            format!("{}: {message}\n", "error".red())
        }
        _ if err.is_local() => format!("{}: {err}\n", "note".yellow()),
        _ => format!("{}: {err}\n", "error".red()),
    }
}
