// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned service payloads.

use chrono::{TimeZone, Utc};

use lexaid_core::{
    AdviceResult, AnalysisResult, AnalyzeOutcome, DocumentTemplate, GeneratedDocument, Identifier,
    ResourceEntry,
};

pub fn outcome(issue_id: impl Into<Identifier>, category: &str) -> AnalyzeOutcome {
    AnalyzeOutcome {
        issue_id: issue_id.into(),
        analysis: AnalysisResult {
            category: category.to_string(),
            confidence: 0.87,
            estimated_complexity: "moderate".to_string(),
            suggested_actions: vec![
                "Gather your lease and payment records".to_string(),
                "Send a written demand to the landlord".to_string(),
            ],
        },
    }
}

pub fn advice() -> AdviceResult {
    AdviceResult {
        advice: "Your landlord must return the deposit or itemize deductions.".to_string(),
        next_steps: vec!["Send a demand letter".to_string()],
        relevant_laws: vec!["Security deposit statute".to_string()],
    }
}

pub fn document(id: i64) -> GeneratedDocument {
    GeneratedDocument {
        id: Identifier::Number(id),
        file_name: format!("demand_letter_{id}.pdf"),
        generated_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 10, 30, 0)
            .single()
            .unwrap_or_default(),
        download_url: format!("/api/documents/{id}/download"),
        template_id: None,
        document_type: None,
    }
}

pub fn template(id: i64, name: &str) -> DocumentTemplate {
    DocumentTemplate {
        id: Identifier::Number(id),
        name: name.to_string(),
        description: Some(format!("{name} template")),
        category: Some("housing".to_string()),
        required_fields: Vec::new(),
    }
}

pub fn resource(id: i64, name: &str, categories: &[&str]) -> ResourceEntry {
    ResourceEntry {
        id: Identifier::Number(id),
        name: name.to_string(),
        description: Some(format!("{name} offers free consultations")),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        phone: Some("555-0100".to_string()),
        email: None,
        website: None,
        organization_type: None,
        address: None,
        jurisdiction: None,
    }
}
