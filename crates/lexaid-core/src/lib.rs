// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lexaid legal-aid intake workflow.
//!
//! This crate provides the case data model, the error type and the
//! [`LegalService`] trait that the HTTP client implements and the workflow
//! controller consumes.

pub mod case;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use case::CaseRecord;
pub use error::LexaidError;
pub use traits::LegalService;
pub use types::{
    AdviceResult, AnalysisResult, AnalyzeOutcome, DocumentRequest, DocumentTemplate,
    DocumentType, GeneratedDocument, HealthStatus, Identifier, IssueSubmission, Operation,
    ResourceEntry, Urgency, View,
};
