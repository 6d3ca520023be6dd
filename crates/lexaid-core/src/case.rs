// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The case record: everything a single legal-issue session accumulates.
//!
//! Mutators enforce the record's ordering invariants: analysis only arrives
//! together with an issue id, advice only after analysis, documents only once
//! an issue id exists. The workflow controller is the only owner that hands
//! out `&mut CaseRecord`; everyone else sees clones.

use serde::Serialize;

use crate::error::LexaidError;
use crate::types::{AdviceResult, AnalysisResult, AnalyzeOutcome, GeneratedDocument, Identifier, IssueSubmission};

/// Accumulated state of one case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseRecord {
    submission: IssueSubmission,
    issue_id: Option<Identifier>,
    analysis: Option<AnalysisResult>,
    advice: Option<AdviceResult>,
    documents: Vec<GeneratedDocument>,
    error: Option<String>,
}

impl CaseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last submission sent to the service.
    pub fn submission(&self) -> &IssueSubmission {
        &self.submission
    }

    pub fn issue_id(&self) -> Option<&Identifier> {
        self.issue_id.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn advice(&self) -> Option<&AdviceResult> {
        self.advice.as_ref()
    }

    pub fn documents(&self) -> &[GeneratedDocument] {
        &self.documents
    }

    /// Last user-visible failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the record equals a freshly created one.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Starts a case from a successful analysis.
    ///
    /// A new submission is a new case: advice and documents belonging to a
    /// previous issue id are dropped.
    pub fn open(&mut self, submission: IssueSubmission, outcome: AnalyzeOutcome) {
        self.submission = submission;
        self.issue_id = Some(outcome.issue_id);
        self.analysis = Some(outcome.analysis);
        self.advice = None;
        self.documents.clear();
    }

    /// Stores advice. Requires a prior analysis.
    pub fn record_advice(&mut self, advice: AdviceResult) -> Result<(), LexaidError> {
        if self.analysis.is_none() {
            return Err(LexaidError::Internal(
                "advice recorded before analysis".into(),
            ));
        }
        self.advice = Some(advice);
        Ok(())
    }

    /// Appends a document. Requires an issue id; never replaces or dedupes.
    pub fn push_document(&mut self, document: GeneratedDocument) -> Result<(), LexaidError> {
        if self.issue_id.is_none() {
            return Err(LexaidError::Internal(
                "document recorded without an issue id".into(),
            ));
        }
        self.documents.push(document);
        Ok(())
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns the record to its initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
