// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Legal service trait: the request/response boundary to the remote
//! analysis, advice, document and resource service.

use async_trait::async_trait;

use crate::error::LexaidError;
use crate::types::{
    AdviceResult, AnalyzeOutcome, DocumentRequest, DocumentTemplate, GeneratedDocument,
    HealthStatus, Identifier, IssueSubmission, ResourceEntry,
};

/// Remote legal service.
///
/// Implementations perform exactly one request per call and never retry.
/// Any non-success status or transport failure is returned as
/// [`LexaidError::Service`].
#[async_trait]
pub trait LegalService: Send + Sync + 'static {
    /// Returns the human-readable name of this service implementation.
    fn name(&self) -> &str;

    /// Lists the document templates the service can render.
    async fn list_templates(&self) -> Result<Vec<DocumentTemplate>, LexaidError>;

    /// Lists the aid resources in the directory.
    async fn list_resources(&self) -> Result<Vec<ResourceEntry>, LexaidError>;

    /// Sends a submission for analysis and returns the new case id with its categorization.
    async fn analyze_issue(
        &self,
        submission: &IssueSubmission,
    ) -> Result<AnalyzeOutcome, LexaidError>;

    /// Requests detailed advice for an analysed case.
    async fn request_advice(&self, issue_id: &Identifier) -> Result<AdviceResult, LexaidError>;

    /// Renders a document from a template for a case.
    async fn generate_document(
        &self,
        request: &DocumentRequest,
    ) -> Result<GeneratedDocument, LexaidError>;

    /// Fetches the bytes of a generated document.
    async fn download_document(
        &self,
        document: &GeneratedDocument,
    ) -> Result<Vec<u8>, LexaidError>;

    /// Fetchable link for a generated document.
    ///
    /// The default returns `download_url` unchanged; HTTP implementations
    /// resolve it against their base URL.
    fn document_link(&self, document: &GeneratedDocument) -> String {
        document.download_url.clone()
    }

    /// Reports the service's current status.
    async fn health_check(&self) -> Result<HealthStatus, LexaidError>;
}
