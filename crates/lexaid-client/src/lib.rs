// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP implementation of the [`LegalService`] trait.
//!
//! [`HttpLegalService`] maps each trait operation onto one endpoint of the
//! legal service API, resolved against the configured base URL.

pub mod client;
pub mod types;

use async_trait::async_trait;
use lexaid_config::LexaidConfig;
use lexaid_core::{
    AdviceResult, AnalyzeOutcome, DocumentRequest, DocumentTemplate, GeneratedDocument,
    HealthStatus, Identifier, IssueSubmission, LegalService, LexaidError, ResourceEntry,
};
use tracing::{debug, info, warn};

use crate::client::LegalServiceClient;
use crate::types::{AdviceRequest, AnalyzeRequest, HealthResponse};

/// Legal service reached over HTTP.
pub struct HttpLegalService {
    client: LegalServiceClient,
}

impl HttpLegalService {
    /// Creates the service from the loaded configuration.
    pub fn new(config: &LexaidConfig) -> Result<Self, LexaidError> {
        let client = LegalServiceClient::new(&config.service)?;
        info!(
            base_url = %client.base_url(),
            timeout_secs = config.service.timeout_secs,
            "legal service client initialized"
        );
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: LegalServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &LegalServiceClient {
        &self.client
    }
}

#[async_trait]
impl LegalService for HttpLegalService {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_templates(&self) -> Result<Vec<DocumentTemplate>, LexaidError> {
        let templates: Vec<DocumentTemplate> = self.client.get_json("templates").await?;
        debug!(count = templates.len(), "templates fetched");
        Ok(templates)
    }

    async fn list_resources(&self) -> Result<Vec<ResourceEntry>, LexaidError> {
        let resources: Vec<ResourceEntry> = self.client.get_json("resources").await?;
        debug!(count = resources.len(), "resources fetched");
        Ok(resources)
    }

    async fn analyze_issue(
        &self,
        submission: &IssueSubmission,
    ) -> Result<AnalyzeOutcome, LexaidError> {
        let mut outcome: AnalyzeOutcome = self
            .client
            .post_json("analyze", &AnalyzeRequest::from(submission))
            .await?;

        let confidence = outcome.analysis.confidence;
        if !(0.0..=1.0).contains(&confidence) {
            warn!(confidence, "analysis confidence out of range, clamping");
            outcome.analysis.confidence = if confidence.is_nan() {
                0.0
            } else {
                confidence.clamp(0.0, 1.0)
            };
        }
        Ok(outcome)
    }

    async fn request_advice(&self, issue_id: &Identifier) -> Result<AdviceResult, LexaidError> {
        self.client
            .post_json("advice", &AdviceRequest { issue_id })
            .await
    }

    async fn generate_document(
        &self,
        request: &DocumentRequest,
    ) -> Result<GeneratedDocument, LexaidError> {
        self.client.post_json("generate", request).await
    }

    async fn download_document(
        &self,
        document: &GeneratedDocument,
    ) -> Result<Vec<u8>, LexaidError> {
        self.client.get_bytes(&document.download_url).await
    }

    fn document_link(&self, document: &GeneratedDocument) -> String {
        match self.client.resolve(&document.download_url) {
            Ok(url) => url.to_string(),
            Err(_) => document.download_url.clone(),
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, LexaidError> {
        match self.client.get_json::<HealthResponse>("health").await {
            Ok(response) => {
                if let Some(version) = &response.version {
                    debug!(version, "service version");
                }
                Ok(response.into_status())
            }
            Err(e) if e.http_status().is_some() => Ok(HealthStatus::Unhealthy(e.to_string())),
            Err(e) => Err(e),
        }
    }
}
