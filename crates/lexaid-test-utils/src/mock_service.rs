// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock legal service for deterministic testing.
//!
//! `MockLegalService` implements `LegalService` with per-operation response
//! queues, call counters and request capture. A gate can hold every call in
//! flight so tests can observe the controller while a request is outstanding.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};

use lexaid_core::{
    AdviceResult, AnalyzeOutcome, DocumentRequest, DocumentTemplate, GeneratedDocument,
    HealthStatus, Identifier, IssueSubmission, LegalService, LexaidError, ResourceEntry,
};

use crate::fixtures;

type Queue<T> = Mutex<VecDeque<Result<T, LexaidError>>>;

/// Operations the mock counts calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    Templates,
    Resources,
    Analyze,
    Advice,
    Generate,
    Download,
    Health,
}

impl MockCall {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }
}

/// A mock legal service that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue per operation. When a queue is
/// empty a default fixture is returned.
pub struct MockLegalService {
    templates: Queue<Vec<DocumentTemplate>>,
    resources: Queue<Vec<ResourceEntry>>,
    analyze: Queue<AnalyzeOutcome>,
    advice: Queue<AdviceResult>,
    generate: Queue<GeneratedDocument>,
    downloads: Queue<Vec<u8>>,
    health: Queue<HealthStatus>,
    calls: [AtomicUsize; MockCall::COUNT],
    submissions: Mutex<Vec<IssueSubmission>>,
    advice_requests: Mutex<Vec<Identifier>>,
    document_requests: Mutex<Vec<DocumentRequest>>,
    gate: watch::Sender<bool>,
}

impl MockLegalService {
    /// Create a mock with empty queues and an open gate.
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(VecDeque::new()),
            resources: Mutex::new(VecDeque::new()),
            analyze: Mutex::new(VecDeque::new()),
            advice: Mutex::new(VecDeque::new()),
            generate: Mutex::new(VecDeque::new()),
            downloads: Mutex::new(VecDeque::new()),
            health: Mutex::new(VecDeque::new()),
            calls: Default::default(),
            submissions: Mutex::new(Vec::new()),
            advice_requests: Mutex::new(Vec::new()),
            document_requests: Mutex::new(Vec::new()),
            gate: watch::Sender::new(true),
        }
    }

    /// An HTTP 500 failure, as the client reports it.
    pub fn server_error() -> LexaidError {
        LexaidError::status(500, "service returned 500 Internal Server Error: mock failure")
    }

    /// A transport failure (no response received).
    pub fn connection_error() -> LexaidError {
        LexaidError::transport(
            "HTTP request failed: connection refused",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        )
    }

    pub async fn push_templates(&self, response: Result<Vec<DocumentTemplate>, LexaidError>) {
        self.templates.lock().await.push_back(response);
    }

    pub async fn push_resources(&self, response: Result<Vec<ResourceEntry>, LexaidError>) {
        self.resources.lock().await.push_back(response);
    }

    pub async fn push_analyze(&self, response: Result<AnalyzeOutcome, LexaidError>) {
        self.analyze.lock().await.push_back(response);
    }

    pub async fn push_advice(&self, response: Result<AdviceResult, LexaidError>) {
        self.advice.lock().await.push_back(response);
    }

    pub async fn push_generate(&self, response: Result<GeneratedDocument, LexaidError>) {
        self.generate.lock().await.push_back(response);
    }

    pub async fn push_download(&self, response: Result<Vec<u8>, LexaidError>) {
        self.downloads.lock().await.push_back(response);
    }

    pub async fn push_health(&self, response: Result<HealthStatus, LexaidError>) {
        self.health.lock().await.push_back(response);
    }

    /// Number of times `call` has been invoked.
    pub fn calls(&self, call: MockCall) -> usize {
        self.calls[call.index()].load(Ordering::SeqCst)
    }

    /// Total calls across the stage operations (analyze, advice, generate).
    pub fn stage_calls(&self) -> usize {
        [MockCall::Analyze, MockCall::Advice, MockCall::Generate]
            .into_iter()
            .map(|c| self.calls(c))
            .sum()
    }

    pub async fn submissions(&self) -> Vec<IssueSubmission> {
        self.submissions.lock().await.clone()
    }

    pub async fn advice_requests(&self) -> Vec<Identifier> {
        self.advice_requests.lock().await.clone()
    }

    pub async fn document_requests(&self) -> Vec<DocumentRequest> {
        self.document_requests.lock().await.clone()
    }

    /// Hold every subsequent call until [`release`](Self::release).
    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    /// Let held and future calls proceed.
    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    async fn enter(&self, call: MockCall) {
        self.calls[call.index()].fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.subscribe();
        // The sender lives as long as `self`, so this only fails if the mock is gone.
        let _ = gate.wait_for(|open| *open).await;
    }

    async fn pop<T>(queue: &Queue<T>, fallback: impl FnOnce() -> T) -> Result<T, LexaidError> {
        queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(fallback()))
    }
}

impl Default for MockLegalService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LegalService for MockLegalService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_templates(&self) -> Result<Vec<DocumentTemplate>, LexaidError> {
        self.enter(MockCall::Templates).await;
        Self::pop(&self.templates, Vec::new).await
    }

    async fn list_resources(&self) -> Result<Vec<ResourceEntry>, LexaidError> {
        self.enter(MockCall::Resources).await;
        Self::pop(&self.resources, Vec::new).await
    }

    async fn analyze_issue(
        &self,
        submission: &IssueSubmission,
    ) -> Result<AnalyzeOutcome, LexaidError> {
        self.submissions.lock().await.push(submission.clone());
        self.enter(MockCall::Analyze).await;
        let n = self.calls(MockCall::Analyze) as i64;
        Self::pop(&self.analyze, || fixtures::outcome(Identifier::Number(n), "housing")).await
    }

    async fn request_advice(&self, issue_id: &Identifier) -> Result<AdviceResult, LexaidError> {
        self.advice_requests.lock().await.push(issue_id.clone());
        self.enter(MockCall::Advice).await;
        Self::pop(&self.advice, fixtures::advice).await
    }

    async fn generate_document(
        &self,
        request: &DocumentRequest,
    ) -> Result<GeneratedDocument, LexaidError> {
        self.document_requests.lock().await.push(request.clone());
        self.enter(MockCall::Generate).await;
        let n = self.calls(MockCall::Generate) as i64;
        Self::pop(&self.generate, || fixtures::document(n)).await
    }

    async fn download_document(
        &self,
        _document: &GeneratedDocument,
    ) -> Result<Vec<u8>, LexaidError> {
        self.enter(MockCall::Download).await;
        Self::pop(&self.downloads, || b"%PDF-1.4 mock".to_vec()).await
    }

    async fn health_check(&self) -> Result<HealthStatus, LexaidError> {
        self.enter(MockCall::Health).await;
        Self::pop(&self.health, || HealthStatus::Healthy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_responses_when_queues_empty() {
        let mock = MockLegalService::new();
        let outcome = mock
            .analyze_issue(&IssueSubmission::new("deposit"))
            .await
            .unwrap();
        assert_eq!(outcome.issue_id, Identifier::Number(1));
        assert!(mock.list_templates().await.unwrap().is_empty());
        assert_eq!(mock.calls(MockCall::Analyze), 1);
        assert_eq!(mock.calls(MockCall::Templates), 1);
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let mock = MockLegalService::new();
        mock.push_advice(Err(MockLegalService::server_error())).await;
        mock.push_advice(Ok(fixtures::advice())).await;

        let id = Identifier::Number(4);
        assert!(mock.request_advice(&id).await.is_err());
        assert!(mock.request_advice(&id).await.is_ok());
        assert_eq!(mock.advice_requests().await, vec![id.clone(), id]);
    }

    #[tokio::test]
    async fn held_calls_wait_for_release() {
        let mock = MockLegalService::new();
        mock.hold();

        let call = mock.health_check();
        let releaser = async {
            while mock.calls(MockCall::Health) == 0 {
                tokio::task::yield_now().await;
            }
            mock.release();
        };
        let (status, ()) = tokio::join!(call, releaser);
        assert_eq!(status.unwrap(), HealthStatus::Healthy);
    }
}
