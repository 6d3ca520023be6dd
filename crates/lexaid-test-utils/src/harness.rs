// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for workflow integration testing.
//!
//! `TestHarness` wires an [`IssueWorkflow`] to a [`MockLegalService`] and
//! offers helpers for driving and observing it.

use std::sync::Arc;

use lexaid_config::WorkflowConfig;
use lexaid_core::{AnalysisResult, IssueSubmission, LexaidError};
use lexaid_workflow::IssueWorkflow;

use crate::fixtures;
use crate::mock_service::{MockCall, MockLegalService};

/// Upper bound on scheduler yields while waiting for a condition.
const MAX_YIELDS: usize = 10_000;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: WorkflowConfig,
    mock: MockLegalService,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: WorkflowConfig::default(),
            mock: MockLegalService::new(),
        }
    }

    /// Use a specific workflow configuration.
    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a pre-loaded mock service.
    pub fn with_mock(mut self, mock: MockLegalService) -> Self {
        self.mock = mock;
        self
    }

    pub fn build(self) -> TestHarness {
        let mock = Arc::new(self.mock);
        let workflow = IssueWorkflow::new(mock.clone(), &self.config);
        TestHarness { mock, workflow }
    }
}

/// A controller wired to a mock service.
pub struct TestHarness {
    pub mock: Arc<MockLegalService>,
    pub workflow: IssueWorkflow,
}

impl TestHarness {
    /// Create a builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with default configuration and an empty mock.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Submit a description and let the mock answer with `issue_id`/`category`.
    pub async fn open_case(
        &self,
        issue_id: &str,
        category: &str,
    ) -> Result<AnalysisResult, LexaidError> {
        self.mock
            .push_analyze(Ok(fixtures::outcome(issue_id, category)))
            .await;
        self.workflow
            .submit_issue(IssueSubmission::new("Landlord won't return deposit"))
            .await
    }

    /// Yield until the controller reports an outstanding operation.
    ///
    /// Panics if it never does; meant to run joined with the operation.
    pub async fn wait_until_loading(&self) {
        self.wait_until(|h| h.workflow.is_loading(), "controller to start loading")
            .await;
    }

    /// Yield until the mock has seen `count` calls of `call`.
    pub async fn wait_for_calls(&self, call: MockCall, count: usize) {
        self.wait_until(|h| h.mock.calls(call) >= count, "mock calls")
            .await;
    }

    async fn wait_until(&self, condition: impl Fn(&Self) -> bool, what: &str) {
        for _ in 0..MAX_YIELDS {
            if condition(self) {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("timed out waiting for {what}");
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
