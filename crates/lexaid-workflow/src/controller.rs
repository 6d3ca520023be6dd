// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The issue workflow controller.
//!
//! [`IssueWorkflow`] owns one session's [`CaseRecord`], stage and view router.
//! Operations take `&self`: state lives behind a `std::sync::Mutex` that is
//! only held between awaits, so a reset or a navigation can run while a
//! service call is outstanding. Each operation captures the case generation
//! when it starts; a response whose generation no longer matches was
//! overtaken by a reset and is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lexaid_config::WorkflowConfig;
use lexaid_core::{
    AdviceResult, AnalysisResult, CaseRecord, DocumentRequest, DocumentTemplate, DocumentType,
    GeneratedDocument, HealthStatus, Identifier, IssueSubmission, LegalService, LexaidError,
    Operation, ResourceEntry, View,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::router::ViewRouter;
use crate::stage::{Stage, StageEvent};

/// Shown when a submission has no description.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please describe your legal issue";

/// User-visible message recorded when `operation` fails remotely.
pub fn failure_message(operation: Operation) -> &'static str {
    match operation {
        Operation::SubmitIssue => "Failed to analyze your issue. Please try again.",
        Operation::RequestAdvice => "Failed to generate advice. Please try again.",
        Operation::GenerateDocument => "Failed to generate document. Please try again.",
    }
}

/// Consistent copy of everything a presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSnapshot {
    pub stage: Stage,
    pub loading: bool,
    pub case: CaseRecord,
    pub active_view: View,
    pub enabled_views: Vec<View>,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    operation: Operation,
    generation: u64,
    resume: Stage,
}

/// Proof that an operation passed the loading gate.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    operation: Operation,
    generation: u64,
}

#[derive(Debug, Default)]
struct WorkflowState {
    case: CaseRecord,
    stage: Stage,
    in_flight: Option<InFlight>,
    generation: u64,
    router: ViewRouter,
    templates: Vec<DocumentTemplate>,
    resources: Vec<ResourceEntry>,
}

impl WorkflowState {
    fn ensure_not_loading(&self, operation: Operation) -> Result<(), LexaidError> {
        match self.in_flight {
            Some(current) => {
                debug!(%operation, in_flight = %current.operation, "rejected while loading");
                Err(LexaidError::Busy { operation })
            }
            None => Ok(()),
        }
    }

    fn active_issue(&self, operation: Operation) -> Result<Identifier, LexaidError> {
        self.case.issue_id().cloned().ok_or_else(|| {
            debug!(%operation, "no active case, ignoring");
            LexaidError::NoActiveCase { operation }
        })
    }

    /// Drops the case and any in-flight operation, returning the abandoned one.
    fn clear(&mut self) -> Option<InFlight> {
        let abandoned = self.in_flight.take();
        self.generation += 1;
        self.case.reset();
        self.stage = self.stage.on(StageEvent::Reset).unwrap_or_default();
        self.router.reset();
        abandoned
    }

    fn begin(&mut self, operation: Operation) -> Result<Ticket, LexaidError> {
        let next = self.stage.on(StageEvent::Begin(operation))?;
        self.case.clear_error();
        self.in_flight = Some(InFlight {
            operation,
            generation: self.generation,
            resume: self.stage,
        });
        info!(%operation, from = %self.stage, to = %next, generation = self.generation, "operation started");
        self.stage = next;
        Ok(Ticket {
            operation,
            generation: self.generation,
        })
    }

    /// Ends the flight `ticket` belongs to and returns its resume stage.
    fn settle(&mut self, ticket: Ticket) -> Result<Stage, LexaidError> {
        match self.in_flight {
            Some(flight) if flight.generation == ticket.generation => {
                self.in_flight = None;
                Ok(flight.resume)
            }
            _ => {
                debug!(
                    operation = %ticket.operation,
                    ticket_generation = ticket.generation,
                    generation = self.generation,
                    "discarding response for a reset case"
                );
                Err(LexaidError::Superseded {
                    operation: ticket.operation,
                })
            }
        }
    }

    fn succeed(&mut self, ticket: Ticket, resume: Stage, view: View) -> Result<(), LexaidError> {
        let next = self.stage.on(StageEvent::Succeeded {
            operation: ticket.operation,
            resume,
        })?;
        info!(operation = %ticket.operation, from = %self.stage, to = %next, "operation succeeded");
        self.stage = next;
        self.router.advance(view);
        Ok(())
    }

    fn fail(&mut self, ticket: Ticket, resume: Stage, err: &LexaidError) -> Result<(), LexaidError> {
        let next = self.stage.on(StageEvent::Failed { resume })?;
        warn!(
            operation = %ticket.operation,
            status = err.http_status(),
            error = %err,
            "operation failed"
        );
        self.stage = next;
        self.case.set_error(failure_message(ticket.operation));
        Ok(())
    }
}

/// Drives one intake session against a [`LegalService`].
pub struct IssueWorkflow {
    service: Arc<dyn LegalService>,
    default_document_type: DocumentType,
    state: Mutex<WorkflowState>,
}

impl IssueWorkflow {
    pub fn new(service: Arc<dyn LegalService>, config: &WorkflowConfig) -> Self {
        Self {
            service,
            default_document_type: config.default_document_type,
            state: Mutex::new(WorkflowState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends a submission for analysis and opens a new case from the result.
    ///
    /// A blank description is rejected locally. A failed resubmission keeps
    /// the existing case.
    pub async fn submit_issue(
        &self,
        submission: IssueSubmission,
    ) -> Result<AnalysisResult, LexaidError> {
        let operation = Operation::SubmitIssue;
        let ticket = {
            let mut state = self.state();
            state.ensure_not_loading(operation)?;
            if submission.is_blank() {
                state.case.set_error(EMPTY_DESCRIPTION_MESSAGE);
                debug!("blank description rejected");
                return Err(LexaidError::Validation(EMPTY_DESCRIPTION_MESSAGE.to_string()));
            }
            state.begin(operation)?
        };

        let result = self.service.analyze_issue(&submission).await;

        let mut state = self.state();
        let resume = state.settle(ticket)?;
        match result {
            Ok(outcome) => {
                let analysis = outcome.analysis.clone();
                info!(
                    issue_id = %outcome.issue_id,
                    category = %analysis.category,
                    confidence = analysis.confidence,
                    "case opened"
                );
                state.case.open(submission, outcome);
                state.succeed(ticket, resume, View::Analysis)?;
                Ok(analysis)
            }
            Err(err) => {
                state.fail(ticket, resume, &err)?;
                Err(err)
            }
        }
    }

    /// Requests advice for the active case.
    pub async fn request_advice(&self) -> Result<AdviceResult, LexaidError> {
        let operation = Operation::RequestAdvice;
        let (ticket, issue_id) = {
            let mut state = self.state();
            state.ensure_not_loading(operation)?;
            let issue_id = state.active_issue(operation)?;
            (state.begin(operation)?, issue_id)
        };

        let result = self.service.request_advice(&issue_id).await;

        let mut state = self.state();
        let resume = state.settle(ticket)?;
        match result {
            Ok(advice) => {
                state.case.record_advice(advice.clone())?;
                info!(%issue_id, next_steps = advice.next_steps.len(), "advice received");
                state.succeed(ticket, resume, View::Advice)?;
                Ok(advice)
            }
            Err(err) => {
                state.fail(ticket, resume, &err)?;
                Err(err)
            }
        }
    }

    /// Generates a document from a template for the active case.
    ///
    /// `None` uses the configured default document type. Advice is not required.
    pub async fn generate_document(
        &self,
        template_id: Identifier,
        document_type: Option<DocumentType>,
    ) -> Result<GeneratedDocument, LexaidError> {
        let operation = Operation::GenerateDocument;
        let (ticket, request) = {
            let mut state = self.state();
            state.ensure_not_loading(operation)?;
            let request = DocumentRequest {
                issue_id: state.active_issue(operation)?,
                template_id,
                document_type: document_type.unwrap_or(self.default_document_type),
            };
            (state.begin(operation)?, request)
        };

        let result = self.service.generate_document(&request).await;

        let mut state = self.state();
        let resume = state.settle(ticket)?;
        match result {
            Ok(document) => {
                state.case.push_document(document.clone())?;
                info!(
                    issue_id = %request.issue_id,
                    document_id = %document.id,
                    file_name = %document.file_name,
                    "document generated"
                );
                state.succeed(ticket, resume, View::Documents)?;
                Ok(document)
            }
            Err(err) => {
                state.fail(ticket, resume, &err)?;
                Err(err)
            }
        }
    }

    /// Clears the case and returns to the submit view.
    ///
    /// Any response still in flight is discarded when it arrives. Reference
    /// data is kept.
    pub fn reset(&self) {
        let mut state = self.state();
        let abandoned = state.clear();
        info!(
            generation = state.generation,
            abandoned = ?abandoned.map(|f| f.operation),
            "case reset"
        );
    }

    /// Fetches templates and resources concurrently.
    ///
    /// Each list is replaced on success and left unchanged on failure. Not
    /// gated by loading.
    pub async fn load_reference_data(&self) {
        let (templates, resources) =
            tokio::join!(self.service.list_templates(), self.service.list_resources());

        let mut state = self.state();
        match templates {
            Ok(templates) => {
                debug!(count = templates.len(), "templates loaded");
                state.templates = templates;
            }
            Err(err) => warn!(error = %err, "failed to fetch templates"),
        }
        match resources {
            Ok(resources) => {
                debug!(count = resources.len(), "resources loaded");
                state.resources = resources;
            }
            Err(err) => warn!(error = %err, "failed to fetch resources"),
        }
    }

    /// User navigation between views. Never touches the case or the service.
    pub fn navigate(&self, view: View) -> Result<(), LexaidError> {
        let mut state = self.state();
        let WorkflowState { router, case, .. } = &mut *state;
        router.navigate(view, case)
    }

    pub fn active_view(&self) -> View {
        self.state().router.active()
    }

    pub fn enabled_views(&self) -> Vec<View> {
        ViewRouter::enabled_views(&self.state().case)
    }

    pub fn stage(&self) -> Stage {
        self.state().stage
    }

    /// True while a stage operation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state().in_flight.is_some()
    }

    pub fn case(&self) -> CaseRecord {
        self.state().case.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().case.error().map(str::to_owned)
    }

    pub fn templates(&self) -> Vec<DocumentTemplate> {
        self.state().templates.clone()
    }

    pub fn resources(&self) -> Vec<ResourceEntry> {
        self.state().resources.clone()
    }

    /// Resources whose categories include `category` (case-insensitive).
    pub fn resources_for_category(&self, category: &str) -> Vec<ResourceEntry> {
        self.state()
            .resources
            .iter()
            .filter(|r| r.serves_category(category))
            .cloned()
            .collect()
    }

    /// Fetchable URL for a generated document.
    pub fn download_link(&self, document: &GeneratedDocument) -> String {
        self.service.document_link(document)
    }

    /// Fetches a generated document's bytes. Not a stage operation.
    pub async fn download_document(
        &self,
        document: &GeneratedDocument,
    ) -> Result<Vec<u8>, LexaidError> {
        self.service.download_document(document).await
    }

    pub async fn health_check(&self) -> Result<HealthStatus, LexaidError> {
        self.service.health_check().await
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.state();
        WorkflowSnapshot {
            stage: state.stage,
            loading: state.in_flight.is_some(),
            case: state.case.clone(),
            active_view: state.router.active(),
            enabled_views: ViewRouter::enabled_views(&state.case),
        }
    }
}
