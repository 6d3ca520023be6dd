// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the issue workflow controller against the mock service.

use lexaid_config::WorkflowConfig;
use lexaid_core::{
    CaseRecord, DocumentType, Identifier, IssueSubmission, LexaidError, Operation, Urgency, View,
};
use lexaid_test_utils::{fixtures, MockCall, MockLegalService, TestHarness};
use lexaid_workflow::{Stage, EMPTY_DESCRIPTION_MESSAGE};
use proptest::prelude::*;
use tracing_test::traced_test;

#[tokio::test]
async fn blank_description_is_rejected_locally() {
    let h = TestHarness::new();
    let err = h
        .workflow
        .submit_issue(IssueSubmission::new("   \n\t "))
        .await
        .unwrap_err();

    assert!(matches!(err, LexaidError::Validation(_)));
    assert_eq!(h.workflow.error().as_deref(), Some(EMPTY_DESCRIPTION_MESSAGE));
    assert_eq!(h.mock.calls(MockCall::Analyze), 0);
    assert_eq!(h.workflow.stage(), Stage::Idle);
    assert!(!h.workflow.is_loading());
}

#[tokio::test]
async fn successful_submission_opens_case() {
    let h = TestHarness::new();
    h.mock
        .push_analyze(Ok(fixtures::outcome("abc123", "housing")))
        .await;

    let submission =
        IssueSubmission::new("Landlord won't return deposit").with_urgency(Urgency::High);
    let analysis = h.workflow.submit_issue(submission.clone()).await.unwrap();

    let case = h.workflow.case();
    assert_eq!(analysis.category, "housing");
    assert_eq!(case.issue_id(), Some(&Identifier::from("abc123")));
    assert_eq!(case.analysis().map(|a| a.category.as_str()), Some("housing"));
    assert_eq!(case.submission(), &submission);
    assert!(case.error().is_none());
    assert_eq!(h.workflow.active_view(), View::Analysis);
    assert_eq!(h.workflow.stage(), Stage::Analyzed);
    assert!(!h.workflow.is_loading());
    assert_eq!(h.mock.submissions().await, vec![submission]);
}

#[tokio::test]
async fn failed_first_submission_returns_to_idle() {
    let h = TestHarness::new();
    h.mock
        .push_analyze(Err(MockLegalService::server_error()))
        .await;

    let err = h
        .workflow
        .submit_issue(IssueSubmission::new("Boss withheld my pay"))
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(500));
    assert_eq!(
        h.workflow.error().as_deref(),
        Some("Failed to analyze your issue. Please try again.")
    );
    assert!(h.workflow.case().issue_id().is_none());
    assert_eq!(h.workflow.stage(), Stage::Idle);
    assert_eq!(h.workflow.active_view(), View::Submit);
    assert!(!h.workflow.is_loading());
}

#[tokio::test]
async fn transport_failure_uses_the_same_message() {
    let h = TestHarness::new();
    h.mock
        .push_analyze(Err(MockLegalService::connection_error()))
        .await;

    let err = h
        .workflow
        .submit_issue(IssueSubmission::new("Debt collector calls nightly"))
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.http_status(), None);
    assert_eq!(
        h.workflow.error().as_deref(),
        Some("Failed to analyze your issue. Please try again.")
    );
}

#[tokio::test]
async fn stage_calls_without_case_are_no_ops() {
    let h = TestHarness::new();

    let advice = h.workflow.request_advice().await.unwrap_err();
    let document = h
        .workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap_err();

    assert!(matches!(
        advice,
        LexaidError::NoActiveCase {
            operation: Operation::RequestAdvice
        }
    ));
    assert!(matches!(
        document,
        LexaidError::NoActiveCase {
            operation: Operation::GenerateDocument
        }
    ));
    assert_eq!(h.mock.stage_calls(), 0);
    assert!(h.workflow.case().is_empty());
    assert_eq!(h.workflow.stage(), Stage::Idle);
    assert_eq!(h.workflow.active_view(), View::Submit);
}

#[tokio::test]
async fn advice_success_moves_to_advice_view() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();

    let advice = h.workflow.request_advice().await.unwrap();

    assert_eq!(advice, fixtures::advice());
    assert_eq!(h.mock.advice_requests().await, vec![Identifier::from("abc123")]);
    assert_eq!(h.workflow.case().advice(), Some(&fixtures::advice()));
    assert_eq!(h.workflow.stage(), Stage::Advised);
    assert_eq!(h.workflow.active_view(), View::Advice);
    assert_eq!(h.workflow.enabled_views(), View::ALL.to_vec());
}

#[tokio::test]
async fn advice_failure_keeps_analysis() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.mock.push_advice(Err(MockLegalService::server_error())).await;

    h.workflow.request_advice().await.unwrap_err();

    let case = h.workflow.case();
    assert!(case.analysis().is_some());
    assert!(case.advice().is_none());
    assert_eq!(
        case.error(),
        Some("Failed to generate advice. Please try again.")
    );
    assert!(!h.workflow.is_loading());
    assert_eq!(h.workflow.stage(), Stage::Analyzed);
    assert_eq!(h.workflow.active_view(), View::Analysis);
}

#[tokio::test]
async fn next_attempt_clears_previous_error() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.mock.push_advice(Err(MockLegalService::server_error())).await;
    h.workflow.request_advice().await.unwrap_err();
    assert!(h.workflow.error().is_some());

    h.workflow.request_advice().await.unwrap();
    assert!(h.workflow.error().is_none());
}

#[tokio::test]
async fn generate_appends_without_dedupe() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();

    let template = Identifier::Number(2);
    let first = h
        .workflow
        .generate_document(template.clone(), None)
        .await
        .unwrap();
    let second = h
        .workflow
        .generate_document(template.clone(), None)
        .await
        .unwrap();

    let documents = h.workflow.case().documents().to_vec();
    assert_eq!(documents, vec![first, second]);
    assert_eq!(h.workflow.active_view(), View::Documents);
    assert_eq!(h.workflow.stage(), Stage::Analyzed);

    let requests = h.mock.document_requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.template_id == template
        && r.issue_id == "abc123"
        && r.document_type == DocumentType::DemandLetter));
}

#[tokio::test]
async fn generate_uses_configured_default_type() {
    let h = TestHarness::builder()
        .with_config(WorkflowConfig {
            default_document_type: DocumentType::Notice,
            ..WorkflowConfig::default()
        })
        .build();
    h.open_case("abc123", "housing").await.unwrap();

    h.workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap();
    h.workflow
        .generate_document(Identifier::Number(1), Some(DocumentType::Petition))
        .await
        .unwrap();

    let types: Vec<DocumentType> = h
        .mock
        .document_requests()
        .await
        .into_iter()
        .map(|r| r.document_type)
        .collect();
    assert_eq!(types, vec![DocumentType::Notice, DocumentType::Petition]);
}

#[tokio::test]
async fn generate_after_advice_stays_advised() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.workflow.request_advice().await.unwrap();

    h.workflow
        .generate_document(Identifier::Number(3), None)
        .await
        .unwrap();
    assert_eq!(h.workflow.stage(), Stage::Advised);
}

#[tokio::test]
async fn generate_failure_leaves_documents_unchanged() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap();
    h.workflow.navigate(View::Resources).unwrap();
    h.mock
        .push_generate(Err(MockLegalService::server_error()))
        .await;

    h.workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap_err();

    assert_eq!(h.workflow.case().documents().len(), 1);
    assert_eq!(
        h.workflow.error().as_deref(),
        Some("Failed to generate document. Please try again.")
    );
    assert_eq!(h.workflow.active_view(), View::Resources);
    assert_eq!(h.workflow.stage(), Stage::Analyzed);
}

#[tokio::test]
async fn second_call_while_loading_is_rejected() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.mock.hold();

    let advice = h.workflow.request_advice();
    let probe = async {
        h.wait_until_loading().await;
        assert_eq!(h.workflow.stage(), Stage::RequestingAdvice);

        let again = h.workflow.request_advice().await;
        let generate = h
            .workflow
            .generate_document(Identifier::Number(1), None)
            .await;
        let submit = h
            .workflow
            .submit_issue(IssueSubmission::new("Another issue"))
            .await;
        let blank = h.workflow.submit_issue(IssueSubmission::new("")).await;
        h.mock.release();
        (again, generate, submit, blank)
    };

    let (first, (again, generate, submit, blank)) = tokio::join!(advice, probe);

    assert!(first.is_ok());
    for rejected in [again.map(|_| ()), generate.map(|_| ()), submit.map(|_| ())] {
        assert!(matches!(rejected, Err(LexaidError::Busy { .. })));
    }
    // Rejected at the gate before validation runs.
    assert!(matches!(blank, Err(LexaidError::Busy { .. })));
    assert!(h.workflow.error().is_none());
    assert_eq!(h.mock.calls(MockCall::Advice), 1);
    assert_eq!(h.mock.calls(MockCall::Generate), 0);
    assert_eq!(h.mock.calls(MockCall::Analyze), 1);
    assert!(!h.workflow.is_loading());
}

#[tokio::test]
async fn navigation_is_allowed_while_loading() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.mock.hold();

    let advice = h.workflow.request_advice();
    let probe = async {
        h.wait_until_loading().await;
        h.workflow.navigate(View::Resources).unwrap();
        let snapshot = h.workflow.snapshot();
        h.mock.release();
        snapshot
    };
    let (result, snapshot) = tokio::join!(advice, probe);

    result.unwrap();
    assert!(snapshot.loading);
    assert_eq!(snapshot.active_view, View::Resources);
    assert_eq!(snapshot.stage, Stage::RequestingAdvice);
    // Success still advances the view.
    assert_eq!(h.workflow.active_view(), View::Advice);
}

#[tokio::test]
async fn reset_yields_initial_state() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.workflow.request_advice().await.unwrap();
    h.workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap();

    h.workflow.reset();

    assert_eq!(h.workflow.case(), CaseRecord::new());
    assert_eq!(h.workflow.active_view(), View::Submit);
    assert_eq!(h.workflow.stage(), Stage::Idle);
    assert!(!h.workflow.is_loading());
}

#[tokio::test]
#[traced_test]
async fn reset_during_flight_discards_late_response() {
    let h = TestHarness::new();
    h.mock
        .push_analyze(Ok(fixtures::outcome("late", "employment")))
        .await;
    h.mock.hold();

    let submit = h
        .workflow
        .submit_issue(IssueSubmission::new("Boss withheld my pay"));
    let probe = async {
        h.wait_until_loading().await;
        h.workflow.reset();
        assert!(!h.workflow.is_loading());
        h.mock.release();
    };
    let (result, ()) = tokio::join!(submit, probe);

    assert!(matches!(
        result,
        Err(LexaidError::Superseded {
            operation: Operation::SubmitIssue
        })
    ));
    assert!(h.workflow.case().is_empty());
    assert_eq!(h.workflow.stage(), Stage::Idle);
    assert_eq!(h.workflow.active_view(), View::Submit);
    assert!(logs_contain("discarding response for a reset case"));
}

#[tokio::test]
async fn new_operation_after_reset_is_not_blocked_by_stale_flight() {
    let h = TestHarness::new();
    h.open_case("old", "housing").await.unwrap();
    h.mock.hold();

    let stale = h.workflow.request_advice();
    let fresh = async {
        h.wait_until_loading().await;
        h.workflow.reset();
        h.mock.release();
        h.open_case("new", "employment").await
    };
    let (stale, fresh) = tokio::join!(stale, fresh);

    assert!(matches!(stale, Err(LexaidError::Superseded { .. })));
    assert_eq!(fresh.unwrap().category, "employment");
    let case = h.workflow.case();
    assert_eq!(case.issue_id(), Some(&Identifier::from("new")));
    assert!(case.advice().is_none());
    assert_eq!(h.workflow.stage(), Stage::Analyzed);
}

#[tokio::test]
async fn resubmission_starts_a_new_case() {
    let h = TestHarness::new();
    h.open_case("first", "housing").await.unwrap();
    h.workflow.request_advice().await.unwrap();
    h.workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap();

    h.open_case("second", "employment").await.unwrap();

    let case = h.workflow.case();
    assert_eq!(case.issue_id(), Some(&Identifier::from("second")));
    assert!(case.advice().is_none());
    assert!(case.documents().is_empty());
    assert_eq!(h.workflow.stage(), Stage::Analyzed);
}

#[tokio::test]
async fn failed_resubmission_keeps_existing_case() {
    let h = TestHarness::new();
    h.open_case("first", "housing").await.unwrap();
    h.workflow.request_advice().await.unwrap();
    h.mock
        .push_analyze(Err(MockLegalService::server_error()))
        .await;

    h.workflow
        .submit_issue(IssueSubmission::new("Different problem"))
        .await
        .unwrap_err();

    let case = h.workflow.case();
    assert_eq!(case.issue_id(), Some(&Identifier::from("first")));
    assert!(case.advice().is_some());
    assert_eq!(h.workflow.stage(), Stage::Advised);
    assert!(case.error().is_some());
}

#[tokio::test]
async fn navigation_to_disabled_view_is_rejected() {
    let h = TestHarness::new();
    let err = h.workflow.navigate(View::Analysis).unwrap_err();
    assert!(matches!(err, LexaidError::InvalidView { view: View::Analysis }));
    assert_eq!(h.workflow.active_view(), View::Submit);

    h.open_case("abc123", "housing").await.unwrap();
    h.workflow.navigate(View::Submit).unwrap();
    h.workflow.navigate(View::Analysis).unwrap();
    assert!(h.workflow.navigate(View::Advice).is_err());
    assert_eq!(h.workflow.active_view(), View::Analysis);
    assert_eq!(h.mock.stage_calls(), 1);
}

#[tokio::test]
async fn reference_data_replaces_lists() {
    let h = TestHarness::new();
    h.mock
        .push_templates(Ok(vec![fixtures::template(1, "Demand letter")]))
        .await;
    h.mock
        .push_resources(Ok(vec![fixtures::resource(1, "Tenant Union", &["housing"])]))
        .await;
    h.workflow.load_reference_data().await;

    h.mock
        .push_templates(Ok(vec![
            fixtures::template(2, "Notice"),
            fixtures::template(3, "Petition"),
        ]))
        .await;
    h.mock
        .push_resources(Ok(vec![fixtures::resource(2, "Wage Clinic", &["employment"])]))
        .await;
    h.workflow.load_reference_data().await;

    let names: Vec<String> = h.workflow.templates().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Notice", "Petition"]);
    assert_eq!(h.workflow.resources().len(), 1);
    assert_eq!(h.workflow.resources()[0].name, "Wage Clinic");
}

#[tokio::test]
#[traced_test]
async fn reference_data_failure_keeps_previous_lists() {
    let h = TestHarness::new();
    h.mock
        .push_templates(Ok(vec![fixtures::template(1, "Demand letter")]))
        .await;
    h.mock
        .push_resources(Ok(vec![fixtures::resource(1, "Tenant Union", &["housing"])]))
        .await;
    h.workflow.load_reference_data().await;

    h.mock
        .push_templates(Err(MockLegalService::server_error()))
        .await;
    h.mock
        .push_resources(Err(MockLegalService::connection_error()))
        .await;
    h.workflow.load_reference_data().await;

    assert_eq!(h.workflow.templates().len(), 1);
    assert_eq!(h.workflow.resources().len(), 1);
    assert!(h.workflow.error().is_none());
    assert!(logs_contain("failed to fetch templates"));
    assert!(logs_contain("failed to fetch resources"));
}

#[tokio::test]
async fn reference_data_survives_reset_and_ignores_loading() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    h.mock
        .push_templates(Ok(vec![fixtures::template(1, "Demand letter")]))
        .await;

    h.mock.hold();
    let advice = h.workflow.request_advice();
    let refresh = async {
        h.wait_until_loading().await;
        let reference = h.workflow.load_reference_data();
        let release = async {
            h.wait_for_calls(MockCall::Templates, 1).await;
            h.wait_for_calls(MockCall::Resources, 1).await;
            h.mock.release();
        };
        tokio::join!(reference, release);
    };
    let (advice, ()) = tokio::join!(advice, refresh);
    advice.unwrap();

    h.workflow.reset();
    assert_eq!(h.workflow.templates().len(), 1);
}

#[tokio::test]
async fn resources_filter_by_category() {
    let h = TestHarness::new();
    h.mock
        .push_resources(Ok(vec![
            fixtures::resource(1, "Tenant Union", &["housing", "tenant_rights"]),
            fixtures::resource(2, "Wage Clinic", &["employment"]),
            fixtures::resource(3, "Community Law Center", &["Housing", "family_law"]),
        ]))
        .await;
    h.workflow.load_reference_data().await;

    let names: Vec<String> = h
        .workflow
        .resources_for_category("housing")
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Tenant Union", "Community Law Center"]);
    assert!(h.workflow.resources_for_category("immigration").is_empty());
}

#[tokio::test]
async fn download_is_not_a_stage_operation() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();
    let document = h
        .workflow
        .generate_document(Identifier::Number(1), None)
        .await
        .unwrap();
    let before = h.workflow.snapshot();

    let bytes = h.workflow.download_document(&document).await.unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(h.workflow.snapshot(), before);
    assert_eq!(h.workflow.download_link(&document), document.download_url);
}

#[tokio::test]
#[traced_test]
async fn transitions_are_logged() {
    let h = TestHarness::new();
    h.open_case("abc123", "housing").await.unwrap();

    assert!(logs_contain("operation started"));
    assert!(logs_contain("case opened"));
    assert!(logs_contain("issue_id=abc123"));
}

proptest! {
    #[test]
    fn whitespace_descriptions_never_reach_the_service(description in "[ \t\r\n]{0,24}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let h = TestHarness::new();
            let result = h.workflow.submit_issue(IssueSubmission::new(description)).await;
            assert!(matches!(result, Err(LexaidError::Validation(_))));
            assert_eq!(h.mock.calls(MockCall::Analyze), 0);
            assert_eq!(h.workflow.error().as_deref(), Some(EMPTY_DESCRIPTION_MESSAGE));
            assert!(!h.workflow.is_loading());
        });
    }

    #[test]
    fn descriptions_are_sent_verbatim(description in "[a-z]{1,12}( [a-z]{1,12}){0,5}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let h = TestHarness::new();
            h.workflow
                .submit_issue(IssueSubmission::new(description.clone()))
                .await
                .unwrap();
            let sent = h.mock.submissions().await;
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].description, description);
        });
    }
}
