// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake workflow for the Lexaid legal-aid client.
//!
//! The [`IssueWorkflow`] is the central coordinator that:
//! - Validates submissions and gates remote calls behind a loading flag
//! - Calls the [`LegalService`](lexaid_core::LegalService) for analysis, advice and documents
//! - Records results in the session's [`CaseRecord`](lexaid_core::CaseRecord)
//! - Advances the [`ViewRouter`] on each successful transition
//! - Discards responses that arrive after a reset

pub mod controller;
pub mod router;
pub mod stage;

pub use controller::{failure_message, IssueWorkflow, WorkflowSnapshot, EMPTY_DESCRIPTION_MESSAGE};
pub use router::ViewRouter;
pub use stage::{Stage, StageEvent};
