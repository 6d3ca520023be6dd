// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage FSM for one intake case.
//!
//! Resting stages: Idle -> Analyzed -> Advised. Each remote operation moves
//! the case into a busy stage and back out once the response arrives.
//! Failures return to the stage the operation started from.

use lexaid_core::{LexaidError, Operation};
use serde::Serialize;
use strum::Display;

/// Stages of the intake workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// No analysed case.
    #[default]
    Idle,
    /// Analyze call in flight.
    Submitting,
    /// Case has an id and analysis.
    Analyzed,
    /// Advice call in flight.
    RequestingAdvice,
    /// Case has advice.
    Advised,
    /// Generate call in flight.
    GeneratingDocument,
}

/// Inputs to [`Stage::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// An operation passed its preconditions and is about to call the service.
    Begin(Operation),
    /// The in-flight operation succeeded. `resume` is the stage it started from.
    Succeeded { operation: Operation, resume: Stage },
    /// The in-flight operation failed. `resume` is the stage it started from.
    Failed { resume: Stage },
    /// The case was cleared.
    Reset,
}

impl Stage {
    /// True while a remote operation is outstanding.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Stage::Submitting | Stage::RequestingAdvice | Stage::GeneratingDocument
        )
    }

    /// True once the case holds an issue id.
    pub fn has_case(self) -> bool {
        matches!(self, Stage::Analyzed | Stage::Advised)
    }

    /// The busy stage an operation runs in.
    pub fn in_flight_for(operation: Operation) -> Stage {
        match operation {
            Operation::SubmitIssue => Stage::Submitting,
            Operation::RequestAdvice => Stage::RequestingAdvice,
            Operation::GenerateDocument => Stage::GeneratingDocument,
        }
    }

    /// The single transition function.
    ///
    /// Rejected transitions leave the caller's stage untouched.
    pub fn on(self, event: StageEvent) -> Result<Stage, LexaidError> {
        match event {
            StageEvent::Reset => Ok(Stage::Idle),

            StageEvent::Begin(operation) if self.is_busy() => Err(LexaidError::Busy { operation }),
            StageEvent::Begin(Operation::SubmitIssue) => Ok(Stage::Submitting),
            StageEvent::Begin(operation) if !self.has_case() => {
                Err(LexaidError::NoActiveCase { operation })
            }
            StageEvent::Begin(operation) => Ok(Stage::in_flight_for(operation)),

            StageEvent::Succeeded { operation, resume } => {
                if self != Stage::in_flight_for(operation) {
                    return Err(LexaidError::Internal(format!(
                        "{operation} completed while the case was {self}"
                    )));
                }
                Ok(match operation {
                    Operation::SubmitIssue => Stage::Analyzed,
                    Operation::RequestAdvice => Stage::Advised,
                    Operation::GenerateDocument => resume,
                })
            }

            StageEvent::Failed { resume } if self.is_busy() && !resume.is_busy() => Ok(resume),
            StageEvent::Failed { resume } => Err(LexaidError::Internal(format!(
                "cannot fall back from {self} to {resume}"
            ))),
        }
    }
}
