// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lexaid integration tests.
//!
//! Provides a mock legal service and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without a running service.
//!
//! # Components
//!
//! - [`MockLegalService`] - Mock service with queued responses and a hold gate
//! - [`TestHarness`] - Workflow controller wired to the mock
//! - [`fixtures`] - Canned payloads

pub mod fixtures;
pub mod harness;
pub mod mock_service;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_service::{MockCall, MockLegalService};
