// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams of the workspace.
//!
//! Traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn LegalService>`.

pub mod service;

pub use service::LegalService;
