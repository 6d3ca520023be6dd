// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which view is active, and which views the current case enables.

use lexaid_core::{CaseRecord, LexaidError, View};
use tracing::debug;

/// Active-view holder for one session.
///
/// Enablement is derived from the [`CaseRecord`] on every query, so it can
/// never drift from the case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRouter {
    active: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// Whether `view` can be shown for `case`.
    pub fn is_enabled(view: View, case: &CaseRecord) -> bool {
        match view {
            View::Analysis => case.analysis().is_some(),
            View::Advice => case.advice().is_some(),
            View::Submit | View::Documents | View::Resources => true,
        }
    }

    /// Enabled views in display order.
    pub fn enabled_views(case: &CaseRecord) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|view| Self::is_enabled(*view, case))
            .collect()
    }

    /// User navigation. Disabled views are rejected and the active view is kept.
    pub fn navigate(&mut self, view: View, case: &CaseRecord) -> Result<(), LexaidError> {
        if !Self::is_enabled(view, case) {
            debug!(%view, active = %self.active, "navigation to disabled view rejected");
            return Err(LexaidError::InvalidView { view });
        }
        self.active = view;
        Ok(())
    }

    /// Controller-directed move after a successful transition.
    pub(crate) fn advance(&mut self, view: View) {
        debug!(from = %self.active, to = %view, "active view advanced");
        self.active = view;
    }

    pub(crate) fn reset(&mut self) {
        self.active = View::Submit;
    }
}
