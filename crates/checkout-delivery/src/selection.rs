//! Submission state for the shopper's shipping-method choice.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Submitting,
}

/// Tracks one selection at a time and the last submission error.
///
/// `Idle → Submitting` on a non-empty selection, back to `Idle` on success or
/// failure. An empty selection is a no-op that still clears the error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingSelection {
    state: SelectionState,
    error: Option<String>,
}

impl ShippingSelection {
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == SelectionState::Submitting
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Starts a selection. Returns the option id to submit, or `None` when
    /// the selection is empty and nothing should be sent.
    pub fn begin(&mut self, option_id: Option<&str>) -> Option<String> {
        self.error = None;
        match option_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                self.state = SelectionState::Submitting;
                Some(id.to_owned())
            }
            None => {
                self.state = SelectionState::Idle;
                None
            }
        }
    }

    pub fn succeed(&mut self) {
        self.state = SelectionState::Idle;
        self.error = None;
    }

    pub fn fail(&mut self, error: &impl Display) {
        self.state = SelectionState::Idle;
        self.error = Some(error.to_string());
    }
}
