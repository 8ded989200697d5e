//! Progress reports emitted while a sequencer command runs.

use super::ValidationError;

/// An immutable snapshot of how far a command has got.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandProgress {
    progress_percentage: f64,
    current_action: String,
}

impl CommandProgress {
    /// Creates a progress report.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when the percentage is outside
    /// `0.0..=100.0` (or NaN) and [`ValidationError::Empty`] when the action
    /// text is empty.
    pub fn new(
        progress_percentage: f64,
        current_action: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=100.0).contains(&progress_percentage) {
            return Err(ValidationError::OutOfRange {
                name: "progress_percentage",
                value: progress_percentage as i64,
                min: 0,
                max: 100,
            });
        }
        let current_action = current_action.into();
        if current_action.is_empty() {
            return Err(ValidationError::Empty("current_action"));
        }
        Ok(Self {
            progress_percentage,
            current_action,
        })
    }

    pub fn progress_percentage(&self) -> f64 {
        self.progress_percentage
    }

    pub fn current_action(&self) -> &str {
        &self.current_action
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
