//! CommandExecutionManager: at most one command on the wire at a time.
//!
//! The PICAXE can only follow one conversation.  A second command started
//! while the first is still talking would reset the device with its own break
//! signal, so it is rejected with [`SequencerError::Busy`] instead of queued.
//!
//! Claiming the slot is a single compare-and-swap.  Releasing it is done by a
//! guard's `Drop`, so the slot frees up whether the command succeeds, fails,
//! is cancelled (its future dropped) or panics.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use super::commands::{CommandOutcome, SequencerCommand};
use super::sequencer::SequencerError;

/// Runs at most one [`SequencerCommand`] at a time.
#[derive(Debug, Default)]
pub struct CommandExecutionManager {
    running: AtomicBool,
}

impl CommandExecutionManager {
    /// Creates an idle manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a command is executing.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs `command` unless another command is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Busy`] immediately, without touching the
    /// channel, if a command is already running; otherwise whatever the
    /// command returns.
    pub async fn execute(
        &self,
        command: &dyn SequencerCommand,
    ) -> Result<CommandOutcome, SequencerError> {
        let Some(_guard) = RunningGuard::claim(&self.running) else {
            warn!(command = command.name(), "rejected: another command is running");
            return Err(SequencerError::Busy);
        };

        info!(command = command.name(), "command started");
        let result = command.execute().await;
        match &result {
            Ok(_) => info!(command = command.name(), "command completed"),
            Err(e) => warn!(command = command.name(), error = %e, "command failed"),
        }
        result
    }
}

/// Clears the running flag when dropped.
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
