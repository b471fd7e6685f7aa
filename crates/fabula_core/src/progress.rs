//! Pipeline progress reporting types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which part of the pipeline is running.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Nothing has started
    #[default]
    Idle,
    /// Title and description
    Title,
    /// Character roster
    Characters,
    /// Scene outline
    Scenes,
    /// Writer credits
    Writers,
    /// Normalization and reconciliation
    Finalize,
    /// Story delivered
    Complete,
    /// Run halted by a fatal error
    Failed,
}

impl Phase {
    /// Whether no further transitions happen from this phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete | Phase::Failed)
    }
}

/// Snapshot of a run's progress. Ephemeral, never persisted.
///
/// # Examples
///
/// ```
/// use fabula_core::{Phase, PipelineProgress};
///
/// let progress = PipelineProgress::new(Phase::Scenes, 35, "Writing scenes");
/// assert_eq!(*progress.percent(), 35);
///
/// let failed = PipelineProgress::failed("boom");
/// assert_eq!(*failed.percent(), 0);
/// assert_eq!(*failed.phase(), Phase::Failed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PipelineProgress {
    percent: u8,
    label: String,
    phase: Phase,
}

impl PipelineProgress {
    /// Create a snapshot, capping percent at 100.
    pub fn new(phase: Phase, percent: u8, label: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            label: label.into(),
            phase,
        }
    }

    /// The state before any run.
    pub fn idle() -> Self {
        Self::new(Phase::Idle, 0, "")
    }

    /// Progress after a fatal error: reset to zero.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(Phase::Failed, 0, message)
    }
}

impl Default for PipelineProgress {
    fn default() -> Self {
        Self::idle()
    }
}
