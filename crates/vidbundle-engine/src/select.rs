//! Greedy selection of candidates into one bundle

use serde::Serialize;

use crate::context::SizeWindow;
use crate::exit_codes::ExitCode;
use crate::scan::CandidateFile;

/// Files chosen for one bundle, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub files: Vec<CandidateFile>,
    pub total_bytes: u64,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// What a run would do with the current source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Nothing eligible fit under the maximum.
    NoFilesSelected,
    /// The greedy pass stopped below the minimum.
    InsufficientSize { total_bytes: u64 },
    /// The selection lies inside the window and can be packed.
    Ready(Selection),
}

/// Single greedy pass in the given order.
///
/// Stops as soon as the running total reaches `window.min_bytes`. Otherwise an
/// eligible candidate is taken when it keeps the total at or under
/// `window.max_bytes`; candidates that do not fit are skipped and the pass
/// continues.
#[must_use]
pub fn select_greedy(candidates: &[CandidateFile], window: SizeWindow) -> Selection {
    let mut selection = Selection::default();

    for candidate in candidates {
        if selection.total_bytes >= window.min_bytes {
            break;
        }
        if !candidate.eligible_by_age {
            tracing::debug!(file = %candidate.file_name, "skipping: modified after age cutoff");
            continue;
        }
        match selection.total_bytes.checked_add(candidate.size_bytes) {
            Some(total) if total <= window.max_bytes => {
                tracing::debug!(file = %candidate.file_name, size = candidate.size_bytes, total, "selected");
                selection.total_bytes = total;
                selection.files.push(candidate.clone());
            }
            _ => {
                tracing::debug!(file = %candidate.file_name, size = candidate.size_bytes, "skipping: would exceed maximum size");
            }
        }
    }

    selection
}

impl Decision {
    /// Exit code a run ending in this decision reports.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NoFilesSelected => ExitCode::NO_FILES_SELECTED,
            Self::InsufficientSize { .. } => ExitCode::INSUFFICIENT_SIZE,
            Self::Ready(_) => ExitCode::SUCCESS,
        }
    }

    /// Classify a finished selection against the window.
    #[must_use]
    pub fn from_selection(selection: Selection, window: SizeWindow) -> Self {
        if selection.is_empty() {
            Self::NoFilesSelected
        } else if selection.total_bytes < window.min_bytes {
            Self::InsufficientSize {
                total_bytes: selection.total_bytes,
            }
        } else {
            Self::Ready(selection)
        }
    }
}
