//! Render sink capability interface.
//!
//! The picker core never draws anything. Each host environment implements
//! [`RenderSink`] once; the picker calls it to request list re-renders,
//! highlight application, and chip add/remove. The sink is handed in at
//! construction and owned by the picker for its lifetime.

use crate::entry::Entry;
use crate::search::SearchOutcome;

/// What the highlight cursor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTarget {
    /// A result row, by entry sequence index.
    Entry(usize),
    /// The create-option affordance.
    CreateOption,
}

/// The removable token representing one selected value in a multi-valued
/// picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// Sequence index of the selected entry.
    pub entry: usize,
    /// Display label.
    pub label: String,
    /// Whether the chip can be removed (disabled options cannot).
    pub removable: bool,
    /// Whether the chip is flagged for deletion by a pending backstroke.
    pub pending: bool,
}

/// Everything a sink needs to rebuild the result list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    /// Sequence indices of the rows to render, in original order, already
    /// truncated to the shown-results cap.
    pub rows: Vec<usize>,
    /// Label for the create-option affordance, when offered. Contains the
    /// literal query text.
    pub create_option_label: Option<String>,
    /// Message for the no-results state, when it applies.
    pub no_results_message: Option<String>,
}

/// Host-side rendering capability.
///
/// Implementations receive every visual consequence of a state change:
/// result list updates, highlight cursor moves, chip bookkeeping, and the
/// single-valued selection label. All methods are called on the host UI
/// thread, synchronously from whichever picker operation caused the change.
pub trait RenderSink {
    /// The result list changed; re-render it from `plan`.
    fn results_updated(&mut self, entries: &[Entry], outcome: &SearchOutcome, plan: &RenderPlan);

    /// The highlight cursor moved.
    fn highlight_changed(&mut self, target: Option<HighlightTarget>);

    /// A chip was added for a newly selected value.
    fn chip_added(&mut self, chip: &Chip);

    /// The chip for this entry was removed.
    fn chip_removed(&mut self, entry: usize);

    /// The chip's pending-deletion flag changed.
    fn chip_pending(&mut self, entry: usize, pending: bool);

    /// The single-valued selection label changed.
    fn selection_label_changed(&mut self, text: &str);

    /// Whether the host environment can render the picker at all.
    ///
    /// The factory refuses to build a picker when this returns `false`.
    fn supports_environment(&self) -> bool {
        true
    }
}

/// A sink that ignores everything. Useful for headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn results_updated(&mut self, _entries: &[Entry], _outcome: &SearchOutcome, _plan: &RenderPlan) {}

    fn highlight_changed(&mut self, _target: Option<HighlightTarget>) {}

    fn chip_added(&mut self, _chip: &Chip) {}

    fn chip_removed(&mut self, _entry: usize) {}

    fn chip_pending(&mut self, _entry: usize, _pending: bool) {}

    fn selection_label_changed(&mut self, _text: &str) {}
}
