//! The picker interaction state machine.
//!
//! [`Picker`] owns the option source, the flat entry list, and all
//! interaction state, composed from three orthogonal axes:
//!
//! - **Activation**: inactive until focused/clicked; while inactive every
//!   keyboard and search action is a no-op except re-activation.
//! - **Dropdown visibility**: opening runs a fresh search pass with the
//!   current query; closing clears the highlight cursor.
//! - **Highlight cursor**: points at zero-or-one visible, non-disabled
//!   result row (or the create-option affordance) while the dropdown is
//!   open.
//!
//! Selection mutations are written to the flat model and the backing source
//! in the same operation, so the two can never drift within a build.
//!
//! # Signals
//!
//! - `ready`: Emitted once construction completes
//! - `search_updated(String)`: Emitted on every search pass with the query
//! - `dropdown_opened` / `dropdown_closed`
//! - `no_results(String)`: Emitted when a search yields nothing
//! - `max_selected_reached`: Emitted when the selection cap rejects an action
//! - `selection_changed(SelectionChange)`: Emitted per select/deselect
//!
//! # Example
//!
//! ```
//! use arbor_picker::{
//!     KeyPressEvent, NullRenderSink, OptionData, Picker, PickerConfig, SelectSource,
//! };
//!
//! let source = SelectSource::new()
//!     .with_item(OptionData::new("Apple"))
//!     .with_item(OptionData::new("Banana"));
//!
//! let mut picker = Picker::create(
//!     source,
//!     PickerConfig::default().with_search_contains(true),
//!     Box::new(NullRenderSink),
//! )
//! .unwrap();
//!
//! picker.handle_focus();
//! picker.handle_key_press(&KeyPressEvent::text_input("an"));
//! assert_eq!(picker.last_outcome().result_count, 1);
//! ```

use std::time::{Duration, Instant};

use arbor_picker_core::{DeferredQueue, Signal};
use unicode_segmentation::UnicodeSegmentation;

use crate::builder::build_entries;
use crate::config::PickerConfig;
use crate::entry::Entry;
use crate::error::PickerError;
use crate::events::{Key, KeyPressEvent, KeyboardModifiers};
use crate::render::{Chip, HighlightTarget, RenderPlan, RenderSink};
use crate::search::{self, SearchOutcome};
use crate::source::{OptionData, SelectSource};

/// Delay before a blur is confirmed as leaving the widget.
pub const BLUR_CHECK_DELAY: Duration = Duration::from_millis(100);

/// Delay before re-searching after a clipboard paste/cut.
pub const PASTE_SEARCH_DELAY: Duration = Duration::from_millis(50);

/// Deferred work the host pumps via [`Picker::process_deferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Re-check activation after a blur has finished propagating.
    BlurCheck,
    /// Re-run search after a paste/cut has landed in the query.
    Research,
}

/// Payload of the `selection_changed` signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// The affected option's value.
    pub value: String,
    /// `true` for a selection, `false` for a deselection.
    pub selected: bool,
}

/// A searchable, keyboard-navigable selection widget core.
///
/// Built by [`Picker::create`]; dropping the picker disposes it. There is no
/// process-wide registry; each instance owns its source, entry list, and
/// render sink outright.
pub struct Picker {
    source: SelectSource,
    config: PickerConfig,
    entries: Vec<Entry>,
    sink: Box<dyn RenderSink>,

    query: String,
    outcome: SearchOutcome,
    shown_rows: Vec<usize>,

    active: bool,
    results_showing: bool,
    highlighted: Option<HighlightTarget>,
    pointer_over: bool,
    disabled: bool,

    chips: Vec<Chip>,
    pending_backstroke: Option<usize>,

    deferrals: DeferredQueue<DeferredAction>,

    /// Emitted once construction completes.
    pub ready: Signal<()>,
    /// Emitted on every search pass with the current query.
    pub search_updated: Signal<String>,
    /// Emitted when the dropdown opens.
    pub dropdown_opened: Signal<()>,
    /// Emitted when the dropdown closes.
    pub dropdown_closed: Signal<()>,
    /// Emitted when a search yields nothing, with the query.
    pub no_results: Signal<String>,
    /// Emitted when the selection cap rejects an action.
    pub max_selected_reached: Signal<()>,
    /// Emitted for every selection and deselection.
    pub selection_changed: Signal<SelectionChange>,
}

impl Picker {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build a picker over the given source.
    ///
    /// Fails when the sink reports an unusable host environment or the
    /// configuration carries a zero cap.
    pub fn create(
        source: SelectSource,
        config: PickerConfig,
        sink: Box<dyn RenderSink>,
    ) -> Result<Self, PickerError> {
        if !sink.supports_environment() {
            return Err(PickerError::UnsupportedHost);
        }
        if config.max_selected_options == Some(0) {
            return Err(PickerError::InvalidConfig(
                "max_selected_options must be at least 1".to_string(),
            ));
        }
        if config.max_shown_results == Some(0) {
            return Err(PickerError::InvalidConfig(
                "max_shown_results must be at least 1".to_string(),
            ));
        }

        let entries = build_entries(&source, &config);
        let mut picker = Self {
            source,
            config,
            entries,
            sink,
            query: String::new(),
            outcome: SearchOutcome::default(),
            shown_rows: Vec::new(),
            active: false,
            results_showing: false,
            highlighted: None,
            pointer_over: false,
            disabled: false,
            chips: Vec::new(),
            pending_backstroke: None,
            deferrals: DeferredQueue::new(),
            ready: Signal::new(),
            search_updated: Signal::new(),
            dropdown_opened: Signal::new(),
            dropdown_closed: Signal::new(),
            no_results: Signal::new(),
            max_selected_reached: Signal::new(),
            selection_changed: Signal::new(),
        };

        picker.rebuild_chips();
        picker.update_selection_label();
        picker.ready.emit(());
        Ok(picker)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The backing option source.
    pub fn source(&self) -> &SelectSource {
        &self.source
    }

    /// Mutable access to the backing source.
    ///
    /// After mutating, call [`Picker::options_changed`] so the flat model is
    /// rebuilt; it is never patched in place.
    pub fn source_mut(&mut self) -> &mut SelectSource {
        &mut self.source
    }

    /// The behavior configuration.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// The flat entry list from the most recent build.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The outcome of the most recent search pass.
    pub fn last_outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// The chips for the currently selected values, in entry order.
    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// Whether the widget currently holds focus-level activation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.results_showing
    }

    /// The highlight cursor.
    pub fn highlighted(&self) -> Option<HighlightTarget> {
        self.highlighted
    }

    /// Whether the whole widget is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the whole widget. Disabling deactivates it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.deactivate();
        }
    }

    // =========================================================================
    // Source lifecycle
    // =========================================================================

    /// Rebuild the flat entry list after the source changed.
    ///
    /// Chips are reconciled against the new selection state, and an open
    /// dropdown re-runs its search over the new entries.
    pub fn options_changed(&mut self) {
        self.entries = build_entries(&self.source, &self.config);
        self.pending_backstroke = None;
        self.rebuild_chips();
        self.update_selection_label();
        if self.results_showing {
            self.run_search();
        } else {
            self.set_highlight(None);
        }
    }

    fn rebuild_chips(&mut self) {
        for chip in std::mem::take(&mut self.chips) {
            self.sink.chip_removed(chip.entry);
        }
        if !self.source.multiple {
            return;
        }
        for entry in &self.entries {
            if let Some(item) = entry.as_item()
                && item.selected
            {
                let chip = Chip {
                    entry: item.index,
                    label: item.text.clone(),
                    removable: !item.effective_disabled(),
                    pending: false,
                };
                self.sink.chip_added(&chip);
                self.chips.push(chip);
            }
        }
    }

    fn update_selection_label(&mut self) {
        if self.source.multiple {
            return;
        }
        let label = self
            .entries
            .iter()
            .filter_map(Entry::as_item)
            .find(|item| item.selected)
            .map(|item| item.text.clone())
            .unwrap_or_else(|| self.config.placeholder_text_single.clone());
        self.sink.selection_label_changed(&label);
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Focus entered the widget.
    pub fn handle_focus(&mut self) {
        if self.disabled {
            return;
        }
        if !self.active {
            self.active = true;
            self.open_dropdown();
        }
    }

    /// Focus left the widget. Deactivation is confirmed by a deferred check
    /// so a click inside the widget can re-take focus first.
    pub fn handle_blur(&mut self) {
        self.deferrals.defer(BLUR_CHECK_DELAY, DeferredAction::BlurCheck);
    }

    /// The pointer entered the widget's bounds.
    pub fn handle_pointer_enter(&mut self) {
        self.pointer_over = true;
    }

    /// The pointer left the widget's bounds.
    pub fn handle_pointer_leave(&mut self) {
        self.pointer_over = false;
    }

    /// The widget shell was clicked.
    pub fn handle_click(&mut self) {
        if self.disabled {
            return;
        }
        self.active = true;
        if self.results_showing && !self.source.multiple {
            self.close_dropdown();
        } else {
            self.open_dropdown();
        }
    }

    fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.clear_pending_backstroke();
        self.close_dropdown();
        self.query.clear();
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Run all deferred actions that are due now.
    pub fn process_deferred(&mut self) {
        self.process_deferred_at(Instant::now());
    }

    /// Run all deferred actions due as of `now`.
    ///
    /// Stale actions are harmless: each re-checks current state instead of
    /// assuming the state that scheduled it.
    pub fn process_deferred_at(&mut self, now: Instant) {
        for action in self.deferrals.drain_expired_at(now) {
            match action {
                DeferredAction::BlurCheck => {
                    if !self.pointer_over {
                        self.deactivate();
                    }
                }
                DeferredAction::Research => {
                    if self.results_showing {
                        self.run_search();
                    }
                }
            }
        }
    }

    /// A clipboard paste landed in the search field; re-search shortly.
    pub fn handle_paste(&mut self) {
        if self.active {
            self.deferrals.defer(PASTE_SEARCH_DELAY, DeferredAction::Research);
        }
    }

    /// A clipboard cut changed the search field; re-search shortly.
    pub fn handle_cut(&mut self) {
        self.handle_paste();
    }

    /// Replace the query text without searching (the host's input field is
    /// authoritative during paste/cut; the deferred re-search reads this).
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clear_pending_backstroke();
    }

    // =========================================================================
    // Dropdown
    // =========================================================================

    /// Open the dropdown. Returns `false` when blocked (widget disabled, or
    /// the selection cap is already reached in multi-valued mode).
    pub fn open_dropdown(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        if self.results_showing {
            return true;
        }
        if self.source.multiple
            && let Some(max) = self.config.max_selected_options
            && self.chips.len() >= max
        {
            self.max_selected_reached.emit(());
            return false;
        }

        self.active = true;
        self.results_showing = true;
        self.run_search();
        self.dropdown_opened.emit(());
        true
    }

    /// Close the dropdown and clear the highlight cursor.
    pub fn close_dropdown(&mut self) {
        if !self.results_showing {
            return;
        }
        self.results_showing = false;
        self.set_highlight(None);
        self.dropdown_closed.emit(());
    }

    fn run_search(&mut self) {
        self.outcome = search::run(
            &mut self.entries,
            &self.query,
            &self.config,
            self.source.multiple,
        );
        self.shown_rows = search::shown_entries(&self.entries, self.config.max_shown_results);

        self.search_updated.emit(self.query.trim().to_string());

        let plan = self.render_plan();
        self.sink.results_updated(&self.entries, &self.outcome, &plan);
        if self.outcome.show_no_results {
            self.no_results.emit(self.query.trim().to_string());
        }
        self.auto_highlight();
    }

    fn render_plan(&self) -> RenderPlan {
        let query = self.query.trim();
        RenderPlan {
            rows: self.shown_rows.clone(),
            create_option_label: self
                .outcome
                .show_create_option
                .then(|| format!("{} \"{}\"", self.config.create_option_text, query)),
            no_results_message: self
                .outcome
                .show_no_results
                .then(|| format!("{} \"{}\"", self.config.no_results_text, query)),
        }
    }

    // =========================================================================
    // Highlight cursor
    // =========================================================================

    /// Move the highlight cursor to the next eligible row.
    pub fn highlight_next(&mut self) {
        if !self.results_showing {
            self.open_dropdown();
            return;
        }
        let next = match self.highlighted {
            Some(HighlightTarget::CreateOption) => Some(HighlightTarget::CreateOption),
            Some(HighlightTarget::Entry(current)) => match self.eligible_after(Some(current)) {
                Some(sequence) => Some(HighlightTarget::Entry(sequence)),
                None if self.outcome.show_create_option => Some(HighlightTarget::CreateOption),
                None => Some(HighlightTarget::Entry(current)),
            },
            None => match self.eligible_after(None) {
                Some(sequence) => Some(HighlightTarget::Entry(sequence)),
                None if self.outcome.show_create_option => Some(HighlightTarget::CreateOption),
                None => None,
            },
        };
        self.set_highlight(next);
    }

    /// Move the highlight cursor to the previous eligible row.
    ///
    /// Moving before the first row clears the cursor; single-valued pickers
    /// also close the dropdown.
    pub fn highlight_previous(&mut self) {
        if !self.results_showing {
            return;
        }
        match self.highlighted {
            Some(HighlightTarget::Entry(current)) => match self.eligible_before(current) {
                Some(sequence) => self.set_highlight(Some(HighlightTarget::Entry(sequence))),
                None => {
                    self.set_highlight(None);
                    if !self.source.multiple {
                        self.close_dropdown();
                    }
                }
            },
            Some(HighlightTarget::CreateOption) => {
                let last = self.last_eligible();
                self.set_highlight(last.map(HighlightTarget::Entry));
            }
            None => {}
        }
    }

    fn set_highlight(&mut self, target: Option<HighlightTarget>) {
        if self.highlighted != target {
            self.highlighted = target;
            self.sink.highlight_changed(target);
        }
    }

    fn auto_highlight(&mut self) {
        if !self.results_showing {
            return;
        }
        // A single-valued picker re-opens onto its current selection.
        let preferred = if self.source.multiple {
            None
        } else {
            self.shown_rows.iter().copied().find(|&sequence| {
                self.entries[sequence]
                    .as_item()
                    .is_some_and(|item| item.selected && !item.effective_disabled())
            })
        };
        let target = preferred
            .or_else(|| self.eligible_after(None))
            .map(HighlightTarget::Entry)
            .or_else(|| {
                self.outcome
                    .show_create_option
                    .then_some(HighlightTarget::CreateOption)
            });
        self.set_highlight(target);
    }

    fn is_cursor_eligible(&self, sequence: usize) -> bool {
        self.entries[sequence]
            .as_item()
            .is_some_and(|item| !item.effective_disabled())
    }

    fn eligible_after(&self, current: Option<usize>) -> Option<usize> {
        let start = match current {
            Some(sequence) => self
                .shown_rows
                .iter()
                .position(|&row| row == sequence)
                .map_or(0, |position| position + 1),
            None => 0,
        };
        self.shown_rows[start.min(self.shown_rows.len())..]
            .iter()
            .copied()
            .find(|&row| self.is_cursor_eligible(row))
    }

    fn eligible_before(&self, current: usize) -> Option<usize> {
        let position = self.shown_rows.iter().position(|&row| row == current)?;
        self.shown_rows[..position]
            .iter()
            .rev()
            .copied()
            .find(|&row| self.is_cursor_eligible(row))
    }

    fn last_eligible(&self) -> Option<usize> {
        self.shown_rows
            .iter()
            .rev()
            .copied()
            .find(|&row| self.is_cursor_eligible(row))
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Dispatch a key press. Returns `true` when the picker consumed it.
    pub fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if self.disabled || !self.active {
            return false;
        }

        // Any key other than backspace defuses a pending backstroke.
        if event.key != Key::Backspace {
            self.clear_pending_backstroke();
        }

        match event.key {
            Key::Backspace => return self.handle_backstroke(),
            Key::Enter => return self.select_highlighted(event.modifiers),
            Key::Escape => {
                if self.results_showing {
                    self.close_dropdown();
                    return true;
                }
                return false;
            }
            Key::ArrowDown => {
                self.highlight_next();
                return true;
            }
            Key::ArrowUp => {
                self.highlight_previous();
                return true;
            }
            Key::Tab => return false,
            _ => {}
        }

        // Printable input extends the query.
        if !event.text.is_empty() && !event.modifiers.control && !event.modifiers.meta {
            let printable: String = event.text.chars().filter(|ch| !ch.is_control()).collect();
            if printable.is_empty() {
                return false;
            }
            self.query.push_str(&printable);
            if self.results_showing {
                self.run_search();
            } else {
                self.open_dropdown();
            }
            return true;
        }

        false
    }

    fn select_highlighted(&mut self, modifiers: KeyboardModifiers) -> bool {
        match self.highlighted {
            Some(HighlightTarget::Entry(sequence)) => {
                self.select_entry(sequence, modifiers.keeps_dropdown_open());
                true
            }
            Some(HighlightTarget::CreateOption) => self.select_create_option(),
            None => false,
        }
    }

    fn handle_backstroke(&mut self) -> bool {
        if self.source.multiple && self.query.is_empty() && !self.chips.is_empty() {
            if let Some(entry) = self.pending_backstroke.take() {
                self.deselect_entry(entry);
                return true;
            }
            let Some(chip) = self.chips.iter().rev().find(|chip| chip.removable) else {
                return false;
            };
            let entry = chip.entry;
            if self.config.single_backstroke_delete {
                self.deselect_entry(entry);
            } else {
                self.pending_backstroke = Some(entry);
                if let Some(chip) = self.chips.iter_mut().find(|chip| chip.entry == entry) {
                    chip.pending = true;
                }
                self.sink.chip_pending(entry, true);
            }
            return true;
        }

        // Plain text deletion, one grapheme at a time.
        if let Some((offset, _)) = self.query.grapheme_indices(true).next_back() {
            self.query.truncate(offset);
            if self.results_showing {
                self.run_search();
            }
            return true;
        }
        false
    }

    fn clear_pending_backstroke(&mut self) {
        if let Some(entry) = self.pending_backstroke.take() {
            if let Some(chip) = self.chips.iter_mut().find(|chip| chip.entry == entry) {
                chip.pending = false;
            }
            self.sink.chip_pending(entry, false);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// A result row was clicked.
    pub fn result_clicked(&mut self, sequence: usize, modifiers: KeyboardModifiers) -> bool {
        match self.entries.get(sequence) {
            Some(Entry::Group(_)) => self.select_group(sequence),
            Some(Entry::Item(_)) => self.select_entry(sequence, modifiers.keeps_dropdown_open()),
            _ => false,
        }
    }

    /// The create-option affordance was clicked.
    pub fn create_option_clicked(&mut self) -> bool {
        self.select_create_option()
    }

    /// A chip's remove control was clicked.
    pub fn chip_remove_clicked(&mut self, entry: usize) -> bool {
        self.deselect_entry(entry)
    }

    /// Select the entry at the given sequence index.
    ///
    /// `keep_open` suppresses the hide-on-select close (multi-valued
    /// modifier-click). Returns `false` when the entry cannot be selected:
    /// not an item, disabled, already selected in multi mode, or the
    /// selection cap is reached (which also raises `max_selected_reached`).
    pub fn select_entry(&mut self, sequence: usize, keep_open: bool) -> bool {
        let Some(item) = self.entries.get(sequence).and_then(Entry::as_item) else {
            return false;
        };
        if item.effective_disabled() {
            return false;
        }

        if self.source.multiple {
            if item.selected {
                return false;
            }
            if let Some(max) = self.config.max_selected_options
                && self.chips.len() >= max
            {
                self.max_selected_reached.emit(());
                return false;
            }

            let Some((value, label)) = self.entries[sequence].as_item_mut().map(|item| {
                item.selected = true;
                (item.value.clone(), item.text.clone())
            }) else {
                return false;
            };
            self.source.set_selected(sequence, true);

            let chip = Chip {
                entry: sequence,
                label,
                removable: true,
                pending: false,
            };
            self.sink.chip_added(&chip);
            self.chips.push(chip);

            self.selection_changed.emit(SelectionChange {
                value,
                selected: true,
            });

            if self.config.hide_results_on_select && !keep_open {
                self.close_dropdown();
                self.query.clear();
            } else if self.results_showing {
                self.run_search();
            }
        } else {
            // Exactly one option may be selected at a time.
            for entry in &mut self.entries {
                if let Some(other) = entry.as_item_mut() {
                    other.selected = false;
                }
            }
            self.source.clear_selection();

            let Some(value) = self.entries[sequence].as_item_mut().map(|item| {
                item.selected = true;
                item.value.clone()
            }) else {
                return false;
            };
            self.source.set_selected(sequence, true);
            self.update_selection_label();

            self.selection_changed.emit(SelectionChange {
                value,
                selected: true,
            });

            if self.config.hide_results_on_select {
                self.close_dropdown();
                self.query.clear();
            } else if self.results_showing {
                self.run_search();
            }
        }

        tracing::debug!(target: "arbor_picker::picker", sequence, "entry selected");
        true
    }

    /// Deselect the entry at the given sequence index.
    ///
    /// Returns `false` when the underlying option is disabled or not
    /// selected; nothing changes in that case.
    pub fn deselect_entry(&mut self, sequence: usize) -> bool {
        let Some(item) = self.entries.get(sequence).and_then(Entry::as_item) else {
            return false;
        };
        if item.effective_disabled() || !item.selected {
            return false;
        }

        let Some(value) = self.entries[sequence].as_item_mut().map(|item| {
            item.selected = false;
            item.value.clone()
        }) else {
            return false;
        };
        self.source.set_selected(sequence, false);

        if self.pending_backstroke == Some(sequence) {
            self.pending_backstroke = None;
        }
        if self.source.multiple {
            self.chips.retain(|chip| chip.entry != sequence);
            self.sink.chip_removed(sequence);
        } else {
            self.update_selection_label();
        }

        self.selection_changed.emit(SelectionChange {
            value,
            selected: false,
        });

        if self.results_showing {
            self.run_search();
        }

        tracing::debug!(target: "arbor_picker::picker", sequence, "entry deselected");
        true
    }

    /// Select every not-yet-selected, enabled member of a group.
    ///
    /// Gated by `enable_group_select`; walks the entries following the
    /// header until the next group header, skipping members that already
    /// have a chip. Stops early when the selection cap rejects a member.
    pub fn select_group(&mut self, group_sequence: usize) -> bool {
        if !self.config.enable_group_select || !self.source.multiple {
            return false;
        }
        if self.entries.get(group_sequence).and_then(Entry::as_group).is_none() {
            return false;
        }

        let mut any_selected = false;
        let mut sequence = group_sequence + 1;
        while sequence < self.entries.len() {
            let wanted = match &self.entries[sequence] {
                Entry::Group(_) => break,
                Entry::Empty(_) => false,
                Entry::Item(item) => {
                    !item.selected
                        && !item.effective_disabled()
                        && !self.chips.iter().any(|chip| chip.entry == sequence)
                }
            };
            if wanted {
                if !self.select_entry(sequence, true) {
                    break;
                }
                any_selected = true;
            }
            sequence += 1;
        }
        any_selected
    }

    /// Reset a single-valued picker back to its blank placeholder.
    ///
    /// Requires `allow_single_deselect` and a leading blank option in the
    /// source. Returns `false` when those preconditions fail or the current
    /// selection is disabled.
    pub fn clear_single_selection(&mut self) -> bool {
        if self.source.multiple
            || !self.config.allow_single_deselect
            || !self.source.leading_blank_option()
        {
            return false;
        }
        let Some(selected) = self
            .entries
            .iter()
            .filter_map(Entry::as_item)
            .find(|item| item.selected)
            .map(|item| item.index)
        else {
            return false;
        };
        if !self.deselect_entry(selected) {
            return false;
        }
        // Park the selection on the placeholder option.
        self.source.set_selected(0, true);
        true
    }

    /// Materialize the current query as a new option and select it.
    pub fn select_create_option(&mut self) -> bool {
        if !self.config.create_option {
            return false;
        }
        let label = self.query.trim().to_string();
        if label.is_empty() {
            return false;
        }
        if self.source.multiple
            && let Some(max) = self.config.max_selected_options
            && self.chips.len() >= max
        {
            self.max_selected_reached.emit(());
            return false;
        }

        if !self.source.multiple {
            self.source.clear_selection();
        }
        self.source
            .push_item(OptionData::new(&label).with_selected(true));
        self.options_changed();

        self.selection_changed.emit(SelectionChange {
            value: label.clone(),
            selected: true,
        });

        if self.config.hide_results_on_select {
            self.close_dropdown();
            self.query.clear();
        } else if self.results_showing {
            self.run_search();
        }

        tracing::debug!(target: "arbor_picker::picker", %label, "option created");
        true
    }
}

impl std::fmt::Debug for Picker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("entries", &self.entries.len())
            .field("query", &self.query)
            .field("active", &self.active)
            .field("results_showing", &self.results_showing)
            .field("chips", &self.chips.len())
            .finish()
    }
}
