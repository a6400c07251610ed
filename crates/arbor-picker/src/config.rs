//! Configuration surface for the picker.
//!
//! [`PickerConfig`] collects every optional behavior switch. `Default` gives
//! the conventional behavior: prefix search with split words, groups
//! searchable, selections hidden on pick, two-stage backstroke disabled in
//! favor of immediate deletion.

use serde::{Deserialize, Serialize};

/// Behavior configuration for a picker instance.
///
/// All fields are optional in serialized form; missing fields take their
/// defaults.
///
/// # Example
///
/// ```
/// use arbor_picker::PickerConfig;
///
/// let config = PickerConfig::default()
///     .with_search_contains(true)
///     .with_max_selected_options(Some(3));
///
/// assert!(config.search_contains);
/// assert_eq!(config.max_selected_options, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Match the query anywhere in the label instead of at word starts.
    pub search_contains: bool,
    /// In prefix mode, allow matches at any word start, not just the first.
    pub enable_split_word_search: bool,
    /// Match group header labels as well as item labels.
    pub group_search: bool,
    /// Fall back to matching an item's value when its label does not match.
    pub search_in_values: bool,
    /// Case-sensitive matching. Off by default; the case-insensitive path is
    /// also the one that applies diacritic folding.
    pub case_sensitive_search: bool,
    /// In multi-valued mode, keep already-selected options in the results.
    pub display_selected_options: bool,
    /// Keep disabled options in the results.
    pub display_disabled_options: bool,
    /// Cap on the number of rendered result rows (`None` = unbounded).
    /// Match counts are always computed over the full set.
    pub max_shown_results: Option<usize>,
    /// Cap on simultaneously selected options (`None` = unbounded).
    pub max_selected_options: Option<usize>,
    /// Allow resetting a single-valued picker back to its placeholder.
    /// Requires the source to start with a blank option.
    pub allow_single_deselect: bool,
    /// Close the dropdown after a selection.
    pub hide_results_on_select: bool,
    /// Offer creating a new option from free text when nothing matches.
    pub create_option: bool,
    /// Keep offering creation even when a (non-exact) match exists.
    pub persistent_create_option: bool,
    /// Delete the most recent chip on the first backstroke instead of
    /// flagging it pending first.
    pub single_backstroke_delete: bool,
    /// Copy `data-` prefixed source attributes into entry metadata.
    pub include_data_attributes: bool,
    /// Allow selecting every enabled option of a group at once via its
    /// header.
    pub enable_group_select: bool,
    /// Placeholder label for an unselected single-valued picker.
    pub placeholder_text_single: String,
    /// Placeholder label for an empty multi-valued picker.
    pub placeholder_text_multiple: String,
    /// Message shown when a search yields nothing.
    pub no_results_text: String,
    /// Label prefix for the create-option affordance.
    pub create_option_text: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            search_contains: false,
            enable_split_word_search: true,
            group_search: true,
            search_in_values: false,
            case_sensitive_search: false,
            display_selected_options: true,
            display_disabled_options: true,
            max_shown_results: None,
            max_selected_options: None,
            allow_single_deselect: false,
            hide_results_on_select: true,
            create_option: false,
            persistent_create_option: false,
            single_backstroke_delete: true,
            include_data_attributes: false,
            enable_group_select: false,
            placeholder_text_single: "Select an Option".to_string(),
            placeholder_text_multiple: "Select Some Options".to_string(),
            no_results_text: "No results match".to_string(),
            create_option_text: "Add option".to_string(),
        }
    }
}

impl PickerConfig {
    /// Set contains-mode search using builder pattern.
    pub fn with_search_contains(mut self, contains: bool) -> Self {
        self.search_contains = contains;
        self
    }

    /// Set split-word search using builder pattern.
    pub fn with_split_word_search(mut self, enabled: bool) -> Self {
        self.enable_split_word_search = enabled;
        self
    }

    /// Set group search using builder pattern.
    pub fn with_group_search(mut self, enabled: bool) -> Self {
        self.group_search = enabled;
        self
    }

    /// Set value-fallback search using builder pattern.
    pub fn with_search_in_values(mut self, enabled: bool) -> Self {
        self.search_in_values = enabled;
        self
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitive_search(mut self, enabled: bool) -> Self {
        self.case_sensitive_search = enabled;
        self
    }

    /// Set whether selected options stay in results using builder pattern.
    pub fn with_display_selected_options(mut self, enabled: bool) -> Self {
        self.display_selected_options = enabled;
        self
    }

    /// Set whether disabled options stay in results using builder pattern.
    pub fn with_display_disabled_options(mut self, enabled: bool) -> Self {
        self.display_disabled_options = enabled;
        self
    }

    /// Set the shown-results cap using builder pattern.
    pub fn with_max_shown_results(mut self, max: Option<usize>) -> Self {
        self.max_shown_results = max;
        self
    }

    /// Set the selection cap using builder pattern.
    pub fn with_max_selected_options(mut self, max: Option<usize>) -> Self {
        self.max_selected_options = max;
        self
    }

    /// Set single-deselect using builder pattern.
    pub fn with_allow_single_deselect(mut self, enabled: bool) -> Self {
        self.allow_single_deselect = enabled;
        self
    }

    /// Set hide-on-select using builder pattern.
    pub fn with_hide_results_on_select(mut self, enabled: bool) -> Self {
        self.hide_results_on_select = enabled;
        self
    }

    /// Set free-text option creation using builder pattern.
    pub fn with_create_option(mut self, enabled: bool) -> Self {
        self.create_option = enabled;
        self
    }

    /// Set persistent option creation using builder pattern.
    pub fn with_persistent_create_option(mut self, enabled: bool) -> Self {
        self.persistent_create_option = enabled;
        self
    }

    /// Set single-backstroke deletion using builder pattern.
    pub fn with_single_backstroke_delete(mut self, enabled: bool) -> Self {
        self.single_backstroke_delete = enabled;
        self
    }

    /// Set `data-` attribute copy-through using builder pattern.
    pub fn with_include_data_attributes(mut self, enabled: bool) -> Self {
        self.include_data_attributes = enabled;
        self
    }

    /// Set group bulk select using builder pattern.
    pub fn with_group_select(mut self, enabled: bool) -> Self {
        self.enable_group_select = enabled;
        self
    }

    /// Set the single-valued placeholder using builder pattern.
    pub fn with_placeholder_text_single(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text_single = text.into();
        self
    }

    /// Set the multi-valued placeholder using builder pattern.
    pub fn with_placeholder_text_multiple(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text_multiple = text.into();
        self
    }

    /// Set the no-results message using builder pattern.
    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = text.into();
        self
    }

    /// Set the create-option label prefix using builder pattern.
    pub fn with_create_option_text(mut self, text: impl Into<String>) -> Self {
        self.create_option_text = text.into();
        self
    }
}
