//! Search engine.
//!
//! Given the current query and the flat entry list, this module computes
//! per-entry match state, highlight markup, and the aggregate outcome the
//! controller uses to decide what to render. Every pass recomputes the
//! transient state in full; running the same query twice over unchanged
//! entries yields identical results.
//!
//! Queries are regex-escaped before any pattern is built, so user input can
//! never produce an invalid pattern. Three patterns are derived per pass:
//!
//! - the *match pattern*, which decides whether an entry matches
//! - the *exact pattern* (`^query$`), which decides whether an entry's raw
//!   label equals the query
//! - the *highlight pattern*, which locates the span to emphasize
//!
//! Case-insensitive passes retry unmatched labels against a
//! diacritic-folded copy (see [`fold`]), so "munchen" finds "München".

mod fold;

pub use fold::{fold, fold_char};

use regex::{Regex, RegexBuilder};

use crate::config::PickerConfig;
use crate::entry::Entry;

/// Aggregate result of one search pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Number of matching item entries. Groups are never counted.
    pub result_count: usize,
    /// Whether some entry's raw label exactly equals the query.
    pub exact_match: bool,
    /// Whether a "no results" affordance should appear.
    pub show_no_results: bool,
    /// Whether a "create new option" affordance should appear.
    pub show_create_option: bool,
    /// Sequence index of the first matching item entry.
    pub first_match: Option<usize>,
}

/// Compiled patterns for one search pass.
struct Patterns {
    matcher: Option<Regex>,
    exact: Option<Regex>,
    highlight: Option<Regex>,
    case_insensitive: bool,
}

/// How an item entry matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchVia {
    /// Matched on its label (directly or through the folded copy).
    Label,
    /// Matched on its value through the search-in-values fallback.
    Value,
}

/// What one item entry contributes to the pass.
struct ItemMatch {
    highlighted: Option<String>,
    exact: bool,
    group: Option<usize>,
}

/// Run one search pass over the entry list.
///
/// `multiple` is the widget's selection mode; it participates in the
/// visibility rules (selected options drop out of a multi-valued picker's
/// results when `display_selected_options` is off).
///
/// Entries are annotated in place; the returned [`SearchOutcome`] carries
/// the aggregates. Counts always cover the complete set; the shown-results
/// cap only applies when building the rendered row list with
/// [`shown_entries`].
pub fn run(
    entries: &mut [Entry],
    query: &str,
    config: &PickerConfig,
    multiple: bool,
) -> SearchOutcome {
    let trimmed = query.trim();
    let searching = !trimmed.is_empty();
    let query_chars = trimmed.chars().count();

    for entry in entries.iter_mut() {
        entry.clear_match();
    }

    let patterns = Patterns::build(trimmed, config);
    let mut outcome = SearchOutcome::default();

    for position in 0..entries.len() {
        if entries[position].as_group().is_some() {
            let matched = group_label_matches(&entries[position], config, &patterns);
            if let Some(group) = entries[position].as_group_mut() {
                group.matched = matched;
            }
            continue;
        }

        let Some(result) = evaluate_item(
            entries,
            position,
            config,
            &patterns,
            multiple,
            searching,
            query_chars,
        ) else {
            continue;
        };

        outcome.result_count += 1;
        if outcome.first_match.is_none() {
            outcome.first_match = Some(position);
        }
        if result.exact {
            outcome.exact_match = true;
        }
        if let Some(group_index) = result.group
            && let Some(group) = entries[group_index].as_group_mut()
        {
            group.active_children += 1;
        }
        if let Some(item) = entries[position].as_item_mut() {
            item.matched = true;
            item.highlighted = result.highlighted;
        }
    }

    if searching {
        outcome.show_create_option = config.create_option
            && (outcome.result_count == 0
                || (config.persistent_create_option && !outcome.exact_match));
        outcome.show_no_results = outcome.result_count == 0 && !outcome.show_create_option;
    }

    tracing::trace!(
        target: "arbor_picker::search",
        query = trimmed,
        results = outcome.result_count,
        "search pass complete"
    );
    outcome
}

/// The rendered row list: sequence indices of visible entries, in original
/// order, truncated to at most `max` rows.
pub fn shown_entries(entries: &[Entry], max: Option<usize>) -> Vec<usize> {
    let cap = max.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    for entry in entries {
        if rows.len() >= cap {
            break;
        }
        match entry {
            Entry::Group(group) => {
                if !group.hidden && (group.matched || group.active_children > 0) {
                    rows.push(group.index);
                }
            }
            Entry::Item(item) => {
                if item.matched {
                    rows.push(item.index);
                }
            }
            Entry::Empty(_) => {}
        }
    }
    rows
}

/// Escape text for inclusion in highlight markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl Patterns {
    fn build(trimmed: &str, config: &PickerConfig) -> Self {
        let case_insensitive = !config.case_sensitive_search;
        let escaped = regex::escape(trimmed);
        Self {
            matcher: compile(&match_pattern(&escaped, config), case_insensitive),
            exact: compile(&format!("^{escaped}$"), case_insensitive),
            highlight: compile(&highlight_pattern(&escaped, config), case_insensitive),
            case_insensitive,
        }
    }
}

fn match_pattern(escaped: &str, config: &PickerConfig) -> String {
    if config.search_contains {
        return escaped.to_string();
    }
    // Anchor to a word start and swallow the rest of the word.
    let anchored = format!("(^|\\s|\\b){escaped}[^\\s]*");
    if config.enable_split_word_search {
        anchored
    } else {
        format!("^{anchored}")
    }
}

fn highlight_pattern(escaped: &str, config: &PickerConfig) -> String {
    if config.search_contains {
        escaped.to_string()
    } else {
        format!("\\b{escaped}")
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Option<Regex> {
    match RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(err) => {
            // Escaping should make this unreachable; degrade to a
            // match-nothing pass instead of failing the keystroke.
            tracing::warn!(target: "arbor_picker::search", %err, "search pattern rejected");
            None
        }
    }
}

fn group_label_matches(entry: &Entry, config: &PickerConfig, patterns: &Patterns) -> bool {
    let Some(group) = entry.as_group() else {
        return false;
    };
    if group.hidden || !config.group_search {
        return false;
    }
    label_matches(&group.label, patterns)
}

/// Match `text` against the match pattern, retrying the folded copy on
/// case-insensitive passes.
fn label_matches(text: &str, patterns: &Patterns) -> bool {
    let Some(matcher) = &patterns.matcher else {
        return false;
    };
    if matcher.is_match(text) {
        return true;
    }
    patterns.case_insensitive && matcher.is_match(&fold(text))
}

fn evaluate_item(
    entries: &[Entry],
    position: usize,
    config: &PickerConfig,
    patterns: &Patterns,
    multiple: bool,
    searching: bool,
    query_chars: usize,
) -> Option<ItemMatch> {
    let item = entries[position].as_item()?;

    // Visibility exclusions come before matching.
    if item.hidden || item.group_hidden {
        return None;
    }
    if multiple && item.selected && !config.display_selected_options {
        return None;
    }
    if item.effective_disabled() && !config.display_disabled_options {
        return None;
    }

    let via = item_match_via(&item.text, &item.value, config, patterns);

    // Members of a label-matched group stay visible without a match of
    // their own (and without a highlight).
    let inherited = via.is_none()
        && config.group_search
        && item
            .group
            .and_then(|group_index| entries.get(group_index))
            .and_then(Entry::as_group)
            .is_some_and(|group| group.matched);

    if via.is_none() && !inherited {
        return None;
    }

    let highlighted = if searching && via == Some(MatchVia::Label) {
        highlight_span(&item.text, patterns)
            .map(|start_char| build_highlight(&item.text, start_char, query_chars))
    } else {
        None
    };

    let exact = patterns
        .exact
        .as_ref()
        .is_some_and(|exact| exact.is_match(&item.markup));

    Some(ItemMatch {
        highlighted,
        exact,
        group: item.group,
    })
}

fn item_match_via(
    text: &str,
    value: &str,
    config: &PickerConfig,
    patterns: &Patterns,
) -> Option<MatchVia> {
    if label_matches(text, patterns) {
        return Some(MatchVia::Label);
    }
    if config.search_in_values
        && let Some(matcher) = &patterns.matcher
        && matcher.is_match(value)
    {
        return Some(MatchVia::Value);
    }
    None
}

/// The char offset where the highlight starts, from the highlight pattern.
///
/// When only the folded copy matches, the folded offset is applied to the
/// original text; digraph folds may shift the emphasized span, which keeps
/// the slicing rule uniform.
fn highlight_span(text: &str, patterns: &Patterns) -> Option<usize> {
    let highlight = patterns.highlight.as_ref()?;
    if let Some(found) = highlight.find(text) {
        return Some(text[..found.start()].chars().count());
    }
    if patterns.case_insensitive {
        let folded = fold(text);
        if let Some(found) = highlight.find(&folded) {
            return Some(folded[..found.start()].chars().count());
        }
    }
    None
}

/// Slice the original text around the match and emphasize it, escaping the
/// three pieces independently.
fn build_highlight(text: &str, start_char: usize, query_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let start = start_char.min(chars.len());
    let end = (start + query_chars).min(chars.len());

    let prefix: String = chars[..start].iter().collect();
    let middle: String = chars[start..end].iter().collect();
    let suffix: String = chars[end..].iter().collect();

    format!(
        "{}<em>{}</em>{}",
        escape_html(&prefix),
        escape_html(&middle),
        escape_html(&suffix)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_entries;
    use crate::source::{GroupData, OptionData, SelectSource};

    fn entries_for(source: &SelectSource, config: &PickerConfig) -> Vec<Entry> {
        build_entries(source, config)
    }

    fn fruits() -> SelectSource {
        SelectSource::new()
            .with_group(
                GroupData::new("Fruits")
                    .with_child(OptionData::new("Apple").with_selected(true))
                    .with_child(OptionData::new("Banana")),
            )
            .with_item(OptionData::new("Carrot"))
    }

    fn matched_texts(entries: &[Entry]) -> Vec<&str> {
        entries
            .iter()
            .filter_map(Entry::as_item)
            .filter(|item| item.matched)
            .map(|item| item.text.as_str())
            .collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let config = PickerConfig::default();
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "", &config, false);
        assert_eq!(outcome.result_count, 3);
        assert!(!outcome.show_no_results);
        assert!(!outcome.show_create_option);
        assert!(entries[1].as_item().unwrap().highlighted.is_none());
    }

    #[test]
    fn test_search_with_highlight() {
        let config = PickerConfig::default().with_search_contains(true);
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "an", &config, false);
        assert_eq!(outcome.result_count, 1);
        assert_eq!(outcome.first_match, Some(2));

        let banana = entries[2].as_item().unwrap();
        assert!(banana.matched);
        assert_eq!(banana.highlighted.as_deref(), Some("B<em>an</em>ana"));

        assert!(!entries[1].as_item().unwrap().matched);
        assert!(!entries[3].as_item().unwrap().matched);
    }

    #[test]
    fn test_prefix_vs_contains() {
        let source = SelectSource::new()
            .with_item(OptionData::new("Car"))
            .with_item(OptionData::new("Scar"));

        // Prefix mode with split-word search off: anchored to the start.
        let config = PickerConfig::default().with_split_word_search(false);
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "ca", &config, false);
        assert_eq!(matched_texts(&entries), vec!["Car"]);

        // Contains mode: anywhere.
        let config = PickerConfig::default().with_search_contains(true);
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "ca", &config, false);
        assert_eq!(matched_texts(&entries), vec!["Car", "Scar"]);
    }

    #[test]
    fn test_split_word_search_matches_inner_words() {
        let source = SelectSource::new()
            .with_item(OptionData::new("New York"))
            .with_item(OptionData::new("Yorkshire"));

        let config = PickerConfig::default();
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "york", &config, false);
        assert_eq!(matched_texts(&entries), vec!["New York", "Yorkshire"]);

        let config = PickerConfig::default().with_split_word_search(false);
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "york", &config, false);
        assert_eq!(matched_texts(&entries), vec!["Yorkshire"]);
    }

    #[test]
    fn test_diacritic_folding() {
        let source = SelectSource::new()
            .with_item(OptionData::new("München"))
            .with_item(OptionData::new("straße"));

        let config = PickerConfig::default();
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "munchen", &config, false);
        assert_eq!(matched_texts(&entries), vec!["München"]);

        let mut entries = entries_for(&source, &config);
        run(&mut entries, "strasse", &config, false);
        assert_eq!(matched_texts(&entries), vec!["straße"]);

        // Case-sensitive passes never fold.
        let config = PickerConfig::default().with_case_sensitive_search(true);
        let mut entries = entries_for(&source, &config);
        let outcome = run(&mut entries, "munchen", &config, false);
        assert_eq!(outcome.result_count, 0);
    }

    #[test]
    fn test_case_sensitivity() {
        let source = SelectSource::new().with_item(OptionData::new("Apple"));

        let config = PickerConfig::default().with_case_sensitive_search(true);
        let mut entries = entries_for(&source, &config);
        assert_eq!(run(&mut entries, "apple", &config, false).result_count, 0);
        assert_eq!(run(&mut entries, "Apple", &config, false).result_count, 1);
    }

    #[test]
    fn test_search_in_values_fallback() {
        let source = SelectSource::new()
            .with_item(OptionData::new("Apple").with_value("fruit-1"));

        let config = PickerConfig::default().with_search_contains(true);
        let mut entries = entries_for(&source, &config);
        assert_eq!(run(&mut entries, "fruit", &config, false).result_count, 0);

        let config = config.with_search_in_values(true);
        let mut entries = entries_for(&source, &config);
        let outcome = run(&mut entries, "fruit", &config, false);
        assert_eq!(outcome.result_count, 1);
        // Value matches carry no highlight; the label does not contain it.
        assert!(entries[0].as_item().unwrap().highlighted.is_none());
    }

    #[test]
    fn test_group_search_label_match_keeps_children() {
        let config = PickerConfig::default();
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "fruit", &config, false);
        let group = entries[0].as_group().unwrap();
        assert!(group.matched);
        assert_eq!(group.active_children, 2);

        // Children ride along unhighlighted; the top-level item does not.
        assert_eq!(matched_texts(&entries), vec!["Apple", "Banana"]);
        assert!(entries[1].as_item().unwrap().highlighted.is_none());
        assert_eq!(outcome.result_count, 2);
    }

    #[test]
    fn test_group_search_disabled_ignores_labels() {
        let config = PickerConfig::default().with_group_search(false);
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "fruit", &config, false);
        assert_eq!(outcome.result_count, 0);
        assert!(!entries[0].as_group().unwrap().matched);
    }

    #[test]
    fn test_child_match_does_not_require_group_match() {
        let config = PickerConfig::default();
        let mut entries = entries_for(&fruits(), &config);

        run(&mut entries, "ban", &config, false);
        let group = entries[0].as_group().unwrap();
        assert!(!group.matched);
        assert_eq!(group.active_children, 1);
        assert_eq!(matched_texts(&entries), vec!["Banana"]);
    }

    #[test]
    fn test_selected_options_hidden_in_multiple_mode() {
        let config = PickerConfig::default().with_display_selected_options(false);
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "", &config, true);
        assert_eq!(matched_texts(&entries), vec!["Banana", "Carrot"]);
        assert_eq!(outcome.result_count, 2);

        // Single-valued pickers keep the selected option visible.
        let mut entries = entries_for(&fruits(), &config);
        let outcome = run(&mut entries, "", &config, false);
        assert_eq!(outcome.result_count, 3);
    }

    #[test]
    fn test_disabled_options_hidden_when_configured() {
        let source = SelectSource::new()
            .with_item(OptionData::new("Usable"))
            .with_item(OptionData::new("Retired").with_disabled(true));

        let config = PickerConfig::default().with_display_disabled_options(false);
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "", &config, false);
        assert_eq!(matched_texts(&entries), vec!["Usable"]);
    }

    #[test]
    fn test_hidden_options_and_groups_excluded() {
        let source = SelectSource::new()
            .with_item(OptionData::new("Shown"))
            .with_item(OptionData::new("Ghost").with_hidden(true))
            .with_group(
                GroupData::new("Veiled")
                    .with_hidden(true)
                    .with_child(OptionData::new("Inside")),
            );

        let config = PickerConfig::default();
        let mut entries = entries_for(&source, &config);
        let outcome = run(&mut entries, "", &config, false);
        assert_eq!(matched_texts(&entries), vec!["Shown"]);
        assert_eq!(outcome.result_count, 1);
    }

    #[test]
    fn test_highlight_escapes_html() {
        let source = SelectSource::new().with_item(OptionData::new("a<b> & c"));

        let config = PickerConfig::default().with_search_contains(true);
        let mut entries = entries_for(&source, &config);
        run(&mut entries, "b", &config, false);

        let item = entries[0].as_item().unwrap();
        assert_eq!(
            item.highlighted.as_deref(),
            Some("a&lt;<em>b</em>&gt; &amp; c")
        );
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let source = SelectSource::new()
            .with_item(OptionData::new("a+b"))
            .with_item(OptionData::new("aab"));

        let config = PickerConfig::default().with_search_contains(true);
        let mut entries = entries_for(&source, &config);
        let outcome = run(&mut entries, "a+b", &config, false);
        assert_eq!(matched_texts(&entries), vec!["a+b"]);
        assert_eq!(outcome.result_count, 1);
    }

    #[test]
    fn test_no_results_signal() {
        let config = PickerConfig::default();
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "zzz", &config, false);
        assert_eq!(outcome.result_count, 0);
        assert!(outcome.show_no_results);
        assert!(!outcome.show_create_option);
    }

    #[test]
    fn test_create_option_offered_when_nothing_matches() {
        let config = PickerConfig::default().with_create_option(true);
        let mut entries = entries_for(&fruits(), &config);

        let outcome = run(&mut entries, "Mango", &config, false);
        assert_eq!(outcome.result_count, 0);
        assert!(outcome.show_create_option);
        // The create affordance suppresses the bare "no results" state.
        assert!(!outcome.show_no_results);
    }

    #[test]
    fn test_persistent_create_option_respects_exact_match() {
        let config = PickerConfig::default()
            .with_create_option(true)
            .with_persistent_create_option(true);

        // A partial match still offers creation.
        let mut entries = entries_for(&fruits(), &config);
        let outcome = run(&mut entries, "App", &config, false);
        assert_eq!(outcome.result_count, 1);
        assert!(outcome.show_create_option);

        // An exact raw-label match does not.
        let mut entries = entries_for(&fruits(), &config);
        let outcome = run(&mut entries, "Apple", &config, false);
        assert!(outcome.exact_match);
        assert!(!outcome.show_create_option);
    }

    #[test]
    fn test_exact_match_compares_raw_markup() {
        let config = PickerConfig::default();

        let plain = SelectSource::new().with_item(OptionData::new("Apple"));
        let mut entries = entries_for(&plain, &config);
        assert!(run(&mut entries, "Apple", &config, false).exact_match);

        // The plain text equals the query but the raw markup does not.
        let marked = SelectSource::new()
            .with_item(OptionData::new("Apple").with_markup("<b>Apple</b>"));
        let mut entries = entries_for(&marked, &config);
        let outcome = run(&mut entries, "Apple", &config, false);
        assert_eq!(outcome.result_count, 1);
        assert!(!outcome.exact_match);
    }

    #[test]
    fn test_search_is_idempotent() {
        let config = PickerConfig::default().with_search_contains(true);
        let mut entries = entries_for(&fruits(), &config);

        let first = run(&mut entries, "an", &config, false);
        let snapshot = entries.clone();
        let second = run(&mut entries, "an", &config, false);

        assert_eq!(first, second);
        assert_eq!(entries, snapshot);
    }

    #[test]
    fn test_shown_entries_truncation() {
        let source = SelectSource::new()
            .with_item(OptionData::new("One"))
            .with_item(OptionData::new("Two"))
            .with_item(OptionData::new("Three"))
            .with_item(OptionData::new("Four"));

        let config = PickerConfig::default();
        let mut entries = entries_for(&source, &config);
        let outcome = run(&mut entries, "", &config, false);

        // Counts cover the complete set; only the row list is capped.
        assert_eq!(outcome.result_count, 4);
        assert_eq!(shown_entries(&entries, Some(2)), vec![0, 1]);
        assert_eq!(shown_entries(&entries, None), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_shown_entries_include_group_rows() {
        let config = PickerConfig::default();
        let mut entries = entries_for(&fruits(), &config);
        run(&mut entries, "ban", &config, false);

        // The group row precedes its matching member.
        assert_eq!(shown_entries(&entries, None), vec![0, 2]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<em>\"x\"</em>"), "&lt;em&gt;&quot;x&quot;&lt;/em&gt;");
        assert_eq!(escape_html("it's"), "it&#39;s");
        assert_eq!(escape_html("plain"), "plain");
    }
}
