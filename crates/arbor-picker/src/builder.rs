//! Flat entry list construction.
//!
//! [`build_entries`] traverses the option source in document order and
//! assigns every node (group header, option, or blank placeholder) a
//! strictly increasing sequence index. The resulting list is rebuilt from
//! scratch whenever the source changes; it is never partially patched.

use crate::config::PickerConfig;
use crate::entry::{
    DATA_ATTRIBUTE_PREFIX, EmptyEntry, Entry, GroupEntry, ItemEntry, META_INDEX, META_VALUE,
};
use crate::source::{GroupData, OptionData, SelectSource, SourceNode};

/// Flatten the option source into an ordered entry list.
///
/// Group members snapshot their group's label and flags at build time; a
/// later group mutation does not retroactively update already-built items.
/// Building never fails: options without usable text become
/// [`Entry::Empty`] placeholders that keep the index arithmetic stable.
pub fn build_entries(source: &SelectSource, config: &PickerConfig) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(source.option_count() + source.nodes.len());
    let mut next_index = 0usize;

    for node in &source.nodes {
        match node {
            SourceNode::Item(option) => {
                entries.push(build_option(option, next_index, None, config));
                next_index += 1;
            }
            SourceNode::Group(group) => {
                let group_index = next_index;
                next_index += 1;

                let mut members = Vec::with_capacity(group.children.len());
                let mut child_count = 0usize;
                for child in &group.children {
                    let entry = build_option(child, next_index, Some((group_index, group)), config);
                    next_index += 1;
                    if entry.as_item().is_some() {
                        child_count += 1;
                    }
                    members.push(entry);
                }

                entries.push(Entry::Group(GroupEntry {
                    index: group_index,
                    label: group.label.clone(),
                    disabled: group.disabled,
                    hidden: group.hidden,
                    children: child_count,
                    matched: false,
                    active_children: 0,
                }));
                entries.append(&mut members);
            }
        }
    }

    tracing::debug!(
        target: "arbor_picker::builder",
        entries = entries.len(),
        "entry list rebuilt"
    );
    entries
}

fn build_option(
    option: &OptionData,
    index: usize,
    group: Option<(usize, &GroupData)>,
    config: &PickerConfig,
) -> Entry {
    if option.text.is_empty() {
        return Entry::Empty(EmptyEntry { index });
    }

    let value = option.value_or_text().to_string();

    let mut metadata = vec![
        (META_INDEX.to_string(), index.to_string()),
        (META_VALUE.to_string(), value.clone()),
    ];
    if config.include_data_attributes {
        for (name, attr_value) in &option.attributes {
            if name.starts_with(DATA_ATTRIBUTE_PREFIX) {
                metadata.push((name.clone(), attr_value.clone()));
            }
        }
    }

    Entry::Item(ItemEntry {
        index,
        text: option.text.clone(),
        markup: option.label_markup().to_string(),
        value,
        title: option.title.clone(),
        selected: option.selected,
        disabled: option.disabled,
        hidden: option.hidden,
        group: group.map(|(group_index, _)| group_index),
        group_label: group.map(|(_, data)| data.label.clone()),
        group_disabled: group.is_some_and(|(_, data)| data.disabled),
        group_hidden: group.is_some_and(|(_, data)| data.hidden),
        style: option.style.clone(),
        classes: option.classes.clone(),
        metadata,
        matched: false,
        highlighted: None,
    })
}
