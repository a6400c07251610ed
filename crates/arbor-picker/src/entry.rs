//! Flat entry model.
//!
//! The picker never walks the hierarchical source during interaction.
//! Instead [`crate::builder::build_entries`] flattens it into an ordered
//! [`Entry`] list where every element (item, group header, or blank
//! placeholder) owns one stable sequence index. The sequence index doubles
//! as the entry's position in the list and is never reused or renumbered
//! within a build.
//!
//! Search state (`matched`, `highlighted`, aggregate counters) is transient:
//! it is cleared and recomputed in full on every search pass.

/// Fixed metadata key for the entry's sequence index.
pub const META_INDEX: &str = "index";

/// Fixed metadata key for the entry's value.
pub const META_VALUE: &str = "value";

/// Recognized prefix for vendor attribute copy-through.
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-";

/// A flattened selectable option.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    /// Sequence index, unique across the whole flat list.
    pub index: usize,
    /// Display text.
    pub text: String,
    /// Raw label markup.
    pub markup: String,
    /// Submission value.
    pub value: String,
    /// Tooltip/title text.
    pub title: String,
    /// Whether the option is currently selected.
    pub selected: bool,
    /// Whether the option itself is disabled.
    pub disabled: bool,
    /// Whether the option is hidden.
    pub hidden: bool,
    /// Sequence index of the owning group entry, which always precedes this
    /// entry in the list.
    pub group: Option<usize>,
    /// Owning group's label, snapshotted at build time.
    pub group_label: Option<String>,
    /// Owning group's disabled flag, snapshotted at build time.
    pub group_disabled: bool,
    /// Owning group's hidden flag, snapshotted at build time.
    pub group_hidden: bool,
    /// Inline style override.
    pub style: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Metadata pairs: always the sequence index and value under the fixed
    /// keys, plus any copied-through `data-` attributes.
    pub metadata: Vec<(String, String)>,
    /// Whether the entry matched the most recent search pass.
    pub matched: bool,
    /// Highlighted label markup from the most recent search pass.
    pub highlighted: Option<String>,
}

impl ItemEntry {
    /// Effective disabled state: the option's own flag or its group's.
    ///
    /// Group disablement propagates down, never up.
    pub fn effective_disabled(&self) -> bool {
        self.disabled || self.group_disabled
    }

    /// Look up a metadata value by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A flattened group header.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    /// Sequence index, shared with the item index space.
    pub index: usize,
    /// Header label.
    pub label: String,
    /// Whether the group is disabled.
    pub disabled: bool,
    /// Whether the group is hidden.
    pub hidden: bool,
    /// Number of item entries belonging to this group.
    pub children: usize,
    /// Whether the label matched the most recent search pass.
    pub matched: bool,
    /// Number of member entries that matched the most recent search pass.
    pub active_children: usize,
}

/// A placeholder for a source option with no usable text.
///
/// Excluded from search and rendering, but it keeps its sequence index so
/// index arithmetic stays stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyEntry {
    /// Sequence index.
    pub index: usize,
}

/// One element of the flat entry list.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A selectable option.
    Item(ItemEntry),
    /// A group header.
    Group(GroupEntry),
    /// A blank placeholder.
    Empty(EmptyEntry),
}

impl Entry {
    /// The entry's sequence index.
    pub fn index(&self) -> usize {
        match self {
            Self::Item(item) => item.index,
            Self::Group(group) => group.index,
            Self::Empty(empty) => empty.index,
        }
    }

    /// Borrow the item entry, if this is one.
    pub fn as_item(&self) -> Option<&ItemEntry> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Mutably borrow the item entry, if this is one.
    pub fn as_item_mut(&mut self) -> Option<&mut ItemEntry> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Borrow the group entry, if this is one.
    pub fn as_group(&self) -> Option<&GroupEntry> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Mutably borrow the group entry, if this is one.
    pub fn as_group_mut(&mut self) -> Option<&mut GroupEntry> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Reset the transient search state.
    pub fn clear_match(&mut self) {
        match self {
            Self::Item(item) => {
                item.matched = false;
                item.highlighted = None;
            }
            Self::Group(group) => {
                group.matched = false;
                group.active_children = 0;
            }
            Self::Empty(_) => {}
        }
    }
}
