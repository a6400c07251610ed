//! Hierarchical option source.
//!
//! [`SelectSource`] is the in-memory stand-in for the native list element the
//! picker enhances: a document-ordered list of selectable options, optionally
//! grouped under headers, with per-option state the picker reads during model
//! builds and writes back on every selection change.
//!
//! The flat entry list (see [`crate::builder`]) addresses options by the
//! sequence index assigned during a document-order traversal. Group headers
//! occupy an index of their own, so write-backs use the same traversal to
//! find the target option.

/// One selectable option as it exists in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionData {
    /// Display text.
    pub text: String,
    /// Submission value. Falls back to `text` when unset.
    pub value: Option<String>,
    /// Tooltip/title text.
    pub title: String,
    /// Whether the option is currently selected.
    pub selected: bool,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Whether the option is hidden from results.
    pub hidden: bool,
    /// Inline style override carried through to rendering.
    pub style: String,
    /// Class list carried through to rendering.
    pub classes: Vec<String>,
    /// Raw markup rendering of the label. Falls back to `text` when unset.
    pub markup: Option<String>,
    /// Vendor/custom attributes (name, value).
    pub attributes: Vec<(String, String)>,
}

impl OptionData {
    /// Create an option with the given display text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the value using builder pattern.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the title using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the selected flag using builder pattern.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the hidden flag using builder pattern.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the style override using builder pattern.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Add a class using builder pattern.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the raw label markup using builder pattern.
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }

    /// Add a vendor attribute using builder pattern.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// The submission value, falling back to the display text.
    pub fn value_or_text(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.text)
    }

    /// The raw label markup, falling back to the display text.
    pub fn label_markup(&self) -> &str {
        self.markup.as_deref().unwrap_or(&self.text)
    }
}

/// A group header with its member options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupData {
    /// Group header label.
    pub label: String,
    /// Whether the whole group is disabled. Propagates to members.
    pub disabled: bool,
    /// Whether the whole group is hidden.
    pub hidden: bool,
    /// Member options, in document order.
    pub children: Vec<OptionData>,
}

impl GroupData {
    /// Create a group with the given header label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the hidden flag using builder pattern.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Add a member option using builder pattern.
    pub fn with_child(mut self, child: OptionData) -> Self {
        self.children.push(child);
        self
    }
}

/// A top-level node of the option source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceNode {
    /// An ungrouped option.
    Item(OptionData),
    /// A group header with member options.
    Group(GroupData),
}

/// The hierarchical option source backing a picker.
///
/// # Example
///
/// ```
/// use arbor_picker::{GroupData, OptionData, SelectSource};
///
/// let source = SelectSource::new()
///     .with_group(
///         GroupData::new("Fruits")
///             .with_child(OptionData::new("Apple").with_selected(true))
///             .with_child(OptionData::new("Banana")),
///     )
///     .with_item(OptionData::new("Carrot"));
///
/// assert_eq!(source.option_count(), 3);
/// assert_eq!(source.selected_values(), vec!["Apple".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectSource {
    /// Whether more than one option may be selected.
    pub multiple: bool,
    /// Top-level nodes in document order.
    pub nodes: Vec<SourceNode>,
}

impl SelectSource {
    /// Create an empty single-valued source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set multi-valued mode using builder pattern.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Add a top-level option using builder pattern.
    pub fn with_item(mut self, option: OptionData) -> Self {
        self.nodes.push(SourceNode::Item(option));
        self
    }

    /// Add a group using builder pattern.
    pub fn with_group(mut self, group: GroupData) -> Self {
        self.nodes.push(SourceNode::Group(group));
        self
    }

    /// Append a top-level option.
    pub fn push_item(&mut self, option: OptionData) {
        self.nodes.push(SourceNode::Item(option));
    }

    /// Append a group.
    pub fn push_group(&mut self, group: GroupData) {
        self.nodes.push(SourceNode::Group(group));
    }

    /// The number of options (group headers are not counted).
    pub fn option_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                SourceNode::Item(_) => 1,
                SourceNode::Group(group) => group.children.len(),
            })
            .sum()
    }

    /// Look up an option by its traversal sequence index.
    ///
    /// Returns `None` when the index is out of range or addresses a group
    /// header, which occupies a sequence index of its own.
    pub fn option(&self, sequence: usize) -> Option<&OptionData> {
        let mut index = 0usize;
        for node in &self.nodes {
            match node {
                SourceNode::Item(option) => {
                    if index == sequence {
                        return Some(option);
                    }
                    index += 1;
                }
                SourceNode::Group(group) => {
                    if index == sequence {
                        return None;
                    }
                    index += 1;
                    for child in &group.children {
                        if index == sequence {
                            return Some(child);
                        }
                        index += 1;
                    }
                }
            }
        }
        None
    }

    /// Mutable variant of [`SelectSource::option`].
    pub fn option_mut(&mut self, sequence: usize) -> Option<&mut OptionData> {
        let mut index = 0usize;
        for node in &mut self.nodes {
            match node {
                SourceNode::Item(option) => {
                    if index == sequence {
                        return Some(option);
                    }
                    index += 1;
                }
                SourceNode::Group(group) => {
                    if index == sequence {
                        return None;
                    }
                    index += 1;
                    for child in &mut group.children {
                        if index == sequence {
                            return Some(child);
                        }
                        index += 1;
                    }
                }
            }
        }
        None
    }

    /// Write selection state back to the option at the given sequence index.
    ///
    /// Returns `false` when the index does not address an option.
    pub fn set_selected(&mut self, sequence: usize, selected: bool) -> bool {
        match self.option_mut(sequence) {
            Some(option) => {
                option.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Clear the selected flag on every option.
    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            match node {
                SourceNode::Item(option) => option.selected = false,
                SourceNode::Group(group) => {
                    for child in &mut group.children {
                        child.selected = false;
                    }
                }
            }
        }
    }

    /// The values of all currently selected options, in document order.
    pub fn selected_values(&self) -> Vec<String> {
        let mut values = Vec::new();
        for node in &self.nodes {
            match node {
                SourceNode::Item(option) => {
                    if option.selected {
                        values.push(option.value_or_text().to_string());
                    }
                }
                SourceNode::Group(group) => {
                    for child in &group.children {
                        if child.selected {
                            values.push(child.value_or_text().to_string());
                        }
                    }
                }
            }
        }
        values
    }

    /// Whether the source starts with a blank placeholder option.
    ///
    /// Single-deselect resets to this placeholder.
    pub fn leading_blank_option(&self) -> bool {
        matches!(self.nodes.first(), Some(SourceNode::Item(option)) if option.text.is_empty())
    }
}
