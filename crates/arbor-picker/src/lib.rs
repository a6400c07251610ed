//! Arbor Picker - a searchable, keyboard-navigable selection widget core.
//!
//! Arbor Picker replaces a native list-selection element with a searchable,
//! optionally multi-valued picker while faithfully mirroring the semantics
//! of the backing option list: groups, disabled and hidden state,
//! pre-selections, live text search with diacritic-insensitive matching and
//! result highlighting, free-text option creation, and full keyboard
//! interaction.
//!
//! The crate is host-neutral: it computes *what* to show and the host
//! renders it through a [`RenderSink`] implementation, listening to the
//! picker's lifecycle signals for everything else.
//!
//! # Architecture
//!
//! ```text
//! SelectSource ──build_entries──> Vec<Entry> ──search::run──> annotated
//!      ^                                                      entries
//!      │                                                         │
//!      └───────── selection write-back ──── Picker <─────────────┘
//!                                             │
//!                                 RenderSink calls + signals
//! ```
//!
//! - [`SelectSource`]: the hierarchical option source (items, groups,
//!   per-option state) with selection write-back
//! - [`builder::build_entries`]: flattens the source into indexed
//!   [`Entry`] values
//! - [`search`]: per-keystroke matching, highlighting, and outcome
//!   decisions
//! - [`Picker`]: the interaction state machine (activation, dropdown,
//!   highlight cursor, chips, backstroke deletion)
//!
//! # Example
//!
//! ```
//! use arbor_picker::{
//!     KeyPressEvent, NullRenderSink, OptionData, Picker, PickerConfig, SelectSource,
//! };
//!
//! let source = SelectSource::new()
//!     .with_multiple(true)
//!     .with_item(OptionData::new("München"))
//!     .with_item(OptionData::new("Berlin"));
//!
//! let mut picker = Picker::create(
//!     source,
//!     PickerConfig::default(),
//!     Box::new(NullRenderSink),
//! )
//! .unwrap();
//!
//! picker.handle_focus();
//! picker.handle_key_press(&KeyPressEvent::text_input("munchen"));
//! assert_eq!(picker.last_outcome().result_count, 1);
//! ```

pub mod builder;
pub mod config;
pub mod entry;
mod error;
pub mod events;
pub mod picker;
pub mod render;
pub mod search;
pub mod source;

pub use builder::build_entries;
pub use config::PickerConfig;
pub use entry::{DATA_ATTRIBUTE_PREFIX, EmptyEntry, Entry, GroupEntry, ItemEntry, META_INDEX, META_VALUE};
pub use error::PickerError;
pub use events::{Key, KeyPressEvent, KeyboardModifiers};
pub use picker::{
    BLUR_CHECK_DELAY, DeferredAction, PASTE_SEARCH_DELAY, Picker, SelectionChange,
};
pub use render::{Chip, HighlightTarget, NullRenderSink, RenderPlan, RenderSink};
pub use search::{SearchOutcome, shown_entries};
pub use source::{GroupData, OptionData, SelectSource, SourceNode};
