//! Import and export of menu subtrees as `tcMenuCopy:` JSON.
//!
//! The format is shared with the tcMenu designer: a JSON array of records,
//! each holding the item definition, its parent submenu id, the item type
//! name, and optionally the item's current value as text.

pub mod error;
pub mod persisted;
pub mod serializer;
pub mod version;

pub use error::{PersistError, Result};
pub use persisted::{PersistType, PersistedMenu, TCMENU_COPY_PREFIX};
pub use serializer::{
    check_item_value_can_persist, copy_text_to_items, from_json, items_to_copy_text,
    new_menu_tree_with_items, populate_list_in_order, to_json,
};
pub use version::VersionInfo;
