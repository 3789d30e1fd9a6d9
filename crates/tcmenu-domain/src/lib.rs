//! Menu domain model for tcMenu remote control.
//!
//! Every message exchanged with a device ultimately populates or mutates the
//! structures in this crate:
//! - [`MenuItem`]: the immutable item definitions, one variant per item kind
//! - [`MenuState`]: the current value of an item, replaced wholesale on change
//! - [`MenuTree`]: the submenu hierarchy plus the id to state map
//!
//! The [`helper`] module converts loosely typed values into state records and
//! [`format`] renders values for display.

pub mod color;
pub mod error;
pub mod format;
pub mod helper;
pub mod item;
pub mod list_response;
pub mod scroll;
pub mod state;
pub mod tree;

pub use color::PortableColor;
pub use error::{DomainError, Result};
pub use item::{
    ActionMenuItem, AnalogMenuItem, BooleanMenuItem, BooleanNaming, CustomBuilderMenuItem,
    CustomMenuType, EditItemType, EditableLargeNumberMenuItem, EditableTextMenuItem,
    EnumMenuItem, FloatMenuItem, ItemInfo, MenuItem, Rgb32MenuItem, RuntimeListMenuItem,
    ScrollChoiceMenuItem, ScrollChoiceMode, SubMenuItem, ROOT_MENU_ID,
};
pub use list_response::{ListResponse, ResponseType};
pub use scroll::CurrentScrollPosition;
pub use state::{MenuState, StateValue, StorageKind};
pub use tree::{MenuTree, MoveType};
