use std::fmt;

use serde::Serialize;
use tcmenu_domain::helper::{get_value_for, state_for_menu_item};
use tcmenu_domain::{
    ActionMenuItem, AnalogMenuItem, BooleanMenuItem, CurrentScrollPosition,
    EditableLargeNumberMenuItem, EditableTextMenuItem, EnumMenuItem, FloatMenuItem, MenuItem,
    MenuState, MenuTree, PortableColor, Rgb32MenuItem, RuntimeListMenuItem, ScrollChoiceMenuItem,
    StateValue, SubMenuItem,
};

use super::MenuCommand;
use crate::field::{self, MessageField};

/// An item kind the device can announce during bootstrap.
pub trait BootItem: Clone + fmt::Debug + PartialEq + Serialize + Into<MenuItem> {
    /// Message identity of this kind's boot command.
    const COMMAND_TYPE: MessageField;

    /// Whether a boot can flag the item's state as changed.
    const VALUE_CAN_CHANGE: bool = true;

    /// Value carried next to the item.
    type Value: Clone + fmt::Debug + PartialEq + Serialize + Into<StateValue>;

    /// Extract the boot value from a state already coerced for this kind.
    fn value_from_state(value: &StateValue) -> Self::Value;

    /// The boot value as sent, before any clamping.
    fn raw_state_value(value: &Self::Value) -> StateValue {
        value.clone().into()
    }
}

/// Announces one item, its parent submenu and its current value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootItemMenuCommand<I: BootItem> {
    pub sub_menu_id: i32,
    pub menu_item: I,
    pub current_value: I::Value,
}

impl<I: BootItem> BootItemMenuCommand<I> {
    pub fn new(sub_menu_id: i32, menu_item: I, current_value: I::Value) -> Self {
        Self {
            sub_menu_id,
            menu_item,
            current_value,
        }
    }

    pub fn command_type(&self) -> MessageField {
        I::COMMAND_TYPE
    }

    pub fn item(&self) -> MenuItem {
        self.menu_item.clone().into()
    }

    /// State to store for the item after this boot.
    ///
    /// `active` is kept from `old`. `changed` compares the value as sent with
    /// the old one, so an out-of-range value counts as a change even when it
    /// is stored clamped to the old value.
    pub fn new_menu_state(&self, old: Option<&MenuState>) -> MenuState {
        let item = self.item();
        let active = old.is_some_and(|state| state.active);
        let raw = I::raw_state_value(&self.current_value);
        let changed = I::VALUE_CAN_CHANGE && old.is_some_and(|old| old.value != raw);
        let state = state_for_menu_item(&item, raw, false, active);
        MenuState { changed, ..state }
    }
}

pub type MenuAnalogBootCommand = BootItemMenuCommand<AnalogMenuItem>;
pub type MenuActionBootCommand = BootItemMenuCommand<ActionMenuItem>;
pub type MenuSubBootCommand = BootItemMenuCommand<SubMenuItem>;
pub type MenuEnumBootCommand = BootItemMenuCommand<EnumMenuItem>;
pub type MenuBooleanBootCommand = BootItemMenuCommand<BooleanMenuItem>;
pub type MenuFloatBootCommand = BootItemMenuCommand<FloatMenuItem>;
pub type MenuTextBootCommand = BootItemMenuCommand<EditableTextMenuItem>;
pub type MenuLargeNumBootCommand = BootItemMenuCommand<EditableLargeNumberMenuItem>;
pub type MenuRuntimeListBootCommand = BootItemMenuCommand<RuntimeListMenuItem>;
pub type MenuScrollChoiceBootCommand = BootItemMenuCommand<ScrollChoiceMenuItem>;
pub type MenuRgb32BootCommand = BootItemMenuCommand<Rgb32MenuItem>;

macro_rules! boot_item {
    ($item:ty, $field:expr, $value:ty, |$state:ident| $extract:expr) => {
        impl BootItem for $item {
            const COMMAND_TYPE: MessageField = $field;
            type Value = $value;

            fn value_from_state($state: &StateValue) -> $value {
                $extract
            }
        }
    };
}

boot_item!(AnalogMenuItem, field::ANALOG_BOOT_ITEM, i32, |v| v.as_int().unwrap_or(0));
boot_item!(ActionMenuItem, field::ACTION_BOOT_ITEM, bool, |_v| false);
boot_item!(EnumMenuItem, field::ENUM_BOOT_ITEM, i32, |v| v.as_int().unwrap_or(0));
boot_item!(BooleanMenuItem, field::BOOLEAN_BOOT_ITEM, bool, |v| v.as_bool().unwrap_or(false));
boot_item!(FloatMenuItem, field::FLOAT_BOOT_ITEM, f64, |v| v.as_f64().unwrap_or(0.0));
boot_item!(EditableTextMenuItem, field::TEXT_BOOT_ITEM, String, |v| v.to_string());

impl BootItem for EditableLargeNumberMenuItem {
    const COMMAND_TYPE: MessageField = field::LARGE_NUM_BOOT_ITEM;
    type Value = f64;

    fn value_from_state(value: &StateValue) -> f64 {
        value.as_f64().unwrap_or(0.0)
    }

    fn raw_state_value(value: &f64) -> StateValue {
        StateValue::BigDecimal(*value)
    }
}

boot_item!(RuntimeListMenuItem, field::RUNTIME_LIST_BOOT, Vec<String>, |v| v
    .as_list()
    .map(<[String]>::to_vec)
    .unwrap_or_default());
boot_item!(ScrollChoiceMenuItem, field::BOOT_SCROLL_CHOICE, CurrentScrollPosition, |v| v
    .as_scroll()
    .cloned()
    .unwrap_or_default());
boot_item!(Rgb32MenuItem, field::BOOT_RGB_COLOR, PortableColor, |v| v
    .as_color()
    .unwrap_or_default());

impl BootItem for SubMenuItem {
    const COMMAND_TYPE: MessageField = field::SUBMENU_BOOT_ITEM;
    const VALUE_CAN_CHANGE: bool = false;
    type Value = bool;

    fn value_from_state(_value: &StateValue) -> bool {
        false
    }
}

fn boot_for<I: BootItem>(sub_menu_id: i32, item: &I, tree: &mut MenuTree) -> BootItemMenuCommand<I> {
    let value = get_value_for(&item.clone().into(), tree, None);
    BootItemMenuCommand::new(sub_menu_id, item.clone(), I::value_from_state(&value))
}

/// The boot command announcing `item` under `parent`, using the value held
/// in `tree` (its default is stored first when there is none).
///
/// Custom builder items have no boot form and yield `None`.
pub fn boot_command_for_item(
    item: &MenuItem,
    parent: &SubMenuItem,
    tree: &mut MenuTree,
) -> Option<MenuCommand> {
    let parent_id = parent.id();
    let command: MenuCommand = match item {
        MenuItem::Analog(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::Action(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::SubMenu(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::Enum(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::Boolean(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::Float(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::Text(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::LargeNumber(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::RuntimeList(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::ScrollChoice(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::Rgb32(i) => boot_for(parent_id, i, tree).into(),
        MenuItem::CustomBuilder(_) => return None,
    };
    Some(command)
}
