//! Conversions between loosely typed values and item state, plus the small
//! item queries used when syncing with a device.
//!
//! Conversion never fails: out-of-range numbers are clamped, unparsable
//! numbers read as 0, and a scroll position outside the item's entries
//! becomes `0-No entries`.

use crate::color::PortableColor;
use crate::item::{EditItemType, MenuItem, SubMenuItem};
use crate::scroll::CurrentScrollPosition;
use crate::state::{MenuState, StateValue};
use crate::tree::MenuTree;

/// Text stored for a scroll choice whose position is out of range.
pub const NO_ENTRIES: &str = "No entries";

/// Coerce `value` into the storage kind used by `item`.
pub fn state_for_menu_item(
    item: &MenuItem,
    value: StateValue,
    changed: bool,
    active: bool,
) -> MenuState {
    let value = match item {
        MenuItem::Analog(analog) => {
            StateValue::Integer(coerce_int(&value).min(analog.max_value).max(0))
        }
        MenuItem::Enum(en) => {
            let max = (en.enum_entries.len() as i32 - 1).max(0);
            StateValue::Integer(coerce_int(&value).clamp(0, max))
        }
        MenuItem::Boolean(_) => StateValue::Boolean(coerce_bool(&value)),
        MenuItem::Text(_) => StateValue::String(value.to_string()),
        MenuItem::Float(_) => StateValue::Float(coerce_f64(&value)),
        MenuItem::LargeNumber(_) => StateValue::BigDecimal(coerce_f64(&value)),
        MenuItem::RuntimeList(_) => StateValue::StringList(coerce_list(value)),
        MenuItem::ScrollChoice(scroll) => {
            let pos = match value {
                StateValue::Integer(position) => CurrentScrollPosition::new(position, ""),
                StateValue::ScrollPosition(pos) => pos,
                other => CurrentScrollPosition::from_text(&other.to_string()),
            };
            if (0..scroll.num_entries).contains(&pos.position) {
                StateValue::ScrollPosition(pos)
            } else {
                StateValue::ScrollPosition(CurrentScrollPosition::new(0, NO_ENTRIES))
            }
        }
        MenuItem::Rgb32(_) => StateValue::Color(match value {
            StateValue::Color(color) => color,
            StateValue::String(html) => PortableColor::from_html(&html),
            _ => PortableColor::BLACK,
        }),
        MenuItem::SubMenu(_) | MenuItem::Action(_) | MenuItem::CustomBuilder(_) => {
            StateValue::Boolean(false)
        }
    };
    MenuState::new(item.id(), value, changed, active)
}

pub(crate) fn coerce_int(value: &StateValue) -> i32 {
    match value {
        StateValue::Integer(v) => *v,
        StateValue::Boolean(v) => i32::from(*v),
        StateValue::Float(v) | StateValue::BigDecimal(v) => *v as i32,
        StateValue::String(text) => parse_int(text),
        StateValue::ScrollPosition(pos) => pos.position,
        _ => 0,
    }
}

fn parse_int(text: &str) -> i32 {
    let text = text.trim();
    text.parse::<i32>()
        .or_else(|_| text.parse::<f64>().map(|v| v as i32))
        .unwrap_or(0)
}

pub(crate) fn coerce_f64(value: &StateValue) -> f64 {
    match value {
        StateValue::Integer(v) => f64::from(*v),
        StateValue::Boolean(v) => f64::from(u8::from(*v)),
        StateValue::Float(v) | StateValue::BigDecimal(v) => *v,
        StateValue::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub(crate) fn coerce_bool(value: &StateValue) -> bool {
    match value {
        StateValue::Boolean(v) => *v,
        StateValue::Integer(v) => *v != 0,
        StateValue::Float(v) | StateValue::BigDecimal(v) => *v != 0.0,
        StateValue::String(text) => {
            let text = text.trim();
            ["true", "1", "y"]
                .iter()
                .any(|truthy| text.eq_ignore_ascii_case(truthy))
        }
        _ => false,
    }
}

fn coerce_list(value: StateValue) -> Vec<String> {
    match value {
        StateValue::StringList(list) => list,
        StateValue::String(text) if text.is_empty() => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// The value a fresh item of this kind starts with.
pub fn get_default_for(item: &MenuItem) -> StateValue {
    match item {
        MenuItem::Analog(_) | MenuItem::Enum(_) => StateValue::Integer(0),
        MenuItem::Float(_) => StateValue::Float(0.0),
        MenuItem::LargeNumber(_) => StateValue::BigDecimal(0.0),
        MenuItem::Text(_) => StateValue::String(String::new()),
        MenuItem::Rgb32(_) => StateValue::Color(PortableColor::BLACK),
        MenuItem::RuntimeList(_) => StateValue::StringList(Vec::new()),
        MenuItem::ScrollChoice(_) => {
            StateValue::ScrollPosition(CurrentScrollPosition::new(0, ""))
        }
        MenuItem::Boolean(_)
        | MenuItem::SubMenu(_)
        | MenuItem::Action(_)
        | MenuItem::CustomBuilder(_) => StateValue::Boolean(false),
    }
}

pub fn as_sub_menu(item: &MenuItem) -> Option<&SubMenuItem> {
    item.as_sub_menu()
}

/// True when the device keeps a runtime structure for the item, rather than
/// storing only a plain value.
pub fn is_runtime_structure_needed(item: &MenuItem) -> bool {
    matches!(
        item,
        MenuItem::RuntimeList(_)
            | MenuItem::Text(_)
            | MenuItem::LargeNumber(_)
            | MenuItem::ScrollChoice(_)
            | MenuItem::Rgb32(_)
            | MenuItem::SubMenu(_)
    )
}

pub fn create_from_existing_with_id(item: &MenuItem, id: i32) -> MenuItem {
    item.with_id(id)
}

/// Bytes of EEPROM the device needs to persist the item's value.
pub fn eeprom_size_for_item(item: &MenuItem) -> i32 {
    match item {
        MenuItem::Analog(_) | MenuItem::Enum(_) | MenuItem::ScrollChoice(_) => 2,
        MenuItem::Boolean(_) => 1,
        MenuItem::LargeNumber(_) => 8,
        MenuItem::Rgb32(_) => 4,
        MenuItem::Text(text) => match text.item_type {
            EditItemType::IpAddress => 4,
            EditItemType::PlainText => text.text_length,
            _ => 4,
        },
        _ => 0,
    }
}

/// A new state for `item` holding `value`, inheriting `active` from the
/// existing state. `changed` is true unless given.
pub fn modify_existing_state_for_menu_item(
    existing: Option<&MenuState>,
    item: &MenuItem,
    value: StateValue,
    changed: Option<bool>,
) -> MenuState {
    let active = existing.is_some_and(|state| state.active);
    state_for_menu_item(item, value, changed.unwrap_or(true), active)
}

/// Step an integer or scroll-position item by `delta`.
///
/// Returns the new state, or `None` when the result would leave the item's
/// range or the item holds no steppable value.
pub fn apply_incremental_value_change(
    item: &MenuItem,
    delta: i32,
    tree: &mut MenuTree,
) -> Option<MenuState> {
    let state = tree
        .get_menu_state(item)
        .cloned()
        .unwrap_or_else(|| state_for_menu_item(item, get_default_for(item), false, false));

    let new_value = match &state.value {
        StateValue::Integer(current) => {
            let val = current.checked_add(delta)?;
            let max = match item {
                MenuItem::Analog(analog) => analog.max_value,
                MenuItem::Enum(en) => en.enum_entries.len() as i32 - 1,
                _ => i32::MAX,
            };
            if val < 0 || val > max {
                return None;
            }
            StateValue::Integer(val)
        }
        StateValue::ScrollPosition(pos) => {
            let val = pos.position.checked_add(delta)?;
            let entries = match item {
                MenuItem::ScrollChoice(scroll) => scroll.num_entries,
                _ => i32::MAX,
            };
            if val < 0 || val >= entries {
                return None;
            }
            StateValue::ScrollPosition(CurrentScrollPosition::new(val, ""))
        }
        _ => return None,
    };

    let new_state = modify_existing_state_for_menu_item(Some(&state), item, new_value, None);
    tree.change_item(item, new_state.clone());
    Some(new_state)
}

/// Store `value` for `item`; the state is marked changed only when the
/// value really differs from the previous one.
pub fn set_menu_state(item: &MenuItem, value: impl Into<StateValue>, tree: &mut MenuTree) {
    let value = value.into();
    let state = match tree.get_menu_state(item) {
        Some(old) => {
            let candidate = state_for_menu_item(item, value, false, old.active);
            let changed = candidate.value != old.value;
            MenuState { changed, ..candidate }
        }
        None => state_for_menu_item(item, value, false, false),
    };
    tree.change_item(item, state);
}

/// The current value of `item`.
///
/// When the tree has no state yet, `default` (or the kind's default) is
/// stored first and the stored value is returned.
pub fn get_value_for(
    item: &MenuItem,
    tree: &mut MenuTree,
    default: Option<StateValue>,
) -> StateValue {
    if let Some(state) = tree.get_menu_state(item) {
        return state.value.clone();
    }
    let default = default.unwrap_or_else(|| get_default_for(item));
    let state = state_for_menu_item(item, default, false, false);
    let value = state.value.clone();
    tree.change_item(item, state);
    value
}
