//! Human readable rendering of item values.

use crate::color::PortableColor;
use crate::helper::{coerce_bool, coerce_f64, coerce_int};
use crate::item::{AnalogMenuItem, BooleanMenuItem, BooleanNaming, MenuItem};
use crate::scroll::CurrentScrollPosition;
use crate::state::StateValue;

/// Render `value` the way the device would show it for `item`.
///
/// Values of the wrong kind are coerced first; submenus, actions and custom
/// items render as an empty string.
pub fn format_for_display(item: &MenuItem, value: &StateValue) -> String {
    match item {
        MenuItem::Analog(analog) => format_analog(analog, coerce_int(value)),
        MenuItem::Boolean(boolean) => format_bool(boolean, coerce_bool(value)),
        MenuItem::Enum(en) => usize::try_from(coerce_int(value))
            .ok()
            .and_then(|idx| en.enum_entries.get(idx))
            .cloned()
            .unwrap_or_default(),
        MenuItem::Float(float) => format_decimal(coerce_f64(value), float.num_decimal_places),
        MenuItem::LargeNumber(large) => format_decimal(coerce_f64(value), large.decimal_places),
        MenuItem::Text(_) => value.to_string(),
        MenuItem::ScrollChoice(_) => match value {
            StateValue::ScrollPosition(pos) => pos.value.clone(),
            other => CurrentScrollPosition::from_text(&other.to_string()).value,
        },
        MenuItem::Rgb32(rgb) => {
            let color = match value {
                StateValue::Color(color) => *color,
                other => PortableColor::from_html(&other.to_string()),
            };
            let html = color.to_string();
            if rgb.include_alpha_channel {
                html
            } else {
                html[..7].to_string()
            }
        }
        MenuItem::RuntimeList(_) => match value {
            StateValue::StringList(rows) => rows.join(", "),
            other => other.to_string(),
        },
        MenuItem::SubMenu(_) | MenuItem::Action(_) | MenuItem::CustomBuilder(_) => String::new(),
    }
}

fn format_analog(item: &AnalogMenuItem, raw: i32) -> String {
    let shifted = i64::from(raw) + i64::from(item.offset);
    if item.divisor < 2 {
        return format!("{shifted}{}", item.unit_name);
    }
    let value = shifted as f64 / f64::from(item.divisor);
    let places = required_digits(item.divisor);
    format!("{value:.places$}{}", item.unit_name)
}

/// Decimal places needed to show every step of `divisor`.
fn required_digits(divisor: i32) -> usize {
    match divisor {
        ..=10 => 1,
        11..=100 => 2,
        101..=1000 => 3,
        _ => 4,
    }
}

fn format_bool(item: &BooleanMenuItem, value: bool) -> String {
    let (on, off) = match item.naming {
        BooleanNaming::TrueFalse => ("True", "False"),
        BooleanNaming::OnOff => ("On", "Off"),
        BooleanNaming::YesNo => ("Yes", "No"),
        BooleanNaming::Checkbox => ("[X]", "[ ]"),
    };
    let text = if value { on } else { off };
    text.to_string()
}

/// Most decimal places a float or large number is ever shown with.
pub const MAX_DECIMAL_PLACES: usize = 10;

fn format_decimal(value: f64, places: i32) -> String {
    let places = usize::try_from(places).unwrap_or(0).min(MAX_DECIMAL_PLACES);
    format!("{value:.places$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{
        ActionMenuItem, EditableTextMenuItem, EnumMenuItem, FloatMenuItem, ItemInfo,
        Rgb32MenuItem, ScrollChoiceMenuItem, SubMenuItem,
    };

    fn analog(divisor: i32, offset: i32, unit: &str) -> MenuItem {
        AnalogMenuItem {
            max_value: 255,
            offset,
            divisor,
            unit_name: unit.to_string(),
            info: ItemInfo::new(1, "Volume"),
            ..AnalogMenuItem::default()
        }
        .into()
    }

    #[test]
    fn analog_applies_offset_and_divisor() {
        let item = analog(2, -180, "dB");
        assert_eq!(format_for_display(&item, &StateValue::Integer(101)), "-39.5dB");
        assert_eq!(format_for_display(&item, &StateValue::Integer(180)), "0.0dB");
    }

    #[test]
    fn analog_integer_percentage() {
        let item = analog(1, 0, "%");
        assert_eq!(format_for_display(&item, &StateValue::Integer(0)), "0%");
        assert_eq!(format_for_display(&item, &StateValue::Integer(100)), "100%");
    }

    #[test]
    fn analog_decimal_places_follow_divisor() {
        assert_eq!(
            format_for_display(&analog(100, 0, "V"), &StateValue::Integer(1234)),
            "12.34V"
        );
        assert_eq!(
            format_for_display(&analog(1000, 0, ""), &StateValue::Integer(5)),
            "0.005"
        );
    }

    #[test]
    fn booleans_follow_naming() {
        let item = |naming| -> MenuItem {
            BooleanMenuItem {
                naming,
                info: ItemInfo::new(3, "Flag"),
            }
            .into()
        };
        let yes = StateValue::Boolean(true);
        let no = StateValue::Boolean(false);
        assert_eq!(format_for_display(&item(BooleanNaming::TrueFalse), &yes), "True");
        assert_eq!(format_for_display(&item(BooleanNaming::OnOff), &no), "Off");
        assert_eq!(format_for_display(&item(BooleanNaming::YesNo), &yes), "Yes");
        assert_eq!(format_for_display(&item(BooleanNaming::Checkbox), &no), "[ ]");
    }

    #[test]
    fn enum_scroll_and_text() {
        let en: MenuItem = EnumMenuItem {
            enum_entries: vec!["Cold".into(), "Warm Valves".into()],
            info: ItemInfo::new(14, "Mode"),
        }
        .into();
        assert_eq!(format_for_display(&en, &StateValue::Integer(1)), "Warm Valves");
        assert_eq!(format_for_display(&en, &StateValue::Integer(9)), "");

        let scroll: MenuItem = ScrollChoiceMenuItem {
            num_entries: 3,
            info: ItemInfo::new(2, "Scroll"),
            ..ScrollChoiceMenuItem::default()
        }
        .into();
        let pos = StateValue::from(CurrentScrollPosition::new(1, "hello"));
        assert_eq!(format_for_display(&scroll, &pos), "hello");

        let text: MenuItem = EditableTextMenuItem {
            text_length: 10,
            info: ItemInfo::new(22, "Text"),
            ..EditableTextMenuItem::default()
        }
        .into();
        assert_eq!(format_for_display(&text, &"text".into()), "text");
    }

    #[test]
    fn valueless_items_are_blank() {
        let sub: MenuItem = SubMenuItem::new(ItemInfo::new(5, "Settings")).into();
        let action: MenuItem = ActionMenuItem {
            info: ItemInfo::new(24, "Go"),
        }
        .into();
        assert_eq!(format_for_display(&sub, &StateValue::Boolean(false)), "");
        assert_eq!(format_for_display(&action, &StateValue::Boolean(false)), "");
    }

    #[test]
    fn floats_and_colors() {
        let float: MenuItem = FloatMenuItem {
            num_decimal_places: 2,
            info: ItemInfo::new(7, "Temp"),
        }
        .into();
        assert_eq!(format_for_display(&float, &StateValue::Float(21.456)), "21.46");

        let rgb = |include_alpha_channel| -> MenuItem {
            Rgb32MenuItem {
                include_alpha_channel,
                info: ItemInfo::new(8, "Color"),
            }
            .into()
        };
        let color = StateValue::from(PortableColor::new(1, 2, 3, 4));
        assert_eq!(format_for_display(&rgb(true), &color), "#01020304");
        assert_eq!(format_for_display(&rgb(false), &color), "#010203");
    }

    #[test]
    fn decimal_places_from_the_wire_are_capped() {
        let float: MenuItem = FloatMenuItem {
            num_decimal_places: 2_000_000_000,
            info: ItemInfo::new(7, "Temp"),
        }
        .into();
        assert_eq!(format_for_display(&float, &StateValue::Float(1.5)), "1.5000000000");

        let negative: MenuItem = FloatMenuItem {
            num_decimal_places: -3,
            info: ItemInfo::new(7, "Temp"),
        }
        .into();
        assert_eq!(format_for_display(&negative, &StateValue::Float(1.5)), "2");
    }
}
