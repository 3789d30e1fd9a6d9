//! Constructors for the commands a client usually sends or a test needs.

use std::fmt::Display;

use tcmenu_domain::{
    ActionMenuItem, AnalogMenuItem, BooleanMenuItem, CurrentScrollPosition,
    EditableLargeNumberMenuItem, EditableTextMenuItem, EnumMenuItem, FloatMenuItem, ListResponse,
    PortableColor, Rgb32MenuItem, RuntimeListMenuItem, ScrollChoiceMenuItem, SubMenuItem,
};
use uuid::Uuid;

use crate::command::*;
use crate::correlation::CorrelationId;
use crate::platform::{module_version_code, ApiPlatform};

/// A join for this library's version. A random UUID is used when none is
/// given.
pub fn new_join_command(name: &str, platform: ApiPlatform, uuid: Option<Uuid>) -> MenuJoinCommand {
    MenuJoinCommand {
        my_name: name.to_string(),
        api_version: module_version_code(),
        platform,
        app_uuid: uuid.unwrap_or_else(Uuid::new_v4),
        serial_number: DEFAULT_SERIAL_NUMBER,
    }
}

pub fn new_heartbeat_command(interval: i32, mode: HeartbeatMode) -> MenuHeartbeatCommand {
    MenuHeartbeatCommand {
        heartbeat_interval: interval,
        mode,
    }
}

pub fn new_acknowledgement_command(
    correlation_id: CorrelationId,
    status: AckStatus,
) -> MenuAcknowledgementCommand {
    MenuAcknowledgementCommand {
        correlation_id,
        ack_status: status,
    }
}

pub fn new_pairing_command(name: &str, uuid: Uuid) -> MenuPairingCommand {
    MenuPairingCommand {
        name: name.to_string(),
        uuid,
    }
}

pub fn new_dialog_command(
    mode: DialogMode,
    header: &str,
    message: &str,
    button1: MenuButtonType,
    button2: MenuButtonType,
    correlation_id: CorrelationId,
) -> MenuDialogCommand {
    MenuDialogCommand {
        dialog_mode: mode,
        header: header.to_string(),
        buffer: message.to_string(),
        button1,
        button2,
        correlation_id,
    }
}

pub fn new_bootstrap_command(boot_type: BootType) -> MenuBootstrapCommand {
    MenuBootstrapCommand { boot_type }
}

pub fn new_analog_boot_command(
    parent_id: i32,
    item: AnalogMenuItem,
    current_value: i32,
) -> MenuAnalogBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

pub fn new_action_boot_command(parent_id: i32, item: ActionMenuItem) -> MenuActionBootCommand {
    BootItemMenuCommand::new(parent_id, item, false)
}

/// Submenus carry no value; it is always `false`.
pub fn new_sub_menu_boot_command(parent_id: i32, item: SubMenuItem) -> MenuSubBootCommand {
    BootItemMenuCommand::new(parent_id, item, false)
}

pub fn new_enum_boot_command(
    parent_id: i32,
    item: EnumMenuItem,
    current_value: i32,
) -> MenuEnumBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

pub fn new_boolean_boot_command(
    parent_id: i32,
    item: BooleanMenuItem,
    current_value: bool,
) -> MenuBooleanBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

pub fn new_float_boot_command(
    parent_id: i32,
    item: FloatMenuItem,
    current_value: f64,
) -> MenuFloatBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

pub fn new_text_boot_command(
    parent_id: i32,
    item: EditableTextMenuItem,
    current_value: &str,
) -> MenuTextBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value.to_string())
}

pub fn new_large_number_boot_command(
    parent_id: i32,
    item: EditableLargeNumberMenuItem,
    current_value: f64,
) -> MenuLargeNumBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

pub fn new_runtime_list_boot_command(
    parent_id: i32,
    item: RuntimeListMenuItem,
    rows: Vec<String>,
) -> MenuRuntimeListBootCommand {
    BootItemMenuCommand::new(parent_id, item, rows)
}

pub fn new_scroll_choice_boot_command(
    parent_id: i32,
    item: ScrollChoiceMenuItem,
    current_value: CurrentScrollPosition,
) -> MenuScrollChoiceBootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

pub fn new_rgb32_boot_command(
    parent_id: i32,
    item: Rgb32MenuItem,
    current_value: PortableColor,
) -> MenuRgb32BootCommand {
    BootItemMenuCommand::new(parent_id, item, current_value)
}

/// Step an integer or scroll item by `delta`.
pub fn new_delta_menu_change_command(
    correlation_id: CorrelationId,
    item_id: i32,
    delta: i32,
) -> MenuChangeCommand {
    MenuChangeCommand {
        menu_item_id: item_id,
        correlation_id,
        change_type: ChangeType::Delta,
        value: ChangeValue::Single(delta.to_string()),
    }
}

/// Replace an item's value with the text form of `value`.
pub fn new_absolute_menu_change_command(
    correlation_id: CorrelationId,
    item_id: i32,
    value: impl Display,
) -> MenuChangeCommand {
    MenuChangeCommand {
        menu_item_id: item_id,
        correlation_id,
        change_type: ChangeType::Absolute,
        value: ChangeValue::Single(value.to_string()),
    }
}

pub fn new_absolute_list_change_command(
    correlation_id: CorrelationId,
    item_id: i32,
    rows: Vec<String>,
) -> MenuChangeCommand {
    MenuChangeCommand {
        menu_item_id: item_id,
        correlation_id,
        change_type: ChangeType::AbsoluteList,
        value: ChangeValue::List(rows),
    }
}

pub fn new_list_response_change_command(
    correlation_id: CorrelationId,
    item_id: i32,
    response: ListResponse,
) -> MenuChangeCommand {
    MenuChangeCommand {
        menu_item_id: item_id,
        correlation_id,
        change_type: ChangeType::ListStateChange,
        value: ChangeValue::Single(response.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcmenu_domain::{ItemInfo, ResponseType};

    #[test]
    fn join_generates_uuid_when_missing() {
        let first = new_join_command("client", ApiPlatform::JavaApi, None);
        let second = new_join_command("client", ApiPlatform::JavaApi, None);
        assert_ne!(first.app_uuid, second.app_uuid);
        assert_eq!(first.api_version, module_version_code());
        assert_eq!(first.serial_number, DEFAULT_SERIAL_NUMBER);

        let fixed = Uuid::parse_str("07cd8bc6-734d-43da-84e7-6084990becfc").unwrap();
        assert_eq!(
            new_join_command("client", ApiPlatform::JavaApi, Some(fixed)).app_uuid,
            fixed
        );
    }

    #[test]
    fn change_commands_carry_text_values() {
        let id = CorrelationId::new(0xabc);
        let delta = new_delta_menu_change_command(id, 4, -2);
        assert_eq!(delta.change_type, ChangeType::Delta);
        assert_eq!(delta.value.as_str(), Some("-2"));

        let absolute = new_absolute_menu_change_command(id, 4, 12.5);
        assert_eq!(absolute.value.as_str(), Some("12.5"));

        let list = new_absolute_list_change_command(id, 4, vec!["a".into()]);
        assert_eq!(list.value.as_list().map(<[String]>::len), Some(1));

        let response = ListResponse::new(2, ResponseType::SelectItem);
        let lr = new_list_response_change_command(id, 4, response);
        assert_eq!(lr.value.as_str(), Some("2:0"));
        assert_eq!(lr.list_response(), Some(response));
    }

    #[test]
    fn submenu_boot_value_is_false() {
        let cmd = new_sub_menu_boot_command(0, SubMenuItem::new(ItemInfo::new(3, "Sub")));
        assert!(!cmd.current_value);
    }
}
