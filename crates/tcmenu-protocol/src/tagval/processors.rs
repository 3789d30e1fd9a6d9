//! Built-in TagVal bodies for every standard message type.

use tcmenu_domain::{
    ActionMenuItem, AnalogMenuItem, BooleanMenuItem, BooleanNaming, CurrentScrollPosition,
    EditItemType, EditableLargeNumberMenuItem, EditableTextMenuItem, EnumMenuItem, FloatMenuItem,
    ItemInfo, PortableColor, Rgb32MenuItem, RuntimeListMenuItem, ScrollChoiceMenuItem,
    SubMenuItem,
};
use uuid::Uuid;

use crate::command::{
    AckStatus, BootItem, BootItemMenuCommand, BootType, ChangeType, ChangeValue, DialogMode,
    HeartbeatMode, MenuAcknowledgementCommand, MenuBootstrapCommand, MenuButtonType,
    MenuChangeCommand, MenuCommand, MenuDialogCommand, MenuHeartbeatCommand, MenuJoinCommand,
    MenuPairingCommand, DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_SERIAL_NUMBER,
};
use crate::correlation::CorrelationId;
use crate::error::{ProtocolError, Result};
use crate::field::{self, MessageField, BUILTIN_FIELDS};
use crate::platform::ApiPlatform;
use crate::tagval::fields::*;
use crate::tagval::parser::TagValTextParser;
use crate::tagval::writer::TagValWriter;

/// Whether a built-in TagVal codec exists for `field`.
pub fn has_builtin_codec(field: MessageField) -> bool {
    field != field::REMOTE_BOOT_ITEM && BUILTIN_FIELDS.contains(&field)
}

/// Decode a standard message body.
pub fn decode_builtin(msg_type: MessageField, parser: &TagValTextParser) -> Result<MenuCommand> {
    let cmd = match msg_type {
        field::JOIN => decode_join(parser)?.into(),
        field::PAIRING_REQUEST => MenuPairingCommand {
            name: parser.get_value(KEY_NAME_FIELD)?.to_string(),
            uuid: read_uuid(parser)?,
        }
        .into(),
        field::HEARTBEAT => MenuHeartbeatCommand {
            heartbeat_interval: parser
                .get_value_as_int_or(KEY_HB_INTERVAL, DEFAULT_HEARTBEAT_INTERVAL)?,
            mode: HeartbeatMode::from_id(parser.get_value_as_int_or(KEY_HB_MODE, 0)?),
        }
        .into(),
        field::BOOTSTRAP => {
            let text = parser.get_value(KEY_BOOT_TYPE_FIELD)?;
            let boot_type =
                BootType::parse(text).ok_or_else(|| invalid(KEY_BOOT_TYPE_FIELD, text))?;
            MenuBootstrapCommand { boot_type }.into()
        }
        field::ANALOG_BOOT_ITEM => decode_analog(parser)?.into(),
        field::ACTION_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            BootItemMenuCommand::new(parent, ActionMenuItem { info }, false).into()
        }
        field::SUBMENU_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            BootItemMenuCommand::new(parent, SubMenuItem::new(info), false).into()
        }
        field::ENUM_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            let item = EnumMenuItem {
                enum_entries: parser.get_choices()?,
                info,
            };
            let value = parser.get_value_as_int(KEY_CURRENT_VAL)?;
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::BOOLEAN_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            let item = BooleanMenuItem {
                naming: BooleanNaming::from_id(parser.get_value_as_int_or(KEY_BOOLEAN_NAMING, 0)?),
                info,
            };
            let value = parse_bool(parser.get_value(KEY_CURRENT_VAL)?);
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::TEXT_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            let item = EditableTextMenuItem {
                text_length: parser.get_value_as_int(KEY_MAX_LENGTH)?,
                item_type: EditItemType::from_id(parser.get_value_as_int_or(KEY_EDIT_TYPE, 0)?),
                info,
            };
            let value = parser.get_value(KEY_CURRENT_VAL)?.to_string();
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::LARGE_NUM_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            let item = EditableLargeNumberMenuItem {
                digits_allowed: parser.get_value_as_int(KEY_MAX_LENGTH)?,
                decimal_places: parser.get_value_as_int(KEY_FLOAT_DECIMAL_PLACES)?,
                negative_allowed: parser.get_value_as_int_or(KEY_NEGATIVE_ALLOWED, 0)? != 0,
                info,
            };
            let value = read_f64(parser, KEY_CURRENT_VAL)?;
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::FLOAT_BOOT_ITEM => {
            let (parent, info) = read_info(parser)?;
            let item = FloatMenuItem {
                num_decimal_places: parser.get_value_as_int(KEY_FLOAT_DECIMAL_PLACES)?,
                info,
            };
            let value = read_f64(parser, KEY_CURRENT_VAL)?;
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::RUNTIME_LIST_BOOT => decode_runtime_list(parser)?.into(),
        field::BOOT_RGB_COLOR => {
            let (parent, info) = read_info(parser)?;
            let item = Rgb32MenuItem {
                include_alpha_channel: parser.get_value_as_int_or(KEY_ALPHA_FIELD, 0)? != 0,
                info,
            };
            let value = PortableColor::from_html(parser.get_value(KEY_CURRENT_VAL)?);
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::BOOT_SCROLL_CHOICE => {
            let (parent, info) = read_info(parser)?;
            let item = ScrollChoiceMenuItem {
                item_width: parser.get_value_as_int_or(KEY_WIDTH_FIELD, 0)?,
                num_entries: parser.get_value_as_int(KEY_NO_OF_CHOICES)?,
                info,
                ..ScrollChoiceMenuItem::default()
            };
            let value = CurrentScrollPosition::from_text(parser.get_value(KEY_CURRENT_VAL)?);
            BootItemMenuCommand::new(parent, item, value).into()
        }
        field::CHANGE_INT_FIELD => decode_change(parser)?.into(),
        field::ACKNOWLEDGEMENT => MenuAcknowledgementCommand {
            correlation_id: CorrelationId::from_string(parser.get_value(KEY_CORRELATION_FIELD)?)?,
            ack_status: AckStatus::from_status_code(parser.get_value_as_int(KEY_ACK_STATUS)?),
        }
        .into(),
        field::DIALOG_UPDATE => MenuDialogCommand {
            dialog_mode: DialogMode::from_code(parser.get_value(KEY_MODE_FIELD)?),
            header: parser.get_value_or(KEY_HEADER_FIELD, "").to_string(),
            buffer: parser.get_value_or(KEY_BUFFER_FIELD, "").to_string(),
            button1: read_button(parser, KEY_BUTTON1_FIELD)?,
            button2: read_button(parser, KEY_BUTTON2_FIELD)?,
            correlation_id: CorrelationId::from_string(
                parser.get_value_or(KEY_CORRELATION_FIELD, "0"),
            )?,
        }
        .into(),
        other => {
            return Err(ProtocolError::NoDecoder {
                field: other,
                protocol: "TagVal",
            })
        }
    };
    Ok(cmd)
}

/// Encode a standard command's body into `writer`.
pub fn encode_builtin(writer: &mut TagValWriter, cmd: &MenuCommand) -> Result<()> {
    match cmd {
        MenuCommand::Join(join) => {
            writer
                .append_field(KEY_NAME_FIELD, &join.my_name)
                .append_field(KEY_UUID_FIELD, join.app_uuid)
                .append_field(KEY_SERIAL_NO, join.serial_number)
                .append_field(KEY_VER_FIELD, join.api_version)
                .append_field(KEY_PLATFORM_ID, join.platform.key());
        }
        MenuCommand::Pairing(pairing) => {
            writer
                .append_field(KEY_NAME_FIELD, &pairing.name)
                .append_field(KEY_UUID_FIELD, pairing.uuid);
        }
        MenuCommand::Heartbeat(hb) => {
            writer
                .append_field(KEY_HB_INTERVAL, hb.heartbeat_interval)
                .append_field(KEY_HB_MODE, hb.mode.id());
        }
        MenuCommand::Bootstrap(boot) => {
            writer.append_field(KEY_BOOT_TYPE_FIELD, boot.boot_type.as_str());
        }
        MenuCommand::AnalogBoot(boot) => {
            let item = &boot.menu_item;
            write_info(writer, boot);
            writer
                .append_field(KEY_ANALOG_MAX_FIELD, item.max_value)
                .append_field(KEY_ANALOG_OFFSET_FIELD, item.offset)
                .append_field(KEY_ANALOG_DIVISOR_FIELD, item.divisor)
                .append_field(KEY_ANALOG_UNIT_FIELD, &item.unit_name)
                .append_field(KEY_ANALOG_STEP_FIELD, item.step)
                .append_field(KEY_CURRENT_VAL, boot.current_value);
        }
        MenuCommand::ActionBoot(boot) => write_info(writer, boot),
        MenuCommand::SubMenuBoot(boot) => write_info(writer, boot),
        MenuCommand::EnumBoot(boot) => {
            write_info(writer, boot);
            writer.append_choices(KEY_PREPEND_CHOICE, &boot.menu_item.enum_entries)?;
            writer.append_field(KEY_CURRENT_VAL, boot.current_value);
        }
        MenuCommand::BooleanBoot(boot) => {
            write_info(writer, boot);
            writer
                .append_field(KEY_BOOLEAN_NAMING, boot.menu_item.naming.id())
                .append_bool(KEY_CURRENT_VAL, boot.current_value);
        }
        MenuCommand::TextBoot(boot) => {
            write_info(writer, boot);
            writer
                .append_field(KEY_MAX_LENGTH, boot.menu_item.text_length)
                .append_field(KEY_EDIT_TYPE, boot.menu_item.item_type.id())
                .append_field(KEY_CURRENT_VAL, &boot.current_value);
        }
        MenuCommand::LargeNumberBoot(boot) => {
            let item = &boot.menu_item;
            write_info(writer, boot);
            writer
                .append_field(KEY_FLOAT_DECIMAL_PLACES, item.decimal_places)
                .append_bool(KEY_NEGATIVE_ALLOWED, item.negative_allowed)
                .append_field(KEY_MAX_LENGTH, item.digits_allowed)
                .append_field(KEY_CURRENT_VAL, boot.current_value);
        }
        MenuCommand::FloatBoot(boot) => {
            write_info(writer, boot);
            writer
                .append_field(KEY_FLOAT_DECIMAL_PLACES, boot.menu_item.num_decimal_places)
                .append_field(KEY_CURRENT_VAL, boot.current_value);
        }
        MenuCommand::RuntimeListBoot(boot) => {
            write_info(writer, boot);
            write_runtime_rows(writer, &boot.current_value)?;
        }
        MenuCommand::Rgb32Boot(boot) => {
            write_info(writer, boot);
            writer
                .append_bool(KEY_ALPHA_FIELD, boot.menu_item.include_alpha_channel)
                .append_field(KEY_CURRENT_VAL, boot.current_value);
        }
        MenuCommand::ScrollChoiceBoot(boot) => {
            write_info(writer, boot);
            writer
                .append_field(KEY_WIDTH_FIELD, boot.menu_item.item_width)
                .append_field(KEY_NO_OF_CHOICES, boot.menu_item.num_entries)
                .append_field(KEY_CURRENT_VAL, &boot.current_value);
        }
        MenuCommand::Change(change) => {
            writer
                .append_field(KEY_ID_FIELD, change.menu_item_id)
                .append_field(KEY_CORRELATION_FIELD, change.correlation_id)
                .append_field(KEY_CHANGE_TYPE, change.change_type.id());
            match &change.value {
                ChangeValue::List(rows) => {
                    writer.append_choices(KEY_PREPEND_CHOICE, rows)?;
                }
                ChangeValue::Single(value) => {
                    writer.append_field(KEY_CURRENT_VAL, value);
                }
            }
        }
        MenuCommand::Acknowledgement(ack) => {
            writer
                .append_field(KEY_CORRELATION_FIELD, ack.correlation_id)
                .append_field(KEY_ACK_STATUS, ack.ack_status.status_code());
        }
        MenuCommand::Dialog(dialog) => {
            writer
                .append_field(KEY_MODE_FIELD, dialog.dialog_mode.code())
                .append_field(KEY_HEADER_FIELD, &dialog.header)
                .append_field(KEY_BUFFER_FIELD, &dialog.buffer)
                .append_field(KEY_BUTTON1_FIELD, dialog.button1.type_value())
                .append_field(KEY_BUTTON2_FIELD, dialog.button2.type_value())
                .append_field(KEY_CORRELATION_FIELD, dialog.correlation_id);
        }
        MenuCommand::Custom(custom) => return Err(ProtocolError::NoEncoder(custom.field)),
    }
    Ok(())
}

fn invalid(key: &str, value: &str) -> ProtocolError {
    ProtocolError::InvalidField {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(text: &str) -> bool {
    text == "1" || text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("y")
}

fn read_f64(parser: &TagValTextParser, key: &str) -> Result<f64> {
    let text = parser.get_value(key)?;
    text.trim().parse().map_err(|_| invalid(key, text))
}

fn read_uuid(parser: &TagValTextParser) -> Result<Uuid> {
    let text = parser.get_value(KEY_UUID_FIELD)?;
    Uuid::parse_str(text).map_err(|_| invalid(KEY_UUID_FIELD, text))
}

fn read_button(parser: &TagValTextParser, key: &str) -> Result<MenuButtonType> {
    let value = parser.get_value_as_int_or(key, MenuButtonType::None.type_value())?;
    Ok(MenuButtonType::from_type_value(value))
}

/// Parent id and the fields every boot item carries.
fn read_info(parser: &TagValTextParser) -> Result<(i32, ItemInfo)> {
    let parent = parser.get_value_as_int(KEY_PARENT_ID_FIELD)?;
    let info = ItemInfo::new(
        parser.get_value_as_int(KEY_ID_FIELD)?,
        parser.get_value(KEY_NAME_FIELD)?,
    )
    .with_eeprom_address(parser.get_value_as_int_or(KEY_EEPROM_FIELD, -1)?)
    .with_read_only(parser.get_value_as_int_or(KEY_READONLY_FIELD, 0)? != 0)
    .with_visible(parser.get_value_as_int_or(KEY_VISIBLE_FIELD, 1)? != 0);
    Ok((parent, info))
}

fn write_info<I: BootItem>(writer: &mut TagValWriter, boot: &BootItemMenuCommand<I>) {
    let item = boot.item();
    let info = item.info();
    writer
        .append_field(KEY_PARENT_ID_FIELD, boot.sub_menu_id)
        .append_field(KEY_ID_FIELD, info.id)
        .append_field(KEY_EEPROM_FIELD, info.eeprom_address)
        .append_field(KEY_NAME_FIELD, &info.name)
        .append_bool(KEY_READONLY_FIELD, info.read_only)
        .append_bool(KEY_VISIBLE_FIELD, info.visible);
}

fn decode_join(parser: &TagValTextParser) -> Result<MenuJoinCommand> {
    let key = parser.get_value_as_int(KEY_PLATFORM_ID)?;
    let platform = ApiPlatform::from_key(key)
        .ok_or_else(|| invalid(KEY_PLATFORM_ID, parser.get_value_or(KEY_PLATFORM_ID, "")))?;
    Ok(MenuJoinCommand {
        my_name: parser.get_value(KEY_NAME_FIELD)?.to_string(),
        api_version: parser.get_value_as_int(KEY_VER_FIELD)?,
        platform,
        app_uuid: read_uuid(parser)?,
        serial_number: parser.get_value_as_long_or(KEY_SERIAL_NO, DEFAULT_SERIAL_NUMBER)?,
    })
}

fn decode_analog(parser: &TagValTextParser) -> Result<BootItemMenuCommand<AnalogMenuItem>> {
    let (parent, info) = read_info(parser)?;
    let item = AnalogMenuItem {
        max_value: parser.get_value_as_int(KEY_ANALOG_MAX_FIELD)?,
        offset: parser.get_value_as_int(KEY_ANALOG_OFFSET_FIELD)?,
        divisor: parser.get_value_as_int(KEY_ANALOG_DIVISOR_FIELD)?,
        unit_name: parser.get_value_or(KEY_ANALOG_UNIT_FIELD, "").to_string(),
        step: parser.get_value_as_int_or(KEY_ANALOG_STEP_FIELD, 1)?,
        info,
    };
    let value = parser.get_value_as_int(KEY_CURRENT_VAL)?;
    Ok(BootItemMenuCommand::new(parent, item, value))
}

/// Rows are `CA`, `CB`, ...; a row with a `cA` label is read back as
/// `label\tvalue`.
fn decode_runtime_list(
    parser: &TagValTextParser,
) -> Result<BootItemMenuCommand<RuntimeListMenuItem>> {
    let (parent, info) = read_info(parser)?;
    let values = parser.get_choices()?;
    let rows: Vec<String> = values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let label = choice_key(KEY_PREPEND_NAMECHOICE, idx)
                .and_then(|key| parser.get_value(&key).ok().map(str::to_string));
            match label {
                Some(label) => format!("{label}\t{value}"),
                None => value,
            }
        })
        .collect();
    let item = RuntimeListMenuItem {
        initial_rows: rows.len() as i32,
        info,
    };
    Ok(BootItemMenuCommand::new(parent, item, rows))
}

fn write_runtime_rows(writer: &mut TagValWriter, rows: &[String]) -> Result<()> {
    if rows.len() > 26 {
        return Err(ProtocolError::TooManyChoices(rows.len()));
    }
    writer.append_field(KEY_NO_OF_CHOICES, rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let value_key =
            choice_key(KEY_PREPEND_CHOICE, idx).ok_or(ProtocolError::TooManyChoices(rows.len()))?;
        match row.split_once('\t') {
            Some((label, value)) => {
                let label_key = choice_key(KEY_PREPEND_NAMECHOICE, idx)
                    .ok_or(ProtocolError::TooManyChoices(rows.len()))?;
                writer
                    .append_field(&label_key, label)
                    .append_field(&value_key, value);
            }
            None => {
                writer.append_field(&value_key, row);
            }
        }
    }
    Ok(())
}

fn decode_change(parser: &TagValTextParser) -> Result<MenuChangeCommand> {
    let change_type = ChangeType::from_id(parser.get_value_as_int(KEY_CHANGE_TYPE)?);
    let value = if change_type == ChangeType::AbsoluteList {
        ChangeValue::List(parser.get_choices()?)
    } else {
        ChangeValue::Single(parser.get_value(KEY_CURRENT_VAL)?.to_string())
    };
    Ok(MenuChangeCommand {
        menu_item_id: parser.get_value_as_int(KEY_ID_FIELD)?,
        correlation_id: CorrelationId::from_string(
            parser.get_value_or(KEY_CORRELATION_FIELD, "0"),
        )?,
        change_type,
        value,
    })
}
