use std::collections::HashSet;
use std::io::Cursor;

use tcmenu::domain::format::format_for_display;
use tcmenu::domain::*;
use tcmenu::protocol::command::*;
use tcmenu::protocol::factory::*;
use tcmenu::protocol::{
    apply_command_to_tree, boot_command_for_item, ApiPlatform, Clock, CommandReader,
    CommandWriter, CorrelationGenerator, CorrelationId, MenuCommand, ProtocolError,
};
use uuid::Uuid;

fn client_uuid() -> Uuid {
    Uuid::parse_str("07cd8bc6-734d-43da-84e7-6084990becfc").unwrap()
}

fn sample_commands() -> Vec<MenuCommand> {
    let correlation = CorrelationId::new(0x1234_abcd);
    vec![
        new_join_command("dashboard", ApiPlatform::PythonApi, Some(client_uuid())).into(),
        new_pairing_command("pairing", client_uuid()).into(),
        new_heartbeat_command(1500, HeartbeatMode::End).into(),
        new_bootstrap_command(BootType::Start).into(),
        new_analog_boot_command(
            10,
            AnalogMenuItem {
                max_value: 255,
                offset: -180,
                divisor: 2,
                unit_name: "dB".into(),
                step: 1,
                info: ItemInfo::new(1, "Volume")
                    .with_eeprom_address(4)
                    .with_read_only(true),
            },
            22,
        )
        .into(),
        new_action_boot_command(0, ActionMenuItem {
            info: ItemInfo::new(2, "Start"),
        })
        .into(),
        new_sub_menu_boot_command(0, SubMenuItem::new(ItemInfo::new(10, "Settings"))).into(),
        new_enum_boot_command(
            10,
            EnumMenuItem {
                enum_entries: vec!["Low".into(), "High".into()],
                info: ItemInfo::new(3, "Mode").with_visible(false),
            },
            1,
        )
        .into(),
        new_boolean_boot_command(
            10,
            BooleanMenuItem {
                naming: BooleanNaming::YesNo,
                info: ItemInfo::new(4, "Enabled"),
            },
            true,
        )
        .into(),
        new_float_boot_command(
            0,
            FloatMenuItem {
                num_decimal_places: 2,
                info: ItemInfo::new(5, "Temp"),
            },
            12.25,
        )
        .into(),
        new_text_boot_command(
            0,
            EditableTextMenuItem {
                text_length: 16,
                item_type: EditItemType::IpAddress,
                info: ItemInfo::new(6, "Address"),
            },
            "192.168.0.1",
        )
        .into(),
        new_large_number_boot_command(
            0,
            EditableLargeNumberMenuItem {
                digits_allowed: 8,
                decimal_places: 3,
                negative_allowed: true,
                info: ItemInfo::new(7, "Large"),
            },
            1234.567,
        )
        .into(),
        new_runtime_list_boot_command(
            0,
            RuntimeListMenuItem {
                initial_rows: 2,
                info: ItemInfo::new(8, "List"),
            },
            vec!["a".into(), "Label\tb".into()],
        )
        .into(),
        new_scroll_choice_boot_command(
            0,
            ScrollChoiceMenuItem {
                item_width: 10,
                num_entries: 5,
                info: ItemInfo::new(9, "Scroll"),
                ..ScrollChoiceMenuItem::default()
            },
            CurrentScrollPosition::new(2, "Two"),
        )
        .into(),
        new_rgb32_boot_command(
            0,
            Rgb32MenuItem {
                include_alpha_channel: true,
                info: ItemInfo::new(11, "Colour"),
            },
            PortableColor::new(1, 2, 3, 4),
        )
        .into(),
        new_absolute_menu_change_command(correlation, 1, 42).into(),
        new_delta_menu_change_command(correlation, 1, -5).into(),
        new_absolute_list_change_command(correlation, 8, vec!["x".into(), "y".into()]).into(),
        new_list_response_change_command(
            correlation,
            8,
            ListResponse::new(3, ResponseType::InvokeItem),
        )
        .into(),
        new_acknowledgement_command(correlation, AckStatus::IdNotFound).into(),
        new_dialog_command(
            DialogMode::Show,
            "Title",
            "Buffer=",
            MenuButtonType::Ok,
            MenuButtonType::Cancel,
            correlation,
        )
        .into(),
    ]
}

fn write_all(commands: &[MenuCommand]) -> Vec<u8> {
    let mut writer = CommandWriter::new(Vec::new());
    for cmd in commands {
        writer.send(cmd).unwrap();
    }
    writer.into_inner()
}

#[test]
fn every_builtin_command_survives_the_wire() {
    let commands = sample_commands();
    let mut reader = CommandReader::new(Cursor::new(write_all(&commands)));

    for expected in &commands {
        let decoded = reader.read_command().unwrap();
        assert_eq!(&decoded, expected, "{} did not round-trip", expected.command_type());
    }
    assert!(matches!(
        reader.read_command(),
        Err(ProtocolError::ConnectionClosed)
    ));
}

#[test]
fn separators_in_values_are_escaped() {
    let dialog: MenuCommand = new_dialog_command(
        DialogMode::Show,
        "a|b",
        "Buffer=",
        MenuButtonType::None,
        MenuButtonType::None,
        CorrelationId::EMPTY,
    )
    .into();
    let bytes = write_all(std::slice::from_ref(&dialog));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("BU=Buffer\\=|"));
    assert!(text.contains("HF=a\\|b|"));

    let decoded = CommandReader::new(Cursor::new(bytes)).read_command().unwrap();
    let MenuCommand::Dialog(decoded) = decoded else {
        panic!("expected dialog");
    };
    assert_eq!(decoded.buffer, "Buffer=");
    assert_eq!(decoded.header, "a|b");
}

#[test]
fn device_analog_boot_body_decodes() {
    let mut frame = b"\x01\x01BA".to_vec();
    frame.extend_from_slice(b"AM=255|AO=-180|AD=2|AU=dB|NM=Volume|ID=1|VC=22|PI=321|RO=1|VI=1|");
    frame.push(0x02);

    let cmd = CommandReader::new(Cursor::new(frame)).read_command().unwrap();
    let MenuCommand::AnalogBoot(boot) = cmd else {
        panic!("expected analog boot");
    };
    assert_eq!(boot.sub_menu_id, 321);
    assert_eq!(boot.menu_item.offset, -180);
    assert_eq!(boot.menu_item.divisor, 2);
    assert_eq!(boot.menu_item.unit_name, "dB");
    assert!(boot.menu_item.info.read_only);
    assert_eq!(boot.current_value, 22);
}

#[test]
fn garbage_between_frames_is_skipped() {
    let commands = vec![
        MenuCommand::from(new_heartbeat_command(1000, HeartbeatMode::Normal)),
        MenuCommand::from(new_bootstrap_command(BootType::End)),
    ];
    let mut bytes = b"noise".to_vec();
    bytes.extend(write_all(&commands[..1]));
    bytes.extend_from_slice(b"\x7f\x7f");
    bytes.extend(write_all(&commands[1..]));

    let mut reader = CommandReader::new(Cursor::new(bytes));
    assert_eq!(reader.read_command().unwrap(), commands[0]);
    assert_eq!(reader.read_command().unwrap(), commands[1]);
}

struct FixedClock;

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        1_700_000_000_000
    }
}

#[test]
fn correlation_ids_are_unique_within_one_millisecond() {
    let generator = CorrelationGenerator::with_clock(FixedClock);
    let ids: HashSet<CorrelationId> = (0..1000).map(|_| generator.next_id()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn analog_values_format_with_offset_and_divisor() {
    let item: MenuItem = AnalogMenuItem {
        max_value: 255,
        offset: -180,
        divisor: 2,
        unit_name: "dB".into(),
        info: ItemInfo::new(1, "Volume"),
        ..AnalogMenuItem::default()
    }
    .into();
    assert_eq!(format_for_display(&item, &StateValue::Integer(101)), "-39.5dB");
}

fn device_tree() -> MenuTree {
    let mut tree = MenuTree::new();
    let root = SubMenuItem::root();
    let settings = SubMenuItem::new(ItemInfo::new(10, "Settings"));
    let volume: MenuItem = AnalogMenuItem {
        max_value: 100,
        offset: 0,
        divisor: 1,
        info: ItemInfo::new(1, "Volume"),
        ..AnalogMenuItem::default()
    }
    .into();
    let mode: MenuItem = EnumMenuItem {
        enum_entries: vec!["Off".into(), "On".into()],
        info: ItemInfo::new(3, "Mode"),
    }
    .into();

    tree.add_menu_item(&root, settings.clone().into());
    tree.add_menu_item(&settings, volume.clone());
    tree.add_menu_item(&root, mode.clone());
    helper::set_menu_state(&volume, 30, &mut tree);
    helper::set_menu_state(&mode, 1, &mut tree);
    tree
}

#[test]
fn boot_commands_rebuild_an_equivalent_tree() {
    let mut device = device_tree();
    let mut commands = vec![MenuCommand::from(new_bootstrap_command(BootType::Start))];
    let mut items = Vec::new();
    device.recurse_tree_iterating_on_items(&SubMenuItem::root(), |item, parent| {
        items.push((item.clone(), parent.clone()));
    });
    for (item, parent) in &items {
        if let Some(cmd) = boot_command_for_item(item, parent, &mut device) {
            commands.push(cmd);
        }
    }
    commands.push(new_bootstrap_command(BootType::End).into());

    let mut reader = CommandReader::new(Cursor::new(write_all(&commands)));
    let mut client = MenuTree::new();
    for _ in 0..commands.len() {
        let cmd = reader.read_command().unwrap();
        apply_command_to_tree(&cmd, &mut client);
    }

    let settings = client.get_sub_menu_by_id(10).cloned().unwrap();
    let children: Vec<i32> = client
        .get_menu_items(&settings)
        .unwrap()
        .iter()
        .map(MenuItem::id)
        .collect();
    assert_eq!(children, vec![1]);
    assert_eq!(client.get_menu_by_id(3), device.get_menu_by_id(3));
    assert_eq!(
        client.get_menu_state_by_id(1).map(|s| s.value.clone()),
        Some(StateValue::Integer(30))
    );
    assert_eq!(
        client.get_menu_state_by_id(3).map(|s| s.value.clone()),
        Some(StateValue::Integer(1))
    );
}
