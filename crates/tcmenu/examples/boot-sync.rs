//! Boots a small simulated device over TCP and mirrors its menu locally.
//!
//! Run with:
//!   cargo run --example boot-sync
//!
//! The device thread answers a join with a full bootstrap, then acknowledges
//! one value change. The client prints the synced tree as tcMenuCopy text.

use std::net::TcpListener;
use std::thread;

use tcmenu::domain::{AnalogMenuItem, EnumMenuItem, ItemInfo, SubMenuItem};
use tcmenu::persist::items_to_copy_text;
use tcmenu::protocol::command::{AckStatus, BootType, HeartbeatMode};
use tcmenu::protocol::factory::*;
use tcmenu::protocol::{CommandReader, CommandWriter, CorrelationGenerator, MenuCommand};
use tcmenu::{ConnectionConfig, TcpMenuConnection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    eprintln!("Simulated device on {addr}");

    let device = thread::spawn(move || -> tcmenu::protocol::Result<()> {
        let (stream, _) = listener.accept()?;
        let mut reader = CommandReader::new(stream.try_clone()?);
        let mut writer = CommandWriter::new(stream);

        if let MenuCommand::Join(join) = reader.read_command()? {
            eprintln!("device: join from {} ({})", join.my_name, join.app_uuid);
        }
        for cmd in device_boot() {
            writer.send(&cmd)?;
        }

        loop {
            match reader.read_command()? {
                MenuCommand::Change(change) => {
                    eprintln!("device: change for item {}", change.menu_item_id);
                    let ack =
                        new_acknowledgement_command(change.correlation_id, AckStatus::Success);
                    writer.send(&ack.into())?;
                    return Ok(());
                }
                other => eprintln!("device: ignoring {}", other.command_type()),
            }
        }
    });

    let mut conn = TcpMenuConnection::connect(ConnectionConfig::new("127.0.0.1", addr.port()))?;
    conn.send_join()?;
    loop {
        let (cmd, _) = conn.read_and_apply()?;
        if let MenuCommand::Bootstrap(boot) = &cmd {
            if boot.boot_type == BootType::End {
                break;
            }
        }
    }
    eprintln!("client: {} items booted", conn.tree().get_all_menu_items().len());

    let correlation = CorrelationGenerator::new().next_id();
    conn.send(&new_absolute_menu_change_command(correlation, 2, 150).into())?;
    let (ack, outcome) = conn.read_and_apply()?;
    eprintln!("client: {} -> {outcome:?}", ack.command_type());
    conn.send_heartbeat(HeartbeatMode::End)?;

    match device.join() {
        Ok(result) => result?,
        Err(_) => return Err("device thread panicked".into()),
    }

    let tree = conn.into_tree();
    let settings = tree
        .get_menu_by_id(1)
        .cloned()
        .ok_or("settings submenu missing")?;
    println!("{}", items_to_copy_text(&settings, &tree)?);
    Ok(())
}

fn device_boot() -> Vec<MenuCommand> {
    let settings = SubMenuItem::new(ItemInfo::new(1, "Settings"));
    let volume = AnalogMenuItem {
        max_value: 255,
        offset: -180,
        divisor: 2,
        unit_name: "dB".to_string(),
        step: 1,
        info: ItemInfo::new(2, "Volume").with_eeprom_address(4),
    };
    let channel = EnumMenuItem {
        enum_entries: vec!["CD".to_string(), "Tuner".to_string(), "Line".to_string()],
        info: ItemInfo::new(3, "Channel").with_eeprom_address(6),
    };

    vec![
        new_heartbeat_command(1500, HeartbeatMode::Start).into(),
        new_bootstrap_command(BootType::Start).into(),
        new_sub_menu_boot_command(0, settings).into(),
        new_analog_boot_command(1, volume, 101).into(),
        new_enum_boot_command(1, channel, 1).into(),
        new_bootstrap_command(BootType::End).into(),
    ]
}
