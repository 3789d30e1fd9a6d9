use bytes::BytesMut;
use tcmenu_protocol::command::{AckStatus, BootType, HeartbeatMode};
use tcmenu_protocol::factory::*;
use tcmenu_protocol::{
    encode_command, ApiPlatform, CorrelationGenerator, CorrelationId, MenuCommand,
    ProtocolConverter,
};
use uuid::Uuid;

use crate::cmd::{
    AckArgs, BootPhaseArg, ChangeArgs, EncodeCommand, HeartbeatModeArg, JoinArgs,
};
use crate::exit::{protocol_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(command: EncodeCommand, format: OutputFormat) -> CliResult<i32> {
    let cmd = build_command(command)?;
    let converter = ProtocolConverter::new();

    let mut frame = BytesMut::new();
    encode_command(&converter, &cmd, &mut frame)
        .map_err(|err| protocol_error("encode failed", err))?;

    print_frame(&cmd.command_type().to_string(), &frame, format);
    Ok(SUCCESS)
}

fn build_command(command: EncodeCommand) -> CliResult<MenuCommand> {
    let cmd = match command {
        EncodeCommand::Join(args) => join(args)?,
        EncodeCommand::Heartbeat(args) => {
            let mode = match args.mode {
                HeartbeatModeArg::Normal => HeartbeatMode::Normal,
                HeartbeatModeArg::Start => HeartbeatMode::Start,
                HeartbeatModeArg::End => HeartbeatMode::End,
            };
            new_heartbeat_command(args.interval, mode).into()
        }
        EncodeCommand::Bootstrap(args) => {
            let boot_type = match args.phase {
                BootPhaseArg::Start => BootType::Start,
                BootPhaseArg::End => BootType::End,
            };
            new_bootstrap_command(boot_type).into()
        }
        EncodeCommand::Change(args) => change(args)?,
        EncodeCommand::Ack(args) => ack(args)?,
    };
    Ok(cmd)
}

fn join(args: JoinArgs) -> CliResult<MenuCommand> {
    let platform = ApiPlatform::from_key(args.platform)
        .ok_or_else(|| CliError::new(USAGE, format!("unknown platform key {}", args.platform)))?;
    let uuid = args
        .uuid
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|err| CliError::new(USAGE, format!("--uuid is not a valid UUID: {err}")))?;
    Ok(new_join_command(&args.name, platform, uuid).into())
}

fn change(args: ChangeArgs) -> CliResult<MenuCommand> {
    let correlation = match &args.correlation {
        Some(text) => parse_correlation(text)?,
        None => CorrelationGenerator::new().next_id(),
    };

    let cmd = match (args.value, args.delta, args.rows) {
        (_, _, Some(rows)) => new_absolute_list_change_command(correlation, args.id, rows),
        (_, Some(delta), None) => new_delta_menu_change_command(correlation, args.id, delta),
        (Some(value), None, None) => new_absolute_menu_change_command(correlation, args.id, value),
        (None, None, None) => {
            return Err(CliError::new(
                USAGE,
                "one of --value, --delta or --rows is required",
            ))
        }
    };
    Ok(cmd.into())
}

fn ack(args: AckArgs) -> CliResult<MenuCommand> {
    let correlation = parse_correlation(&args.correlation)?;
    let status = AckStatus::from_status_code(args.status);
    Ok(new_acknowledgement_command(correlation, status).into())
}

fn parse_correlation(text: &str) -> CliResult<CorrelationId> {
    CorrelationId::from_string(text)
        .map_err(|err| CliError::new(USAGE, format!("--correlation: {err}")))
}
