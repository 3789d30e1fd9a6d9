use std::fs;

use bytes::BytesMut;
use tcmenu_protocol::{decode_command, ProtocolConverter};
use tracing::{debug, warn};

use crate::cmd::DecodeArgs;
use crate::exit::{io_error, protocol_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_commands, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = resolve_input(&args)?;
    let converter = ProtocolConverter::new();

    let mut buf = BytesMut::from(input.as_slice());
    let mut commands = Vec::new();
    while let Some(cmd) =
        decode_command(&mut buf, &converter).map_err(|err| protocol_error("decode failed", err))?
    {
        debug!(message_type = %cmd.command_type(), "decoded frame");
        commands.push(cmd);
    }
    if !buf.is_empty() {
        warn!(remaining = buf.len(), "input ends with an incomplete frame");
    }

    print_commands(&commands, format);
    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(text) = &args.hex {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        return hex::decode(&cleaned)
            .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")));
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "one of --hex or --file is required"))
}
