use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod tree;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode wire frames and print each command.
    Decode(DecodeArgs),
    /// Encode a command and print the frame as hex.
    #[command(subcommand)]
    Encode(EncodeCommand),
    /// Load tcMenuCopy text and print the menu tree.
    Tree(TreeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(command) => encode::run(command, format),
        Command::Tree(args) => tree::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frames as a hex string.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Read frames from a binary file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum EncodeCommand {
    /// Join message introducing a client.
    Join(JoinArgs),
    /// Heartbeat message.
    Heartbeat(HeartbeatArgs),
    /// Start or end of a bootstrap sequence.
    Bootstrap(BootstrapArgs),
    /// Value change for one item.
    Change(ChangeArgs),
    /// Acknowledgement of an earlier change.
    Ack(AckArgs),
}

#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Client name sent to the device.
    #[arg(long, default_value = "RustClient", env = "TCMENU_CLIENT_NAME")]
    pub name: String,
    /// Client UUID. Default: random.
    #[arg(long)]
    pub uuid: Option<String>,
    /// Platform key (0 Arduino, 1 Java, 2 Arduino32, 3 .NET, 4 JavaScript, 5 Python).
    #[arg(long, default_value = "1")]
    pub platform: i32,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum HeartbeatModeArg {
    Normal,
    Start,
    End,
}

#[derive(Args, Debug)]
pub struct HeartbeatArgs {
    /// Heartbeat interval in milliseconds.
    #[arg(long, default_value = "10000")]
    pub interval: i32,
    #[arg(long, value_enum, default_value = "normal")]
    pub mode: HeartbeatModeArg,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum BootPhaseArg {
    Start,
    End,
}

#[derive(Args, Debug)]
pub struct BootstrapArgs {
    #[arg(value_enum)]
    pub phase: BootPhaseArg,
}

#[derive(Args, Debug)]
pub struct ChangeArgs {
    /// Item id.
    #[arg(long)]
    pub id: i32,
    /// New value as text.
    #[arg(
        long,
        allow_hyphen_values = true,
        conflicts_with_all = ["delta", "rows"],
        required_unless_present_any = ["delta", "rows"]
    )]
    pub value: Option<String>,
    /// Step the current value by this amount.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "rows")]
    pub delta: Option<i32>,
    /// Replace a runtime list (comma-separated rows).
    #[arg(long, value_delimiter = ',')]
    pub rows: Option<Vec<String>>,
    /// Correlation id as up to 8 hex digits. Default: generated.
    #[arg(long)]
    pub correlation: Option<String>,
}

#[derive(Args, Debug)]
pub struct AckArgs {
    /// Correlation id being acknowledged, as hex.
    #[arg(long)]
    pub correlation: String,
    /// Status code (-1 warning, 0 success, 1 id not found, 2 invalid credentials, 10000 error).
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub status: i32,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// File holding tcMenuCopy text.
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
