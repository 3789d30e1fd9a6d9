use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use tcmenu_protocol::MenuCommand;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct CommandOutput<'a> {
    message_type: String,
    #[serde(flatten)]
    command: &'a MenuCommand,
}

pub fn print_commands(commands: &[MenuCommand], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for command in commands {
                let out = CommandOutput {
                    message_type: command.command_type().to_string(),
                    command,
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TYPE", "COMMAND"]);
            for command in commands {
                table.add_row(vec![command.command_type().to_string(), format!("{command:?}")]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for command in commands {
                println!("{} {command:#?}", command.command_type());
            }
        }
        OutputFormat::Raw => {
            for command in commands {
                println!("{command:?}");
            }
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    message_type: &'a str,
    size: usize,
    frame: String,
}

/// Print an encoded frame as hex, or the bytes themselves for `raw`.
pub fn print_frame(message_type: &str, frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                message_type,
                size: frame.len(),
                frame: hex::encode(frame),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TYPE", "SIZE", "FRAME"])
                .add_row(vec![
                    message_type.to_string(),
                    frame.len().to_string(),
                    hex::encode(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{}", hex::encode(frame));
        }
        OutputFormat::Raw => print_raw(frame),
    }
}

/// One line of `tree` output.
#[derive(Serialize)]
pub struct ItemRow {
    pub id: i32,
    pub parent_id: i32,
    pub depth: usize,
    pub kind: &'static str,
    pub name: String,
    pub value: String,
}

pub fn print_items(rows: &[ItemRow], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "PARENT", "KIND", "NAME", "VALUE"]);
            for row in rows {
                table.add_row(vec![
                    row.id.to_string(),
                    row.parent_id.to_string(),
                    row.kind.to_string(),
                    format!("{}{}", "  ".repeat(row.depth), row.name),
                    row.value.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in rows {
                let indent = "  ".repeat(row.depth);
                if row.value.is_empty() {
                    println!("{indent}{} [{}] ({})", row.name, row.id, row.kind);
                } else {
                    println!("{indent}{} [{}] ({}) = {}", row.name, row.id, row.kind, row.value);
                }
            }
        }
        OutputFormat::Raw => {
            for row in rows {
                println!("{}\t{}\t{}\t{}", row.id, row.parent_id, row.name, row.value);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
