use std::fmt::Write as _;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use robolink_packet::{Message, RegistryEntry, HEADER_SIZE};
use serde::Serialize;
use serde_json::Value;

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
struct EncodedOutput<'a> {
    identifier: u8,
    name: &'a str,
    size: usize,
    hex: String,
}

#[derive(Serialize)]
struct DecodedOutput<'a> {
    identifier: u8,
    name: &'a str,
    size: usize,
    message: &'a Message,
}

#[derive(Serialize)]
struct RegistryRow<'a> {
    identifier: u8,
    hex: String,
    name: &'a str,
}

pub fn print_encoded(message: &Message, bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&EncodedOutput {
            identifier: message.identifier(),
            name: message.name(),
            size: bytes.len(),
            hex: to_hex(bytes),
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "SIZE", "HEX"])
                .add_row(vec![
                    identifier_hex(message.identifier()),
                    message.name().to_string(),
                    bytes.len().to_string(),
                    to_hex(bytes),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{} ({}) size={}",
                message.name(),
                identifier_hex(message.identifier()),
                bytes.len()
            );
            println!("  header:  {}", to_hex(&bytes[..HEADER_SIZE.min(bytes.len())]));
            if bytes.len() > HEADER_SIZE {
                println!("  payload: {}", to_hex(&bytes[HEADER_SIZE..]));
            }
        }
        OutputFormat::Raw => print_raw(bytes),
    }
}

pub fn print_decoded(message: &Message, bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&DecodedOutput {
            identifier: message.identifier(),
            name: message.name(),
            size: bytes.len(),
            message,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec![
                    "packet".to_string(),
                    format!("{} ({})", message.name(), identifier_hex(message.identifier())),
                ])
                .add_row(vec!["size".to_string(), bytes.len().to_string()]);
            for (field, value) in message_fields(message) {
                table.add_row(vec![field, value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let fields = message_fields(message)
                .into_iter()
                .map(|(field, value)| format!("{field}={value}"))
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "{} ({}) {fields}",
                message.name(),
                identifier_hex(message.identifier())
            );
        }
        OutputFormat::Raw => print_raw(&bytes[HEADER_SIZE.min(bytes.len())..]),
    }
}

pub fn print_registry(entries: &[RegistryEntry], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let rows: Vec<RegistryRow<'_>> = entries
                .iter()
                .map(|entry| RegistryRow {
                    identifier: entry.identifier(),
                    hex: identifier_hex(entry.identifier()),
                    name: entry.name(),
                })
                .collect();
            print_json(&rows);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME"]);
            for entry in entries {
                table.add_row(vec![identifier_hex(entry.identifier()), entry.name().to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for entry in entries {
                println!("{} {}", identifier_hex(entry.identifier()), entry.name());
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn identifier_hex(identifier: u8) -> String {
    format!("{identifier:#04x}")
}

/// Flatten a message into `(field, display value)` pairs, minus the type tag.
fn message_fields(message: &Message) -> Vec<(String, String)> {
    let Ok(Value::Object(map)) = serde_json::to_value(message) else {
        return Vec::new();
    };

    map.into_iter()
        .filter(|(field, _)| field != "type")
        .map(|(field, value)| (field, field_preview(&value)))
        .collect()
}

fn field_preview(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let bytes: Option<Vec<u8>> = items
                .iter()
                .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect();
            match bytes {
                Some(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) if !text.is_empty() => text.to_string(),
                    _ => format!("<{} bytes> {}", bytes.len(), to_hex(&bytes)),
                },
                None => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}
