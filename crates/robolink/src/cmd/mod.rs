use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use robolink_packet::PacketRegistry;

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod types;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a JSON message into packet bytes.
    Encode(EncodeArgs),
    /// Decode packet bytes into a message.
    Decode(DecodeArgs),
    /// List registered packet identifiers.
    Types(TypesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, registry: &PacketRegistry) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format, registry),
        Command::Decode(args) => decode::run(args, format, registry),
        Command::Types(args) => types::run(args, format, registry),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message as JSON, e.g. '{"type":"progress","progress":43.8}'.
    /// Read from stdin when neither this nor --file is given.
    #[arg(conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON message from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Packet bytes as hex. Whitespace and a leading 0x are ignored.
    /// Raw bytes are read from stdin when neither this nor --file is given.
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw packet bytes from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct TypesArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show build and protocol details.
    #[arg(long)]
    pub extended: bool,
}

fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    std::fs::read(path).map_err(|err| io_error(&format!("read {}", path.display()), err))
}

fn read_stdin() -> CliResult<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .map_err(|err| io_error("read stdin", err))?;
    Ok(buf)
}
