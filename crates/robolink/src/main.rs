mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use robolink_packet::{PacketRegistry, RegistryConfig, DEFAULT_MAX_MESSAGE_SIZE};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "robolink", version, about = "Robot controller/device packet codec CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "ROBOLINK_LOG_LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LogLevel,

    /// Largest packet, in bytes, accepted for encode or decode.
    #[arg(
        long,
        value_name = "BYTES",
        env = "ROBOLINK_MAX_SIZE",
        default_value_t = DEFAULT_MAX_MESSAGE_SIZE,
        global = true
    )]
    max_size: usize,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let registry = PacketRegistry::with_config(RegistryConfig {
        max_message_size: cli.max_size,
    });
    let result = cmd::run(cli.command, format, &registry);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from(["robolink", "decode", "0000000906690b0815"])
            .expect("decode args should parse");

        assert!(matches!(cli.command, Command::Decode(_)));
        assert_eq!(cli.max_size, DEFAULT_MAX_MESSAGE_SIZE);
    }

    #[test]
    fn rejects_hex_with_file() {
        let err = Cli::try_parse_from(["robolink", "decode", "00", "--file", "/tmp/packet.bin"])
            .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "robolink",
            "types",
            "--format",
            "json",
            "--max-size",
            "64",
        ])
        .expect("global flags should parse after subcommand");

        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert_eq!(cli.max_size, 64);
    }
}
