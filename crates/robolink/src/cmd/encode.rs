use robolink_packet::{Message, PacketRegistry};
use tracing::debug;

use crate::cmd::{read_file, read_stdin, EncodeArgs};
use crate::exit::{codec_error, json_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat, registry: &PacketRegistry) -> CliResult<i32> {
    let input = match (args.json, args.file) {
        (Some(json), _) => json.into_bytes(),
        (None, Some(path)) => read_file(&path)?,
        (None, None) => read_stdin()?,
    };

    let message: Message =
        serde_json::from_slice(&input).map_err(|err| json_error("parse message", err))?;
    let bytes = registry
        .encode(&message)
        .map_err(|err| codec_error("encode", err))?;

    debug!(
        packet = message.name(),
        identifier = message.identifier(),
        size = bytes.len(),
        "encoded message"
    );
    print_encoded(&message, &bytes, format);
    Ok(SUCCESS)
}
