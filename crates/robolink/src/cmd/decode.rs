use robolink_packet::PacketRegistry;
use tracing::debug;

use crate::cmd::{read_file, read_stdin, DecodeArgs};
use crate::exit::{codec_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat, registry: &PacketRegistry) -> CliResult<i32> {
    let bytes = match (args.hex, args.file) {
        (Some(hex), _) => parse_hex(&hex)?,
        (None, Some(path)) => read_file(&path)?,
        (None, None) => read_stdin()?,
    };

    let message = registry
        .get_message_type(&bytes)
        .map_err(|err| codec_error("decode", err))?;

    debug!(
        packet = message.name(),
        timestamp = message.timestamp(),
        size = bytes.len(),
        "decoded message"
    );
    print_decoded(&message, &bytes, format);
    Ok(SUCCESS)
}

/// Parse a hex string, ignoring whitespace and an optional `0x` prefix.
fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits: Vec<u8> = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("hex input has an odd number of digits ({})", digits.len()),
        ));
    }

    digits
        .chunks_exact(2)
        .map(|pair| -> CliResult<u8> { Ok((nibble(pair[0])? << 4) | nibble(pair[1])?) })
        .collect()
}

fn nibble(digit: u8) -> CliResult<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        other => Err(CliError::new(
            USAGE,
            format!("invalid hex digit {:?}", char::from(other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spaced_and_prefixed_hex() {
        assert_eq!(
            parse_hex("0x00 00 00 09\n06 69 0B 08 15").unwrap(),
            vec![0x00, 0x00, 0x00, 0x09, 0x06, 0x69, 0x0B, 0x08, 0x15]
        );
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_odd_length() {
        let err = parse_hex("abc").unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn rejects_non_hex_digit() {
        let err = parse_hex("0g").unwrap_err();
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("'g'"));
    }
}
