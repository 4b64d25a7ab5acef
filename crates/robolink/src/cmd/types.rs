use robolink_packet::PacketRegistry;

use crate::cmd::TypesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_registry, OutputFormat};

pub fn run(_args: TypesArgs, format: OutputFormat, registry: &PacketRegistry) -> CliResult<i32> {
    print_registry(registry.entries(), format);
    Ok(SUCCESS)
}
