//! Packet identifiers for protocol version 1.
//!
//! The mapping is frozen: one identifier per packet type, never reused.

/// Wire protocol revision these identifiers belong to.
pub const PROTOCOL_VERSION: u8 = 1;

/// Job progress in percent.
pub const PROGRESS: u8 = 0x01;

/// Device temperature reading.
pub const TEMPERATURE: u8 = 0x02;

/// Length-prefixed file blob (e.g. an STL model).
pub const FILE_BLOB: u8 = 0x03;

/// Key and tagged value configuration entry.
pub const CONFIG_ENTRY: u8 = 0x04;

/// Robot model, brand and mechanical limits.
pub const ROBOT_DESCRIPTOR: u8 = 0x05;

/// Request for the list of loaded robots.
pub const ROBOT_LIST_REQUEST: u8 = 0x06;

/// Acknowledgement of an earlier request.
pub const CONFIRMATION: u8 = 0x07;

/// UI button press.
pub const BUTTON_EVENT: u8 = 0x08;

/// Raw console output.
pub const CONSOLE_TEXT: u8 = 0x09;

/// Slicer setting get/set/default action.
pub const SLICER_SETTING: u8 = 0x0A;

/// Full slicer configuration file.
pub const SLICER_CONFIG_FILE: u8 = 0x0B;

/// Reference to the robot picked by the operator.
pub const SELECTED_ROBOT: u8 = 0x10;

/// Signed roll rotation in degrees.
pub const ROLL_EVENT: u8 = 0x11;

/// Returns a human-readable name for an identifier.
pub fn packet_name(identifier: u8) -> &'static str {
    match identifier {
        PROGRESS => "progress",
        TEMPERATURE => "temperature",
        FILE_BLOB => "file_blob",
        CONFIG_ENTRY => "config_entry",
        ROBOT_DESCRIPTOR => "robot_descriptor",
        ROBOT_LIST_REQUEST => "robot_list_request",
        CONFIRMATION => "confirmation",
        BUTTON_EVENT => "button_event",
        CONSOLE_TEXT => "console_text",
        SLICER_SETTING => "slicer_setting",
        SLICER_CONFIG_FILE => "slicer_config_file",
        SELECTED_ROBOT => "selected_robot",
        ROLL_EVENT => "roll_event",
        _ => "UNKNOWN",
    }
}
