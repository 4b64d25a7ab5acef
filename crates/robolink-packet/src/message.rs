use bytes::Bytes;
use robolink_codec::Result;
use serde::{Deserialize, Serialize};

use crate::packet::Packet;
use crate::packets::{
    ButtonEvent, ConfigEntry, Confirmation, ConsoleText, FileBlob, Progress, RobotDescriptor,
    RobotListRequest, RollEvent, SelectedRobot, SlicerConfigFile, SlicerSetting, Temperature,
};

macro_rules! message_enum {
    ($($variant:ident),+ $(,)?) => {
        /// Any packet of protocol version 1.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", rename_all = "snake_case")]
        pub enum Message {
            $($variant($variant),)+
        }

        impl Message {
            /// Identifier byte of the wrapped packet.
            pub fn identifier(&self) -> u8 {
                match self {
                    $(Message::$variant(_) => <$variant as Packet>::IDENTIFIER,)+
                }
            }

            /// Snake_case name of the wrapped packet type.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => <$variant as Packet>::NAME,)+
                }
            }

            pub fn timestamp(&self) -> u32 {
                match self {
                    $(Message::$variant(packet) => packet.timestamp(),)+
                }
            }

            /// Serialize the wrapped packet.
            pub fn encode(&self) -> Result<Bytes> {
                match self {
                    $(Message::$variant(packet) => packet.encode(),)+
                }
            }
        }

        $(
            impl From<$variant> for Message {
                fn from(packet: $variant) -> Self {
                    Message::$variant(packet)
                }
            }
        )+
    };
}

message_enum!(
    Progress,
    Temperature,
    FileBlob,
    ConfigEntry,
    RobotDescriptor,
    RobotListRequest,
    Confirmation,
    ButtonEvent,
    ConsoleText,
    SlicerSetting,
    SlicerConfigFile,
    SelectedRobot,
    RollEvent,
);
