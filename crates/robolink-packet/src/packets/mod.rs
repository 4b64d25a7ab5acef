//! One module per packet family.

mod control;
mod file;
mod robot;
mod sensor;
mod settings;

pub use control::{ButtonEvent, Confirmation};
pub use file::{ConsoleText, FileBlob, SlicerConfigFile};
pub use robot::{RobotDescriptor, RobotListRequest, SelectedRobot};
pub use sensor::{Progress, RollEvent, Temperature};
pub use settings::{ConfigEntry, SlicerSetting};
