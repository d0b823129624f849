pub mod borders;
pub mod chassis;
pub mod connectors;
pub mod diffuser;
pub mod enclosure;
pub mod grid;
pub mod lid;
pub mod module;
pub mod pillars;

pub use borders::BordersBuilder;
pub use chassis::ChassisBuilder;
pub use connectors::ConnectorsBuilder;
pub use diffuser::DiffuserBuilder;
pub use enclosure::EnclosureBuilder;
pub use grid::{GridBuilder, Orientation};
pub use lid::LidBuilder;
pub use module::ModuleBuilder;
pub use pillars::PillarsBuilder;
