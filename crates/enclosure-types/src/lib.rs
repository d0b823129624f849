pub mod bounds;
pub mod color;
pub mod corners;
pub mod dimensions;
pub mod error;
pub mod object;
pub mod placement;
pub mod sides;

pub use bounds::BoundingBox;
pub use color::Color;
pub use corners::Corner;
pub use dimensions::{is_integral, AsXY, Dimension2D, Dimension3D, Position2D};
pub use error::ParseError;
pub use object::Object2D;
pub use placement::Placement;
pub use sides::{Side, SideSet};

/// Re-exported so downstream crates name points and vectors with the same types.
pub use nalgebra::{Point3, Vector3};
