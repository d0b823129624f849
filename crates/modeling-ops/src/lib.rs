pub mod boolean;
pub mod evaluate;
pub mod fillet;
pub mod part;
pub mod shape;
pub mod types;

pub use boolean::{cut_all, fuse_all, EvalSolid};
pub use evaluate::{evaluate_part, evaluate_shape, Body, EvalOptions, Evaluated};
pub use fillet::rounded_cuboid;
pub use part::Part;
pub use shape::{Align, Primitive, Shape, CUTTER_OVERSHOOT};
pub use types::*;
