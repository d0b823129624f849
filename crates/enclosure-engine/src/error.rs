use enclosure_types::{Dimension2D, ParseError, Side};
use modeling_ops::OpError;

/// Errors raised while validating parameters or laying out an enclosure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown LED matrix profile '{name}' (known profiles: {known})")]
    UnknownProfile { name: String, known: String },

    #[error("the LED matrix layout must have at least one row")]
    EmptyLayout,

    #[error("row {row} of the LED matrix layout has no panel")]
    EmptyRow { row: usize },

    #[error("all panels must have the same pixel size: expected {expected} mm, found {found} mm")]
    InconsistentPixelSize { expected: f64, found: f64 },

    #[error("composite shape {shape} pixels cannot be split evenly by enclosure layout {layout}")]
    NonIntegerModuleShape {
        shape: Dimension2D,
        layout: Dimension2D,
    },

    #[error(
        "pillars need integer inner dimensions and spacing, got {length}x{width} mm spaced by {spacing} mm"
    )]
    NonIntegerPillarGrid {
        length: f64,
        width: f64,
        spacing: f64,
    },

    #[error("a connector cannot be mounted on {build} with an opening on {opening}")]
    UnsupportedConnectorPlacement { build: Side, opening: Side },

    #[error("invalid value for {name}: {value} ({expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("both the lid and the chassis are disabled, nothing to build")]
    NothingToBuild,

    #[error(transparent)]
    Op(#[from] OpError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
