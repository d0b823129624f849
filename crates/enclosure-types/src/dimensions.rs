//! Planar and spatial sizes, and planar positions.
//!
//! Lengths run along X, widths along Y and heights along Z. All values are
//! millimetres unless a caller documents pixels.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Anything that can be read as an (x, y) pair.
///
/// Positions, 2D dimensions, tuples and scalars (applied to both axes) all
/// qualify, so offsets can be written with whichever is at hand.
pub trait AsXY {
    fn xy(&self) -> (f64, f64);
}

impl AsXY for f64 {
    fn xy(&self) -> (f64, f64) {
        (*self, *self)
    }
}

impl AsXY for (f64, f64) {
    fn xy(&self) -> (f64, f64) {
        *self
    }
}

/// Size of a rectangle: `length` along X, `width` along Y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dimension2D {
    pub length: f64,
    pub width: f64,
}

impl Dimension2D {
    pub const fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Parse an `LxW` string such as `16x16` or `1.5x2`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let [length, width] = parse_parts::<2>(input, "2D dimension", "LxW")?;
        Ok(Self { length, width })
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Component-wise division, used to split a footprint into a layout.
    pub fn divide(&self, by: &Dimension2D) -> Dimension2D {
        Dimension2D::new(self.length / by.length, self.width / by.width)
    }

    /// Both components are whole numbers.
    pub fn is_integral(&self) -> bool {
        is_integral(self.length) && is_integral(self.width)
    }
}

impl AsXY for Dimension2D {
    fn xy(&self) -> (f64, f64) {
        (self.length, self.width)
    }
}

impl fmt::Display for Dimension2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

impl FromStr for Dimension2D {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Dimension2D {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Dimension2D> for String {
    fn from(value: Dimension2D) -> Self {
        value.to_string()
    }
}

impl Neg for Dimension2D {
    type Output = Dimension2D;

    fn neg(self) -> Self::Output {
        Dimension2D::new(-self.length, -self.width)
    }
}

impl Mul<f64> for Dimension2D {
    type Output = Dimension2D;

    fn mul(self, rhs: f64) -> Self::Output {
        Dimension2D::new(self.length * rhs, self.width * rhs)
    }
}

impl Div<f64> for Dimension2D {
    type Output = Dimension2D;

    fn div(self, rhs: f64) -> Self::Output {
        Dimension2D::new(self.length / rhs, self.width / rhs)
    }
}

/// Size of a box: `length` along X, `width` along Y, `height` along Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dimension3D {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimension3D {
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Parse an `LxWxH` string.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let [length, width, height] = parse_parts::<3>(input, "3D dimension", "LxWxH")?;
        Ok(Self::new(length, width, height))
    }

    /// Footprint of the box.
    pub fn to_2d(&self) -> Dimension2D {
        Dimension2D::new(self.length, self.width)
    }
}

impl fmt::Display for Dimension3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.width, self.height)
    }
}

impl FromStr for Dimension3D {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Dimension3D {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Dimension3D> for String {
    fn from(value: Dimension3D) -> Self {
        value.to_string()
    }
}

impl Add for Dimension3D {
    type Output = Dimension3D;

    fn add(self, rhs: Dimension3D) -> Self::Output {
        Dimension3D::new(
            self.length + rhs.length,
            self.width + rhs.width,
            self.height + rhs.height,
        )
    }
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub const ORIGIN: Position2D = Position2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl AsXY for Position2D {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl fmt::Display for Position2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Neg for Position2D {
    type Output = Position2D;

    fn neg(self) -> Self::Output {
        Position2D::new(-self.x, -self.y)
    }
}

impl<T: AsXY> Add<T> for Position2D {
    type Output = Position2D;

    fn add(self, rhs: T) -> Self::Output {
        let (x, y) = rhs.xy();
        Position2D::new(self.x + x, self.y + y)
    }
}

impl<T: AsXY> Sub<T> for Position2D {
    type Output = Position2D;

    fn sub(self, rhs: T) -> Self::Output {
        let (x, y) = rhs.xy();
        Position2D::new(self.x - x, self.y - y)
    }
}

/// True when `value` has no fractional part (within float noise).
pub fn is_integral(value: f64) -> bool {
    (value - value.round()).abs() < 1e-9
}

fn parse_parts<const N: usize>(
    input: &str,
    kind: &'static str,
    expected: &'static str,
) -> Result<[f64; N], ParseError> {
    let parts: Vec<&str> = input.trim().split(['x', 'X']).collect();
    if parts.len() != N {
        return Err(ParseError::InvalidFormat {
            kind,
            input: input.to_string(),
            expected,
        });
    }

    let mut values = [0.0; N];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber {
                input: input.to_string(),
                value: part.to_string(),
            })?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_2d_dimension() {
        let dim = Dimension2D::parse("10x20").unwrap();
        assert_eq!(dim, Dimension2D::new(10.0, 20.0));

        let dim: Dimension2D = "1.5 x 2.25".parse().unwrap();
        assert_eq!(dim, Dimension2D::new(1.5, 2.25));
    }

    #[test]
    fn parse_2d_dimension_rejects_bad_input() {
        assert!(matches!(
            Dimension2D::parse("10"),
            Err(ParseError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Dimension2D::parse("10x20x30"),
            Err(ParseError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Dimension2D::parse("ax20"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn parse_3d_dimension() {
        let dim = Dimension3D::parse("1x2x3").unwrap();
        assert_eq!(dim, Dimension3D::new(1.0, 2.0, 3.0));
        assert_eq!(dim.to_2d(), Dimension2D::new(1.0, 2.0));
        assert!(Dimension3D::parse("1x2").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        assert_eq!(Dimension2D::new(10.0, 20.0).to_string(), "10x20");
        assert_eq!(Dimension2D::new(1.2, 3.4).to_string(), "1.2x3.4");
        assert_eq!(Dimension3D::new(1.0, 2.5, 3.0).to_string(), "1x2.5x3");
    }

    #[test]
    fn negation() {
        assert_eq!(-Dimension2D::new(1.0, -2.0), Dimension2D::new(-1.0, 2.0));
        assert_eq!(-Position2D::new(3.0, 4.0), Position2D::new(-3.0, -4.0));
    }

    #[test]
    fn position_arithmetic_accepts_any_xy() {
        let p = Position2D::new(1.0, 2.0);
        assert_eq!(p + Position2D::new(1.0, 1.0), Position2D::new(2.0, 3.0));
        assert_eq!(p + Dimension2D::new(10.0, 20.0), Position2D::new(11.0, 22.0));
        assert_eq!(p + 1.0, Position2D::new(2.0, 3.0));
        assert_eq!(p - (1.0, 2.0), Position2D::ORIGIN);
        assert_eq!(p - Dimension2D::new(2.0, 2.0), Position2D::new(-1.0, 0.0));
    }

    #[test]
    fn integrality() {
        assert!(Dimension2D::new(2.0, 4.0).is_integral());
        assert!(!Dimension2D::new(2.5, 4.0).is_integral());
        assert_eq!(
            Dimension2D::new(32.0, 16.0).divide(&Dimension2D::new(2.0, 1.0)),
            Dimension2D::new(16.0, 16.0)
        );
    }
}
