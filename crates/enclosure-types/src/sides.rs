//! The four vertical sides of a rectangular footprint.

use std::fmt;
use std::ops::{Add, Not, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A side of a footprint. Left/right bound X, front/back bound Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
}

impl Side {
    /// Iteration order used by [`SideSet`].
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    /// Left and right are the sides crossed when moving along X.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    /// Left and front sit at the low end of their axis.
    pub fn is_start(self) -> bool {
        matches!(self, Side::Left | Side::Front)
    }

    /// Sides sharing a corner with this one, in (back, front) or (left, right) order.
    pub fn neighbours(self) -> [Side; 2] {
        if self.is_horizontal() {
            [Side::Back, Side::Front]
        } else {
            [Side::Left, Side::Right]
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Front => 0,
            Side::Back => 1,
            Side::Left => 2,
            Side::Right => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Side::Front),
            "back" => Ok(Side::Back),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(ParseError::UnknownSide(s.to_string())),
        }
    }
}

/// Presence flags for the four sides, plus the value unset sides start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideSet {
    flags: [bool; 4],
    default: bool,
}

impl SideSet {
    /// Every side set to `default`.
    pub const fn new(default: bool) -> Self {
        Self {
            flags: [default; 4],
            default,
        }
    }

    pub const fn all() -> Self {
        Self::new(true)
    }

    pub const fn none() -> Self {
        Self::new(false)
    }

    pub fn default_value(&self) -> bool {
        self.default
    }

    pub fn contains(&self, side: Side) -> bool {
        self.flags[side.index()]
    }

    pub fn set(&mut self, side: Side, present: bool) {
        self.flags[side.index()] = present;
    }

    #[must_use]
    pub fn with(mut self, side: Side, present: bool) -> Self {
        self.set(side, present);
        self
    }

    /// Present sides in front, back, left, right order.
    pub fn iter(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(|s| self.contains(*s))
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Present sides that share a corner with `side`.
    pub fn adjacents(&self, side: Side) -> Vec<Side> {
        side.neighbours()
            .into_iter()
            .filter(|s| self.contains(*s))
            .collect()
    }

    /// Present left/right sides.
    pub fn horizontal(&self) -> Vec<Side> {
        self.iter().filter(|s| s.is_horizontal()).collect()
    }

    /// Present front/back sides.
    pub fn vertical(&self) -> Vec<Side> {
        self.iter().filter(|s| !s.is_horizontal()).collect()
    }
}

impl Default for SideSet {
    fn default() -> Self {
        Self::none()
    }
}

impl Add<Side> for SideSet {
    type Output = SideSet;

    fn add(self, rhs: Side) -> Self::Output {
        self.with(rhs, true)
    }
}

impl Sub<Side> for SideSet {
    type Output = SideSet;

    fn sub(self, rhs: Side) -> Self::Output {
        self.with(rhs, false)
    }
}

impl Not for SideSet {
    type Output = SideSet;

    fn not(self) -> Self::Output {
        Self {
            flags: self.flags.map(|f| !f),
            default: !self.default,
        }
    }
}

impl FromIterator<Side> for SideSet {
    fn from_iter<I: IntoIterator<Item = Side>>(iter: I) -> Self {
        iter.into_iter().fold(SideSet::none(), |set, side| set + side)
    }
}

impl fmt::Display for SideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(Side::name).collect();
        f.write_str(&names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_properties() {
        assert!(Side::Left.is_horizontal());
        assert!(Side::Right.is_horizontal());
        assert!(!Side::Front.is_horizontal());
        assert!(Side::Left.is_start());
        assert!(Side::Front.is_start());
        assert!(!Side::Back.is_start());
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!("RIGHT".parse::<Side>().unwrap(), Side::Right);
        assert!("top".parse::<Side>().is_err());
    }

    #[test]
    fn new_set_uses_default() {
        let set = SideSet::new(true);
        assert!(Side::ALL.iter().all(|s| set.contains(*s)));
        assert_eq!(SideSet::none().count(), 0);
    }

    #[test]
    fn adjacents_only_lists_present_sides() {
        let set = SideSet::all();
        assert_eq!(set.adjacents(Side::Left), vec![Side::Back, Side::Front]);
        assert_eq!(set.adjacents(Side::Front), vec![Side::Left, Side::Right]);

        let set = SideSet::none() + Side::Front;
        assert_eq!(set.adjacents(Side::Left), vec![Side::Front]);
        assert!(set.adjacents(Side::Back).is_empty());
    }

    #[test]
    fn add_sub_and_invert() {
        let set = SideSet::none() + Side::Left + Side::Back;
        assert!(set.contains(Side::Left));
        assert!(!set.contains(Side::Front));

        let set = set - Side::Left;
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Side::Back]);

        let inverted = !set;
        assert_eq!(
            inverted.iter().collect::<Vec<_>>(),
            vec![Side::Front, Side::Left, Side::Right]
        );
        assert!(inverted.default_value());
    }

    #[test]
    fn horizontal_and_vertical_partition() {
        let set = SideSet::all() - Side::Back;
        assert_eq!(set.horizontal(), vec![Side::Left, Side::Right]);
        assert_eq!(set.vertical(), vec![Side::Front]);
    }

    #[test]
    fn display() {
        assert_eq!(SideSet::none().to_string(), "none");
        assert_eq!(SideSet::all().to_string(), "front back left right");
        assert_eq!((SideSet::none() + Side::Right).to_string(), "right");
    }
}
