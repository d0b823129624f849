use std::fmt;

use crate::sides::{Side, SideSet};

/// A vertical corner of a rectangular footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::BackLeft,
        Corner::BackRight,
    ];

    /// The (front/back, left/right) sides meeting at this corner.
    pub fn sides(self) -> (Side, Side) {
        match self {
            Corner::FrontLeft => (Side::Front, Side::Left),
            Corner::FrontRight => (Side::Front, Side::Right),
            Corner::BackLeft => (Side::Back, Side::Left),
            Corner::BackRight => (Side::Back, Side::Right),
        }
    }

    /// Corners whose two sides are both present in `sides`.
    pub fn enclosed_by(sides: &SideSet) -> Vec<Corner> {
        Self::ALL
            .into_iter()
            .filter(|c| {
                let (a, b) = c.sides();
                sides.contains(a) && sides.contains(b)
            })
            .collect()
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.sides();
        write!(f, "{a}-{b}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosed_corners_need_both_sides() {
        let sides = SideSet::none() + Side::Front + Side::Left + Side::Right;
        assert_eq!(
            Corner::enclosed_by(&sides),
            vec![Corner::FrontLeft, Corner::FrontRight]
        );
        assert!(Corner::enclosed_by(&(SideSet::none() + Side::Back)).is_empty());
        assert_eq!(Corner::enclosed_by(&SideSet::all()).len(), 4);
    }

    #[test]
    fn display_names_both_sides() {
        assert_eq!(Corner::BackRight.to_string(), "back-right");
    }
}
