//! Labelled assembly tree with rigid joints.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use enclosure_types::{BoundingBox, Color, Placement, Point3};

use crate::shape::Shape;
use crate::types::OpError;

/// A node of the assembly: optional own geometry plus child parts.
///
/// Joints are named points in the part's own frame. Connecting two sibling
/// parts translates one so that the chosen joints coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub label: String,
    pub color: Option<Color>,
    pub shape: Option<Shape>,
    pub children: Vec<Part>,
    /// Placement of this part in its parent's frame.
    pub placement: Placement,
    joints: BTreeMap<String, Point3<f64>>,
}

impl Part {
    /// An empty assembly node.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: None,
            shape: None,
            children: Vec::new(),
            placement: Placement::identity(),
            joints: BTreeMap::new(),
        }
    }

    pub fn with_shape(label: impl Into<String>, shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::new(label)
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<Part>) -> Self {
        Self {
            children,
            ..Self::new(label)
        }
    }

    #[must_use]
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn add_child(&mut self, child: Part) {
        self.children.push(child);
    }

    pub fn child(&self, label: &str) -> Result<&Part, OpError> {
        self.children
            .iter()
            .find(|c| c.label == label)
            .ok_or_else(|| OpError::ChildNotFound {
                part: self.label.clone(),
                child: label.to_string(),
            })
    }

    pub fn add_joint(&mut self, name: impl Into<String>, location: Point3<f64>) {
        self.joints.insert(name.into(), location);
    }

    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joints.keys().map(String::as_str)
    }

    /// Joint location in the part's own frame.
    pub fn joint(&self, name: &str) -> Result<Point3<f64>, OpError> {
        self.joints
            .get(name)
            .copied()
            .ok_or_else(|| OpError::JointNotFound {
                part: self.label.clone(),
                joint: name.to_string(),
            })
    }

    /// Joint location in the parent's frame.
    pub fn joint_location(&self, name: &str) -> Result<Point3<f64>, OpError> {
        Ok(self.placement.transform_point(&self.joint(name)?))
    }

    /// Move `other`, a sibling of this part, so that its `other_joint`
    /// coincides with this part's `joint`.
    pub fn connect(&self, joint: &str, other: &mut Part, other_joint: &str) -> Result<(), OpError> {
        let target = self.joint_location(joint)?;
        let source = other.joint_location(other_joint)?;
        other.placement = Placement::from_vector(target - source) * other.placement;
        Ok(())
    }

    /// Bounds in the part's own frame.
    pub fn local_bounding_box(&self) -> BoundingBox {
        let own = self
            .shape
            .as_ref()
            .map(Shape::bounding_box)
            .unwrap_or_else(BoundingBox::empty);
        self.children
            .iter()
            .fold(own, |acc, c| acc.union(&c.bounding_box()))
    }

    /// Bounds in the parent's frame.
    pub fn bounding_box(&self) -> BoundingBox {
        self.local_bounding_box().transformed(&self.placement)
    }

    /// Indented outline of the tree: label, color, primitive count and bounds.
    pub fn topology(&self) -> String {
        let mut out = String::new();
        self.write_topology(&mut out, 0);
        out
    }

    fn write_topology(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{}{}", "    ".repeat(depth), self.label);
        if let Some(color) = self.color {
            let _ = write!(out, " [{color}]");
        }
        if let Some(shape) = &self.shape {
            let _ = write!(out, " ({} primitives)", shape.primitive_count());
        }
        let _ = writeln!(out, " {}", self.bounding_box());
        for child in &self.children {
            child.write_topology(out, depth + 1);
        }
    }
}
