//! 2D geometry for entity positions.
//!
//! [`Point2D`] is a validated wrapper over [`glam::DVec2`]: both components
//! are always finite. Every constructor and setter checks this and returns
//! [`QuestError::InvalidArgument`] otherwise, so a `Point2D` in hand never
//! needs re-checking.
//!
//! # Example
//!
//! ```
//! use campus_quest_core::geometry::Point2D;
//!
//! let a = Point2D::new(0.0, 0.0).unwrap();
//! let b = Point2D::new(3.0, 4.0).unwrap();
//! assert_eq!(a.distance(b), 5.0);
//!
//! assert!(Point2D::new(f64::NAN, 0.0).is_err());
//! ```

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Axis, QuestError, Result};

/// Wire form of a point; validated on the way back in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

/// A finite point in the 2D play area.
///
/// Value type, copied freely. Arithmetic that could leave the finite range
/// (`checked_add`, `checked_sub`, `offset`) is fallible.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct Point2D(DVec2);

impl Point2D {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self(DVec2::ZERO);

    /// Creates a point, rejecting NaN or infinite components.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] naming the first bad axis.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        check(Axis::X, x)?;
        check(Axis::Y, y)?;
        Ok(Self(DVec2::new(x, y)))
    }

    /// Creates a point from a raw vector, rejecting non-finite components.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] naming the first bad axis.
    pub fn from_vec(v: DVec2) -> Result<Self> {
        Self::new(v.x, v.y)
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.0.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(self) -> f64 {
        self.0.y
    }

    /// Returns the underlying vector.
    #[must_use]
    pub const fn as_vec(self) -> DVec2 {
        self.0
    }

    /// Sets the horizontal component.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] if `x` is not finite; the
    /// point is left unchanged.
    pub fn set_x(&mut self, x: f64) -> Result<()> {
        check(Axis::X, x)?;
        self.0.x = x;
        Ok(())
    }

    /// Sets the vertical component.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidArgument`] if `y` is not finite; the
    /// point is left unchanged.
    pub fn set_y(&mut self, y: f64) -> Result<()> {
        check(Axis::Y, y)?;
        self.0.y = y;
        Ok(())
    }

    /// Component-wise sum.
    ///
    /// # Errors
    ///
    /// Fails if the sum overflows to infinity.
    pub fn checked_add(self, other: Self) -> Result<Self> {
        Self::from_vec(self.0 + other.0)
    }

    /// Component-wise difference.
    ///
    /// # Errors
    ///
    /// Fails if the difference overflows to infinity.
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        Self::from_vec(self.0 - other.0)
    }

    /// Translates the point by a raw displacement.
    ///
    /// # Errors
    ///
    /// Fails if the displacement is non-finite or the result overflows.
    pub fn offset(self, delta: DVec2) -> Result<Self> {
        Self::from_vec(self.0 + delta)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.0.distance(other.0)
    }

    /// Displacement from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: Self) -> DVec2 {
        other.0 - self.0
    }
}

fn check(axis: Axis, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(QuestError::InvalidArgument { axis, value })
    }
}

impl TryFrom<RawPoint> for Point2D {
    type Error = QuestError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl From<Point2D> for RawPoint {
    fn from(p: Point2D) -> Self {
        Self { x: p.x(), y: p.y() }
    }
}

impl fmt::Debug for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point2D({}, {})", self.0.x, self.0.y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.0.x, self.0.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction_tests {
        use super::*;

        #[test]
        fn new_accepts_finite() {
            let p = Point2D::new(1.5, -2.0).unwrap();
            assert_eq!(p.x(), 1.5);
            assert_eq!(p.y(), -2.0);
        }

        #[test]
        fn new_rejects_nan_x() {
            let err = Point2D::new(f64::NAN, 0.0).unwrap_err();
            assert!(matches!(
                err,
                QuestError::InvalidArgument { axis: Axis::X, .. }
            ));
        }

        #[test]
        fn new_rejects_infinite_y() {
            let err = Point2D::new(0.0, f64::NEG_INFINITY).unwrap_err();
            assert_eq!(
                err,
                QuestError::InvalidArgument {
                    axis: Axis::Y,
                    value: f64::NEG_INFINITY
                }
            );
        }

        #[test]
        fn default_is_origin() {
            assert_eq!(Point2D::default(), Point2D::ORIGIN);
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn setters_update_components() {
            let mut p = Point2D::ORIGIN;
            p.set_x(3.0).unwrap();
            p.set_y(-4.0).unwrap();
            assert_eq!(p, Point2D::new(3.0, -4.0).unwrap());
        }

        #[test]
        fn rejected_setter_leaves_point_unchanged() {
            let mut p = Point2D::new(1.0, 2.0).unwrap();
            assert!(p.set_x(f64::INFINITY).is_err());
            assert!(p.set_y(f64::NAN).is_err());
            assert_eq!(p, Point2D::new(1.0, 2.0).unwrap());
        }
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn add_and_sub_are_component_wise() {
            let a = Point2D::new(1.0, 2.0).unwrap();
            let b = Point2D::new(0.5, -1.0).unwrap();
            assert_eq!(a.checked_add(b).unwrap(), Point2D::new(1.5, 1.0).unwrap());
            assert_eq!(a.checked_sub(b).unwrap(), Point2D::new(0.5, 3.0).unwrap());
        }

        #[test]
        fn overflowing_add_is_rejected() {
            let big = Point2D::new(f64::MAX, 0.0).unwrap();
            assert!(big.checked_add(big).is_err());
        }

        #[test]
        fn distance_is_euclidean_and_symmetric() {
            let a = Point2D::new(0.0, 0.0).unwrap();
            let b = Point2D::new(3.0, 4.0).unwrap();
            assert!((a.distance(b) - 5.0).abs() < 1e-12);
            assert!((b.distance(a) - 5.0).abs() < 1e-12);
        }

        #[test]
        fn delta_points_from_self_to_other() {
            let a = Point2D::new(1.0, 1.0).unwrap();
            let b = Point2D::new(4.0, -1.0).unwrap();
            assert_eq!(a.delta_to(b), DVec2::new(3.0, -2.0));
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn serializes_as_named_fields() {
            let p = Point2D::new(1.0, 2.5).unwrap();
            assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"x":1.0,"y":2.5}"#);
        }

        #[test]
        fn deserialization_roundtrip() {
            let p = Point2D::new(-7.0, 0.25).unwrap();
            let json = serde_json::to_string(&p).unwrap();
            let back: Point2D = serde_json::from_str(&json).unwrap();
            assert_eq!(p, back);
        }
    }
}
