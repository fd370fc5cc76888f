//! Geometric primitives for table reconstruction.
//!
//! This module provides the rectangle type used to describe text fragments
//! and [`Coord`], a coordinate usable as an ordered map key.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_rules::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.right(), 100.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A coordinate with total ordering, usable as a map key.
///
/// Two coordinates are equal only when their bit patterns match, so `0.0`
/// and `-0.0` are distinct keys. Ordering follows [`f32::total_cmp`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coord(pub f32);

impl Coord {
    /// Raw coordinate value.
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Coord {
    fn from(value: f32) -> Self {
        Coord(value)
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Coord {}

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 5.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 25.0);
    }

    #[test]
    fn test_coord_ordering_is_numeric() {
        let mut keys: BTreeMap<Coord, &str> = BTreeMap::new();
        keys.insert(Coord(10.5), "b");
        keys.insert(Coord(2.0), "a");
        keys.insert(Coord(100.0), "c");

        let order: Vec<&str> = keys.values().copied().collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_coord_equality_by_bits() {
        assert_eq!(Coord(1.25), Coord(1.25));
        assert_ne!(Coord(0.0), Coord(-0.0));
    }
}
