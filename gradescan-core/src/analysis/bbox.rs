use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box represented by minimum and maximum points.
///
/// Coordinates are image pixels with the origin at the top-left corner and
/// Y increasing downward, matching what OCR providers report. The center
/// and extent are always derived from `min`/`max`, never stored
/// independently, so the box cannot drift out of sync with itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    /// The minimum point of the bounding box (top-left corner).
    pub min: glam::Vec2,
    /// The maximum point of the bounding box (bottom-right corner).
    pub max: glam::Vec2,
}

impl Bbox {
    /// Creates a new bounding box from minimum and maximum points.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use gradescan_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
    /// ```
    pub fn new(min: glam::Vec2, max: glam::Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a bounding box covering a bounding polygon's vertices.
    ///
    /// OCR providers report each fragment as a four-corner polygon; the
    /// corners are not guaranteed to arrive in any particular order and a
    /// skewed scan makes the polygon non-rectangular, so the box is the
    /// min/max envelope over all vertices. An empty slice yields a
    /// degenerate box at the origin.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use gradescan_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::from_vertices(&[
    ///     Vec2::new(12.0, 4.0),
    ///     Vec2::new(40.0, 4.0),
    ///     Vec2::new(40.0, 18.0),
    ///     Vec2::new(12.0, 18.0),
    /// ]);
    /// assert_eq!(bbox.min, Vec2::new(12.0, 4.0));
    /// assert_eq!(bbox.max, Vec2::new(40.0, 18.0));
    /// ```
    pub fn from_vertices(vertices: &[glam::Vec2]) -> Self {
        if vertices.is_empty() {
            return Self::new(glam::Vec2::ZERO, glam::Vec2::ZERO);
        }

        let mut min = glam::Vec2::splat(f32::INFINITY);
        let mut max = glam::Vec2::splat(f32::NEG_INFINITY);

        for vertex in vertices {
            min = min.min(*vertex);
            max = max.max(*vertex);
        }

        Self { min, max }
    }

    /// Calculates the center point of the bounding box.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use gradescan_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
    /// assert_eq!(bbox.center(), Vec2::new(2.0, 1.0));
    /// ```
    pub fn center(&self) -> glam::Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Width of the box along X.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box along Y.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Creates a union bounding box that encompasses both this box and
    /// another, the smallest axis-aligned rectangle containing both.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use gradescan_core::analysis::bbox::Bbox;
    /// let a = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0));
    /// let b = Bbox::new(Vec2::new(3.0, 3.0), Vec2::new(8.0, 8.0));
    /// let union = a.union(&b);
    /// assert_eq!(union.min, Vec2::new(0.0, 0.0));
    /// assert_eq!(union.max, Vec2::new(8.0, 8.0));
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}
