use std::ops::Mul;

use super::{FloatRect, Vector2f};

/// A 2D affine transform stored as a row-major 3x3 matrix.
///
/// The bottom row stays (0, 0, 1); only translation, rotation and scale are
/// representable, which is all the sprite pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: [f32; 9],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub fn translation(offset: Vector2f) -> Self {
        Self {
            m: [1.0, 0.0, offset.x, 0.0, 1.0, offset.y, 0.0, 0.0, 1.0],
        }
    }

    /// Rotation around the origin, in degrees
    pub fn rotation(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let cos = radians.cos();
        let sin = radians.sin();

        Self {
            m: [cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn scaling(factors: Vector2f) -> Self {
        Self {
            m: [factors.x, 0.0, 0.0, 0.0, factors.y, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Apply this transform, then `other`, as one combined transform
    pub fn combine(&self, other: &Transform) -> Transform {
        let a = &self.m;
        let b = &other.m;
        let mut m = [0.0; 9];

        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }

        Transform { m }
    }

    pub fn transform_point(&self, point: Vector2f) -> Vector2f {
        Vector2f::new(
            self.m[0] * point.x + self.m[1] * point.y + self.m[2],
            self.m[3] * point.x + self.m[4] * point.y + self.m[5],
        )
    }

    /// Axis-aligned hull of the four transformed corners of `rect`
    pub fn transform_rect(&self, rect: FloatRect) -> FloatRect {
        let corners = [
            self.transform_point(Vector2f::new(rect.x, rect.y)),
            self.transform_point(Vector2f::new(rect.x, rect.bottom())),
            self.transform_point(Vector2f::new(rect.right(), rect.y)),
            self.transform_point(Vector2f::new(rect.right(), rect.bottom())),
        ];

        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min.x = min.x.min(corner.x);
            min.y = min.y.min(corner.y);
            max.x = max.x.max(corner.x);
            max.y = max.y.max(corner.y);
        }

        FloatRect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// The inverse transform, or identity if this transform is degenerate
    pub fn inverse(&self) -> Transform {
        let det = self.m[0] * self.m[4] - self.m[1] * self.m[3];
        if det == 0.0 {
            return Self::IDENTITY;
        }

        let a = self.m[4] / det;
        let b = -self.m[1] / det;
        let c = -self.m[3] / det;
        let d = self.m[0] / det;

        Transform {
            m: [
                a,
                b,
                -(a * self.m[2] + b * self.m[5]),
                c,
                d,
                -(c * self.m[2] + d * self.m[5]),
                0.0,
                0.0,
                1.0,
            ],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.combine(&rhs)
    }
}
