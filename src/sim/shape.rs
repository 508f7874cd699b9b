//! Collision shapes
//!
//! The table only ever needs round bodies (bats, puck) and axis-aligned boxes
//! (goal nets, the field itself). Every test is written once per unordered pair
//! of shape kinds, so `overlaps(a, b) == overlaps(b, a)` by construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction used when two centers coincide and no real normal exists
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from top-left corner and size, the way screen rects are usually given
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        assert!(w >= 0.0 && h >= 0.0, "rect with negative size {w}x{h}");
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point of the rect (boundary or interior) to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// The closed set of collision shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect(Rect),
}

impl Shape {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        assert!(radius >= 0.0, "circle with negative radius {radius}");
        Shape::Circle { center, radius }
    }

    /// Reference point used to aim contact normals
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Circle { center, .. } => *center,
            Shape::Rect(r) => r.center(),
        }
    }
}

/// Overlap between two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from the first shape toward the second
    pub normal: Vec2,
    /// How far the shapes would have to move apart to just touch
    pub depth: f32,
}

/// Unit direction from `from` to `to`, or the fallback when they coincide
#[inline]
pub fn direction_or_fallback(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    let len = d.length();
    if len > f32::EPSILON { d / len } else { FALLBACK_NORMAL }
}

/// Whether two shapes touch or overlap (touching counts)
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (
            Shape::Circle { center: ca, radius: ra },
            Shape::Circle { center: cb, radius: rb },
        ) => ca.distance_squared(*cb) <= (ra + rb) * (ra + rb),
        (Shape::Circle { center, radius }, Shape::Rect(rect))
        | (Shape::Rect(rect), Shape::Circle { center, radius }) => {
            rect.closest_point(*center).distance_squared(*center) <= radius * radius
        }
        (Shape::Rect(ra), Shape::Rect(rb)) => {
            ra.min.x <= rb.max.x && rb.min.x <= ra.max.x && ra.min.y <= rb.max.y && rb.min.y <= ra.max.y
        }
    }
}

/// Point on `a`'s boundary facing `b`
///
/// For two circles this lies on the center line at `a`'s radius, the same axis
/// `penetration` reports as the normal.
pub fn contact_point(a: &Shape, b: &Shape) -> Vec2 {
    match a {
        Shape::Circle { center, radius } => {
            let target = match b {
                Shape::Rect(rect) => rect.closest_point(*center),
                _ => b.center(),
            };
            *center + direction_or_fallback(*center, target) * *radius
        }
        Shape::Rect(rect) => rect.closest_point(b.center()),
    }
}

/// Normal and depth of an overlap, `None` when the shapes are apart
///
/// Rect pairs resolve along the axis of least overlap.
pub fn penetration(a: &Shape, b: &Shape) -> Option<Contact> {
    match (a, b) {
        (
            Shape::Circle { center: ca, radius: ra },
            Shape::Circle { center: cb, radius: rb },
        ) => {
            let dist = ca.distance(*cb);
            let depth = ra + rb - dist;
            (depth > 0.0).then(|| Contact {
                normal: direction_or_fallback(*ca, *cb),
                depth,
            })
        }
        (Shape::Circle { center, radius }, Shape::Rect(rect)) => {
            circle_rect_contact(*center, *radius, rect).map(|c| Contact {
                normal: -c.normal,
                depth: c.depth,
            })
        }
        (Shape::Rect(rect), Shape::Circle { center, radius }) => {
            circle_rect_contact(*center, *radius, rect)
        }
        (Shape::Rect(ra), Shape::Rect(rb)) => {
            let dx = ra.max.x.min(rb.max.x) - ra.min.x.max(rb.min.x);
            let dy = ra.max.y.min(rb.max.y) - ra.min.y.max(rb.min.y);
            if dx <= 0.0 || dy <= 0.0 {
                return None;
            }
            let toward = rb.center() - ra.center();
            let normal = if dx < dy {
                Vec2::new(if toward.x < 0.0 { -1.0 } else { 1.0 }, 0.0)
            } else {
                Vec2::new(0.0, if toward.y < 0.0 { -1.0 } else { 1.0 })
            };
            Some(Contact {
                normal,
                depth: dx.min(dy),
            })
        }
    }
}

/// Contact with the normal pointing from the rect toward the circle
fn circle_rect_contact(center: Vec2, radius: f32, rect: &Rect) -> Option<Contact> {
    if rect.contains(center) {
        // Center is inside: leave through the nearest face
        let faces = [
            (center.x - rect.min.x, Vec2::NEG_X),
            (rect.max.x - center.x, Vec2::X),
            (center.y - rect.min.y, Vec2::NEG_Y),
            (rect.max.y - center.y, Vec2::Y),
        ];
        let (gap, normal) = faces
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .unwrap_or((0.0, FALLBACK_NORMAL));
        let depth = gap + radius;
        return (depth > 0.0).then_some(Contact { normal, depth });
    }
    let closest = rect.closest_point(center);
    let dist = closest.distance(center);
    let depth = radius - dist;
    (depth > 0.0).then(|| Contact {
        normal: direction_or_fallback(closest, center),
        depth,
    })
}
