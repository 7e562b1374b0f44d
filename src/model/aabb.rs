use glam::Vec3;

/// Axis-aligned bounding box in world space.
///
/// Obstacle volumes are built once when the gallery is constructed and never
/// move afterwards; the player volume is rebuilt every frame around the
/// proposed eye position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Boxes overlap iff the intervals intersect on all three axes.
    /// Intervals are closed, so boxes that merely touch count as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 5.0));
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_center_and_half_extents_round_trip() {
        let b = Aabb::from_center_half_extents(Vec3::new(5.0, -1.0, 2.0), Vec3::new(2.0, 3.0, 0.5));
        assert_eq!(b.center(), Vec3::new(5.0, -1.0, 2.0));
        assert_eq!(b.half_extents(), Vec3::new(2.0, 3.0, 0.5));
    }

    #[test]
    fn test_overlap_requires_all_axes() {
        let wall = Aabb::new(Vec3::new(5.0, -10.0, -10.0), Vec3::new(6.0, 10.0, 10.0));

        // Overlapping on all three axes
        let player = Aabb::from_center_half_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(player.intersects(&wall));
        assert!(wall.intersects(&player));

        // Clear on x only
        let player = Aabb::from_center_half_extents(Vec3::new(4.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(!player.intersects(&wall));

        // x overlaps but y does not
        let player = Aabb::from_center_half_extents(Vec3::new(5.5, 20.0, 0.0), Vec3::splat(0.5));
        assert!(!player.intersects(&wall));
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_contains_point() {
        let b = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        assert!(b.contains_point(Vec3::splat(1.0)));
        assert!(b.contains_point(Vec3::ZERO));
        assert!(!b.contains_point(Vec3::new(1.0, 2.1, 1.0)));
    }
}
