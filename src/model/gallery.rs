use glam::Vec3;

use crate::model::aabb::Aabb;
use crate::utils::Mesh;

/// Half the distance between opposing walls.
pub const ROOM_HALF_SIZE: f32 = 20.0;
/// Walls overshoot the room footprint, like oversized stage flats.
pub const WALL_LENGTH: f32 = 50.0;
pub const WALL_HEIGHT: f32 = 20.0;
pub const WALL_THICKNESS: f32 = 0.001;
pub const FLOOR_SIZE: f32 = 50.0;
pub const FLOOR_Y: f32 = -std::f32::consts::PI;
pub const CEILING_Y: f32 = 10.0;
pub const PAINTING_WIDTH: f32 = 9.0;
pub const PAINTING_HEIGHT: f32 = 5.0;
/// Paintings hang a hair in front of the wall plane so they never z-fight.
const PAINTING_INSET: f32 = 0.01;

/// Where the player's eye starts, a few steps back from the room center.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Material tag for a surface. The view layer decides how each finish is
/// textured (decoded from an asset file or synthesized).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    FloorTiles,
    Concrete,
    Plaster,
    Artwork(u8),
}

/// One renderable quad of the gallery.
pub struct Surface {
    pub name: &'static str,
    pub finish: Finish,
    pub mesh: Mesh,
}

/// Handle to one registered obstacle volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleId(u32);

/// The obstacle-id -> bounding-volume association, built once at
/// construction time and kept apart from any render object.
#[derive(Debug, Default)]
pub struct ObstacleSet {
    volumes: Vec<(ObstacleId, Aabb)>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, volume: Aabb) -> ObstacleId {
        let id = ObstacleId(self.volumes.len() as u32);
        self.volumes.push((id, volume));
        id
    }

    /// First obstacle whose volume overlaps `volume`, if any.
    pub fn first_overlap(&self, volume: &Aabb) -> Option<ObstacleId> {
        self.volumes
            .iter()
            .find(|(_, obstacle)| obstacle.intersects(volume))
            .map(|(id, _)| *id)
    }

    pub fn overlaps(&self, volume: &Aabb) -> bool {
        self.first_overlap(volume).is_some()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Aabb> {
        self.volumes.get(id.0 as usize).map(|(_, volume)| volume)
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

pub struct Gallery {
    pub surfaces: Vec<Surface>,
    pub obstacles: ObstacleSet,
}

impl Gallery {
    /// Lay out the room: floor, ceiling, four walls, four paintings.
    /// Wall and painting bounding volumes are registered here, once; nothing
    /// re-derives them from render geometry later.
    pub fn build() -> Self {
        let mut surfaces = Vec::new();
        let mut obstacles = ObstacleSet::new();

        let floor_half = FLOOR_SIZE / 2.0;
        surfaces.push(Surface {
            name: "floor",
            finish: Finish::FloorTiles,
            mesh: Mesh::quad(
                Vec3::new(0.0, FLOOR_Y, 0.0),
                Vec3::new(floor_half, 0.0, 0.0),
                Vec3::new(0.0, 0.0, floor_half),
                Vec3::Y,
                8.0,
            ),
        });

        surfaces.push(Surface {
            name: "ceiling",
            finish: Finish::Plaster,
            mesh: Mesh::quad(
                Vec3::new(0.0, CEILING_Y, 0.0),
                Vec3::new(floor_half, 0.0, 0.0),
                Vec3::new(0.0, 0.0, floor_half),
                -Vec3::Y,
                4.0,
            ),
        });

        let wall_half_u = WALL_LENGTH / 2.0;
        let wall_half_v = WALL_HEIGHT / 2.0;
        let wall_half_t = WALL_THICKNESS / 2.0;

        // (name, center, in-plane u axis, inward normal, obstacle half extents)
        let walls: [(&'static str, Vec3, Vec3, Vec3, Vec3); 4] = [
            (
                "front-wall",
                Vec3::new(0.0, 0.0, -ROOM_HALF_SIZE),
                Vec3::new(wall_half_u, 0.0, 0.0),
                Vec3::Z,
                Vec3::new(wall_half_u, wall_half_v, wall_half_t),
            ),
            (
                "back-wall",
                Vec3::new(0.0, 0.0, ROOM_HALF_SIZE),
                Vec3::new(wall_half_u, 0.0, 0.0),
                -Vec3::Z,
                Vec3::new(wall_half_u, wall_half_v, wall_half_t),
            ),
            (
                "left-wall",
                Vec3::new(-ROOM_HALF_SIZE, 0.0, 0.0),
                Vec3::new(0.0, 0.0, wall_half_u),
                Vec3::X,
                Vec3::new(wall_half_t, wall_half_v, wall_half_u),
            ),
            (
                "right-wall",
                Vec3::new(ROOM_HALF_SIZE, 0.0, 0.0),
                Vec3::new(0.0, 0.0, wall_half_u),
                -Vec3::X,
                Vec3::new(wall_half_t, wall_half_v, wall_half_u),
            ),
        ];

        for (name, center, half_u, normal, half_extents) in walls {
            surfaces.push(Surface {
                name,
                finish: Finish::Concrete,
                mesh: Mesh::quad(center, half_u, Vec3::new(0.0, wall_half_v, 0.0), normal, 1.0),
            });
            obstacles.add(Aabb::from_center_half_extents(center, half_extents));
        }

        let paint_half_u = PAINTING_WIDTH / 2.0;
        let paint_half_v = PAINTING_HEIGHT / 2.0;
        let wall_face = ROOM_HALF_SIZE - PAINTING_INSET;

        // Two canvases on the front wall, one on each side wall.
        let paintings: [(&'static str, u8, Vec3, Vec3, Vec3); 4] = [
            (
                "painting-front-left",
                0,
                Vec3::new(-10.0, 5.0, -wall_face),
                Vec3::new(paint_half_u, 0.0, 0.0),
                Vec3::Z,
            ),
            (
                "painting-front-right",
                1,
                Vec3::new(10.0, 5.0, -wall_face),
                Vec3::new(paint_half_u, 0.0, 0.0),
                Vec3::Z,
            ),
            (
                "painting-left",
                2,
                Vec3::new(-wall_face, 5.0, -10.0),
                Vec3::new(0.0, 0.0, paint_half_u),
                Vec3::X,
            ),
            (
                "painting-right",
                3,
                Vec3::new(wall_face, 5.0, -10.0),
                Vec3::new(0.0, 0.0, paint_half_u),
                -Vec3::X,
            ),
        ];

        for (name, index, center, half_u, normal) in paintings {
            let half_v = Vec3::new(0.0, paint_half_v, 0.0);
            surfaces.push(Surface {
                name,
                finish: Finish::Artwork(index),
                mesh: Mesh::quad(center, half_u, half_v, normal, 1.0),
            });
            obstacles.add(Aabb::from_center_half_extents(center, half_u.abs() + half_v));
        }

        tracing::debug!(
            surfaces = surfaces.len(),
            obstacles = obstacles.len(),
            "gallery layout built"
        );

        Gallery {
            surfaces,
            obstacles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_counts() {
        let gallery = Gallery::build();
        // floor + ceiling + 4 walls + 4 paintings
        assert_eq!(gallery.surfaces.len(), 10);
        // 4 walls + 4 paintings get obstacle volumes, floor and ceiling do not
        assert_eq!(gallery.obstacles.len(), 8);
    }

    #[test]
    fn test_spawn_position_is_clear() {
        let gallery = Gallery::build();
        let player = Aabb::from_center_half_extents(SPAWN_POSITION, Vec3::splat(0.5));
        assert_eq!(gallery.obstacles.first_overlap(&player), None);
    }

    #[test]
    fn test_front_wall_volume_spans() {
        let gallery = Gallery::build();
        let probe = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -20.0), Vec3::splat(0.01));
        let id = gallery
            .obstacles
            .first_overlap(&probe)
            .expect("front wall volume missing");
        let wall = gallery.obstacles.get(id).unwrap();
        assert_eq!(wall.min.x, -25.0);
        assert_eq!(wall.max.x, 25.0);
        assert_eq!(wall.min.y, -10.0);
        assert_eq!(wall.max.y, 10.0);
    }

    #[test]
    fn test_player_volume_near_right_wall_overlaps() {
        let gallery = Gallery::build();
        let player = Aabb::from_center_half_extents(Vec3::new(19.6, 0.0, 0.0), Vec3::splat(0.5));
        assert!(gallery.obstacles.overlaps(&player));
    }

    #[test]
    fn test_obstacle_set_ids_resolve() {
        let mut set = ObstacleSet::new();
        assert!(set.is_empty());
        let a = set.add(Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE));
        let b = set.add(Aabb::from_center_half_extents(Vec3::splat(10.0), Vec3::ONE));
        assert_ne!(a, b);
        assert_eq!(set.get(a).unwrap().center(), Vec3::ZERO);
        assert_eq!(set.get(b).unwrap().center(), Vec3::splat(10.0));
    }
}
