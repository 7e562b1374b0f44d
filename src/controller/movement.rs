use glam::Vec3;

use crate::controller::input::MoveIntent;
use crate::model::aabb::Aabb;
use crate::model::gallery::ObstacleSet;
use crate::model::Camera;

/// Walking speed in units per second.
pub const WALK_SPEED: f32 = 5.0;

/// Half-extent of the player volume on each axis (a 1x1x1 box).
pub const PLAYER_HALF_EXTENT: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub speed: f32,
    pub half_extents: Vec3,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: WALK_SPEED,
            half_extents: Vec3::splat(PLAYER_HALF_EXTENT),
        }
    }
}

/// Collision-gated movement: propose a translation from the held directions,
/// test the player volume against every obstacle, commit or revert whole.
pub struct MovementSystem {
    pub config: MovementConfig,
}

impl MovementSystem {
    pub fn new() -> Self {
        Self {
            config: MovementConfig::default(),
        }
    }

    pub fn with_config(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Resolve one frame of movement and return the committed position.
    ///
    /// Forward/backward run along the camera's horizontal view direction,
    /// left/right strafe perpendicular to it; the two compose independently,
    /// so opposite keys cancel and diagonals apply both translations. Any
    /// overlap rejects the whole move and the previous position stands.
    pub fn advance(
        &self,
        camera: &Camera,
        intent: &MoveIntent,
        dt: f32,
        obstacles: &ObstacleSet,
    ) -> Vec3 {
        let previous = camera.eye;
        if dt <= 0.0 || !intent.any() {
            return previous;
        }

        let distance = self.config.speed * dt;
        let forward = camera.horizontal_forward();
        let right = camera.horizontal_right();

        let mut proposed = previous;
        if intent.forward {
            proposed += forward * distance;
        }
        if intent.backward {
            proposed -= forward * distance;
        }
        if intent.right {
            proposed += right * distance;
        }
        if intent.left {
            proposed -= right * distance;
        }

        let volume = Aabb::from_center_half_extents(proposed, self.config.half_extents);
        match obstacles.first_overlap(&volume) {
            Some(id) => {
                tracing::trace!(?id, "movement rejected");
                previous
            }
            None => proposed,
        }
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(eye: Vec3) -> Camera {
        let mut cam = Camera::new(800, 600);
        cam.eye = eye;
        // yaw 0 faces +x, so "forward" walks along the positive x axis
        cam.yaw = 0.0;
        cam
    }

    fn wall_at_x5() -> ObstacleSet {
        let mut obstacles = ObstacleSet::new();
        obstacles.add(Aabb::new(
            Vec3::new(5.0, -10.0, -10.0),
            Vec3::new(6.0, 10.0, 10.0),
        ));
        obstacles
    }

    fn forward() -> MoveIntent {
        MoveIntent {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_elapsed_time_is_a_no_op() {
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::new(1.0, 0.0, 2.0));
        let pos = system.advance(&cam, &forward(), 0.0, &wall_at_x5());
        assert_eq!(pos, cam.eye);
    }

    #[test]
    fn test_negative_elapsed_time_is_a_no_op() {
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let pos = system.advance(&cam, &forward(), -0.25, &wall_at_x5());
        assert_eq!(pos, Vec3::ZERO);
    }

    #[test]
    fn test_no_op_frames_are_idempotent() {
        let system = MovementSystem::new();
        let mut cam = camera_at(Vec3::new(3.0, 0.0, -1.0));
        let obstacles = wall_at_x5();
        let first = system.advance(&cam, &MoveIntent::default(), 0.016, &obstacles);
        cam.eye = first;
        let second = system.advance(&cam, &MoveIntent::default(), 0.016, &obstacles);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_move_commits_exactly() {
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let pos = system.advance(&cam, &forward(), 0.5, &wall_at_x5());
        assert_eq!(pos, Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_move_into_wall_is_fully_rejected() {
        // Proposed (5,0,0): player volume x in [4.5, 5.5] overlaps the wall's
        // [5, 6], so the move is discarded and the player stays at the origin.
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let pos = system.advance(&cam, &forward(), 1.0, &wall_at_x5());
        assert_eq!(pos, Vec3::ZERO);
    }

    #[test]
    fn test_move_short_of_wall_is_committed() {
        // Proposed (4,0,0): player volume x in [3.5, 4.5] clears the wall.
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let pos = system.advance(&cam, &forward(), 0.8, &wall_at_x5());
        assert!((pos.x - 4.0).abs() < 1e-5);
        assert_eq!(pos.y, 0.0);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::new(1.0, 0.0, 1.0));
        let strafe_both = MoveIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(system.advance(&cam, &strafe_both, 0.25, &wall_at_x5()), cam.eye);

        let walk_both = MoveIntent {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert_eq!(system.advance(&cam, &walk_both, 0.25, &wall_at_x5()), cam.eye);
    }

    #[test]
    fn test_diagonal_applies_both_translations() {
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let intent = MoveIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let pos = system.advance(&cam, &intent, 0.2, &ObstacleSet::new());
        // yaw 0: forward is +x, right is +z; each axis gets the full distance
        assert!((pos.x - 1.0).abs() < 1e-6);
        assert!((pos.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_blocked_axis_rejects_whole_diagonal() {
        // Strafing alone would be legal, but the forward component collides,
        // and rejection is all-or-nothing.
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let intent = MoveIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let pos = system.advance(&cam, &intent, 1.0, &wall_at_x5());
        assert_eq!(pos, Vec3::ZERO);
    }

    #[test]
    fn test_no_obstacles_means_free_movement() {
        let system = MovementSystem::new();
        let cam = camera_at(Vec3::ZERO);
        let pos = system.advance(&cam, &forward(), 10.0, &ObstacleSet::new());
        assert_eq!(pos, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_committed_position_never_overlaps() {
        // Walk at a wall for many frames: the player advances until the last
        // clear position and then holds there, never intersecting.
        let system = MovementSystem::new();
        let obstacles = wall_at_x5();
        let mut cam = camera_at(Vec3::ZERO);
        for _ in 0..100 {
            cam.eye = system.advance(&cam, &forward(), 0.05, &obstacles);
            let volume = Aabb::from_center_half_extents(cam.eye, system.config.half_extents);
            assert!(!obstacles.overlaps(&volume));
        }
        // Pinned just short of the wall face at x = 5 - 0.5
        assert!(cam.eye.x > 4.0 && cam.eye.x < 4.5);
    }
}
