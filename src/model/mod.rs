// MODEL: scene data and geometry
pub mod aabb;
pub mod camera;
pub mod gallery;

pub use aabb::Aabb;
pub use camera::Camera;
pub use gallery::{Finish, Gallery, ObstacleId, ObstacleSet, Surface};
