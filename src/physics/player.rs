//! A player body that falls, flies and collides with the terrain.
//!
//! Collision is resolved one axis at a time. For each axis the body's
//! displacement is marched from twelve points on its bounding box (the four
//! vertical edges, sampled at the feet, the waist and the head) and cut short
//! at the nearest solid block. Liquids do not collide.

use cgmath::{Point3, Vector3, Zero};

use crate::error::WorldError;
use crate::voxels::block::block_type::BlockType;

use super::grid_march::{grid_march_until, BlockQuery, MarchResult};

/// Width and depth of the player's bounding box.
pub const PLAYER_WIDTH: f32 = 0.8;
/// Height of the player's bounding box.
pub const PLAYER_HEIGHT: f32 = 1.8;
/// Height of the camera above the feet.
pub const EYE_HEIGHT: f32 = 1.5;
/// Fraction of velocity kept from one tick to the next.
pub const DRAG: f32 = 0.9;
/// Downward acceleration when not flying.
pub const GRAVITY: f32 = -20.0;
/// Upward velocity of a jump.
pub const JUMP_SPEED: f32 = 5.0;
/// Gap kept between the body and any block it collides with.
const COLLISION_SKIN: f32 = 1e-3;

/// An axis-aligned body driven by input acceleration, drag and gravity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    /// Center of the feet.
    pub position: Point3<f32>,
    /// Velocity in blocks per second.
    pub velocity: Vector3<f32>,
    /// Acceleration requested by input, applied every tick.
    pub acceleration: Vector3<f32>,
    /// Disables gravity.
    pub flight_mode: bool,
}

impl Player {
    /// A flying player standing at `position`.
    pub fn new(position: Point3<f32>) -> Self {
        Player {
            position,
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
            flight_mode: true,
        }
    }

    /// Eye position, [`EYE_HEIGHT`] above the feet.
    pub fn camera_position(&self) -> Point3<f32> {
        self.position + Vector3::new(0.0, EYE_HEIGHT, 0.0)
    }

    /// Sets the vertical velocity to [`JUMP_SPEED`].
    pub fn jump(&mut self) {
        self.velocity.y = JUMP_SPEED;
    }

    /// Advances the body by `dt` seconds.
    ///
    /// # Errors
    /// [`WorldError::NoChunk`] if the body moves toward an unallocated column.
    pub fn tick(&mut self, dt: f32, world: &impl BlockQuery) -> Result<(), WorldError> {
        self.velocity = self.velocity * DRAG + self.acceleration * dt;
        if !self.flight_mode {
            self.velocity.y += GRAVITY * dt;
        }
        self.move_with_collision(self.velocity * dt, world)?;
        Ok(())
    }

    /// Moves by `displacement`, stopping each axis at the first solid cell.
    ///
    /// Velocity along a blocked axis is zeroed.
    ///
    /// # Returns
    /// The displacement actually applied.
    pub fn move_with_collision(
        &mut self,
        displacement: Vector3<f32>,
        world: &impl BlockQuery,
    ) -> Result<Vector3<f32>, WorldError> {
        let mut applied = Vector3::zero();
        for axis in 0..3 {
            let amount = displacement[axis];
            if amount == 0.0 {
                continue;
            }
            let allowed = self.sweep_axis(axis, amount, world)?;
            if allowed.abs() < amount.abs() {
                self.velocity[axis] = 0.0;
            }
            self.position[axis] += allowed;
            applied[axis] = allowed;
        }
        Ok(applied)
    }

    /// How far the body can travel `amount` along `axis` before touching a solid block.
    fn sweep_axis(&self, axis: usize, amount: f32, world: &impl BlockQuery) -> Result<f32, WorldError> {
        let mut ray = Vector3::zero();
        ray[axis] = amount;

        let mut allowed = amount.abs();
        for corner in self.sample_points() {
            let hit = grid_march_until(corner, ray, world, BlockType::is_solid)?;
            if let MarchResult::Hit { distance, .. } = hit {
                allowed = allowed.min((distance - COLLISION_SKIN).max(0.0));
            }
        }
        Ok(allowed.copysign(amount))
    }

    /// The twelve collision sample points of the bounding box.
    pub fn sample_points(&self) -> [Point3<f32>; 12] {
        let half = PLAYER_WIDTH / 2.0;
        let p = self.position;
        let mut points = [p; 12];
        let mut i = 0;
        for dy in [0.0, PLAYER_HEIGHT / 2.0, PLAYER_HEIGHT] {
            for dx in [-half, half] {
                for dz in [-half, half] {
                    points[i] = Point3::new(p.x + dx, p.y + dy, p.z + dz);
                    i += 1;
                }
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Solid at and below `floor`, open above.
    struct Flat {
        floor: i32,
    }

    impl BlockQuery for Flat {
        fn block_at(&self, _x: i32, y: i32, _z: i32) -> Result<BlockType, WorldError> {
            Ok(if y <= self.floor {
                BlockType::STONE
            } else {
                BlockType::EMPTY
            })
        }
    }

    #[test]
    fn gravity_lands_on_the_floor() {
        let world = Flat { floor: 9 };
        let mut player = Player::new(Point3::new(0.5, 12.0, 0.5));
        player.flight_mode = false;
        for _ in 0..600 {
            player.tick(1.0 / 60.0, &world).expect("world is unbounded");
        }
        assert!(player.position.y >= 10.0, "sank into the floor: {:?}", player.position);
        assert!(player.position.y < 10.01, "still falling: {:?}", player.position);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn players_sink_through_liquid() {
        /// Stone at and below 4, water from 5 to 9.
        struct Pool;
        impl BlockQuery for Pool {
            fn block_at(&self, _x: i32, y: i32, _z: i32) -> Result<BlockType, WorldError> {
                Ok(match y {
                    i32::MIN..=4 => BlockType::STONE,
                    5..=9 => BlockType::WATER,
                    _ => BlockType::EMPTY,
                })
            }
        }
        let mut player = Player::new(Point3::new(0.5, 12.0, 0.5));
        player.flight_mode = false;
        for _ in 0..600 {
            player.tick(1.0 / 60.0, &Pool).expect("world is unbounded");
        }
        assert!(
            player.position.y >= 5.0 && player.position.y < 5.01,
            "should rest on the pool floor: {:?}",
            player.position
        );
    }

    #[test]
    fn flying_players_hover() {
        let world = Flat { floor: 0 };
        let mut player = Player::new(Point3::new(0.5, 12.0, 0.5));
        player.tick(1.0 / 60.0, &world).expect("world is unbounded");
        assert_eq!(player.position.y, 12.0);
    }

    #[test]
    fn walls_stop_horizontal_motion() {
        struct Wall;
        impl BlockQuery for Wall {
            fn block_at(&self, x: i32, _y: i32, _z: i32) -> Result<BlockType, WorldError> {
                Ok(if x >= 3 { BlockType::STONE } else { BlockType::EMPTY })
            }
        }
        let mut player = Player::new(Point3::new(1.5, 10.0, 0.5));
        let applied = player
            .move_with_collision(Vector3::new(5.0, 0.0, 0.0), &Wall)
            .expect("world is unbounded");
        assert!(applied.x < 1.1 && applied.x > 1.09, "{applied:?}");
        assert!(player.position.x + PLAYER_WIDTH / 2.0 < 3.0);
    }

    #[test]
    fn sample_points_cover_the_box() {
        let player = Player::new(Point3::new(0.0, 0.0, 0.0));
        let points = player.sample_points();
        assert!(points.iter().all(|p| p.x.abs() == 0.4 && p.z.abs() == 0.4));
        assert_eq!(points.iter().filter(|p| p.y == PLAYER_HEIGHT).count(), 4);
        assert_eq!(points.iter().filter(|p| p.y == 0.0).count(), 4);
    }
}
