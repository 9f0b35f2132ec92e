//! Exact voxel traversal along a finite ray.
//!
//! [`grid_march`] visits every cell a ray segment passes through, in order,
//! and stops at the first non-empty one; it backs block targeting.
//! [`grid_march_until`] stops at the first cell matching a predicate, which
//! lets player collision pass through liquids.
//!
//! Each step moves the ray to the nearest cell boundary on any axis, so no
//! cell is skipped and the reported distance is exact, not sampled. A ray that
//! starts exactly on a boundary while moving toward negative coordinates is
//! treated as already being in the lower cell. The cell containing the origin
//! is never tested.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::WorldError;
use crate::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// Read access to blocks by world coordinate.
pub trait BlockQuery {
    /// The block at world cell `(x, y, z)`.
    ///
    /// # Errors
    /// [`WorldError::NoChunk`] if the column is not allocated.
    fn block_at(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError>;
}

/// The outcome of a [`grid_march`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarchResult {
    /// The ray entered a cell it stops at.
    Hit {
        /// The entered cell.
        cell: Point3<i32>,
        /// Distance from the origin to the entered face.
        distance: f32,
        /// The face of `cell` the ray entered through.
        side: BlockSide,
    },
    /// The ray ran its full length without stopping.
    Miss {
        /// The length of the ray.
        distance: f32,
    },
}

impl MarchResult {
    /// Distance to the entered face, or the full length on a miss.
    pub fn distance(&self) -> f32 {
        match *self {
            MarchResult::Hit { distance, .. } | MarchResult::Miss { distance } => distance,
        }
    }

    /// The entered cell, if any.
    pub fn cell(&self) -> Option<Point3<i32>> {
        match *self {
            MarchResult::Hit { cell, .. } => Some(cell),
            MarchResult::Miss { .. } => None,
        }
    }

    /// `true` for [`MarchResult::Hit`].
    pub fn is_hit(&self) -> bool {
        matches!(self, MarchResult::Hit { .. })
    }
}

/// Cell index of `p` on one axis for a ray moving with component `d`.
///
/// A position exactly on a boundary belongs to the lower cell when moving
/// toward negative coordinates.
fn cell_coordinate(p: f32, d: f32) -> i32 {
    let floor = p.floor();
    if d < 0.0 && p == floor {
        floor as i32 - 1
    } else {
        floor as i32
    }
}

/// Marches from `origin` along `ray` (whose length is the march distance)
/// until a non-empty cell is entered.
///
/// # Errors
/// - [`WorldError::DegenerateRay`] if `ray` is zero or not finite
/// - [`WorldError::NoChunk`] if the ray enters an unallocated column first
pub fn grid_march(
    origin: Point3<f32>,
    ray: Vector3<f32>,
    world: &impl BlockQuery,
) -> Result<MarchResult, WorldError> {
    grid_march_until(origin, ray, world, |block| !block.is_empty())
}

/// Like [`grid_march`], but stops at the first cell whose block satisfies
/// `stops_at`. Cells that do not match are passed through.
///
/// # Errors
/// Same as [`grid_march`].
pub fn grid_march_until(
    origin: Point3<f32>,
    ray: Vector3<f32>,
    world: &impl BlockQuery,
    stops_at: impl Fn(BlockType) -> bool,
) -> Result<MarchResult, WorldError> {
    let max_len = ray.magnitude();
    if !max_len.is_finite() || max_len <= 0.0 {
        return Err(WorldError::DegenerateRay);
    }
    let dir = ray / max_len;

    let mut position = origin;
    let mut cell = Point3::new(
        cell_coordinate(origin.x, dir.x),
        cell_coordinate(origin.y, dir.y),
        cell_coordinate(origin.z, dir.z),
    );
    let mut traveled = 0.0f32;

    while traveled < max_len {
        let mut step = f32::INFINITY;
        let mut axis = None;
        for i in 0..3 {
            let d = dir[i];
            if d == 0.0 {
                continue;
            }
            let boundary = (if d > 0.0 { cell[i] + 1 } else { cell[i] }) as f32;
            let t = (boundary - position[i]) / d;
            if t < step {
                step = t;
                axis = Some(i);
            }
        }
        let Some(axis) = axis else {
            return Err(WorldError::DegenerateRay);
        };

        let remaining = max_len - traveled;
        if step >= remaining {
            // The ray ends inside the current cell.
            break;
        }

        traveled += step;
        position += dir * step;
        let positive = dir[axis] > 0.0;
        if positive {
            cell[axis] += 1;
            position[axis] = cell[axis] as f32;
        } else {
            position[axis] = cell[axis] as f32;
            cell[axis] -= 1;
        }
        for other in 0..3 {
            if other != axis {
                cell[other] = cell_coordinate(position[other], dir[other]);
            }
        }

        if stops_at(world.block_at(cell.x, cell.y, cell.z)?) {
            return Ok(MarchResult::Hit {
                cell,
                distance: traveled,
                side: BlockSide::entered_along(axis, positive),
            });
        }
    }

    Ok(MarchResult::Miss { distance: max_len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// A sparse world where every column exists.
    #[derive(Default)]
    struct Sparse(HashMap<(i32, i32, i32), BlockType>);

    impl BlockQuery for Sparse {
        fn block_at(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError> {
            Ok(self.0.get(&(x, y, z)).copied().unwrap_or_default())
        }
    }

    fn with_stone(cells: &[(i32, i32, i32)]) -> Sparse {
        Sparse(cells.iter().map(|c| (*c, BlockType::STONE)).collect())
    }

    #[test]
    fn hits_the_near_face() {
        let world = with_stone(&[(0, 0, 2)]);
        let result = grid_march(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, 3.0), &world)
            .expect("march succeeds");
        assert_eq!(
            result,
            MarchResult::Hit {
                cell: Point3::new(0, 0, 2),
                distance: 1.5,
                side: BlockSide::BACK,
            }
        );
    }

    #[test]
    fn miss_reports_the_full_length() {
        let world = Sparse::default();
        let result = grid_march(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, 3.0), &world)
            .expect("march succeeds");
        assert_eq!(result, MarchResult::Miss { distance: 3.0 });
    }

    #[test]
    fn negative_rays_from_a_boundary_test_the_lower_cell() {
        let world = with_stone(&[(0, 4, 0)]);
        let result = grid_march(Point3::new(0.5, 6.0, 0.5), Vector3::new(0.0, -3.0, 0.0), &world)
            .expect("march succeeds");
        assert_eq!(
            result,
            MarchResult::Hit {
                cell: Point3::new(0, 4, 0),
                distance: 1.0,
                side: BlockSide::TOP,
            }
        );
    }

    #[test]
    fn stops_short_of_cells_beyond_the_ray() {
        let world = with_stone(&[(3, 0, 0)]);
        let result = grid_march(Point3::new(0.5, 0.5, 0.5), Vector3::new(2.0, 0.0, 0.0), &world)
            .expect("march succeeds");
        assert!(!result.is_hit());
        assert_eq!(result.distance(), 2.0);
    }

    #[test]
    fn diagonal_rays_visit_every_crossed_cell() {
        let world = with_stone(&[(1, 0, 0)]);
        // Crosses x = 1 at z = 0.75, before reaching z = 1.
        let result = grid_march(Point3::new(0.5, 0.5, 0.5), Vector3::new(2.0, 0.0, 1.0), &world)
            .expect("march succeeds");
        assert_eq!(result.cell(), Some(Point3::new(1, 0, 0)));
        match result {
            MarchResult::Hit { side, distance, .. } => {
                assert_eq!(side, BlockSide::LEFT);
                assert!((distance - 0.5 * 5f32.sqrt() / 2.0).abs() < 1e-5, "{distance}");
            }
            MarchResult::Miss { .. } => panic!("expected a hit"),
        }
    }

    #[test]
    fn predicate_marches_pass_through_liquids() {
        let mut world = with_stone(&[(0, 0, 3)]);
        world.0.insert((0, 0, 1), BlockType::WATER);
        world.0.insert((0, 0, 2), BlockType::LAVA);
        let origin = Point3::new(0.5, 0.5, 0.5);
        let ray = Vector3::new(0.0, 0.0, 4.0);

        let first = grid_march(origin, ray, &world).expect("march succeeds");
        assert_eq!(first.cell(), Some(Point3::new(0, 0, 1)));

        let solid = grid_march_until(origin, ray, &world, BlockType::is_solid)
            .expect("march succeeds");
        assert_eq!(solid.cell(), Some(Point3::new(0, 0, 3)));
        assert_eq!(solid.distance(), 2.5);
    }

    #[test]
    fn zero_ray_is_degenerate() {
        let world = Sparse::default();
        let err = grid_march(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), &world)
            .unwrap_err();
        assert!(matches!(err, WorldError::DegenerateRay));
        let err = grid_march(Point3::new(0.0, 0.0, 0.0), Vector3::new(f32::NAN, 0.0, 1.0), &world)
            .unwrap_err();
        assert!(matches!(err, WorldError::DegenerateRay));
    }

    #[test]
    fn missing_columns_propagate() {
        struct Void;
        impl BlockQuery for Void {
            fn block_at(&self, x: i32, _y: i32, z: i32) -> Result<BlockType, WorldError> {
                Err(WorldError::NoChunk { x, z })
            }
        }
        let err = grid_march(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0), &Void)
            .unwrap_err();
        assert!(matches!(err, WorldError::NoChunk { x: 1, z: 0 }));
    }
}
